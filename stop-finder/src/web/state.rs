//! Application state for the web layer.

use std::sync::Arc;

use crate::resrobot::TransitSource;

use super::board::DisplayBoard;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Transit data source (live, cached, with or without fallback)
    pub source: Arc<dyn TransitSource>,

    /// Selection currently on display
    pub board: Arc<DisplayBoard>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(source: impl TransitSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            board: Arc::new(DisplayBoard::new()),
        }
    }
}
