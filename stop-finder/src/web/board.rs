//! The selection currently on display.
//!
//! Selections run concurrently and can finish out of order. Each request takes
//! a ticket when it starts; a finished selection is displayed only if no newer
//! request has started since. Older results are still returned to their own
//! caller, marked as superseded.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use super::dto::SelectionResponse;

/// Shared display state for the web layer.
#[derive(Debug, Default)]
pub struct DisplayBoard {
    latest_ticket: AtomicU64,
    current: RwLock<Option<SelectionResponse>>,
}

impl DisplayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request. Tickets are strictly increasing, starting at 1.
    pub fn begin(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a newer request has started since `ticket`.
    pub fn is_superseded(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) != ticket
    }

    /// Display `response` unless a newer request has started.
    ///
    /// Returns the response with `superseded` set accordingly.
    pub async fn publish(&self, mut response: SelectionResponse) -> SelectionResponse {
        let mut current = self.current.write().await;

        response.superseded = self.is_superseded(response.ticket);
        if response.superseded {
            debug!(ticket = response.ticket, "discarding superseded selection");
        } else {
            *current = Some(response.clone());
        }

        response
    }

    /// The selection on display, if any.
    pub async fn current(&self) -> Option<SelectionResponse> {
        self.current.read().await.clone()
    }
}
