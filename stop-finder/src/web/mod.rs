//! Web layer for the stop finder.
//!
//! Provides proxy endpoints for the three ResRobot queries, the selection
//! endpoint, and the display state shared between selections.

mod board;
mod dto;
mod routes;
mod state;

pub use board::DisplayBoard;
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
