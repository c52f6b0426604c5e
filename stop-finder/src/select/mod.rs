//! Stop resolution and departure selection.
//!
//! Given the stops near a user and a stop's departure board, decide which
//! stop is closest, which departures are buses, which of those the user asked
//! for, and when that bus arrives at its destination.
//!
//! Everything here except [`arrival::resolve_departure_arrival`] and
//! [`pipeline::run_selection`] is a pure function of its inputs.

mod arrival;
mod classify;
mod error;
mod nearest;
mod ordinal;
mod pipeline;

pub use arrival::{ArrivalResolution, resolve_arrival, resolve_departure_arrival};
pub use classify::{BusHeuristic, DepartureClassifier, filter_buses, filter_with, is_bus_departure};
pub use error::SelectionError;
pub use nearest::{NearestStop, select_nearest};
pub use ordinal::select_nth;
pub use pipeline::{SelectionRequest, SelectionResult, run_selection, run_selection_with};
