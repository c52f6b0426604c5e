//! Selection error types.

/// Reasons a selection produced nothing to show.
///
/// None of these are fatal; the caller decides what to tell the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// No candidate stop had a usable position.
    #[error("no valid stop found ({examined} examined, {rejected} rejected)")]
    NoValidStop { examined: usize, rejected: usize },

    /// The chosen stop has departures, but none of them are buses.
    #[error("no bus departures from {stop}")]
    NoBusDepartures { stop: String },

    /// The requested 1-based ordinal does not exist.
    #[error("departure {ordinal} requested but only {available} available")]
    OrdinalOutOfRange { ordinal: usize, available: usize },

    /// A nearby-stop or departure-board query failed.
    #[error("upstream query failed: {0}")]
    Upstream(String),
}
