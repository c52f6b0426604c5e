//! Nearest-stop selection.

use tracing::{debug, warn};

use crate::domain::{GeoPoint, Stop, distance_meters};

use super::error::SelectionError;

/// The stop closest to a reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestStop<'a> {
    pub stop: &'a Stop,
    /// Normalized position of the stop.
    pub position: GeoPoint,
    /// Haversine distance from the reference point.
    pub distance_meters: f64,
}

/// Pick the candidate closest to `reference`.
///
/// Each candidate's raw coordinates are normalized and validated; invalid
/// candidates are skipped without aborting the scan. Ties go to the candidate
/// listed first. Returns [`SelectionError::NoValidStop`] when the list is
/// empty or every candidate is invalid.
pub fn select_nearest(
    candidates: &[Stop],
    reference: GeoPoint,
) -> Result<NearestStop<'_>, SelectionError> {
    let mut best: Option<NearestStop<'_>> = None;
    let mut rejected = 0;

    for stop in candidates {
        let position = match stop.position() {
            Ok(p) => p,
            Err(e) => {
                warn!(stop_id = %stop.external_id, name = %stop.name, "skipping stop: {e}");
                rejected += 1;
                continue;
            }
        };

        let distance = distance_meters(reference, position);
        debug!(stop_id = %stop.external_id, distance, "candidate stop");

        // Strict comparison keeps the first of equally distant stops
        if best.as_ref().is_none_or(|b| distance < b.distance_meters) {
            best = Some(NearestStop {
                stop,
                position,
                distance_meters: distance,
            });
        }
    }

    best.ok_or(SelectionError::NoValidStop {
        examined: candidates.len(),
        rejected,
    })
}
