//! Stop sequence of a single scheduled journey.

/// One stop along a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyStop {
    pub name: String,
    /// Scheduled arrival, "HH:MM". Absent at the origin.
    pub arrival_time: Option<String>,
}

impl JourneyStop {
    pub fn new(name: impl Into<String>, arrival_time: Option<&str>) -> Self {
        Self {
            name: name.into(),
            arrival_time: arrival_time.map(str::to_string),
        }
    }
}

/// The ordered stops of one journey, as returned by a journey-detail query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneyDetail {
    pub stops: Vec<JourneyStop>,
}

impl JourneyDetail {
    pub fn new(stops: Vec<JourneyStop>) -> Self {
        Self { stops }
    }

    /// The last stop, if the journey has any.
    pub fn terminus(&self) -> Option<&JourneyStop> {
        self.stops.last()
    }
}
