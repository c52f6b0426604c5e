//! ResRobot (Samtrafiken) travel-planner client.
//!
//! This module provides an HTTP client for the ResRobot v2.1 API and the
//! data-source abstraction the selection pipeline consumes.
//!
//! Key characteristics of ResRobot:
//! - Authentication is an `accessId` query parameter, not a header
//! - Stop coordinates carry no unit; v2.1 sends decimal degrees, some older
//!   responses and the canned fallback send microdegrees
//! - Times are "HH:MM:SS" local time; we keep "HH:MM"
//! - Departure boards carry a `JourneyDetailRef` per departure, which is the
//!   only way to learn the arrival time at the destination

mod client;
mod convert;
mod error;
mod fallback;
mod mock;
mod source;
mod types;

pub use client::{ResRobotClient, ResRobotConfig};
pub use convert::{clock_time, convert_departures, convert_journey, convert_nearby_stops};
pub use error::ResRobotError;
pub use fallback::FallbackSource;
pub use mock::CannedSource;
pub use source::{NearbyQuery, TransitSource};
pub use types::{
    DepartureBoardResponse, DepartureDto, JourneyDetailResponse, NearbyStopsResponse,
    ProductDto, StopLocationDto,
};
