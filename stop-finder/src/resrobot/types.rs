//! ResRobot API response DTOs.
//!
//! These types map directly to the ResRobot v2.1 JSON responses. They use
//! `Option` liberally because ResRobot omits fields rather than sending null
//! values, and older response shapes (still produced by some proxies and by
//! the canned fallback) nest things differently.

use serde::{Deserialize, Serialize};

/// A number that may arrive as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The numeric value, or `NaN` if the text does not parse.
    pub fn as_f64(&self) -> f64 {
        match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

/// One value or a list of them.
///
/// v2.1 sends `Product` as an array; older responses send a single object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(t) => Some(t),
            OneOrMany::Many(v) => v.first(),
        }
    }
}

/// Response from `location.nearbystops`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyStopsResponse {
    /// v2.1 shape: each entry wraps either a stop or a bare coordinate.
    #[serde(
        rename = "stopLocationOrCoordLocation",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_location_or_coord_location: Option<Vec<StopOrCoordLocation>>,

    /// Older shape: a flat list of stops.
    #[serde(rename = "StopLocation", skip_serializing_if = "Option::is_none")]
    pub stop_location: Option<Vec<StopLocationDto>>,
}

/// Entry of the v2.1 nearby-stops list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopOrCoordLocation {
    #[serde(rename = "StopLocation", skip_serializing_if = "Option::is_none")]
    pub stop_location: Option<StopLocationDto>,

    /// Address or POI hits; never a stop, so only its presence matters.
    #[serde(rename = "CoordLocation", skip_serializing_if = "Option::is_none")]
    pub coord_location: Option<serde_json::Value>,
}

/// A stop in a nearby-stops response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLocationDto {
    /// Long HAFAS id ("A=1@O=...").
    pub id: Option<String>,

    /// Short numeric id used by the departure board.
    pub ext_id: Option<String>,

    /// Stop name; a stop without one is skipped during conversion.
    pub name: Option<String>,

    /// Latitude, unit not stated.
    pub lat: Option<LooseNumber>,

    /// Longitude, unit not stated.
    pub lon: Option<LooseNumber>,

    /// Server-computed distance in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<LooseNumber>,

    /// Popularity weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<LooseNumber>,
}

/// Response from `departureBoard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartureBoardResponse {
    #[serde(rename = "Departure", default)]
    pub departure: Vec<DepartureDto>,
}

/// A departure on the board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    /// Product name, e.g. "Länstrafik - Buss 2".
    pub name: Option<String>,

    /// Product type; "ST" on v2.1 boards, "BUS" from the canned fallback.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Board stop name.
    pub stop: Option<String>,

    /// Scheduled departure, "HH:MM:SS" (or "H:MM" from the fallback).
    /// A departure without one is skipped during conversion.
    pub time: Option<String>,

    pub date: Option<String>,

    /// Destination text.
    #[serde(default)]
    pub direction: String,

    /// Product as seen at this stop (v2.1).
    #[serde(rename = "ProductAtStop", skip_serializing_if = "Option::is_none")]
    pub product_at_stop: Option<ProductDto>,

    /// Product list (v2.1) or single product (older).
    #[serde(rename = "Product", skip_serializing_if = "Option::is_none")]
    pub product: Option<OneOrMany<ProductDto>>,

    #[serde(rename = "JourneyDetailRef", skip_serializing_if = "Option::is_none")]
    pub journey_detail_ref: Option<JourneyDetailRef>,

    /// Pass list, present when the board was requested with `passlist=1`.
    #[serde(rename = "Stops", skip_serializing_if = "Option::is_none")]
    pub stops: Option<StopList>,
}

/// Line and mode information for a departure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub name: Option<String>,
    pub num: Option<String>,
    pub line: Option<String>,
    pub display_number: Option<String>,
    pub cat_out: Option<String>,
    pub cat_out_s: Option<String>,
    pub cat_out_l: Option<String>,
    pub cat_in: Option<String>,
    pub cat_in_s: Option<String>,
    pub cat_in_l: Option<String>,
    pub cat_code: Option<String>,
    pub operator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyDetailRef {
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Wrapper around a list of journey stops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopList {
    #[serde(rename = "Stop", default)]
    pub stop: Vec<JourneyStopDto>,
}

/// A stop in a journey detail or departure pass list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStopDto {
    pub name: Option<String>,
    pub ext_id: Option<String>,
    pub route_idx: Option<u32>,
    /// Scheduled arrival, "HH:MM:SS". Absent at the origin.
    pub arr_time: Option<String>,
    /// Scheduled departure, "HH:MM:SS". Absent at the terminus.
    pub dep_time: Option<String>,
}

/// Response from `journeyDetail`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JourneyDetailResponse {
    #[serde(rename = "Stops", default)]
    pub stops: StopList,
}
