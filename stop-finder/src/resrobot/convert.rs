//! Conversion from ResRobot DTOs to domain types.
//!
//! Conversion never fails as a whole: records that cannot be used are skipped
//! with a log line, so one malformed entry does not hide the rest of a board.
//! Coordinates are passed through untagged; deciding their unit is the
//! selector's job.

use chrono::NaiveTime;
use tracing::debug;

use crate::domain::{
    CategoryFields, Departure, JourneyDetail, JourneyStop, RawCoordinate, Stop,
};

use super::types::{
    DepartureBoardResponse, DepartureDto, JourneyDetailResponse, NearbyStopsResponse, ProductDto,
    StopList, StopLocationDto,
};

/// Reduce an upstream clock time to "HH:MM".
///
/// Accepts "HH:MM:SS", "HH:MM" and unpadded hours ("9:05"). Anything else is
/// returned trimmed but otherwise unchanged, since the time is display-only.
pub fn clock_time(raw: &str) -> String {
    let raw = raw.trim();
    ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Convert a nearby-stops response, accepting both response shapes.
pub fn convert_nearby_stops(response: &NearbyStopsResponse) -> Vec<Stop> {
    let wrapped = response
        .stop_location_or_coord_location
        .iter()
        .flatten()
        .filter_map(|entry| entry.stop_location.as_ref());
    let flat = response.stop_location.iter().flatten();

    wrapped.chain(flat).filter_map(convert_stop).collect()
}

fn convert_stop(dto: &StopLocationDto) -> Option<Stop> {
    let Some(external_id) = dto.ext_id.as_ref().or(dto.id.as_ref()) else {
        debug!(name = ?dto.name, "skipping stop without id");
        return None;
    };
    let Some(name) = dto.name.as_ref() else {
        debug!(%external_id, "skipping stop without name");
        return None;
    };

    // Missing coordinates become NaN and are rejected during selection,
    // keeping the stop visible to callers that only list stops.
    let lat = dto.lat.as_ref().map_or(f64::NAN, |n| n.as_f64());
    let lon = dto.lon.as_ref().map_or(f64::NAN, |n| n.as_f64());

    Some(Stop {
        external_id: external_id.clone(),
        name: name.clone(),
        raw_latitude: RawCoordinate::untagged(lat),
        raw_longitude: RawCoordinate::untagged(lon),
        distance_meters: dto.dist.as_ref().map(|d| d.as_f64()).filter(|d| d.is_finite()),
    })
}

/// ProductAtStop describes the product at this stop; the Product list
/// describes the whole journey. Fields are taken from the former first.
struct Products<'a> {
    at_stop: Option<&'a ProductDto>,
    journey: Option<&'a ProductDto>,
}

impl Products<'_> {
    fn field<F>(&self, f: F) -> Option<String>
    where
        F: Fn(&ProductDto) -> Option<&String>,
    {
        self.at_stop
            .and_then(&f)
            .or_else(|| self.journey.and_then(&f))
            .cloned()
    }
}

/// Convert a departure board, preserving upstream order.
pub fn convert_departures(board: &DepartureBoardResponse) -> Vec<Departure> {
    board.departure.iter().filter_map(convert_departure).collect()
}

fn convert_departure(dto: &DepartureDto) -> Option<Departure> {
    let Some(time) = dto.time.as_deref() else {
        debug!(direction = %dto.direction, "skipping departure without time");
        return None;
    };

    let products = Products {
        at_stop: dto.product_at_stop.as_ref(),
        journey: dto.product.as_ref().and_then(|p| p.first()),
    };

    let categories = CategoryFields {
        outbound_category: products.field(|p| p.cat_out.as_ref()),
        outbound_category_label: products.field(|p| p.cat_out_l.as_ref()),
        inbound_category: products.field(|p| p.cat_in.as_ref()),
        inbound_category_label: products.field(|p| p.cat_in_l.as_ref()),
        product_name: products.field(|p| p.name.as_ref()).or_else(|| dto.name.clone()),
        product_type: dto.kind.clone(),
        category_code: products.field(|p| p.cat_code.as_ref()),
    };

    let line_identifier = products
        .field(|p| p.display_number.as_ref())
        .or_else(|| products.field(|p| p.num.as_ref()))
        .or_else(|| products.field(|p| p.line.as_ref()));

    let arrival_hint = dto
        .stops
        .as_ref()
        .and_then(|stops| convert_stop_list(stops).terminus().cloned())
        .and_then(|terminus| terminus.arrival_time);

    Some(Departure {
        scheduled_time: clock_time(time),
        direction: dto.direction.clone(),
        line_identifier,
        line_name: products.field(|p| p.name.as_ref()).or_else(|| dto.name.clone()),
        categories,
        journey_reference: dto
            .journey_detail_ref
            .as_ref()
            .map(|r| r.reference.clone()),
        arrival_hint,
    })
}

/// Convert a journey-detail response.
pub fn convert_journey(response: &JourneyDetailResponse) -> JourneyDetail {
    convert_stop_list(&response.stops)
}

fn convert_stop_list(list: &StopList) -> JourneyDetail {
    JourneyDetail::new(
        list.stop
            .iter()
            .filter_map(|s| {
                let Some(name) = s.name.as_ref() else {
                    debug!(route_idx = ?s.route_idx, "skipping journey stop without name");
                    return None;
                };
                Some(JourneyStop {
                    name: name.clone(),
                    arrival_time: s.arr_time.as_deref().map(clock_time),
                })
            })
            .collect(),
    )
}
