//! Bus departure classification.
//!
//! Departure boards mix every mode that calls at a stop. Which field names the
//! mode varies between responses, so the default heuristic looks at all of
//! them. The heuristic sits behind [`DepartureClassifier`] so a network with
//! different conventions can swap it out without touching selection.

use crate::domain::Departure;

/// Decides whether a departure counts as a bus.
pub trait DepartureClassifier {
    fn is_bus(&self, departure: &Departure) -> bool;
}

/// Default bus heuristic.
///
/// A departure is a bus when any mode text contains "bus" (case-insensitive,
/// which also covers the Swedish "buss"), or when it carries both a line
/// identifier and a category code. The second rule treats any line-based
/// service with a category code as surface transit, so it will also accept
/// some trains and trams on networks that fill in both fields for every mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusHeuristic;

impl DepartureClassifier for BusHeuristic {
    fn is_bus(&self, departure: &Departure) -> bool {
        let named_bus = departure
            .categories
            .mode_texts()
            .any(|text| text.to_lowercase().contains("bus"));

        named_bus
            || (has_text(departure.line_identifier.as_deref())
                && has_text(departure.categories.category_code.as_deref()))
    }
}

fn has_text(field: Option<&str>) -> bool {
    field.is_some_and(|s| !s.trim().is_empty())
}

/// Whether a departure is a bus under the default heuristic.
pub fn is_bus_departure(departure: &Departure) -> bool {
    BusHeuristic.is_bus(departure)
}

/// Keep only bus departures, preserving upstream order.
pub fn filter_buses(departures: Vec<Departure>) -> Vec<Departure> {
    filter_with(&BusHeuristic, departures)
}

/// Keep only departures the given classifier accepts, preserving order.
pub fn filter_with<C: DepartureClassifier + ?Sized>(
    classifier: &C,
    departures: Vec<Departure>,
) -> Vec<Departure> {
    departures
        .into_iter()
        .filter(|d| classifier.is_bus(d))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::CategoryFields;
    use proptest::prelude::*;

    fn arb_departure() -> impl Strategy<Value = Departure> {
        (
            "[A-Z][a-z]{2,8}",
            prop::sample::select(vec!["BUS", "TRAIN", "TRAM", "METRO", "Buss", "Tåg"]),
            prop::option::of("[0-9]{1,3}"),
            prop::option::of("[0-9]"),
        )
            .prop_map(|(direction, mode, line, code)| {
                let mut d = Departure::new("12:00", direction).with_categories(CategoryFields {
                    category_code: code,
                    ..CategoryFields::outbound(mode)
                });
                d.line_identifier = line;
                d
            })
    }

    proptest! {
        /// Survivors keep their relative input order.
        #[test]
        fn filter_preserves_order(departures in prop::collection::vec(arb_departure(), 0..20)) {
            let tagged: Vec<Departure> = departures
                .into_iter()
                .enumerate()
                .map(|(i, d)| d.with_journey_reference(i.to_string()))
                .collect();

            let buses = filter_buses(tagged);
            let order: Vec<usize> = buses
                .iter()
                .map(|d| d.journey_reference.as_deref().unwrap().parse().unwrap())
                .collect();

            for pair in order.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        /// Filtering is exactly the predicate applied element-wise.
        #[test]
        fn filter_matches_predicate(departures in prop::collection::vec(arb_departure(), 0..20)) {
            let expected: Vec<Departure> = departures
                .iter()
                .filter(|d| is_bus_departure(d))
                .cloned()
                .collect();
            prop_assert_eq!(filter_buses(departures), expected);
        }
    }
}
