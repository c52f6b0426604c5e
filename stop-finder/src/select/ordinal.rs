//! Ordinal departure selection.

use crate::domain::Departure;

use super::error::SelectionError;

/// Pick the `ordinal`-th departure, counting from 1.
///
/// Ordinal 0, an ordinal past the end, or an empty list all fail with
/// [`SelectionError::OrdinalOutOfRange`]; the ordinal is never clamped.
pub fn select_nth(buses: &[Departure], ordinal: usize) -> Result<&Departure, SelectionError> {
    ordinal
        .checked_sub(1)
        .and_then(|index| buses.get(index))
        .ok_or(SelectionError::OrdinalOutOfRange {
            ordinal,
            available: buses.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryFields;
    use crate::select::filter_buses;

    fn buses() -> Vec<Departure> {
        vec![
            Departure::new("10:00", "City Center"),
            Departure::new("10:15", "Shopping Mall"),
        ]
    }

    #[test]
    fn first_is_ordinal_one() {
        let list = buses();
        assert_eq!(select_nth(&list, 1).unwrap().direction, "City Center");
        assert_eq!(select_nth(&list, 2).unwrap().direction, "Shopping Mall");
    }

    #[test]
    fn past_the_end_is_out_of_range() {
        let err = select_nth(&buses(), 99).unwrap_err();
        assert_eq!(
            err,
            SelectionError::OrdinalOutOfRange {
                ordinal: 99,
                available: 2
            }
        );
    }

    #[test]
    fn zero_is_out_of_range() {
        assert!(matches!(
            select_nth(&buses(), 0),
            Err(SelectionError::OrdinalOutOfRange { ordinal: 0, .. })
        ));
    }

    #[test]
    fn empty_list_is_out_of_range() {
        assert_eq!(
            select_nth(&[], 1).unwrap_err(),
            SelectionError::OrdinalOutOfRange {
                ordinal: 1,
                available: 0
            }
        );
    }

    #[test]
    fn picks_from_filtered_board() {
        let board = vec![
            Departure::new("09:58", "Mall").with_categories(CategoryFields::outbound("TRAIN")),
            Departure::new("10:02", "Center").with_categories(CategoryFields::outbound("BUS")),
        ];
        let buses = filter_buses(board);
        let chosen = select_nth(&buses, 1).unwrap();
        assert_eq!(chosen.direction, "Center");
        assert_eq!(chosen, &buses[0]);
    }
}
