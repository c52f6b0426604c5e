//! Scheduled departures from a stop.

/// Mode hints attached to a departure.
///
/// Upstream departure boards are inconsistent about which field carries the
/// transport mode, so every candidate field is kept. All are optional because
/// upstream omits fields rather than sending nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFields {
    /// Outbound category (`catOut`), e.g. "BUS".
    pub outbound_category: Option<String>,
    /// Outbound category label (`catOutL`), e.g. "Buss".
    pub outbound_category_label: Option<String>,
    /// Inbound category (`catIn`).
    pub inbound_category: Option<String>,
    /// Inbound category label (`catInL`).
    pub inbound_category_label: Option<String>,
    /// Product name, e.g. "Länstrafik - Buss 1".
    pub product_name: Option<String>,
    /// Product type, e.g. "BUS".
    pub product_type: Option<String>,
    /// Numeric category code (`catCode`).
    pub category_code: Option<String>,
}

impl CategoryFields {
    /// Fields whose text names a mode, in a fixed order.
    ///
    /// The category code is excluded; it is a number, not a mode name.
    pub fn mode_texts(&self) -> impl Iterator<Item = &str> {
        [
            &self.outbound_category,
            &self.outbound_category_label,
            &self.inbound_category,
            &self.inbound_category_label,
            &self.product_name,
            &self.product_type,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
    }

    /// Only an outbound category, the most common shape in tests.
    pub fn outbound(category: impl Into<String>) -> Self {
        Self {
            outbound_category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// A departure on a stop's departure board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Departure {
    /// Scheduled departure time, "HH:MM".
    pub scheduled_time: String,
    /// Free-text destination, e.g. "Centralstationen (Stockholm kn)".
    pub direction: String,
    /// Line number as shown to passengers.
    pub line_identifier: Option<String>,
    /// Line or product name.
    pub line_name: Option<String>,
    pub categories: CategoryFields,
    /// Opaque reference for a journey-detail query.
    pub journey_reference: Option<String>,
    /// Final arrival time carried on the departure record itself, if any.
    pub arrival_hint: Option<String>,
}

impl Departure {
    /// A departure with a time and direction and nothing else.
    pub fn new(scheduled_time: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            scheduled_time: scheduled_time.into(),
            direction: direction.into(),
            ..Self::default()
        }
    }

    pub fn with_categories(mut self, categories: CategoryFields) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_line(mut self, identifier: impl Into<String>) -> Self {
        self.line_identifier = Some(identifier.into());
        self
    }

    pub fn with_journey_reference(mut self, reference: impl Into<String>) -> Self {
        self.journey_reference = Some(reference.into());
        self
    }

    pub fn with_arrival_hint(mut self, time: impl Into<String>) -> Self {
        self.arrival_hint = Some(time.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_texts_skips_missing_and_code() {
        let fields = CategoryFields {
            outbound_category: Some("BUS".into()),
            product_type: Some("Buss".into()),
            category_code: Some("7".into()),
            ..CategoryFields::default()
        };
        let texts: Vec<&str> = fields.mode_texts().collect();
        assert_eq!(texts, vec!["BUS", "Buss"]);
    }

    #[test]
    fn builder() {
        let dep = Departure::new("14:05", "Slussen")
            .with_categories(CategoryFields::outbound("BUS"))
            .with_line("2")
            .with_journey_reference("1|1234|0|1|18102026");
        assert_eq!(dep.scheduled_time, "14:05");
        assert_eq!(dep.line_identifier.as_deref(), Some("2"));
        assert_eq!(dep.categories.outbound_category.as_deref(), Some("BUS"));
        assert!(dep.arrival_hint.is_none());
    }
}
