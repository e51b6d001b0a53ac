use chrono::NaiveDate;

/// Settings that influence how records are normalized.
///
/// Passed explicitly into every normalization call so that output never depends on ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeContext {
    /// Value used for date fields that a record does not carry
    pub today: NaiveDate,

    /// Impressions count assumed by ratio fields when a record has no impressions key at all
    pub missing_impressions_placeholder: Option<f64>,
}

impl NormalizeContext {
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today,
            missing_impressions_placeholder: None,
        }
    }

    #[must_use]
    pub const fn with_impressions_placeholder(mut self, placeholder: Option<f64>) -> Self {
        self.missing_impressions_placeholder = placeholder;
        self
    }
}
