use super::{Aggregation, FieldDef, FieldType, field_def};
use compact_str::CompactString;

/// One requested output column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: CompactString,
    pub field_type: FieldType,
    pub aggregation: Option<Aggregation>,
}

impl FieldSpec {
    #[must_use]
    pub fn from_def(def: &FieldDef) -> Self {
        Self {
            id: CompactString::const_new(def.id),
            field_type: def.field_type,
            aggregation: def.aggregation,
        }
    }

    /// Column for an id missing from the catalogue. It is kept so the output width stays stable.
    #[must_use]
    pub fn unknown(id: impl Into<CompactString>) -> Self {
        Self {
            id: id.into(),
            field_type: FieldType::Number,
            aggregation: Some(Aggregation::Sum),
        }
    }

    #[must_use]
    pub const fn is_dimension(&self) -> bool {
        self.field_type.is_dimension()
    }

    #[must_use]
    pub fn def(&self) -> Option<&'static FieldDef> {
        field_def(&self.id)
    }

    /// Human readable column name, falling back to the id
    #[must_use]
    pub fn label(&self) -> &str {
        self.def().map_or(self.id.as_str(), |def| def.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_def() {
        let spec = FieldSpec::from_def(field_def("engagement_rate").unwrap());
        assert_eq!(spec.id, "engagement_rate");
        assert_eq!(spec.field_type, FieldType::Percent);
        assert_eq!(spec.aggregation, Some(Aggregation::Average));
        assert!(!spec.is_dimension());
        assert_eq!(spec.label(), "Engagement Rate");
    }

    #[test]
    fn test_unknown() {
        let spec = FieldSpec::unknown("mystery_metric");
        assert_eq!(spec.field_type, FieldType::Number);
        assert_eq!(spec.aggregation, Some(Aggregation::Sum));
        assert!(spec.def().is_none());
        assert_eq!(spec.label(), "mystery_metric");
    }

    #[test]
    fn test_dimension() {
        let spec = FieldSpec::from_def(field_def("date").unwrap());
        assert!(spec.is_dimension());
        assert_eq!(spec.aggregation, None);
    }
}
