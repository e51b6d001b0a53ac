use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Semantic type of an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Percent,
    Date,
    Boolean,
    Url,
}

impl FieldType {
    /// Dimensions describe a row, metrics measure it
    #[must_use]
    pub const fn is_dimension(self) -> bool {
        matches!(self, Self::Text | Self::Date | Self::Boolean | Self::Url)
    }

    /// Storage type as understood by the reporting tool
    #[must_use]
    pub const fn data_type(self) -> &'static str {
        match self {
            Self::Number | Self::Percent => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::Text | Self::Date | Self::Url => "STRING",
        }
    }

    /// Semantic type as understood by the reporting tool
    #[must_use]
    pub const fn semantic_type(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Percent => "PERCENT",
            Self::Date => "YEAR_MONTH_DAY",
            Self::Boolean => "BOOLEAN",
            Self::Url => "URL",
        }
    }
}

/// How the reporting tool rolls a metric up across rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregation {
    Sum,
    Max,
    Average,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_dimensions() {
        let dimensions: Vec<_> = FieldType::iter().filter(|t| t.is_dimension()).collect();
        assert_eq!(dimensions, vec![FieldType::Text, FieldType::Date, FieldType::Boolean, FieldType::Url]);
    }

    #[test]
    fn test_reporting_types() {
        assert_eq!(FieldType::Percent.data_type(), "NUMBER");
        assert_eq!(FieldType::Percent.semantic_type(), "PERCENT");
        assert_eq!(FieldType::Date.data_type(), "STRING");
        assert_eq!(FieldType::Date.semantic_type(), "YEAR_MONTH_DAY");
        assert_eq!(FieldType::Boolean.data_type(), "BOOLEAN");
    }

    #[test]
    fn test_aggregation_display() {
        assert_eq!(Aggregation::Average.to_string(), "AVERAGE");
        assert_eq!(Aggregation::Sum.to_string(), "SUM");
    }
}
