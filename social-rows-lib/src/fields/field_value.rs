use super::FieldType;
use chrono::NaiveDate;
use compact_str::CompactString;
use core::fmt::{Display, Formatter};

/// A single normalized cell
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(CompactString),
    Boolean(bool),
    Date(NaiveDate),
}

impl FieldValue {
    #[must_use]
    pub const fn zero() -> Self {
        Self::Number(0.0)
    }

    /// Value emitted for a field whose source keys are all absent
    #[must_use]
    pub const fn default_for(field_type: FieldType, today: NaiveDate) -> Self {
        match field_type {
            FieldType::Number | FieldType::Percent => Self::Number(0.0),
            FieldType::Text | FieldType::Url => Self::Text(CompactString::const_new("")),
            FieldType::Boolean => Self::Boolean(false),
            FieldType::Date => Self::Date(today),
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) if n.fract().abs() < f64::EPSILON && n.abs() < 1e15 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n:.2}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}
