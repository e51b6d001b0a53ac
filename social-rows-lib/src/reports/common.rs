//! Common utilities shared across report generators.

use crate::fields::FieldValue;
use crate::normalize::Table;

/// Format a cell as text.
///
/// Whole numbers print without decimals, other numbers with two. Dates print as YYYY-MM-DD.
pub fn format_field_value(value: &FieldValue) -> String {
    value.to_string()
}

/// Check if a string is a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Format every cell of a table, row by row
pub fn format_rows(table: &Table) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| row.values().iter().map(format_field_value).collect())
        .collect()
}
