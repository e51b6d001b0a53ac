use crate::Result;
use crate::fields::{FieldSpec, FieldValue};
use crate::normalize::Table;
use core::fmt::Write;
use serde_json::{Value, json};

/// Write a table as `{ "schema": [...], "rows": [{ "values": [...] }] }`
pub fn generate<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| json!({ "values": row.values().iter().map(field_value_to_json).collect::<Vec<_>>() }))
        .collect();

    let output = json!({
        "schema": schema_json(&table.schema),
        "rows": rows
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

/// Describe the columns of a table the way the reporting tool expects them
#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
#[must_use]
pub fn schema_json(fields: &[FieldSpec]) -> Value {
    let entries: Vec<Value> = fields
        .iter()
        .map(|spec| {
            let mut entry = serde_json::Map::new();
            entry.insert("name".to_string(), json!(spec.id.as_str()));
            entry.insert("label".to_string(), json!(spec.label()));
            entry.insert("dataType".to_string(), json!(spec.field_type.data_type()));
            entry.insert("semanticType".to_string(), json!(spec.field_type.semantic_type()));
            entry.insert(
                "conceptType".to_string(),
                json!(if spec.is_dimension() { "DIMENSION" } else { "METRIC" }),
            );
            if let Some(aggregation) = spec.aggregation {
                entry.insert("aggregation".to_string(), json!(aggregation.to_string()));
            }
            if let Some(def) = spec.def() {
                entry.insert("description".to_string(), json!(def.description));
            }
            Value::Object(entry)
        })
        .collect();

    Value::Array(entries)
}

#[expect(clippy::cast_possible_truncation, reason = "whole numbers below 2^53 convert exactly")]
fn field_value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Number(n) if n.fract().abs() < f64::EPSILON && n.abs() < 9_007_199_254_740_992.0 => json!(*n as i64),
        FieldValue::Number(n) => json!(n),
        FieldValue::Text(s) => json!(s.as_str()),
        FieldValue::Boolean(b) => json!(b),
        FieldValue::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
    }
}
