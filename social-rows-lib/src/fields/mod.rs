//! The catalogue of output fields.
//!
//! Every column a report can carry is described once in [`FIELD_DEFINITIONS`]: its type, how the
//! reporting tool aggregates it, and where its value comes from. A value is either copied from the
//! first present key of a per-platform candidate list, computed by a fixed formula, or taken from
//! the record's platform and category tags.
//!
//! Requests name fields by id. [`resolve_fields`] turns those ids into [`FieldSpec`]s, keeping
//! unknown ids as numeric columns so that every row has exactly as many cells as were requested.

mod field_def;
mod field_spec;
mod field_type;
mod field_value;

pub use field_def::{DEFAULT_FIELD_IDS, FIELD_DEFINITIONS, FieldDef, KeySet, Source, ratio};
pub use field_spec::FieldSpec;
pub use field_type::{Aggregation, FieldType};
pub use field_value::FieldValue;

/// Look up a field definition by id
#[must_use]
pub fn field_def(id: &str) -> Option<&'static FieldDef> {
    FIELD_DEFINITIONS.iter().find(|def| def.id == id)
}

/// Build the ordered column list for a request, falling back to the defaults when `ids` is empty
#[must_use]
pub fn resolve_fields<S: AsRef<str>>(ids: &[S]) -> Vec<FieldSpec> {
    if ids.is_empty() {
        return default_fields();
    }

    ids.iter()
        .map(|id| {
            let id = id.as_ref().trim();
            field_def(id).map_or_else(
                || {
                    log::debug!("field '{id}' is not in the catalogue, it will be reported as 0");
                    FieldSpec::unknown(id)
                },
                FieldSpec::from_def,
            )
        })
        .collect()
}

#[must_use]
pub fn default_fields() -> Vec<FieldSpec> {
    DEFAULT_FIELD_IDS.iter().filter_map(|id| field_def(id)).map(FieldSpec::from_def).collect()
}

/// Every known field, in catalogue order
#[must_use]
pub fn all_fields() -> Vec<FieldSpec> {
    FIELD_DEFINITIONS.iter().map(FieldSpec::from_def).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_def_lookup() {
        assert_eq!(field_def("clicks").map(|def| def.field_type), Some(FieldType::Number));
        assert!(field_def("no_such_field").is_none());
    }

    #[test]
    fn test_resolve_keeps_order_and_unknowns() {
        let specs = resolve_fields(&["clicks", "mystery", "date"]);
        let ids: Vec<_> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["clicks", "mystery", "date"]);
        assert_eq!(specs[1].field_type, FieldType::Number);
        assert_eq!(specs[2].field_type, FieldType::Date);
    }

    #[test]
    fn test_resolve_trims_ids() {
        let specs = resolve_fields(&[" clicks "]);
        assert_eq!(specs[0].id, "clicks");
        assert!(specs[0].def().is_some());
    }

    #[test]
    fn test_resolve_empty_uses_defaults() {
        let specs = resolve_fields::<&str>(&[]);
        assert_eq!(specs.len(), DEFAULT_FIELD_IDS.len());
        assert_eq!(specs, default_fields());
    }

    #[test]
    fn test_all_fields_matches_catalogue() {
        assert_eq!(all_fields().len(), FIELD_DEFINITIONS.len());
    }
}
