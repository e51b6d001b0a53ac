use super::{NormalizeContext, OutputRow};
use crate::fields::{FieldSpec, FieldType, FieldValue, Source, field_def};
use crate::records::{Category, MetricRecord, Platform};

/// Map one raw record onto the requested fields.
///
/// The result has exactly one value per entry of `fields`, in the same order. Missing data never
/// fails: absent keys produce the field type's default, and fields that are unknown or do not exist
/// on `platform` produce `0`.
#[must_use]
pub fn normalize_record(
    record: &MetricRecord,
    platform: Platform,
    category: Category,
    fields: &[FieldSpec],
    context: &NormalizeContext,
) -> OutputRow {
    OutputRow::new(
        fields
            .iter()
            .map(|spec| normalize_field(record, platform, category, spec, context))
            .collect(),
    )
}

fn normalize_field(record: &MetricRecord, platform: Platform, category: Category, spec: &FieldSpec, context: &NormalizeContext) -> FieldValue {
    let Some(def) = field_def(&spec.id) else {
        return FieldValue::zero();
    };

    match def.source {
        Source::Keys(set) => {
            let candidates = set.for_platform(platform);
            // Foreign to this platform: 0 whatever the declared type.
            if candidates.is_empty() {
                return FieldValue::zero();
            }

            extract(record, candidates, def.field_type).unwrap_or_else(|| {
                log::trace!("no value for '{}' in {platform} {category} record, using default", def.id);
                FieldValue::default_for(def.field_type, context.today)
            })
        }

        Source::Derived(formula) => {
            let value = formula(record, platform, context);
            FieldValue::Number(if value.is_finite() { value } else { 0.0 })
        }

        Source::Tag(tag) => tag(platform, category),
    }
}

fn extract(record: &MetricRecord, candidates: &[&str], field_type: FieldType) -> Option<FieldValue> {
    match field_type {
        FieldType::Number | FieldType::Percent => candidates.iter().find_map(|key| record.number(key)).map(FieldValue::Number),
        FieldType::Text | FieldType::Url => candidates.iter().find_map(|key| record.text(key)).map(FieldValue::Text),
        FieldType::Date => candidates.iter().find_map(|key| record.date(key)).map(FieldValue::Date),
        FieldType::Boolean => candidates.iter().find_map(|key| record.boolean(key)).map(FieldValue::Boolean),
    }
}
