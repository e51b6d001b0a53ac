use super::{NormalizeContext, OutputRow, Table, normalize_record};
use crate::fields::FieldSpec;
use crate::records::{Category, MetricBundle, Platform};
use strum::IntoEnumIterator;

/// Flatten a platform bundle into rows.
///
/// Categories are visited in a fixed order (page, post, follower, video, breakdown) and records keep
/// their payload order within a category. Every row has one value per entry of `fields`.
#[must_use]
pub fn assemble_rows(bundle: &MetricBundle, fields: &[FieldSpec], platform: Platform, context: &NormalizeContext) -> Vec<OutputRow> {
    let mut rows = Vec::with_capacity(bundle.record_count());

    for category in Category::iter() {
        let records = bundle.records(category);
        if records.is_empty() {
            continue;
        }

        log::debug!("assembling {} {platform} {category} record(s)", records.len());
        rows.extend(
            records
                .iter()
                .map(|record| normalize_record(record, platform, category, fields, context)),
        );
    }

    rows
}

/// Assemble every platform bundle, in the given order, into a single table
#[must_use]
pub fn assemble_report(bundles: &[(Platform, MetricBundle)], fields: &[FieldSpec], context: &NormalizeContext) -> Table {
    let rows = bundles
        .iter()
        .flat_map(|(platform, bundle)| assemble_rows(bundle, fields, *platform, context))
        .collect();

    Table::new(fields.to_vec(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldValue, resolve_fields};
    use crate::records::MetricRecord;
    use chrono::NaiveDate;
    use serde_json::json;

    fn context() -> NormalizeContext {
        NormalizeContext::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    fn tagged(tag: &str) -> MetricRecord {
        [("post_id", json!(tag))].into_iter().collect()
    }

    fn post_ids(rows: &[OutputRow], column: usize) -> Vec<String> {
        rows.iter().map(|row| row.get(column).unwrap().to_string()).collect()
    }

    #[test]
    fn test_page_rows_come_first() {
        let mut bundle = MetricBundle::new();
        bundle.push(Category::Post, tagged("r2"));
        bundle.push(Category::Post, tagged("r3"));
        bundle.push(Category::Page, tagged("r1"));

        let fields = resolve_fields(&["post_id", "category", "impressions"]);
        let rows = assemble_rows(&bundle, &fields, Platform::LinkedIn, &context());

        assert_eq!(rows.len(), 3);
        assert_eq!(post_ids(&rows, 0), vec!["r1", "r2", "r3"]);
        assert_eq!(rows[0].get(1), Some(&FieldValue::Text("page".into())));
        assert!(rows.iter().all(|row| row.len() == fields.len()));
    }

    #[test]
    fn test_full_category_order() {
        let bundle = MetricBundle::from_json(&json!({
            "breakdown_data": [{"post_id": "b"}],
            "video_metrics": [{"post_id": "v"}],
            "fan_metrics": [{"post_id": "f"}],
            "post_metrics": [{"post_id": "p1"}, {"post_id": "p2"}],
            "page_metrics": [{"post_id": "g"}]
        }));

        let fields = resolve_fields(&["post_id"]);
        let rows = assemble_rows(&bundle, &fields, Platform::Facebook, &context());
        assert_eq!(post_ids(&rows, 0), vec!["g", "p1", "p2", "f", "v", "b"]);
    }

    #[test]
    fn test_empty_bundle_yields_no_rows() {
        let fields = resolve_fields(&["clicks"]);
        assert!(assemble_rows(&MetricBundle::new(), &fields, Platform::LinkedIn, &context()).is_empty());
        assert!(assemble_rows(&MetricBundle::from_json(&json!("garbage")), &fields, Platform::LinkedIn, &context()).is_empty());
    }

    #[test]
    fn test_report_keeps_platform_order() {
        let mut linkedin = MetricBundle::new();
        linkedin.push(Category::Page, tagged("li"));
        let mut facebook = MetricBundle::new();
        facebook.push(Category::Page, tagged("fb"));

        let fields = resolve_fields(&["platform", "post_id"]);
        let table = assemble_report(&[(Platform::Facebook, facebook), (Platform::LinkedIn, linkedin)], &fields, &context());

        assert_eq!(table.schema, fields);
        assert_eq!(post_ids(&table.rows, 0), vec!["facebook", "linkedin"]);
        assert_eq!(post_ids(&table.rows, 1), vec!["fb", "li"]);
    }

    #[test]
    fn test_report_without_records_keeps_schema() {
        let fields = resolve_fields(&["clicks", "date"]);
        let table = assemble_report(&[(Platform::LinkedIn, MetricBundle::new())], &fields, &context());
        assert!(table.is_empty());
        assert_eq!(table.schema.len(), 2);
    }
}
