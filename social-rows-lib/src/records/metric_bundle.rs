use super::{Category, MetricRecord};
use serde_json::Value;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// All records collected for one platform, grouped by category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricBundle {
    sections: BTreeMap<Category, Vec<MetricRecord>>,
}

impl MetricBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a bundle from a JSON object keyed by category (`page_metrics`, `post_metrics`, ...).
    ///
    /// Unknown keys, non-array values and non-object array elements are ignored, so a malformed
    /// payload yields an empty bundle rather than an error.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let mut bundle = Self::new();
        let Some(object) = value.as_object() else {
            return bundle;
        };

        for category in Category::iter() {
            for key in category.bundle_keys() {
                if let Some(Value::Array(items)) = object.get(*key) {
                    bundle.extend(category, items.iter().filter_map(MetricRecord::from_value));
                }
            }
        }

        bundle
    }

    pub fn push(&mut self, category: Category, record: MetricRecord) {
        self.sections.entry(category).or_default().push(record);
    }

    pub fn extend(&mut self, category: Category, records: impl IntoIterator<Item = MetricRecord>) {
        let section = self.sections.entry(category).or_default();
        section.extend(records);
        if section.is_empty() {
            let _ = self.sections.remove(&category);
        }
    }

    /// Records of one category, in payload order
    #[must_use]
    pub fn records(&self, category: Category) -> &[MetricRecord] {
        self.sections.get(&category).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Drop every category not in `categories`
    pub fn retain_categories(&mut self, categories: &[Category]) {
        self.sections.retain(|category, _| categories.contains(category));
    }
}
