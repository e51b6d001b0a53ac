use chrono::{DateTime, NaiveDate};
use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw metric record as returned by the analytics API.
///
/// Accessors never fail: absent keys, `null` values and values of the wrong shape all read as `None`.
/// Keys may be dotted paths (`allPageViews.pageViews`) into nested objects, but an exact
/// top-level key always takes precedence over a traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricRecord {
    fields: Map<String, Value>,
}

impl MetricRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from a JSON value, if it is an object
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|fields| Self::from_map(fields.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw value for a key, treating `null` as absent
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(key) {
            return Some(value).filter(|v| !v.is_null());
        }

        let mut parts = key.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }

        Some(current).filter(|v| !v.is_null())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Numeric value; numeric strings are accepted, non-finite values are not
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        let n = match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;

        n.is_finite().then_some(n)
    }

    /// Textual value; numbers and booleans are rendered as text
    #[must_use]
    pub fn text(&self, key: &str) -> Option<CompactString> {
        match self.get(key)? {
            Value::String(s) => Some(CompactString::from(s.as_str())),
            Value::Number(n) => Some(n.to_compact_string()),
            Value::Bool(b) => Some(b.to_compact_string()),
            _ => None,
        }
    }

    /// Calendar date from `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DD hh:mm:ss` strings
    #[must_use]
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        let Value::String(s) = self.get(key)? else {
            return None;
        };

        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
            .or_else(|| s.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()))
    }

    /// Boolean value; accepts `true`/`false` strings and `0`/`1`
    #[must_use]
    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => match n.as_i64()? {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MetricRecord {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self::from_map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MetricRecord {
        MetricRecord::from_value(&value).unwrap()
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(MetricRecord::from_value(&json!([1, 2])).is_none());
        assert!(MetricRecord::from_value(&json!("text")).is_none());
        assert!(MetricRecord::from_value(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let r = record(json!({"a": 12, "b": "3.5", "c": " 7 ", "d": "n/a", "e": true}));
        assert_eq!(r.number("a"), Some(12.0));
        assert_eq!(r.number("b"), Some(3.5));
        assert_eq!(r.number("c"), Some(7.0));
        assert_eq!(r.number("d"), None);
        assert_eq!(r.number("e"), None);
        assert_eq!(r.number("missing"), None);
    }

    #[test]
    fn test_number_rejects_non_finite_strings() {
        let r = record(json!({"a": "NaN", "b": "inf"}));
        assert_eq!(r.number("a"), None);
        assert_eq!(r.number("b"), None);
    }

    #[test]
    fn test_null_reads_as_absent() {
        let r = record(json!({"a": null}));
        assert!(!r.contains("a"));
        assert_eq!(r.number("a"), None);
        assert_eq!(r.text("a"), None);
    }

    #[test]
    fn test_dotted_path_traversal() {
        let r = record(json!({"allPageViews": {"pageViews": 40, "uniquePageViews": 12}}));
        assert_eq!(r.number("allPageViews.pageViews"), Some(40.0));
        assert_eq!(r.number("allPageViews.uniquePageViews"), Some(12.0));
        assert_eq!(r.number("allPageViews.missing"), None);
        assert_eq!(r.number("careersPageViews.pageViews"), None);
    }

    #[test]
    fn test_exact_key_wins_over_traversal() {
        let r = record(json!({"a.b": 1, "a": {"b": 2}}));
        assert_eq!(r.number("a.b"), Some(1.0));
    }

    #[test]
    fn test_text_renders_scalars() {
        let r = record(json!({"s": "hello", "n": 42, "b": false, "o": {}}));
        assert_eq!(r.text("s").as_deref(), Some("hello"));
        assert_eq!(r.text("n").as_deref(), Some("42"));
        assert_eq!(r.text("b").as_deref(), Some("false"));
        assert_eq!(r.text("o"), None);
    }

    #[test]
    fn test_date_formats() {
        let r = record(json!({
            "plain": "2024-03-05",
            "rfc": "2024-03-05T23:10:00+00:00",
            "sql": "2024-03-05 10:30:00",
            "bad": "yesterday",
            "num": 20_240_305
        }));
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(r.date("plain"), expected);
        assert_eq!(r.date("rfc"), expected);
        assert_eq!(r.date("sql"), expected);
        assert_eq!(r.date("bad"), None);
        assert_eq!(r.date("num"), None);
    }

    #[test]
    fn test_boolean_forms() {
        let r = record(json!({"a": true, "b": "FALSE", "c": 1, "d": 0, "e": 2, "f": "maybe"}));
        assert_eq!(r.boolean("a"), Some(true));
        assert_eq!(r.boolean("b"), Some(false));
        assert_eq!(r.boolean("c"), Some(true));
        assert_eq!(r.boolean("d"), Some(false));
        assert_eq!(r.boolean("e"), None);
        assert_eq!(r.boolean("f"), None);
    }

    #[test]
    fn test_from_iterator() {
        let r: MetricRecord = [("impressions", json!(200)), ("clicks", json!(50))].into_iter().collect();
        assert_eq!(r.len(), 2);
        assert_eq!(r.number("clicks"), Some(50.0));
        assert_eq!(r.number("impressions"), Some(200.0));
    }
}
