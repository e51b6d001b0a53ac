use crate::Result;
use crate::records::{Category, Platform};
use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use compact_str::CompactString;
use ohno::app_err;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Longest date range the analytics API serves in one request
pub const MAX_RANGE_DAYS: u64 = 365;

/// Which slice of the collected metrics a report asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MetricsType {
    /// Every category
    #[default]
    Overview,

    /// Page-level metrics
    Pages,

    /// Post-level metrics
    Posts,

    /// Follower metrics
    Followers,

    /// Video metrics
    Videos,

    /// Demographic breakdowns
    Breakdowns,
}

impl MetricsType {
    /// Record categories covered by this selection
    #[must_use]
    pub const fn categories(self) -> &'static [Category] {
        match self {
            Self::Overview => &[Category::Page, Category::Post, Category::Follower, Category::Video, Category::Breakdown],
            Self::Pages => &[Category::Page],
            Self::Posts => &[Category::Post],
            Self::Followers => &[Category::Follower],
            Self::Videos => &[Category::Video],
            Self::Breakdowns => &[Category::Breakdown],
        }
    }
}

/// An inclusive, validated range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range between two explicit dates
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end` or the range spans more than [`MAX_RANGE_DAYS`]
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(app_err!("start date {start} is after end date {end}"));
        }

        let span = end.signed_duration_since(start).num_days().unsigned_abs();
        if span > MAX_RANGE_DAYS {
            return Err(app_err!("date range of {span} days exceeds the maximum of {MAX_RANGE_DAYS} days"));
        }

        Ok(Self { start, end })
    }

    /// The `days` days leading up to `today`
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is zero or exceeds [`MAX_RANGE_DAYS`]
    pub fn last_days(today: NaiveDate, days: u64) -> Result<Self> {
        if days == 0 {
            return Err(app_err!("date range must cover at least one day"));
        }

        let start = today
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| app_err!("date range of {days} days reaches before the supported calendar"))?;

        Self::between(start, today)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn days(&self) -> u64 {
        self.end.signed_duration_since(self.start).num_days().unsigned_abs()
    }
}

/// Body of a report request, serialized as the API expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub platforms: Vec<Platform>,
    pub date_range: u64,
    pub metrics_type: MetricsType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<CompactString>,
}

impl ReportRequest {
    /// Build a request for the given platforms and range
    ///
    /// # Errors
    ///
    /// Returns an error if no platform is selected
    pub fn new(platforms: &[Platform], range: DateRange, metrics_type: MetricsType, fields: Vec<CompactString>) -> Result<Self> {
        if platforms.is_empty() {
            return Err(app_err!("at least one platform must be selected"));
        }

        let mut unique = Vec::with_capacity(platforms.len());
        for platform in platforms {
            if !unique.contains(platform) {
                unique.push(*platform);
            }
        }

        Ok(Self {
            platforms: unique,
            date_range: range.days(),
            metrics_type,
            start_date: range.start(),
            end_date: range.end(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_between_rejects_inverted_range() {
        let result = DateRange::between(date(2024, 2, 1), date(2024, 1, 1));
        assert!(result.unwrap_err().to_string().contains("after end date"));
    }

    #[test]
    fn test_between_limits_span() {
        let _ = DateRange::between(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let result = DateRange::between(date(2023, 1, 1), date(2024, 1, 2));
        assert!(result.unwrap_err().to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(range.days(), 0);
    }

    #[test]
    fn test_last_days() {
        let range = DateRange::last_days(date(2024, 3, 31), 30).unwrap();
        assert_eq!(range.start(), date(2024, 3, 1));
        assert_eq!(range.end(), date(2024, 3, 31));
        assert_eq!(range.days(), 30);

        let _ = DateRange::last_days(date(2024, 3, 31), 0).unwrap_err();
        let _ = DateRange::last_days(date(2024, 3, 31), 366).unwrap_err();
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let request = ReportRequest::new(&[Platform::LinkedIn, Platform::Facebook], range, MetricsType::Posts, vec!["clicks".into()]).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "platforms": ["linkedin", "facebook"],
                "dateRange": 30,
                "metricsType": "posts",
                "startDate": "2024-01-01",
                "endDate": "2024-01-31",
                "fields": ["clicks"]
            })
        );
    }

    #[test]
    fn test_request_omits_empty_fields() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
        let request = ReportRequest::new(&[Platform::Facebook], range, MetricsType::Overview, Vec::new()).unwrap();
        assert!(serde_json::to_value(&request).unwrap().get("fields").is_none());
    }

    #[test]
    fn test_request_requires_platform() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
        let _ = ReportRequest::new(&[], range, MetricsType::Overview, Vec::new()).unwrap_err();
    }

    #[test]
    fn test_request_deduplicates_platforms() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
        let request = ReportRequest::new(&[Platform::Facebook, Platform::Facebook], range, MetricsType::Overview, Vec::new()).unwrap();
        assert_eq!(request.platforms, vec![Platform::Facebook]);
    }

    #[test]
    fn test_metrics_type_categories() {
        assert_eq!(MetricsType::Overview.categories().len(), 5);
        assert_eq!(MetricsType::Followers.categories(), &[Category::Follower]);
        assert_eq!(MetricsType::default(), MetricsType::Overview);
    }
}
