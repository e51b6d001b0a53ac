//! Raw metric records as delivered by the analytics API.
//!
//! A response carries, per platform, arrays of loosely typed records grouped by category. This
//! module models those records without interpreting them: [`MetricRecord`] offers tolerant typed
//! accessors, [`MetricBundle`] groups records by [`Category`], and [`parse_bundles`] splits a
//! response body into one bundle per [`Platform`].

mod category;
mod metric_bundle;
mod metric_record;
mod payload;
mod platform;

pub use category::Category;
pub use metric_bundle::MetricBundle;
pub use metric_record::MetricRecord;
pub use payload::parse_bundles;
pub use platform::Platform;
