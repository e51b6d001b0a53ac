//! Client for the remote analytics API.
//!
//! The API exposes a token check and a data endpoint that returns, for a date range and a set of
//! platforms, the collected metric records. Call outcomes are classified into [`ApiResult`] so
//! callers can tell a rejected token apart from an API that cannot deliver.

mod api_result;
mod auth_cache;
mod client;
mod request;

pub use api_result::ApiResult;
pub use auth_cache::{AuthCache, AuthStatus};
pub use client::{ApiClient, ApiSettings};
pub use request::{DateRange, MAX_RANGE_DAYS, MetricsType, ReportRequest};
