//! Analytics API client
//!
//! Two endpoints are used: one to check that a token is accepted, one to fetch the metrics for a
//! report. Every call is made exactly once; failures are classified, never retried.

use super::{ApiResult, AuthCache, AuthStatus, ReportRequest};
use crate::records::{MetricBundle, Platform, parse_bundles};
use chrono::Utc;
use core::time::Duration;
use ohno::app_err;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub data_path: String,
    pub validate_token_path: String,
    pub request_timeout: Duration,
    pub auth_cache_ttl: Duration,
    pub user_agent: String,
}

#[derive(Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    data_path: String,
    validate_token_path: String,
    auth_cache: AuthCache,
}

impl ApiClient {
    /// Create a client that authenticates every request with `token`
    pub fn new(settings: &ApiSettings, token: &str) -> crate::Result<Self> {
        let mut auth_val = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth_val.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth_val);

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            data_path: settings.data_path.clone(),
            validate_token_path: settings.validate_token_path.clone(),
            auth_cache: AuthCache::new(settings.auth_cache_ttl),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Check that the token is accepted, consulting the short-lived cache first
    pub async fn validate_token(&self) -> ApiResult<AuthStatus> {
        let now = Utc::now();
        if let Some(status) = self.auth_cache.get(now) {
            log::debug!("using cached authorization status");
            return classify_auth(status);
        }

        let url = self.url(&self.validate_token_path);
        log::debug!("validating API token at {url}");

        let resp = match self.client.post(&url).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Unavailable(e.into()),
        };

        let status = resp.status();
        log::debug!("token validation returned HTTP {status}");

        if is_auth_failure(status) {
            let message = response_message(resp).await.unwrap_or_else(|| "invalid API token".to_string());
            self.auth_cache.put(AuthStatus::rejected(message.clone()), now);
            return ApiResult::Unauthorized(message);
        }

        if !status.is_success() {
            return ApiResult::Unavailable(app_err!("token validation returned HTTP {status}"));
        }

        let auth: AuthStatus = match resp.json().await {
            Ok(auth) => auth,
            Err(e) => return ApiResult::Unavailable(e.into()),
        };

        self.auth_cache.put(auth.clone(), now);
        classify_auth(auth)
    }

    /// Fetch the raw response body for a report request
    pub async fn fetch_report(&self, request: &ReportRequest) -> ApiResult<Value> {
        let url = self.url(&self.data_path);
        log::info!(
            "requesting {} metrics for {} platform(s), {} to {}",
            request.metrics_type,
            request.platforms.len(),
            request.start_date,
            request.end_date
        );
        log::debug!("POST {url}");

        let resp = match self.client.post(&url).json(request).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Unavailable(e.into()),
        };

        let status = resp.status();
        log::debug!("data request returned HTTP {status}");

        if is_auth_failure(status) {
            self.auth_cache.clear();
            let message = response_message(resp).await.unwrap_or_else(|| format!("HTTP {status}"));
            return ApiResult::Unauthorized(message);
        }

        if !status.is_success() {
            return ApiResult::Unavailable(match response_message(resp).await {
                Some(message) => app_err!("HTTP {status}: {message}"),
                None => app_err!("HTTP {status}"),
            });
        }

        let body: Value = match resp.json().await {
            Ok(body) => body,
            Err(e) => return ApiResult::Unavailable(e.into()),
        };

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = body_message(&body).unwrap_or_else(|| "the API reported a failure".to_string());
            return ApiResult::Unavailable(app_err!("{message}"));
        }

        ApiResult::Success(body)
    }

    /// Fetch a report and split it into one bundle per requested platform, restricted to the
    /// categories of the request's metrics type
    pub async fn fetch_bundles(&self, request: &ReportRequest) -> ApiResult<Vec<(Platform, MetricBundle)>> {
        self.fetch_report(request).await.map(|body| {
            let mut bundles = parse_bundles(&body, &request.platforms);
            for (_, bundle) in &mut bundles {
                bundle.retain_categories(request.metrics_type.categories());
            }
            bundles
        })
    }
}

const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

fn classify_auth(status: AuthStatus) -> ApiResult<AuthStatus> {
    if status.valid {
        ApiResult::Success(status)
    } else {
        ApiResult::Unauthorized(status.error.unwrap_or_else(|| "invalid API token".to_string()))
    }
}

async fn response_message(resp: reqwest::Response) -> Option<String> {
    let body: Value = resp.json().await.ok()?;
    body_message(&body)
}

/// Human readable error text from an API error body
fn body_message(body: &Value) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str).filter(|message| !message.is_empty()))
        .map(ToString::to_string)
}
