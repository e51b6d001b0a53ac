use crate::Result;
use crate::api::{ApiSettings, MAX_RANGE_DAYS, MetricsType};
use crate::normalize::NormalizeContext;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use core::time::Duration;
use directories::ProjectDirs;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "social-rows.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the analytics API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Endpoint returning metric records
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Endpoint checking that a token is accepted
    #[serde(default = "default_validate_token_path")]
    pub validate_token_path: String,

    /// Maximum time to wait for a single API call
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// How long a token validation result is reused
    #[serde(default = "default_auth_cache_ttl", with = "humantime_serde")]
    pub auth_cache_ttl: Duration,

    /// Days covered by a report when no explicit dates are given
    #[serde(default = "default_date_range_days")]
    pub default_date_range_days: u64,

    /// Metrics selected when none is given
    #[serde(default)]
    pub default_metrics_type: MetricsType,

    /// Impressions assumed by ratio fields when a record has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_impressions_placeholder: Option<f64>,

    /// User agent sent with every API call
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base_url() -> String {
    "https://api.whatsthedata.com".to_string()
}

fn default_data_path() -> String {
    "/api/v1/looker-data".to_string()
}

fn default_validate_token_path() -> String {
    "/api/v1/validate-token".to_string()
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

const fn default_auth_cache_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

const fn default_date_range_days() -> u64 {
    30
}

fn default_user_agent() -> String {
    "social-rows".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Otherwise `social-rows.toml` in `base_dir` is tried,
    /// then `config.toml` in the user's configuration directory, and finally the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let Some(final_path) = config_path.cloned().or_else(|| Self::find(base_dir)) else {
            log::debug!("no configuration file found, using defaults");
            return Ok(Self::default());
        };

        log::debug!("loading configuration from '{final_path}'");
        let text = fs::read_to_string(&final_path).into_app_err_with(|| format!("reading social-rows configuration file '{final_path}'"))?;
        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// The first existing configuration file among the lookup locations
    #[must_use]
    pub fn find(base_dir: &Utf8Path) -> Option<Utf8PathBuf> {
        Self::candidate_paths(base_dir).into_iter().find(|path| path.is_file())
    }

    /// Files probed when no explicit configuration path is given, in lookup order
    #[must_use]
    pub fn candidate_paths(base_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut paths = vec![base_dir.join(CONFIG_FILE_NAME)];

        if let Some(dirs) = ProjectDirs::from("", "", "social-rows")
            && let Ok(dir) = Utf8PathBuf::try_from(dirs.config_dir().to_path_buf())
        {
            paths.push(dir.join("config.toml"));
        }

        paths
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or malformed
    pub fn validate(&self) -> Result<()> {
        check_base_url("api_base_url", &self.api_base_url)?;

        for (name, path) in [("data_path", &self.data_path), ("validate_token_path", &self.validate_token_path)] {
            if !path.starts_with('/') {
                return Err(app_err!("{name} must start with '/', got '{path}'"));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        if self.auth_cache_ttl.is_zero() {
            return Err(app_err!("auth_cache_ttl must be greater than zero"));
        }

        if !(1..=MAX_RANGE_DAYS).contains(&self.default_date_range_days) {
            return Err(app_err!(
                "default_date_range_days must be between 1 and {MAX_RANGE_DAYS}, got {}",
                self.default_date_range_days
            ));
        }

        if let Some(placeholder) = self.missing_impressions_placeholder
            && !(placeholder.is_finite() && placeholder > 0.0)
        {
            return Err(app_err!("missing_impressions_placeholder must be greater than zero, got {placeholder}"));
        }

        Ok(())
    }

    /// Connection settings for the API client
    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            data_path: self.data_path.clone(),
            validate_token_path: self.validate_token_path.clone(),
            request_timeout: self.request_timeout,
            auth_cache_ttl: self.auth_cache_ttl,
            user_agent: self.user_agent.clone(),
        }
    }

    /// Normalization settings for a run on `today`
    #[must_use]
    pub const fn normalize_context(&self, today: NaiveDate) -> NormalizeContext {
        NormalizeContext::new(today).with_impressions_placeholder(self.missing_impressions_placeholder)
    }
}

/// Check that `value` is an absolute http or https URL, naming the offending setting on failure
///
/// # Errors
///
/// Returns an error if `value` does not parse or uses another scheme
pub fn check_base_url(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).into_app_err_with(|| format!("{name} '{value}' is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(app_err!("{name} must use http or https, got '{}'", url.scheme()));
    }

    Ok(url)
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
