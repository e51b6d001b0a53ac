use super::Host;
use super::common::{Common, CommonArgs, RangeArgs, SelectionArgs};
use super::config::check_base_url;
use crate::Result;
use crate::api::{ApiClient, ReportRequest};
use crate::normalize::assemble_report;
use chrono::Local;
use clap::Parser;
use ohno::app_err;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Analytics API token
    #[arg(long, value_name = "TOKEN", env = "SOCIAL_ROWS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the analytics API, overriding the configuration
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Fetch metrics from the analytics API and write them as rows
///
/// # Errors
///
/// Returns an error if the token is rejected, the API cannot deliver data, or a report cannot be written
pub async fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let token = args
        .token
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| app_err!("authorization failed: no API token given, use --token or set SOCIAL_ROWS_TOKEN"))?;

    let mut settings = common.config.api_settings();
    if let Some(url) = &args.api_url {
        check_base_url("--api-url", url)?;
        settings.base_url.clone_from(url);
    }

    let today = Local::now().date_naive();
    let fields = args.selection.field_specs();
    let metrics_type = args.selection.metrics_type(&common.config);
    let range = args.range.date_range(&common.config, today)?;

    let request = ReportRequest::new(
        &args.selection.platforms(),
        range,
        metrics_type,
        fields.iter().map(|spec| spec.id.clone()).collect(),
    )?;

    let client = ApiClient::new(&settings, token)?;

    let status = client.validate_token().await.into_result()?;
    if let Some(email) = &status.email {
        log::info!("token accepted for {email}");
    }

    let bundles = client.fetch_bundles(&request).await.into_result()?;
    let table = assemble_report(&bundles, &fields, &common.config.normalize_context(today));

    common.report(&table)
}
