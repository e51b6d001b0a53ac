use super::Host;
use super::common::{Common, CommonArgs, SelectionArgs};
use crate::Result;
use crate::normalize::assemble_report;
use crate::records::parse_bundles;
use camino::Utf8PathBuf;
use chrono::Local;
use clap::Parser;
use ohno::IntoAppError;
use serde_json::Value;
use std::fs;

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Saved analytics API response to convert
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Utf8PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Convert a saved API response into rows without contacting the API
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not JSON, or a report cannot be written
pub fn process_normalize<H: Host>(host: &mut H, args: &NormalizeArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let text = fs::read_to_string(&args.input).into_app_err_with(|| format!("reading API response '{}'", args.input))?;
    let body: Value = serde_json::from_str(&text).into_app_err_with(|| format!("parsing API response '{}'", args.input))?;

    let metrics_type = args.selection.metrics_type(&common.config);
    let mut bundles = parse_bundles(&body, &args.selection.platforms());
    for (platform, bundle) in &mut bundles {
        bundle.retain_categories(metrics_type.categories());
        log::debug!("{platform}: {} record(s) after selecting {metrics_type} metrics", bundle.record_count());
    }

    let today = Local::now().date_naive();
    let table = assemble_report(&bundles, &args.selection.field_specs(), &common.config.normalize_context(today));

    common.report(&table)
}
