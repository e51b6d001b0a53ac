//! Arguments and report output shared between the report and normalize commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::api::{DateRange, MetricsType};
use crate::fields::{FieldSpec, resolve_fields};
use crate::normalize::Table;
use crate::records::Platform;
use crate::reports::{generate_console, generate_csv, generate_json, generate_xlsx};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::fs;
use std::io::Write;
use strum::IntoEnumIterator;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the report and normalize commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `social-rows.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Output rows to an Excel spreadsheet file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,

    /// Output rows to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the schema and rows to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output rows to the console.
    /// If omitted, console output is shown only when no other reports are generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

/// Which rows and columns to produce
#[derive(Args, Debug)]
pub struct SelectionArgs {
    /// Platforms to include (default is every platform)
    #[arg(long = "platform", short = 'p', value_name = "PLATFORM")]
    pub platforms: Vec<Platform>,

    /// Metrics to include (default comes from the configuration)
    #[arg(long, value_name = "TYPE")]
    pub metrics_type: Option<MetricsType>,

    /// Comma-separated field ids to output, in order (default is the standard field set)
    #[arg(long, short = 'f', value_name = "FIELDS", value_delimiter = ',')]
    pub fields: Vec<String>,
}

impl SelectionArgs {
    /// The selected platforms, every platform when none is given
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        if self.platforms.is_empty() {
            Platform::iter().collect()
        } else {
            self.platforms.clone()
        }
    }

    #[must_use]
    pub fn metrics_type(&self, config: &Config) -> MetricsType {
        self.metrics_type.unwrap_or(config.default_metrics_type)
    }

    #[must_use]
    pub fn field_specs(&self) -> Vec<FieldSpec> {
        resolve_fields(&self.fields)
    }
}

/// The period a report covers
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// First day of the report (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Last day of the report (YYYY-MM-DD, default is today)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Number of days leading up to the end date (default comes from the configuration)
    #[arg(long, value_name = "DAYS", conflicts_with = "start_date")]
    pub days: Option<u64>,
}

impl RangeArgs {
    /// Resolve the arguments into a validated range ending no later than `today` by default
    ///
    /// # Errors
    ///
    /// Returns an error if the dates are reversed or the range is too long
    pub fn date_range(&self, config: &Config, today: NaiveDate) -> Result<DateRange> {
        let end = self.end_date.unwrap_or(today);
        match self.start_date {
            Some(start) => DateRange::between(start, end),
            None => DateRange::last_days(end, self.days.unwrap_or(config.default_date_range_days)),
        }
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

pub struct Common<'a, H: Host> {
    pub config: Config,
    host: &'a mut H,
    color: ColorMode,
    console: bool,
    excel: Option<Utf8PathBuf>,
    csv: Option<Utf8PathBuf>,
    json: Option<Utf8PathBuf>,
}

impl<'a, H: Host> Common<'a, H> {
    /// Set up logging and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

        Ok(Self {
            config,
            host,
            color: args.color,
            console: args.console,
            excel: args.excel.clone(),
            csv: args.csv.clone(),
            json: args.json.clone(),
        })
    }

    /// Write the table to every requested output
    ///
    /// # Errors
    ///
    /// Returns an error if a report cannot be generated or written
    pub fn report(&mut self, table: &Table) -> Result<()> {
        log::info!("reporting {} row(s) with {} field(s)", table.rows.len(), table.schema.len());

        let generating_reports = self.excel.is_some() || self.csv.is_some() || self.json.is_some();

        if self.console || !generating_reports {
            let use_colors = match self.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    use std::io::{IsTerminal, stdout};
                    stdout().is_terminal()
                }
            };

            let mut console_output = String::new();
            generate_console(table, use_colors, &mut console_output)?;
            let _ = write!(self.host.output(), "{console_output}");
        }

        if let Some(filename) = &self.excel {
            let mut file = fs::File::create(filename)?;
            generate_xlsx(table, &mut file)?;
        }

        if let Some(filename) = &self.csv {
            let mut csv_output = String::new();
            generate_csv(table, &mut csv_output)?;
            fs::write(filename, csv_output)?;
        }

        if let Some(filename) = &self.json {
            let mut json_output = String::new();
            generate_json(table, &mut json_output)?;
            fs::write(filename, json_output)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::fields::FieldValue;
    use crate::normalize::OutputRow;

    fn common_args() -> CommonArgs {
        CommonArgs {
            config: None,
            color: ColorMode::Never,
            log_level: LogLevel::None,
            excel: None,
            csv: None,
            json: None,
            console: false,
        }
    }

    fn range(start: Option<&str>, end: Option<&str>, days: Option<u64>) -> RangeArgs {
        RangeArgs {
            start_date: start.map(|s| s.parse().unwrap()),
            end_date: end.map(|s| s.parse().unwrap()),
            days,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_table() -> Table {
        Table::new(
            resolve_fields(&["platform", "clicks"]),
            vec![OutputRow::new(vec![FieldValue::Text("linkedin".into()), FieldValue::Number(7.0)])],
        )
    }

    #[test]
    fn test_platforms_default_to_all() {
        let selection = SelectionArgs {
            platforms: Vec::new(),
            metrics_type: None,
            fields: Vec::new(),
        };
        assert_eq!(selection.platforms(), vec![Platform::LinkedIn, Platform::Facebook]);
        assert_eq!(selection.metrics_type(&Config::default()), MetricsType::Overview);
        assert_eq!(selection.field_specs().len(), crate::fields::DEFAULT_FIELD_IDS.len());
    }

    #[test]
    fn test_explicit_selection() {
        let selection = SelectionArgs {
            platforms: vec![Platform::Facebook],
            metrics_type: Some(MetricsType::Posts),
            fields: vec!["clicks".into(), "date".into()],
        };
        assert_eq!(selection.platforms(), vec![Platform::Facebook]);
        assert_eq!(selection.metrics_type(&Config::default()), MetricsType::Posts);
        let ids: Vec<_> = selection.field_specs().into_iter().map(|spec| spec.id).collect();
        assert_eq!(ids, ["clicks", "date"]);
    }

    #[test]
    fn test_date_range_defaults_to_configured_days() {
        let today = date("2025-03-31");
        let range = range(None, None, None).date_range(&Config::default(), today).unwrap();
        assert_eq!(range.end(), today);
        assert_eq!(range.start(), date("2025-03-01"));
    }

    #[test]
    fn test_date_range_from_days_and_end() {
        let range = range(None, Some("2025-01-10"), Some(9))
            .date_range(&Config::default(), date("2025-06-01"))
            .unwrap();
        assert_eq!(range.start(), date("2025-01-01"));
        assert_eq!(range.end(), date("2025-01-10"));
    }

    #[test]
    fn test_date_range_explicit_dates() {
        let range = range(Some("2024-12-01"), Some("2024-12-31"), None)
            .date_range(&Config::default(), date("2025-06-01"))
            .unwrap();
        assert_eq!(range.days(), 30);
    }

    #[test]
    fn test_date_range_rejects_reversed_dates() {
        let result = range(Some("2025-02-01"), Some("2025-01-01"), None).date_range(&Config::default(), date("2025-06-01"));
        assert!(result.is_err());
    }

    #[test]
    fn test_report_defaults_to_console() {
        let mut host = TestHost::new();
        let mut common = Common::new(&mut host, &common_args()).unwrap();
        common.report(&sample_table()).unwrap();

        let output = host.output_str();
        assert!(output.contains("platform"), "{output}");
        assert!(output.contains("1 row(s)"), "{output}");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_report_to_files_skips_console() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let args = CommonArgs {
            csv: Some(dir.join("rows.csv")),
            json: Some(dir.join("rows.json")),
            excel: Some(dir.join("rows.xlsx")),
            ..common_args()
        };

        let mut host = TestHost::new();
        let mut common = Common::new(&mut host, &args).unwrap();
        common.report(&sample_table()).unwrap();

        assert!(host.output_str().is_empty());
        assert_eq!(fs::read_to_string(dir.join("rows.csv")).unwrap(), "platform,clicks\nlinkedin,7\n");

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.join("rows.json")).unwrap()).unwrap();
        assert_eq!(json["rows"][0]["values"][1], 7);

        assert!(fs::metadata(dir.join("rows.xlsx")).unwrap().len() > 0);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_report_console_flag_with_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let args = CommonArgs {
            csv: Some(dir.join("rows.csv")),
            console: true,
            ..common_args()
        };

        let mut host = TestHost::new();
        let mut common = Common::new(&mut host, &args).unwrap();
        common.report(&sample_table()).unwrap();

        assert!(host.output_str().contains("linkedin"));
        assert!(dir.join("rows.csv").is_file());
    }
}
