//! Command-line interface and orchestration for social-rows
//!
//! This module implements the CLI commands and ties the other modules together: it fetches
//! metric bundles through [`crate::api`], turns them into rows with [`crate::normalize`], and
//! writes the rows with [`crate::reports`].
//!
//! ## Commands
//!
//! - **report**: validate the API token, fetch one bundle of metrics for the selected platforms
//!   and date range, assemble the rows, and write the requested reports
//! - **normalize**: same as `report`, but reads a saved API response instead of calling the API
//! - **schema**: print the JSON description of the selected fields
//! - **init**: generate a default configuration file
//! - **validate**: check a configuration file
//!
//! The `common` module holds the arguments shared by `report` and `normalize`, logging setup,
//! and the report output logic that writes console, CSV, JSON and Excel output.
//!
//! Configuration is a TOML file holding API endpoints, timeouts, and report defaults.

mod common;
mod config;
mod host;
mod init;
mod normalize;
mod report;
mod run;
mod schema;
mod validate;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use normalize::{NormalizeArgs, process_normalize};
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use schema::{SchemaArgs, print_schema};
pub use validate::{ValidateArgs, validate_config};
