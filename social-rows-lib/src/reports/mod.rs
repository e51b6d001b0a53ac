//! Multi-format report generation for normalized tables
//!
//! Every generator takes the same input, a [`Table`](crate::normalize::Table) holding the requested
//! schema and its rows, so callers can produce several formats from one assembly pass:
//!
//! - **Console**: aligned text columns with an optionally coloured header
//! - **CSV**: one header row of field ids followed by one line per row
//! - **Excel**: a single worksheet with typed cells
//! - **JSON**: the schema description plus row values, as consumed by the reporting tool
//!
//! Value formatting is shared through the `common` module.

mod common;
mod console;
mod csv;
mod excel;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use excel::generate as generate_xlsx;
pub use json::generate as generate_json;
pub use json::schema_json;
