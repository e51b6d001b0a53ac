//! Turning raw records into schema-aligned rows.
//!
//! [`normalize_record`] maps a single record onto an ordered list of requested fields, and
//! [`assemble_rows`] applies it to every record of a platform bundle in a fixed category order.
//! Both are pure functions of their inputs: everything configurable travels in a
//! [`NormalizeContext`].

mod assembler;
mod context;
mod normalizer;
mod table;

pub use assembler::{assemble_report, assemble_rows};
pub use context::NormalizeContext;
pub use normalizer::normalize_record;
pub use table::{OutputRow, Table};
