use super::common;
use crate::Result;
use crate::normalize::Table;
use core::fmt::Write;
use ohno::{IntoAppError, app_err};

pub fn generate<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(Vec::new());

    csv_writer.write_record(table.schema.iter().map(|spec| spec.id.as_str()))?;
    for row in common::format_rows(table) {
        csv_writer.write_record(&row)?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| app_err!("flushing CSV output: {}", e.error()))?;
    let text = String::from_utf8(bytes).into_app_err("CSV output is not valid UTF-8")?;

    write!(writer, "{text}")?;
    Ok(())
}
