use super::common;
use crate::Result;
use crate::normalize::Table;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write a table as aligned text columns, numbers right-aligned
pub fn generate<W: Write>(table: &Table, use_colors: bool, writer: &mut W) -> Result<()> {
    if table.schema.is_empty() {
        return Ok(());
    }

    let cells = common::format_rows(table);
    let headers: Vec<&str> = table.schema.iter().map(|spec| spec.id.as_str()).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line = join_columns(headers.iter().zip(&widths).map(|(header, width)| format!("{header:<width$}")));
    if use_colors {
        writeln!(writer, "{}", header_line.bold())?;
    } else {
        writeln!(writer, "{header_line}")?;
    }

    let rule = join_columns(widths.iter().map(|width| "-".repeat(*width)));
    writeln!(writer, "{rule}")?;

    for row in &cells {
        let line = join_columns(row.iter().zip(&widths).zip(&table.schema).map(|((cell, width), spec)| {
            if spec.is_dimension() {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        }));
        writeln!(writer, "{}", line.trim_end())?;
    }

    let summary = format!("{} row(s)", table.rows.len());
    if use_colors {
        writeln!(writer, "{}", summary.dimmed())?;
    } else {
        writeln!(writer, "{summary}")?;
    }

    Ok(())
}

fn join_columns(columns: impl Iterator<Item = String>) -> String {
    columns.collect::<Vec<_>>().join("  ")
}
