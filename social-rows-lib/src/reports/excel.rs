use super::common;
use crate::Result;
use crate::fields::{FieldType, FieldValue};
use crate::normalize::Table;
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::io::Write;

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
pub fn generate<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("social-rows");
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet().set_name("Social Metrics")?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x00FE_D7AA))
        .set_align(FormatAlign::Left);
    let number_format = Format::new().set_num_format("#,##0.##");
    let percent_format = Format::new().set_num_format("0.00");
    let text_format = Format::new().set_align(FormatAlign::Left);

    for (col_idx, spec) in table.schema.iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Column index limited by Excel's u16 column limit")]
        worksheet.write_string_with_format(0, col_idx as u16, spec.label(), &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, row) in table.rows.iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Row index limited by Excel's row limit")]
        let excel_row = (row_idx + 1) as u32;

        for (col_idx, (spec, value)) in table.schema.iter().zip(row.values()).enumerate() {
            let format = match spec.field_type {
                FieldType::Percent => &percent_format,
                FieldType::Number => &number_format,
                FieldType::Text | FieldType::Url | FieldType::Date | FieldType::Boolean => &text_format,
            };

            #[expect(clippy::cast_possible_truncation, reason = "Column index limited by Excel's u16 column limit")]
            write_field_value(worksheet, excel_row, col_idx as u16, value, format)?;
        }
    }

    worksheet.autofit();

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_field_value(worksheet: &mut Worksheet, row: u32, col: u16, value: &FieldValue, format: &Format) -> Result<()> {
    match value {
        FieldValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        FieldValue::Boolean(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        FieldValue::Text(s) => {
            if common::is_url(s.as_str()) {
                worksheet.write_url(row, col, s.as_str())?;
            } else {
                worksheet.write_string_with_format(row, col, s.as_str(), format)?;
            }
        }
        FieldValue::Date(d) => {
            worksheet.write_string_with_format(row, col, d.format("%Y-%m-%d").to_string(), format)?;
        }
    }
    Ok(())
}
