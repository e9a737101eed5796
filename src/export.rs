use crate::{
    load::{convert::mixed_cell, RawCell},
    table::CleanedTable,
};
use anyhow::{bail, Context, Result};
use arrow::{
    array::{
        Array, BooleanArray, Float64Array, Int64Array, StringArray, StructArray,
        TimestampMillisecondArray,
    },
    datatypes::DataType,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

/// File name of the exported workbook.
pub const CLEANED_WORKBOOK: &str = "cleaned_postal_dataset.xlsx";

/// Rows a worksheet can hold, header included.
const MAX_SHEET_ROWS: usize = 1_048_576;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Write the cleaned table to `path` as a single-sheet workbook: one bold
/// header row, then the data, with no index column.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display()))]
pub fn write_cleaned_workbook<P: AsRef<Path>>(table: &CleanedTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let batch = table.batch();
    if batch.num_rows() + 1 > MAX_SHEET_ROWS {
        bail!(
            "{} rows do not fit in a worksheet (limit {})",
            batch.num_rows(),
            MAX_SHEET_ROWS - 1
        );
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let header = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    for (c, name) in table.column_names().iter().enumerate() {
        sheet.write_string_with_format(0, col_index(c)?, name.as_str(), &header)?;
    }

    let datetime = Format::new().set_num_format(DATETIME_FORMAT);
    for (c, column) in batch.columns().iter().enumerate() {
        write_column(sheet, col_index(c)?, column.as_ref(), &datetime)
            .with_context(|| format!("writing column {}", c))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("saving workbook {}", path.display()))?;
    info!(rows = batch.num_rows(), "exported cleaned dataset");
    Ok(())
}

fn col_index(c: usize) -> Result<u16> {
    u16::try_from(c).context("too many columns for a worksheet")
}

fn write_column(sheet: &mut Worksheet, col: u16, arr: &dyn Array, datetime: &Format) -> Result<()> {
    // data starts below the header row
    let row = |i: usize| i as u32 + 1;

    match arr.data_type() {
        DataType::Int64 => {
            let a = downcast::<Int64Array>(arr)?;
            for i in (0..a.len()).filter(|&i| a.is_valid(i)) {
                sheet.write_number(row(i), col, a.value(i) as f64)?;
            }
        }
        DataType::Float64 => {
            let a = downcast::<Float64Array>(arr)?;
            for i in (0..a.len()).filter(|&i| a.is_valid(i)) {
                sheet.write_number(row(i), col, a.value(i))?;
            }
        }
        DataType::Boolean => {
            let a = downcast::<BooleanArray>(arr)?;
            for i in (0..a.len()).filter(|&i| a.is_valid(i)) {
                sheet.write_boolean(row(i), col, a.value(i))?;
            }
        }
        DataType::Timestamp(_, _) => {
            let a = downcast::<TimestampMillisecondArray>(arr)?;
            for i in (0..a.len()).filter(|&i| a.is_valid(i)) {
                let Some(dt) = DateTime::from_timestamp_millis(a.value(i)) else {
                    bail!("timestamp {} out of range", a.value(i));
                };
                sheet.write_number_with_format(
                    row(i),
                    col,
                    excel_serial(dt.naive_utc()),
                    datetime,
                )?;
            }
        }
        DataType::Struct(_) => {
            let a = downcast::<StructArray>(arr)?;
            for i in 0..a.len() {
                match mixed_cell(a, i) {
                    RawCell::Empty => {}
                    RawCell::Text(s) => {
                        sheet.write_string(row(i), col, s)?;
                    }
                    RawCell::Int(v) => {
                        sheet.write_number(row(i), col, v as f64)?;
                    }
                    RawCell::Float(v) => {
                        sheet.write_number(row(i), col, v)?;
                    }
                    RawCell::Bool(b) => {
                        sheet.write_boolean(row(i), col, b)?;
                    }
                    RawCell::DateTime(dt) => {
                        sheet.write_number_with_format(row(i), col, excel_serial(dt), datetime)?;
                    }
                }
            }
        }
        _ => {
            let a = downcast::<StringArray>(arr)?;
            for i in (0..a.len()).filter(|&i| a.is_valid(i)) {
                sheet.write_string(row(i), col, a.value(i))?;
            }
        }
    }
    Ok(())
}

fn downcast<T: Array + 'static>(arr: &dyn Array) -> Result<&T> {
    arr.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type {:?}", arr.data_type()))
}

/// Days since the spreadsheet epoch (1899-12-30), fractional part for time.
pub fn excel_serial(dt: NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    (dt - epoch).num_milliseconds() as f64 / 86_400_000.0
}
