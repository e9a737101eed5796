// src/load/mod.rs
pub mod convert;
pub mod raw_table;
pub mod schema;

use anyhow::{anyhow, bail, Context, Result};
use arrow::record_batch::RecordBatch;
use calamine::{open_workbook_auto, Data, DataType as _, Reader};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};
use tracing::debug;

pub use raw_table::{CellKind, RawCell, RawTable};

/// Open the spreadsheet at `path` and read its first worksheet.
///
/// The first row becomes the header; every later row is kept as-is, with
/// error cells and NA tokens folded into `RawCell::Empty`.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {:?}", path))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("Workbook {:?} contains no worksheets", path))?
        .with_context(|| format!("Failed to read first worksheet of {:?}", path))?;

    let mut rows = range.rows();
    let header_row = match rows.next() {
        Some(row) if !row.is_empty() => row,
        _ => bail!("First worksheet of {:?} is empty", path),
    };
    let headers = header_names(header_row);
    let width = headers.len();

    let rows: Vec<Vec<RawCell>> = rows
        .map(|row| {
            let mut cells: Vec<RawCell> = row.iter().take(width).map(to_raw_cell).collect();
            cells.resize(width, RawCell::Empty);
            cells
        })
        .collect();

    debug!(columns = width, rows = rows.len(), "read worksheet");
    Ok(RawTable { headers, rows })
}

/// Read a spreadsheet straight into a typed record batch.
pub fn load_batch<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let raw = read_workbook(path)?;
    let schema = schema::infer_schema(&raw);
    convert::raw_to_batch(&raw, schema)
}

fn to_raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::text(s.as_str()),
        Data::Int(v) => RawCell::Int(*v),
        Data::Float(v) => RawCell::float(*v),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(RawCell::DateTime)
            .unwrap_or_else(|| RawCell::text(cell.to_string())),
        other => RawCell::text(other.to_string()),
    }
}

/// Header cells as unique column names: blanks become `Unnamed: <i>` and
/// repeats get a `.1`, `.2`, ... suffix.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(row.len());

    for (i, cell) in row.iter().enumerate() {
        let base = match cell {
            Data::String(s) if !s.is_empty() => s.clone(),
            Data::String(_) | Data::Empty | Data::Error(_) => format!("Unnamed: {}", i),
            other => to_raw_cell(other)
                .render()
                .unwrap_or_else(|| format!("Unnamed: {}", i)),
        };

        let mut name = base.clone();
        while taken.contains(&name) {
            let n = repeats.entry(base.clone()).or_insert(0);
            *n += 1;
            name = format!("{}.{}", base, n);
        }
        taken.insert(name.clone());
        names.push(name);
    }
    names
}
