//! Spreadsheet fixtures shared by the unit tests.

use anyhow::Result;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub const POSTAL_HEADERS: [&str; 5] = ["statename", "district", "officetype", "regionname", "delivery"];

/// One fixture cell.
#[derive(Debug, Clone)]
pub enum Val {
    Text(String),
    Num(f64),
    Blank,
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::Text(s.to_string())
    }
}

impl From<String> for Val {
    fn from(s: String) -> Self {
        Val::Text(s)
    }
}

impl From<f64> for Val {
    fn from(v: f64) -> Self {
        Val::Num(v)
    }
}

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,postal_insights=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Write `headers` then `rows` into the first sheet of a new workbook.
/// Blank cells and empty strings are left unwritten.
pub fn write_sheet(path: &Path, headers: &[&str], rows: &[Vec<Val>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (c, name) in headers.iter().enumerate() {
        if !name.is_empty() {
            sheet.write_string(0, c as u16, *name)?;
        }
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, val) in row.iter().enumerate() {
            let c = c as u16;
            match val {
                Val::Text(s) if !s.is_empty() => {
                    sheet.write_string(r, c, s.as_str())?;
                }
                Val::Num(v) => {
                    sheet.write_number(r, c, *v)?;
                }
                _ => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// A row over `POSTAL_HEADERS`.
pub fn postal_row(
    state: &str,
    district: &str,
    officetype: &str,
    region: &str,
    delivery: &str,
) -> Vec<Val> {
    vec![
        state.into(),
        district.into(),
        officetype.into(),
        region.into(),
        delivery.into(),
    ]
}

/// A postal sheet where state `State{i:02}` appears `i + 1` times, for
/// `i in 0..states`. Each row carries a unique `officename`.
pub fn write_ranked_states(path: &Path, states: usize) -> Result<()> {
    let mut headers = vec!["officename"];
    headers.extend(POSTAL_HEADERS);

    let mut rows = Vec::new();
    for i in 0..states {
        for j in 0..=i {
            let mut row = vec![Val::from(format!("Office{:02}-{:02}", i, j))];
            row.extend(postal_row(
                &format!("State{:02}", i),
                &format!("District{:02}-{}", i, j % 3),
                if j % 2 == 0 { "BO" } else { "PO" },
                &format!("Region{}", i % 4),
                if j % 3 == 0 { "Non-Delivery" } else { "Delivery" },
            ));
            rows.push(row);
        }
    }
    write_sheet(path, &headers, &rows)
}
