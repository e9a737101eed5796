// src/clean/mod.rs
pub mod rows;
pub mod trimming;

use crate::{load, table::CleanedTable};
use anyhow::{Context, Result};
use arrow::{
    datatypes::{Field, Schema},
    record_batch::RecordBatch,
};
use std::{path::Path, sync::Arc};
use tracing::{debug, info};

/// Load a postal spreadsheet and clean it, reporting any failure on the
/// console and returning `None` instead of an error.
pub fn load_and_clean<P: AsRef<Path>>(path: P) -> Option<CleanedTable> {
    match try_load_and_clean(path) {
        Ok(table) => Some(table),
        Err(e) => {
            println!("Error loading or cleaning data: {:#}", e);
            None
        }
    }
}

/// Load a postal spreadsheet and clean it.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn try_load_and_clean<P: AsRef<Path>>(path: P) -> Result<CleanedTable> {
    let raw = load::load_batch(path)?;
    let table = clean_batch(&raw)?;
    info!(
        raw_rows = raw.num_rows(),
        rows = table.num_rows(),
        "cleaned dataset"
    );
    Ok(table)
}

/// Run the cleaning steps, in order, on an already-loaded batch:
/// 1) drop rows with any null, 2) drop exact duplicates,
/// 3) normalize column names, 4) trim string cells, 5) validate.
pub fn clean_batch(raw: &RecordBatch) -> Result<CleanedTable> {
    let batch = rows::drop_null_rows(raw)?;
    debug!(before = raw.num_rows(), after = batch.num_rows(), "dropped null rows");

    let before = batch.num_rows();
    let batch = rows::drop_duplicate_rows(&batch)?;
    debug!(before, after = batch.num_rows(), "dropped duplicate rows");

    let batch = normalize_headers(&batch)?;
    let batch = trimming::apply_trimming(&batch)?;

    CleanedTable::try_new(batch)
}

/// Strip surrounding whitespace from column names and lowercase them.
pub fn normalize_header(name: &str) -> String {
    trimming::strip(name).to_lowercase()
}

fn normalize_headers(batch: &RecordBatch) -> Result<RecordBatch> {
    let fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .map(|f| Field::new(normalize_header(f.name()), f.data_type().clone(), f.is_nullable()))
        .collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), batch.columns().to_vec())
        .context("renaming columns")
}
