use anyhow::{Context, Result};
use arrow::{
    array::{Array, BooleanArray},
    compute::filter_record_batch,
    record_batch::RecordBatch,
    row::{RowConverter, SortField},
};
use std::collections::HashSet;

/// Drop every row that has a null in any column.
pub fn drop_null_rows(batch: &RecordBatch) -> Result<RecordBatch> {
    if batch.columns().iter().all(|c| c.null_count() == 0) {
        return Ok(batch.clone());
    }

    let keep: Vec<bool> = (0..batch.num_rows())
        .map(|row| batch.columns().iter().all(|c| c.is_valid(row)))
        .collect();
    filter_record_batch(batch, &BooleanArray::from(keep)).context("filtering null rows")
}

/// Drop rows that exactly repeat an earlier row, keeping the first.
///
/// Rows are compared on their typed values across all columns.
pub fn drop_duplicate_rows(batch: &RecordBatch) -> Result<RecordBatch> {
    if batch.num_rows() < 2 {
        return Ok(batch.clone());
    }

    let fields = batch
        .schema()
        .fields()
        .iter()
        .map(|f| SortField::new(f.data_type().clone()))
        .collect();
    let converter = RowConverter::new(fields).context("building row converter")?;
    let rows = converter
        .convert_columns(batch.columns())
        .context("encoding rows for dedup")?;

    let mut seen = HashSet::with_capacity(rows.num_rows());
    let keep: Vec<bool> = rows.iter().map(|row| seen.insert(row)).collect();
    if keep.iter().all(|k| *k) {
        return Ok(batch.clone());
    }
    filter_record_batch(batch, &BooleanArray::from(keep)).context("filtering duplicate rows")
}
