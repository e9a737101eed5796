use anyhow::Result;
use arrow::{
    array::{Array, ArrayRef, StringArray, StructArray},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Trim surrounding whitespace from every string cell: whole Utf8 columns
/// and the text cells of mixed columns.
/// Values of any other type are passed through untouched.
pub fn apply_trimming(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut cols = Vec::with_capacity(batch.num_columns());
    for arr in batch.columns() {
        if let Some(trimmed) = trim_strings(arr) {
            cols.push(trimmed);
            continue;
        }
        if let Some(mixed) = arr.as_any().downcast_ref::<StructArray>() {
            if let Some(trimmed) = trim_mixed(mixed)? {
                cols.push(Arc::new(trimmed) as ArrayRef);
                continue;
            }
        }
        cols.push(arr.clone());
    }

    RecordBatch::try_new(batch.schema(), cols).map_err(Into::into)
}

/// Whitespace as the spreadsheet's text tools see it: Unicode whitespace
/// plus the ASCII separators `\x1c`..=`\x1f`.
fn is_strip_char(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Strip leading and trailing whitespace from `s`.
pub fn strip(s: &str) -> &str {
    s.trim_matches(is_strip_char)
}

fn needs_trim(s: &str) -> bool {
    s.len() != strip(s).len()
}

/// A trimmed copy of a Utf8 array, or `None` when it is not Utf8 or
/// nothing needs trimming.
fn trim_strings(arr: &ArrayRef) -> Option<ArrayRef> {
    let sarr = arr.as_any().downcast_ref::<StringArray>()?;
    if !sarr.iter().flatten().any(needs_trim) {
        return None;
    }
    let trimmed: StringArray = sarr.iter().map(|opt| opt.map(strip)).collect();
    Some(Arc::new(trimmed))
}

fn trim_mixed(mixed: &StructArray) -> Result<Option<StructArray>> {
    let mut changed = false;
    let children: Vec<ArrayRef> = mixed
        .columns()
        .iter()
        .map(|child| match trim_strings(child) {
            Some(trimmed) => {
                changed = true;
                trimmed
            }
            None => child.clone(),
        })
        .collect();
    if !changed {
        return Ok(None);
    }
    let rebuilt = StructArray::try_new(mixed.fields().clone(), children, mixed.nulls().cloned())?;
    Ok(Some(rebuilt))
}
