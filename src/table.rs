use crate::load::{convert::mixed_cell, CellKind};
use anyhow::{bail, Context, Result};
use arrow::{
    array::{Array, ArrayRef, StringArray, StructArray},
    compute::cast,
    datatypes::DataType,
    record_batch::RecordBatch,
};
use std::fmt;

/// The five columns every postal sheet must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequiredColumn {
    StateName,
    District,
    OfficeType,
    RegionName,
    Delivery,
}

impl RequiredColumn {
    /// Validation order.
    pub const ALL: [RequiredColumn; 5] = [
        RequiredColumn::StateName,
        RequiredColumn::District,
        RequiredColumn::OfficeType,
        RequiredColumn::RegionName,
        RequiredColumn::Delivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredColumn::StateName => "statename",
            RequiredColumn::District => "district",
            RequiredColumn::OfficeType => "officetype",
            RequiredColumn::RegionName => "regionname",
            RequiredColumn::Delivery => "delivery",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RequiredColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value of a required column, keyed by its text and the kind of cell it
/// came from: the number 403001 and the text "403001" group separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryValue<'a> {
    pub text: &'a str,
    pub kind: CellKind,
}

impl fmt::Display for CategoryValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

#[derive(Debug, Clone)]
struct Category {
    text: StringArray,
    kinds: Vec<CellKind>,
}

impl Category {
    fn from_column(arr: &ArrayRef, required: RequiredColumn) -> Result<Self> {
        if let Some(mixed) = arr.as_any().downcast_ref::<StructArray>() {
            let cells: Vec<_> = (0..mixed.len()).map(|i| mixed_cell(mixed, i)).collect();
            let text: StringArray = cells.iter().map(|c| c.render()).collect();
            let kinds = cells
                .iter()
                .map(|c| c.kind().unwrap_or(CellKind::Text))
                .collect();
            return Ok(Self { text, kinds });
        }

        let text = cast(arr, &DataType::Utf8)
            .with_context(|| format!("rendering column '{}' as text", required))?;
        let text = text
            .as_any()
            .downcast_ref::<StringArray>()
            .with_context(|| format!("column '{}' did not cast to Utf8", required))?
            .clone();
        let kinds = vec![CellKind::of_column(arr.data_type()); text.len()];
        Ok(Self { text, kinds })
    }
}

/// A validated, read-only postal table.
///
/// Only the cleaner builds one, so every instance has normalized headers,
/// no nulls, no duplicate rows, and all five required columns.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    batch: RecordBatch,
    /// Each required column's values, indexed by `RequiredColumn::slot`.
    categories: Vec<Category>,
}

impl CleanedTable {
    /// Resolve the required columns on an already-cleaned batch.
    pub(crate) fn try_new(batch: RecordBatch) -> Result<Self> {
        let mut categories = Vec::with_capacity(RequiredColumn::ALL.len());
        for required in RequiredColumn::ALL {
            let Some(idx) = batch
                .schema()
                .fields()
                .iter()
                .position(|f| f.name() == required.as_str())
            else {
                bail!("Required column '{}' not found in dataset", required);
            };
            categories.push(Category::from_column(batch.column(idx), required)?);
        }
        Ok(Self { batch, categories })
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Values of a required column as text, one per row.
    pub fn category(&self, col: RequiredColumn) -> &StringArray {
        &self.categories[col.slot()].text
    }

    /// Iterate a required column's values in row order.
    pub fn values(&self, col: RequiredColumn) -> impl Iterator<Item = CategoryValue<'_>> + '_ {
        let Category { text, kinds } = &self.categories[col.slot()];
        (0..text.len())
            .filter(move |&i| text.is_valid(i))
            .map(move |i| CategoryValue {
                text: text.value(i),
                kind: kinds[i],
            })
    }
}
