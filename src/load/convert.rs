use crate::load::raw_table::{CellKind, RawCell, RawTable};
use anyhow::{Context, Result};
use arrow::{
    array::{
        Array, ArrayRef, BooleanArray, BooleanBuilder, Float64Array, Float64Builder,
        Int64Builder, StringArray, StringBuilder, StructArray, TimestampMillisecondArray,
        TimestampMillisecondBuilder,
    },
    buffer::NullBuffer,
    datatypes::{DataType, Fields, Schema},
    record_batch::RecordBatch,
};
use chrono::DateTime;
use std::sync::Arc;

/// Convert the raw cells into typed columns following `schema`.
///
/// `schema` must come from `infer_schema` on the same table, so every
/// non-empty cell fits its column's dtype.
pub fn raw_to_batch(raw: &RawTable, schema: Schema) -> Result<RecordBatch> {
    let mut out = Vec::with_capacity(schema.fields().len());

    for (idx, fld) in schema.fields().iter().enumerate() {
        let cells = raw.column(idx);
        let col: ArrayRef = match fld.data_type() {
            DataType::Int64 => {
                let mut b = Int64Builder::with_capacity(raw.rows.len());
                for cell in cells {
                    b.append_option(match cell {
                        RawCell::Int(v) => Some(*v),
                        RawCell::Float(v) => Some(*v as i64),
                        _ => None,
                    });
                }
                Arc::new(b.finish())
            }
            DataType::Float64 => {
                let mut b = Float64Builder::with_capacity(raw.rows.len());
                for cell in cells {
                    b.append_option(match cell {
                        RawCell::Int(v) => Some(*v as f64),
                        RawCell::Float(v) => Some(*v),
                        _ => None,
                    });
                }
                Arc::new(b.finish())
            }
            DataType::Boolean => {
                let mut b = BooleanBuilder::with_capacity(raw.rows.len());
                for cell in cells {
                    b.append_option(match cell {
                        RawCell::Bool(v) => Some(*v),
                        _ => None,
                    });
                }
                Arc::new(b.finish())
            }
            DataType::Timestamp(_, _) => {
                let mut b = TimestampMillisecondBuilder::with_capacity(raw.rows.len());
                for cell in cells {
                    b.append_option(match cell {
                        RawCell::DateTime(dt) => Some(dt.and_utc().timestamp_millis()),
                        _ => None,
                    });
                }
                Arc::new(b.finish())
            }
            DataType::Struct(fields) => Arc::new(mixed_column(cells, fields, raw.rows.len())?),
            _ => {
                let mut b = StringBuilder::new();
                for cell in cells {
                    b.append_option(cell.render());
                }
                Arc::new(b.finish())
            }
        };
        out.push(col);
    }

    RecordBatch::try_new(Arc::new(schema), out).context("building record batch from sheet")
}

/// Build a mixed column: one child per `CellKind`, only the cell's own
/// kind set on each row.
fn mixed_column<'a>(
    cells: impl Iterator<Item = &'a RawCell>,
    fields: &Fields,
    len: usize,
) -> Result<StructArray> {
    let mut text = StringBuilder::new();
    let mut number = Float64Builder::with_capacity(len);
    let mut flag = BooleanBuilder::with_capacity(len);
    let mut datetime = TimestampMillisecondBuilder::with_capacity(len);
    let mut valid = Vec::with_capacity(len);

    for cell in cells {
        text.append_option(match cell {
            RawCell::Text(s) => Some(s.as_str()),
            _ => None,
        });
        number.append_option(match cell {
            RawCell::Int(v) => Some(*v as f64),
            RawCell::Float(v) => Some(*v),
            _ => None,
        });
        flag.append_option(match cell {
            RawCell::Bool(v) => Some(*v),
            _ => None,
        });
        datetime.append_option(match cell {
            RawCell::DateTime(dt) => Some(dt.and_utc().timestamp_millis()),
            _ => None,
        });
        valid.push(!cell.is_empty());
    }

    let children: Vec<ArrayRef> = vec![
        Arc::new(text.finish()),
        Arc::new(number.finish()),
        Arc::new(flag.finish()),
        Arc::new(datetime.finish()),
    ];
    StructArray::try_new(fields.clone(), children, Some(NullBuffer::from(valid)))
        .context("building mixed column")
}

fn child<'a, T: Array + 'static>(arr: &'a StructArray, kind: CellKind) -> Option<&'a T> {
    arr.column_by_name(kind.field_name())
        .and_then(|c| c.as_any().downcast_ref::<T>())
}

/// Read one row of a mixed column back as the cell it was built from.
pub fn mixed_cell(arr: &StructArray, row: usize) -> RawCell {
    if arr.is_null(row) {
        return RawCell::Empty;
    }
    if let Some(a) = child::<StringArray>(arr, CellKind::Text).filter(|a| a.is_valid(row)) {
        return RawCell::Text(a.value(row).to_string());
    }
    if let Some(a) = child::<Float64Array>(arr, CellKind::Number).filter(|a| a.is_valid(row)) {
        return RawCell::Float(a.value(row));
    }
    if let Some(a) = child::<BooleanArray>(arr, CellKind::Flag).filter(|a| a.is_valid(row)) {
        return RawCell::Bool(a.value(row));
    }
    child::<TimestampMillisecondArray>(arr, CellKind::DateTime)
        .filter(|a| a.is_valid(row))
        .and_then(|a| DateTime::from_timestamp_millis(a.value(row)))
        .map(|dt| RawCell::DateTime(dt.naive_utc()))
        .unwrap_or(RawCell::Empty)
}
