use crate::load::raw_table::{CellKind, RawCell, RawTable};
use arrow::datatypes::{DataType, Field, Fields, Schema, TimeUnit};

impl CellKind {
    /// Name of this kind's child field in a mixed column.
    pub fn field_name(&self) -> &'static str {
        match self {
            CellKind::Text => "text",
            CellKind::Number => "number",
            CellKind::Flag => "flag",
            CellKind::DateTime => "datetime",
        }
    }

    fn data_type(&self) -> DataType {
        match self {
            CellKind::Text => DataType::Utf8,
            CellKind::Number => DataType::Float64,
            CellKind::Flag => DataType::Boolean,
            CellKind::DateTime => DataType::Timestamp(TimeUnit::Millisecond, None),
        }
    }

    /// Kind of every value in a homogeneous column of `dtype`.
    pub fn of_column(dtype: &DataType) -> CellKind {
        match dtype {
            DataType::Int64 | DataType::Float64 => CellKind::Number,
            DataType::Boolean => CellKind::Flag,
            DataType::Timestamp(_, _) => CellKind::DateTime,
            _ => CellKind::Text,
        }
    }
}

/// Child fields of a mixed column, in `CellKind::ALL` order. A valid row
/// sets exactly one child; a null row sets none.
pub fn mixed_fields() -> Fields {
    CellKind::ALL
        .iter()
        .map(|k| Field::new(k.field_name(), k.data_type(), true))
        .collect()
}

/// Dtype of a column whose cells are of more than one kind.
pub fn mixed_type() -> DataType {
    DataType::Struct(mixed_fields())
}

/// Infer the Arrow dtype of one column from its non-missing cells.
///
/// Homogeneous columns keep their native type; integral floats collapse to
/// Int64. A column mixing kinds becomes `mixed_type()`, so every cell keeps
/// its own type.
pub fn infer_column_type<'a>(cells: impl Iterator<Item = &'a RawCell>) -> DataType {
    let (mut text, mut int, mut float, mut boolean, mut datetime) = (0, 0, 0, 0, 0);
    let mut integral = true;

    for cell in cells {
        match cell {
            RawCell::Empty => {}
            RawCell::Text(_) => text += 1,
            RawCell::Int(_) => int += 1,
            RawCell::Float(v) => {
                float += 1;
                if v.fract() != 0.0 || v.abs() >= 9.0e15 {
                    integral = false;
                }
            }
            RawCell::Bool(_) => boolean += 1,
            RawCell::DateTime(_) => datetime += 1,
        }
    }

    let kinds = [text, int + float, boolean, datetime]
        .iter()
        .filter(|&&n| n > 0)
        .count();
    match kinds {
        0 => return DataType::Utf8,
        1 => {}
        _ => return mixed_type(),
    }

    if int + float > 0 {
        if integral {
            DataType::Int64
        } else {
            DataType::Float64
        }
    } else if boolean > 0 {
        DataType::Boolean
    } else if datetime > 0 {
        DataType::Timestamp(TimeUnit::Millisecond, None)
    } else {
        DataType::Utf8
    }
}

/// Build the Arrow schema for a raw table, one nullable field per header.
pub fn infer_schema(raw: &RawTable) -> Schema {
    let fields: Vec<Field> = raw
        .headers
        .iter()
        .enumerate()
        .map(|(i, name)| Field::new(name, infer_column_type(raw.column(i)), true))
        .collect();
    Schema::new(fields)
}
