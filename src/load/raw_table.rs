use chrono::NaiveDateTime;

/// Tokens that a text cell may hold in place of a value.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// The kind of value a non-empty cell holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    Text,
    Number,
    Flag,
    DateTime,
}

impl CellKind {
    pub const ALL: [CellKind; 4] = [
        CellKind::Text,
        CellKind::Number,
        CellKind::Flag,
        CellKind::DateTime,
    ];
}

/// A single worksheet cell, before any column typing happens.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Builds a text cell, folding NA tokens into `Empty`.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if NA_TOKENS.contains(&s.as_str()) {
            RawCell::Empty
        } else {
            RawCell::Text(s)
        }
    }

    /// Builds a float cell, folding NaN into `Empty`.
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            RawCell::Empty
        } else {
            RawCell::Float(v)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }

    pub fn kind(&self) -> Option<CellKind> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(_) => Some(CellKind::Text),
            RawCell::Int(_) | RawCell::Float(_) => Some(CellKind::Number),
            RawCell::Bool(_) => Some(CellKind::Flag),
            RawCell::DateTime(_) => Some(CellKind::DateTime),
        }
    }

    /// Text rendering used for headers and mixed-type columns.
    pub fn render(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => Some(s.clone()),
            RawCell::Int(v) => Some(v.to_string()),
            RawCell::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                Some(format!("{}", *v as i64))
            }
            RawCell::Float(v) => Some(v.to_string()),
            RawCell::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            RawCell::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RawTable {
    /// Column names, from the first row of the sheet, made unique.
    pub headers: Vec<String>,
    /// Every following row, padded or truncated to `headers.len()`.
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Cells of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &RawCell> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn na_tokens_become_empty() {
        for token in ["NA", "n/a", "NULL", "", "#N/A"] {
            assert!(RawCell::text(token).is_empty(), "{token:?} should be missing");
        }
        // surrounding whitespace means the token is not an exact match
        assert_eq!(RawCell::text(" NA"), RawCell::Text(" NA".into()));
        assert!(RawCell::float(f64::NAN).is_empty());
    }

    #[test]
    fn render_matches_spreadsheet_display() {
        assert_eq!(RawCell::Float(110001.0).render().as_deref(), Some("110001"));
        assert_eq!(RawCell::Float(2.5).render().as_deref(), Some("2.5"));
        assert_eq!(RawCell::Bool(true).render().as_deref(), Some("True"));
        let dt = NaiveDate::from_ymd_opt(2024, 12, 14)
            .unwrap()
            .and_hms_opt(18, 2, 37)
            .unwrap();
        assert_eq!(
            RawCell::DateTime(dt).render().as_deref(),
            Some("2024-12-14 18:02:37")
        );
        assert_eq!(RawCell::Empty.render(), None);
    }
}
