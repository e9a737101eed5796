use crate::{
    aggregate,
    table::{CleanedTable, RequiredColumn},
};
use std::fmt;

/// Headline figures for a cleaned postal table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_entries: usize,
    pub unique_states: usize,
    pub unique_districts: usize,
    /// Distinct office types, first-seen order.
    pub office_types: Vec<String>,
}

impl Summary {
    pub fn from_table(table: &CleanedTable) -> Self {
        Self {
            total_entries: table.num_rows(),
            unique_states: aggregate::unique(table.values(RequiredColumn::StateName)).len(),
            unique_districts: aggregate::unique(table.values(RequiredColumn::District)).len(),
            office_types: aggregate::unique(table.values(RequiredColumn::OfficeType)),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== BASIC SUMMARY ===")?;
        writeln!(f, "Total Entries After Cleaning: {}", self.total_entries)?;
        writeln!(f, "Unique States: {}", self.unique_states)?;
        writeln!(f, "Unique Districts: {}", self.unique_districts)?;
        let types: Vec<String> = self
            .office_types
            .iter()
            .map(|t| format!("'{}'", t))
            .collect();
        write!(f, "Unique Office Types: [{}]", types.join(" "))
    }
}

/// Print the summary block to stdout.
pub fn print_summary(table: &CleanedTable) -> Summary {
    let summary = Summary::from_table(table);
    println!("\n{}", summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::clean_batch;
    use arrow::{
        array::{ArrayRef, StringArray},
        datatypes::{DataType, Field, Schema},
        record_batch::RecordBatch,
    };
    use std::sync::Arc;

    fn table(rows: &[[&str; 5]]) -> CleanedTable {
        let fields: Vec<Field> = RequiredColumn::ALL
            .iter()
            .map(|c| Field::new(c.as_str(), DataType::Utf8, true))
            .collect();
        let cols: Vec<ArrayRef> = (0..5)
            .map(|c| {
                Arc::new(StringArray::from(
                    rows.iter().map(|r| r[c]).collect::<Vec<_>>(),
                )) as ArrayRef
            })
            .collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), cols).unwrap();
        clean_batch(&batch).unwrap()
    }

    #[test]
    fn test_summary_figures_and_display() {
        let t = table(&[
            ["Goa", "North Goa", "BO", "Goa", "Delivery"],
            ["Goa", "South Goa", "PO", "Goa", "Delivery"],
            ["Delhi", "New Delhi", "BO", "Delhi", "Non-Delivery"],
            ["Delhi", "New Delhi", "HO", "Delhi", "Delivery"],
        ]);
        let summary = Summary::from_table(&t);
        assert_eq!(
            summary,
            Summary {
                total_entries: 4,
                unique_states: 2,
                unique_districts: 3,
                office_types: vec!["BO".into(), "PO".into(), "HO".into()],
            }
        );
        assert_eq!(
            summary.to_string(),
            "=== BASIC SUMMARY ===\n\
             Total Entries After Cleaning: 4\n\
             Unique States: 2\n\
             Unique Districts: 3\n\
             Unique Office Types: ['BO' 'PO' 'HO']"
        );
    }

    #[test]
    fn test_summary_counts_after_cleaning() {
        let t = table(&[
            ["Goa", "North Goa", "BO", "Goa", "Delivery"],
            ["Goa", "North Goa", "BO", "Goa", "Delivery"],
        ]);
        assert_eq!(Summary::from_table(&t).total_entries, 1);
    }
}
