//! Aggregate views over the cleaned table: grouped row counts that feed the
//! summary and the charts. Every view is recomputed on demand.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt::Display,
    hash::Hash,
};

/// Row count per distinct value, highest count first, labelled by the
/// value's display text.
///
/// Ties keep the order in which the values first appear.
pub fn value_counts<K>(values: impl IntoIterator<Item = K>) -> Vec<(String, usize)>
where
    K: Copy + Eq + Hash + Display,
{
    let mut order: Vec<K> = Vec::new();
    let mut counts: HashMap<K, usize> = HashMap::new();
    for v in values {
        let n = counts.entry(v).or_insert_with(|| {
            order.push(v);
            0
        });
        *n += 1;
    }

    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|v| (v.to_string(), counts[&v]))
        .collect();
    // stable, so first-seen order survives among equal counts
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// The `n` largest entries of an already-ordered `value_counts` result.
pub fn top_n(counts: &[(String, usize)], n: usize) -> Vec<(String, usize)> {
    counts.iter().take(n).cloned().collect()
}

/// Distinct values in first-seen order.
pub fn unique<K>(values: impl IntoIterator<Item = K>) -> Vec<String>
where
    K: Copy + Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(|v| v.to_string())
        .collect()
}

/// Row counts for every (row key, column key) pair, as a dense grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTab {
    /// Row keys, ascending.
    pub rows: Vec<String>,
    /// Column keys, ascending.
    pub columns: Vec<String>,
    /// `counts[r][c]`; pairs that never occur are 0.
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Sum of each row, the height of a stacked bar.
    pub fn row_totals(&self) -> Vec<usize> {
        self.counts.iter().map(|r| r.iter().sum()).collect()
    }

    pub fn get(&self, row: &str, column: &str) -> usize {
        let r = self.rows.iter().position(|k| k == row);
        let c = self.columns.iter().position(|k| k == column);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }
}

/// Count rows grouped by two parallel key sequences.
pub fn crosstab<R, C>(
    row_keys: impl IntoIterator<Item = R>,
    column_keys: impl IntoIterator<Item = C>,
) -> CrossTab
where
    R: Copy + Ord + Display,
    C: Copy + Ord + Display,
{
    let mut pairs: BTreeMap<(R, C), usize> = BTreeMap::new();
    for (r, c) in row_keys.into_iter().zip(column_keys) {
        *pairs.entry((r, c)).or_insert(0) += 1;
    }

    let rows: Vec<R> = pairs
        .keys()
        .map(|(r, _)| *r)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let columns: Vec<C> = pairs
        .keys()
        .map(|(_, c)| *c)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut counts = vec![vec![0usize; columns.len()]; rows.len()];
    for ((r, c), n) in pairs {
        // both keys come from the sets above
        if let (Ok(ri), Ok(ci)) = (rows.binary_search(&r), columns.binary_search(&c)) {
            counts[ri][ci] = n;
        }
    }

    CrossTab {
        rows: rows.iter().map(|k| k.to_string()).collect(),
        columns: columns.iter().map(|k| k.to_string()).collect(),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load::CellKind, table::CategoryValue};

    #[test]
    fn test_value_counts_descending_with_stable_ties() {
        let counts = value_counts(["North", "South", "East", "South", "East", "West"]);
        assert_eq!(
            counts,
            vec![
                ("South".to_string(), 2),
                ("East".to_string(), 2),
                ("North".to_string(), 1),
                ("West".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_n_on_fifteen_ranked_states() {
        let values: Vec<String> = (0..15)
            .flat_map(|i| std::iter::repeat(format!("S{:02}", i)).take(i + 1))
            .collect();
        let counts = value_counts(values.iter().map(String::as_str));
        let top = top_n(&counts, 10);

        assert_eq!(top.len(), 10);
        let expected: Vec<(String, usize)> =
            (5..15).rev().map(|i| (format!("S{:02}", i), i + 1)).collect();
        assert_eq!(top, expected);
    }

    #[test]
    fn test_top_n_shorter_than_n() {
        let counts = value_counts(["a", "b"]);
        assert_eq!(top_n(&counts, 10).len(), 2);
    }

    #[test]
    fn test_unique_first_seen() {
        assert_eq!(unique(["PO", "BO", "PO", "HO"]), vec!["PO", "BO", "HO"]);
    }

    #[test]
    fn test_keys_of_different_kinds_stay_apart() {
        let number = CategoryValue {
            text: "403001",
            kind: CellKind::Number,
        };
        let text = CategoryValue {
            text: "403001",
            kind: CellKind::Text,
        };
        let counts = value_counts([number, text, number]);
        assert_eq!(
            counts,
            vec![("403001".to_string(), 2), ("403001".to_string(), 1)]
        );
        assert_eq!(unique([text, number, text]).len(), 2);
    }

    #[test]
    fn test_crosstab_fills_missing_pairs() {
        let states = ["Goa", "Delhi", "Goa", "Goa"];
        let delivery = ["Delivery", "Non-Delivery", "Delivery", "Non-Delivery"];
        let tab = crosstab(states, delivery);

        assert_eq!(tab.rows, vec!["Delhi", "Goa"]);
        assert_eq!(tab.columns, vec!["Delivery", "Non-Delivery"]);
        assert_eq!(tab.counts, vec![vec![0, 1], vec![2, 1]]);
        assert_eq!(tab.get("Delhi", "Delivery"), 0);
        assert_eq!(tab.get("Kerala", "Delivery"), 0);
        assert_eq!(tab.row_totals(), vec![1, 3]);
    }
}
