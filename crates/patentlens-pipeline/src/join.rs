//! Left-outer hash join on a single key column.
//!
//! Output row count is `sum(max(1, matches(l)))` over left rows `l`: every
//! left row survives, and a key with `n` right-side matches yields `n` rows in
//! right-table order. A missing key never matches.
//!
//! Output columns are the left columns followed by the right non-key columns.
//! A non-key name present on both sides is renamed `<name>_x` (left) and
//! `<name>_y` (right).

use std::collections::{HashMap, HashSet};

use patentlens_table::{Cell, Table, TableError};

pub const LEFT_SUFFIX: &str = "_x";
pub const RIGHT_SUFFIX: &str = "_y";

pub fn left_join(left: &Table, right: &Table, key: &str) -> Result<Table, TableError> {
    let left_key = left.column_index(key)?;
    let right_key = right.column_index(key)?;
    let right_cols: Vec<usize> = (0..right.width()).filter(|&i| i != right_key).collect();

    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows().iter().enumerate() {
        if let Some(k) = row[right_key].as_deref() {
            index.entry(k).or_default().push(i);
        }
    }

    let mut out = Table::new(joined_columns(left, right, key))?;
    for lrow in left.rows() {
        let matches = lrow[left_key].as_deref().and_then(|k| index.get(k));
        match matches {
            Some(hits) => {
                for &hit in hits {
                    let rrow = &right.rows()[hit];
                    let mut row = Vec::with_capacity(out.width());
                    row.extend_from_slice(lrow);
                    row.extend(right_cols.iter().map(|&c| rrow[c].clone()));
                    out.push_row(row)?;
                }
            }
            None => {
                let mut row: Vec<Cell> = Vec::with_capacity(out.width());
                row.extend_from_slice(lrow);
                row.resize(out.width(), None);
                out.push_row(row)?;
            }
        }
    }

    tracing::trace!(
        key,
        left = left.len(),
        right = right.len(),
        rows = out.len(),
        "left join"
    );
    Ok(out)
}

fn joined_columns(left: &Table, right: &Table, key: &str) -> Vec<String> {
    let left_names: HashSet<&str> = left.columns().iter().map(String::as_str).collect();
    let right_names: HashSet<&str> = right.columns().iter().map(String::as_str).collect();
    let clashes: HashSet<&str> = left_names
        .intersection(&right_names)
        .copied()
        .filter(|c| *c != key)
        .collect();

    let mut taken: HashSet<String> = left_names
        .union(&right_names)
        .map(|c| c.to_string())
        .collect();

    let mut rename = |name: &str, suffix: &str| -> String {
        if !clashes.contains(name) {
            return name.to_string();
        }
        let mut candidate = format!("{name}{suffix}");
        while taken.contains(&candidate) {
            candidate.push_str(suffix);
        }
        taken.insert(candidate.clone());
        candidate
    };

    let mut columns: Vec<String> = left
        .columns()
        .iter()
        .map(|c| rename(c, LEFT_SUFFIX))
        .collect();
    columns.extend(
        right
            .columns()
            .iter()
            .filter(|c| c.as_str() != key)
            .map(|c| rename(c, RIGHT_SUFFIX)),
    );
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patents() -> Table {
        Table::from_text_rows(
            &["patent_id", "patent_title"],
            &[&["P1", "Solar panel"], &["P2", "Dental implant"], &["", "Orphan"]],
        )
        .unwrap()
    }

    #[test]
    fn test_unmatched_rows_get_missing_values() {
        let cpc = Table::from_text_rows(&["patent_id", "cpc_subclass"], &[&["P1", "H02S"]]).unwrap();
        let out = left_join(&patents(), &cpc, "patent_id").unwrap();
        assert_eq!(out.columns(), &["patent_id", "patent_title", "cpc_subclass"]);
        assert_eq!(out.len(), 3);
        assert_eq!(out.value(0, "cpc_subclass").unwrap(), Some("H02S"));
        assert_eq!(out.value(1, "cpc_subclass").unwrap(), None);
    }

    #[test]
    fn test_fan_out_follows_right_order() {
        let assignees = Table::from_text_rows(
            &["patent_id", "assignee_name"],
            &[&["P2", "ACME"], &["P1", "Solaris"], &["P2", "Jane Doe"]],
        )
        .unwrap();
        let out = left_join(&patents(), &assignees, "patent_id").unwrap();
        assert_eq!(out.len(), 4);
        let names: Vec<_> = out.column_values("assignee_name").unwrap().collect();
        assert_eq!(names, vec![Some("Solaris"), Some("ACME"), Some("Jane Doe"), None]);
    }

    #[test]
    fn test_missing_key_never_matches() {
        let right = Table::from_text_rows(&["patent_id", "flag"], &[&["", "x"]]).unwrap();
        let out = left_join(&patents(), &right, "patent_id").unwrap();
        assert!(out.column_values("flag").unwrap().all(|v| v.is_none()));
    }

    #[test]
    fn test_collisions_are_suffixed() {
        let left = Table::from_text_rows(
            &["patent_id", "assignee_sequence"],
            &[&["P1", "0, 1"]],
        )
        .unwrap();
        let right = Table::from_text_rows(&["patent_id", "assignee_sequence"], &[&["P1", "1"]]).unwrap();
        let out = left_join(&left, &right, "patent_id").unwrap();
        assert_eq!(
            out.columns(),
            &["patent_id", "assignee_sequence_x", "assignee_sequence_y"]
        );
        assert_eq!(out.value(0, "assignee_sequence_y").unwrap(), Some("1"));
    }

    #[test]
    fn test_suffix_repeats_when_taken() {
        let left = Table::from_text_rows(&["k", "v", "v_x"], &[&["1", "a", "b"]]).unwrap();
        let right = Table::from_text_rows(&["k", "v"], &[&["1", "c"]]).unwrap();
        let out = left_join(&left, &right, "k").unwrap();
        assert_eq!(out.columns(), &["k", "v_x_x", "v_x", "v_y"]);
    }

    #[test]
    fn test_missing_key_column() {
        let right = Table::from_text_rows(&["location_id"], &[]).unwrap();
        assert!(left_join(&patents(), &right, "patent_id").is_err());
    }
}
