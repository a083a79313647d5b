//! Collapses the per-assignee fan-out back to one row per patent.
//!
//! Rows are partitioned by `patent_id` and each partition is folded on its
//! own:
//! - max `assignee_sequence` is 0: the rows pass through untouched
//! - max is above 0: one row replaces the group. `assignee_sequence` lists
//!   every sequence (`"0, 1"`), the composite columns join every row's value
//!   with `"& "`, and every other column keeps the first row's value.
//!
//! Partitions are emitted in ascending `patent_id` order.

use std::collections::BTreeMap;

use patentlens_table::{Cell, Table, TableError};

use crate::columns::*;
use crate::derive::parse_sequence;

/// Joins the sequence values of a collapsed group.
pub const SEQUENCE_SEPARATOR: &str = ", ";

/// Joins the per-assignee values of a collapsed group.
pub const COMPOSITE_SEPARATOR: &str = "& ";

/// Columns that carry one value per assignee.
pub const COMPOSITE_COLUMNS: [&str; 4] = [
    ASSIGNEE_TYPE_REG,
    ASSIGNEE_NAME,
    DISAMBIG_STATE,
    DISAMBIG_COUNTRY,
];

struct GroupLayout {
    sequence: usize,
    composite: Vec<usize>,
}

pub fn collapse_assignees(table: Table) -> Result<Table, TableError> {
    let key = table.column_index(PATENT_ID)?;
    let layout = GroupLayout {
        sequence: table.column_index(ASSIGNEE_SEQUENCE)?,
        composite: COMPOSITE_COLUMNS
            .iter()
            .map(|c| table.column_index(c))
            .collect::<Result<_, _>>()?,
    };

    let (columns, rows) = table.into_parts();
    let mut groups: BTreeMap<String, Vec<Vec<Cell>>> = BTreeMap::new();
    let mut keyless = 0usize;
    for row in rows {
        match row[key].clone() {
            Some(id) => groups.entry(id).or_default().push(row),
            None => keyless += 1,
        }
    }
    if keyless > 0 {
        tracing::warn!(rows = keyless, "dropping rows without patent_id before assignee aggregation");
    }

    let mut out = Table::new(columns)?;
    let mut collapsed = 0usize;
    for (_, group) in groups {
        let before = group.len();
        for row in collapse_group(group, &layout) {
            out.push_row(row)?;
        }
        if before > 1 {
            collapsed += 1;
        }
    }
    tracing::debug!(rows = out.len(), multi_row_groups = collapsed, "aggregated assignees");
    Ok(out)
}

fn collapse_group(mut group: Vec<Vec<Cell>>, layout: &GroupLayout) -> Vec<Vec<Cell>> {
    let sequences: Vec<i64> = group
        .iter()
        .map(|row| parse_sequence(row[layout.sequence].as_deref()))
        .collect();
    let max = sequences.iter().copied().max().unwrap_or(0);
    if max <= 0 {
        return group;
    }

    let joined_sequences = sequences
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(SEQUENCE_SEPARATOR);

    let composites: Vec<(usize, String)> = layout
        .composite
        .iter()
        .map(|&idx| {
            let joined = group
                .iter()
                .map(|row| row[idx].as_deref().unwrap_or(""))
                .collect::<Vec<_>>()
                .join(COMPOSITE_SEPARATOR);
            (idx, joined)
        })
        .collect();

    group.truncate(1);
    let mut merged = group.swap_remove(0);
    merged[layout.sequence] = Some(joined_sequences);
    for (idx, value) in composites {
        merged[idx] = Some(value);
    }
    vec![merged]
}

/// Per-patent maximum parsed `assignee_sequence`, one row per patent in
/// ascending `patent_id` order. Rows without a patent id are ignored.
pub fn max_assignee_sequence(assignees: &Table) -> Result<Table, TableError> {
    let key = assignees.column_index(PATENT_ID)?;
    let seq = assignees.column_index(ASSIGNEE_SEQUENCE)?;

    let mut maxima: BTreeMap<&str, i64> = BTreeMap::new();
    for row in assignees.rows() {
        let Some(id) = row[key].as_deref() else {
            continue;
        };
        let value = parse_sequence(row[seq].as_deref());
        maxima
            .entry(id)
            .and_modify(|m| *m = (*m).max(value))
            .or_insert(value);
    }

    let rows = maxima
        .into_iter()
        .map(|(id, max)| vec![Some(id.to_string()), Some(max.to_string())])
        .collect();
    Table::from_rows([PATENT_ID, ASSIGNEE_SEQUENCE], rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &[
        "patent_id",
        "cpc_subclass",
        "assignee_sequence",
        "assignee_type_reg",
        "assignee_name",
        "disambig_state",
        "disambig_country",
    ];

    #[test]
    fn test_single_assignee_passes_through() {
        let t = Table::from_text_rows(
            COLUMNS,
            &[&["P1", "H02S", "0", "US Company or Corporation", "ACME", "CA", "US"]],
        )
        .unwrap();
        let out = collapse_assignees(t.clone()).unwrap();
        assert_eq!(out, t);
    }

    #[test]
    fn test_two_assignees_collapse() {
        let t = Table::from_text_rows(
            COLUMNS,
            &[
                &["P2", "G07C", "0", "US Company or Corporation", "ACME", "CA", "US"],
                &["P2", "G07C", "1", "US Individual", "Jane Doe", "", "US"],
            ],
        )
        .unwrap();
        let out = collapse_assignees(t).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.value(0, "assignee_sequence").unwrap(), Some("0, 1"));
        assert_eq!(
            out.value(0, "assignee_type_reg").unwrap(),
            Some("US Company or Corporation& US Individual")
        );
        assert_eq!(out.value(0, "assignee_name").unwrap(), Some("ACME& Jane Doe"));
        assert_eq!(out.value(0, "disambig_state").unwrap(), Some("CA& "));
        assert_eq!(out.value(0, "disambig_country").unwrap(), Some("US& US"));
        assert_eq!(out.value(0, "cpc_subclass").unwrap(), Some("G07C"));
    }

    #[test]
    fn test_sequence_order_is_row_order() {
        let t = Table::from_text_rows(
            COLUMNS,
            &[
                &["P3", "A61C", "1", "Foreign Individual", "B", "", "DE"],
                &["P3", "A61C", "0", "Foreign Company or Corporation", "A", "", "DE"],
            ],
        )
        .unwrap();
        let out = collapse_assignees(t).unwrap();
        assert_eq!(out.value(0, "assignee_sequence").unwrap(), Some("1, 0"));
        assert_eq!(out.value(0, "assignee_name").unwrap(), Some("B& A"));
    }

    #[test]
    fn test_zero_max_group_keeps_all_rows() {
        // Unparseable sequences read as 0, so the group is left alone.
        let t = Table::from_text_rows(
            COLUMNS,
            &[
                &["P4", "H01L", "x", "Unknown", "A", "", ""],
                &["P4", "H01M", "", "Unknown", "B", "", ""],
            ],
        )
        .unwrap();
        let out = collapse_assignees(t.clone()).unwrap();
        assert_eq!(out, t);
    }

    #[test]
    fn test_groups_sorted_and_keyless_dropped() {
        let t = Table::from_text_rows(
            COLUMNS,
            &[
                &["P9", "", "0", "", "", "", ""],
                &["", "", "0", "", "", "", ""],
                &["P1", "", "", "", "", "", ""],
            ],
        )
        .unwrap();
        let out = collapse_assignees(t).unwrap();
        let ids: Vec<_> = out.column_values("patent_id").unwrap().flatten().collect();
        assert_eq!(ids, vec!["P1", "P9"]);
    }

    #[test]
    fn test_missing_composite_column_is_schema_error() {
        let t = Table::from_text_rows(&["patent_id", "assignee_sequence"], &[&["P1", "0"]]).unwrap();
        assert!(matches!(
            collapse_assignees(t),
            Err(TableError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_max_assignee_sequence() {
        let t = Table::from_text_rows(
            &["patent_id", "assignee_sequence"],
            &[&["P2", "0"], &["P1", "0"], &["P2", "2"], &["P2", "1"], &["", "5"]],
        )
        .unwrap();
        let max = max_assignee_sequence(&t).unwrap();
        assert_eq!(max.columns(), &["patent_id", "assignee_sequence"]);
        assert_eq!(max.len(), 2);
        assert_eq!(max.value(0, "assignee_sequence").unwrap(), Some("0"));
        assert_eq!(max.value(1, "assignee_sequence").unwrap(), Some("2"));
    }
}
