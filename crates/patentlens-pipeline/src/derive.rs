//! Columns computed from the raw dataset tables before joining.

use patentlens_table::{Cell, Table, TableError};

use crate::category::granular_label;
use crate::columns::*;

/// Appends `combined_text`: lowercased title and abstract separated by a
/// space. A missing title or abstract contributes an empty string.
pub fn with_combined_text(patents: &mut Table) -> Result<(), TableError> {
    let title = patents.column_index(PATENT_TITLE)?;
    let abstract_ = patents.column_index(PATENT_ABSTRACT)?;
    let combined: Vec<Cell> = patents
        .rows()
        .iter()
        .map(|row| {
            let title = row[title].as_deref().unwrap_or("").to_lowercase();
            let abstract_ = row[abstract_].as_deref().unwrap_or("").to_lowercase();
            Some(format!("{title} {abstract_}"))
        })
        .collect();
    patents.push_column(COMBINED_TEXT, combined)
}

/// Parses a sequence or type code. Anything that is not a decimal integer
/// (including a missing value) reads as `0`.
pub fn parse_sequence(value: Option<&str>) -> i64 {
    let Some(raw) = value else {
        return 0;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) => n,
        Err(err) => {
            tracing::trace!(value = raw, error = %err, "unparseable integer, using 0");
            0
        }
    }
}

/// Normalizes and enriches the assignee table in place:
/// - `assignee_sequence` and `assignee_type` become canonical integers
/// - `assignee_type_reg` is appended with the granular category label
/// - `assignee_name` is appended (organization, else "first last")
/// - the three raw name columns are dropped
pub fn derive_assignee_fields(assignees: &mut Table) -> Result<(), TableError> {
    assignees.map_column(ASSIGNEE_SEQUENCE, |v| Some(parse_sequence(v).to_string()))?;
    assignees.map_column(ASSIGNEE_TYPE, |v| Some(parse_sequence(v).to_string()))?;

    let type_idx = assignees.column_index(ASSIGNEE_TYPE)?;
    let labels: Vec<Cell> = assignees
        .rows()
        .iter()
        .map(|row| Some(granular_label(parse_sequence(row[type_idx].as_deref())).to_string()))
        .collect();
    assignees.push_column(ASSIGNEE_TYPE_REG, labels)?;

    let org = assignees.column_index(ASSIGNEE_ORGANIZATION)?;
    let first = assignees.column_index(ASSIGNEE_NAME_FIRST)?;
    let last = assignees.column_index(ASSIGNEE_NAME_LAST)?;
    let names: Vec<Cell> = assignees
        .rows()
        .iter()
        .map(|row| match (&row[org], &row[first], &row[last]) {
            (Some(org), _, _) => Some(org.clone()),
            (None, Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        })
        .collect();
    assignees.push_column(ASSIGNEE_NAME, names)?;

    assignees.drop_columns(&[ASSIGNEE_NAME_FIRST, ASSIGNEE_NAME_LAST, ASSIGNEE_ORGANIZATION])
}
