//! Column-named, row-major text tables.
//!
//! Every value is text or missing. There is no numeric or date coercion at
//! this layer; callers that need a number parse the cell themselves.

use std::collections::HashSet;

use crate::error::TableError;

/// A single value. `None` is the "no value" marker.
pub type Cell = Option<String>;

/// An ordered sequence of rows sharing one schema.
///
/// Invariants: column names are unique, and every row has exactly one cell
/// per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        Ok(Table {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Cell>>) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Table::new(columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Convenience constructor for literal data: an empty string becomes a
    /// missing value, the same way an empty field does when loading a file.
    pub fn from_text_rows(columns: &[&str], rows: &[&[&str]]) -> Result<Self, TableError> {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
                    .collect()
            })
            .collect();
        Table::from_rows(columns.iter().copied(), rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::missing_column(name, "table"))
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Value of `column` in row `row`; `Ok(None)` when the cell is missing.
    ///
    /// Panics if `row` is out of bounds, like slice indexing.
    pub fn value(&self, row: usize, column: &str) -> Result<Option<&str>, TableError> {
        let idx = self.column_index(column)?;
        Ok(self.rows[row][idx].as_deref())
    }

    pub fn column_values<'a>(
        &'a self,
        column: &str,
    ) -> Result<impl Iterator<Item = Option<&'a str>> + 'a, TableError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| row[idx].as_deref()))
    }

    /// Copy of the table holding only the rows for which `keep` is true.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Cell]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.rows.retain(|r| keep(r));
    }

    /// Projection onto `columns`, in the order given.
    pub fn select(&self, columns: &[&str]) -> Result<Table, TableError> {
        let indices = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = Table::new(columns.iter().copied())?;
        out.rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(out)
    }

    /// Removes the named columns. Every name must exist.
    pub fn drop_columns(&mut self, columns: &[&str]) -> Result<(), TableError> {
        let mut doomed = Vec::with_capacity(columns.len());
        for name in columns {
            doomed.push(self.column_index(name)?);
        }
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|i| !doomed.contains(&i))
            .collect();

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
        Ok(())
    }

    /// Appends a column. `values` must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Cell>) -> Result<(), TableError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn { column: name });
        }
        if values.len() != self.rows.len() {
            return Err(TableError::RowWidth {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Rewrites every cell of `column` in place.
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> Result<(), TableError>
    where
        F: FnMut(Option<&str>) -> Cell,
    {
        let idx = self.column_index(column)?;
        for row in &mut self.rows {
            row[idx] = f(row[idx].as_deref());
        }
        Ok(())
    }

    /// Number of distinct non-missing values in `column`.
    pub fn distinct_count(&self, column: &str) -> Result<usize, TableError> {
        let distinct: HashSet<&str> = self.column_values(column)?.flatten().collect();
        Ok(distinct.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_text_rows(
            &["patent_id", "cpc_subclass", "cpc_sequence"],
            &[&["P1", "H02S", "0"], &["P1", "F24S", "1"], &["P2", "", "0"]],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Table::new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { column } if column == "a"));
    }

    #[test]
    fn test_row_width_checked() {
        let mut t = Table::new(["a", "b"]).unwrap();
        assert!(t.push_row(vec![Some("x".into())]).is_err());
        assert!(t.push_row(vec![Some("x".into()), None]).is_ok());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_empty_text_is_missing() {
        let t = sample();
        assert_eq!(t.value(2, "cpc_subclass").unwrap(), None);
        assert_eq!(t.value(0, "cpc_subclass").unwrap(), Some("H02S"));
    }

    #[test]
    fn test_select_reorders() {
        let t = sample().select(&["cpc_sequence", "patent_id"]).unwrap();
        assert_eq!(t.columns(), &["cpc_sequence", "patent_id"]);
        assert_eq!(t.rows()[1], vec![Some("1".to_string()), Some("P1".to_string())]);
    }

    #[test]
    fn test_drop_columns() {
        let mut t = sample();
        t.drop_columns(&["cpc_subclass"]).unwrap();
        assert_eq!(t.columns(), &["patent_id", "cpc_sequence"]);
        assert!(t.rows().iter().all(|r| r.len() == 2));
        assert!(t.drop_columns(&["nope"]).is_err());
    }

    #[test]
    fn test_push_and_map_column() {
        let mut t = sample();
        t.push_column("flag", vec![None, None, None]).unwrap();
        t.map_column("flag", |_| Some("y".into())).unwrap();
        assert_eq!(t.value(1, "flag").unwrap(), Some("y"));
        assert!(t.push_column("flag", vec![None, None, None]).is_err());
        assert!(t.push_column("short", vec![None]).is_err());
    }

    #[test]
    fn test_distinct_count_ignores_missing() {
        let t = sample();
        assert_eq!(t.distinct_count("patent_id").unwrap(), 2);
        assert_eq!(t.distinct_count("cpc_subclass").unwrap(), 2);
    }

    #[test]
    fn test_missing_column_lookup() {
        let err = sample().column_index("assignee_type").unwrap_err();
        assert!(err.to_string().contains("assignee_type"));
    }
}
