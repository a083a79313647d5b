//! Errors raised while building, loading or writing tables.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// A requested column is not present. `origin` names the file (or the
    /// in-memory table) the column was looked up in.
    #[error("missing column `{column}` in {origin}")]
    MissingColumn { column: String, origin: String },

    #[error("duplicate column `{column}`")]
    DuplicateColumn { column: String },

    #[error("row has {actual} cells, table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl TableError {
    pub(crate) fn missing_column(column: &str, origin: impl Into<String>) -> Self {
        TableError::MissingColumn {
            column: column.to_string(),
            origin: origin.into(),
        }
    }
}
