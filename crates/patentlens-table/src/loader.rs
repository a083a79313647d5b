//! Delimited file reader restricted to a column subset.
//!
//! - Every value is kept as text.
//! - Tokens listed in [`LoadOptions::na_values`] (and empty fields) become
//!   missing cells.
//! - Selected columns keep the order they have in the file header.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::TableError;
use crate::table::{Cell, Table};

/// Field values read as "no value".
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub na_values: Vec<String>,
}

impl LoadOptions {
    /// Tab-separated, as the upstream dataset tables are distributed.
    pub fn tsv() -> Self {
        LoadOptions {
            delimiter: b'\t',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Comma-separated, for hand-made id lists and our own outputs.
    pub fn csv() -> Self {
        LoadOptions {
            delimiter: b',',
            ..LoadOptions::tsv()
        }
    }

    pub fn is_missing(&self, value: &str) -> bool {
        self.na_values.iter().any(|na| na == value)
    }

    fn cell(&self, value: Option<&str>) -> Cell {
        match value {
            Some(v) if !self.is_missing(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions::tsv()
    }
}

/// Loads `requested` columns from the delimited file at `path`.
///
/// Fails with [`TableError::MissingColumn`] when the header lacks any of them.
pub fn load_columns(
    path: &Path,
    options: &LoadOptions,
    requested: &[&str],
) -> Result<Table, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_columns(BufReader::new(file), path, options, requested)
}

/// Same as [`load_columns`] over any reader; `origin` is used in errors.
pub fn read_columns<R: Read>(
    reader: R,
    origin: &Path,
    options: &LoadOptions,
    requested: &[&str],
) -> Result<Table, TableError> {
    let csv_err = |source: csv::Error| TableError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    for column in requested {
        if !headers.iter().any(|h| h == *column) {
            return Err(TableError::missing_column(
                column,
                origin.display().to_string(),
            ));
        }
    }

    let wanted: HashSet<&str> = requested.iter().copied().collect();
    let mut taken: HashSet<&str> = HashSet::new();
    let picks: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| wanted.contains(h) && taken.insert(*h))
        .collect();

    let mut table = Table::new(picks.iter().map(|(_, name)| *name))?;
    let mut record = csv::StringRecord::new();
    while rdr.read_record(&mut record).map_err(csv_err)? {
        let row = picks
            .iter()
            .map(|(i, _)| options.cell(record.get(*i)))
            .collect();
        table.push_row(row)?;
    }

    tracing::debug!(
        path = %origin.display(),
        columns = table.width(),
        rows = table.len(),
        "loaded table"
    );
    Ok(table)
}
