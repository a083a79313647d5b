//! CSV output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::TableError;
use crate::table::Table;

/// Writes `table` as comma-separated text with a header row.
///
/// Output goes to a sibling `*.tmp` file first and is renamed into place, so
/// an interrupted write never leaves a truncated `path` behind.
pub fn write_csv(table: &Table, path: &Path) -> Result<(), TableError> {
    let io_err = |source: std::io::Error| TableError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = tmp_path(path);
    let file = File::create(&tmp).map_err(io_err)?;
    if let Err(source) = write_csv_to(table, BufWriter::new(file)) {
        let _ = fs::remove_file(&tmp);
        return Err(TableError::Csv {
            path: path.to_path_buf(),
            source,
        });
    }
    fs::rename(&tmp, path).map_err(io_err)?;

    tracing::debug!(path = %path.display(), rows = table.len(), "wrote table");
    Ok(())
}

/// Writes `table` to any writer. Missing cells become empty fields.
pub fn write_csv_to<W: Write>(table: &Table, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
