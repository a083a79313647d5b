//! Tabular IO for PatentLens
//!
//! Provides the small table model the pipeline operates on:
//! - [`Table`]: named columns, rows of text-or-missing cells
//! - [`load_columns`]: delimited file → table, restricted to a column subset
//! - [`write_csv`]: table → CSV file (atomic replace)
//!
//! Nothing here knows about patents; column names are the caller's concern.

pub mod error;
pub mod loader;
pub mod table;
pub mod writer;

pub use error::TableError;
pub use loader::{load_columns, read_columns, LoadOptions, DEFAULT_NA_VALUES};
pub use table::{Cell, Table};
pub use writer::{write_csv, write_csv_to};
