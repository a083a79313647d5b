use std::path::PathBuf;

use patentlens_table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("invalid keyword set: {0}")]
    Keywords(#[from] regex::Error),

    #[error("invalid run config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
