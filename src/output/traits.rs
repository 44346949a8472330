//! Output traits and error types
//!
//! Renderers turn the ordered record sequence into text; the binary decides
//! where that text goes.

use crate::model::{Field, Record};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Turns records into a printable document
///
/// Implementations must render an absent optional value as an empty string,
/// never skip the field or the record.
pub trait Renderer {
    fn render(&self, records: &[Record], fields: &[Field]) -> String;
}
