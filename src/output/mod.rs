//! Output module for rendering and exporting scraped records
//!
//! This module handles:
//! - Parsing the `--fields` projection
//! - Rendering records as labelled text or as an ASCII table
//! - Writing the result to stdout or a file
//! - Summarising the run

mod fields;
pub mod stats;
mod table;
mod text;
mod traits;

pub use fields::parse_fields;
pub use stats::{format_summary, print_summary, RunReport};
pub use table::{build_ascii_table, TableRenderer, EMPTY_TABLE_MESSAGE};
pub use text::TextRenderer;
pub use traits::{OutputError, OutputResult, Renderer};

use crate::model::{Field, Record};
use std::io::Write;
use std::path::Path;

/// How records should be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Columns to print, in order
    pub fields: Vec<Field>,

    /// Render an ASCII table instead of text lines
    pub table: bool,

    /// Text mode: values only, without labels
    pub barefields: bool,

    /// Text mode: drop separators for a single bare field
    pub no_separator: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fields: Field::ALL.to_vec(),
            table: false,
            barefields: false,
            no_separator: false,
        }
    }
}

impl RenderOptions {
    /// Picks the renderer matching these options
    pub fn renderer(&self) -> Box<dyn Renderer> {
        if self.table {
            Box::new(TableRenderer)
        } else {
            Box::new(TextRenderer {
                barefields: self.barefields,
                no_separator: self.no_separator,
            })
        }
    }
}

/// Renders records with the selected renderer and fields
pub fn render(records: &[Record], options: &RenderOptions) -> String {
    options.renderer().render(records, &options.fields)
}

/// Writes rendered output to `path`, or to stdout when no path is given
///
/// A trailing newline is appended when missing.
///
/// # Returns
///
/// * `Ok(())` - Output written
/// * `Err(OutputError)` - File could not be created or written
pub fn write_output(content: &str, path: Option<&Path>) -> OutputResult<()> {
    let mut document = content.to_string();
    if !document.ends_with('\n') {
        document.push('\n');
    }

    match path {
        Some(path) => {
            std::fs::write(path, document.as_bytes()).map_err(|source| OutputError::Write {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!("Results saved to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(document.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![Record {
            nom: "Anne Martin".to_string(),
            region: "Bretagne".to_string(),
            email: None,
            groupe: None,
            circonscription: None,
        }]
    }

    #[test]
    fn test_render_text_by_default() {
        let options = RenderOptions {
            fields: vec![Field::Nom],
            ..Default::default()
        };
        assert_eq!(
            render(&records(), &options),
            "Nom: Anne Martin\n----------------------------------------"
        );
    }

    #[test]
    fn test_render_table_when_requested() {
        let options = RenderOptions {
            fields: vec![Field::Nom, Field::Email],
            table: true,
            ..Default::default()
        };
        let output = render(&records(), &options);
        assert!(output.starts_with("Nom         | Email"));
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deputes.txt");

        write_output("Nom: Anne Martin", Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Nom: Anne Martin\n");
    }

    #[test]
    fn test_write_output_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deputes.txt");

        let result = write_output("data", Some(&path));
        assert!(matches!(result, Err(OutputError::Write { .. })));
    }
}
