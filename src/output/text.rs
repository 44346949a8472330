//! Plain text rendering
//!
//! One line per field, records separated by a dashed line:
//!
//! ```text
//! Nom: Anne Martin
//! Email: anne.martin@assemblee-nationale.fr
//! ----------------------------------------
//! ```

use crate::model::{Field, Record};
use crate::output::traits::Renderer;

/// Width of the line printed between two records
const SEPARATOR_WIDTH: usize = 40;

/// Renders records as labelled (or bare) lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    /// Print values only, without `Label: ` prefixes
    pub barefields: bool,

    /// Drop separator lines; honoured only for a single bare field
    pub no_separator: bool,
}

impl TextRenderer {
    /// Separators are skipped only for `--barefields --no-separator` with one field,
    /// which yields a plain one-value-per-line list.
    fn skip_separators(&self, fields: &[Field]) -> bool {
        self.barefields && self.no_separator && fields.len() == 1
    }
}

impl Renderer for TextRenderer {
    fn render(&self, records: &[Record], fields: &[Field]) -> String {
        let skip_separators = self.skip_separators(fields);
        let separator = "-".repeat(SEPARATOR_WIDTH);
        let mut lines = Vec::new();

        for record in records {
            for field in fields {
                let value = record.get(*field);
                if self.barefields {
                    lines.push(value.to_string());
                } else {
                    lines.push(format!("{}: {}", field.label(), value));
                }
            }
            if !skip_separators {
                lines.push(separator.clone());
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record {
                nom: "Anne Martin".to_string(),
                region: "Bretagne".to_string(),
                email: Some("anne.martin@example.fr".to_string()),
                groupe: Some("Groupe A".to_string()),
                circonscription: Some("1ère circonscription".to_string()),
            },
            Record {
                nom: "Bruno Le Gall".to_string(),
                region: "Bretagne".to_string(),
                email: None,
                groupe: None,
                circonscription: None,
            },
        ]
    }

    #[test]
    fn test_labelled_output() {
        let text = TextRenderer::default().render(&records(), &[Field::Nom, Field::Email]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Nom: Anne Martin",
                "Email: anne.martin@example.fr",
                "----------------------------------------",
                "Nom: Bruno Le Gall",
                "Email: ",
                "----------------------------------------",
            ]
        );
    }

    #[test]
    fn test_missing_email_is_empty_not_omitted() {
        let renderer = TextRenderer {
            barefields: true,
            no_separator: false,
        };
        let text = renderer.render(&records(), &[Field::Email]);
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "anne.martin@example.fr");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_barefields_single_field_without_separator() {
        let renderer = TextRenderer {
            barefields: true,
            no_separator: true,
        };
        let text = renderer.render(&records(), &[Field::Nom]);
        assert_eq!(text, "Anne Martin\nBruno Le Gall");
    }

    #[test]
    fn test_no_separator_ignored_with_several_fields() {
        let renderer = TextRenderer {
            barefields: true,
            no_separator: true,
        };
        let text = renderer.render(&records(), &[Field::Nom, Field::Region]);
        assert_eq!(text.lines().filter(|l| l.starts_with("---")).count(), 2);
    }

    #[test]
    fn test_no_records() {
        let text = TextRenderer::default().render(&[], &Field::ALL);
        assert!(text.is_empty());
    }
}
