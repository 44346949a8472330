use crate::model::Field;
use crate::FieldError;

/// Parses a comma-separated `--fields` value
///
/// Blank entries are ignored; order and repeats are preserved as given.
///
/// # Examples
///
/// ```
/// use deputes_scraper::model::Field;
/// use deputes_scraper::output::parse_fields;
///
/// assert_eq!(parse_fields("nom, email").unwrap(), vec![Field::Nom, Field::Email]);
/// assert!(parse_fields("nom,telephone").is_err());
/// ```
pub fn parse_fields(csv: &str) -> Result<Vec<Field>, FieldError> {
    let fields = csv
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse::<Field>)
        .collect::<Result<Vec<Field>, FieldError>>()?;

    if fields.is_empty() {
        return Err(FieldError::Empty);
    }

    Ok(fields)
}
