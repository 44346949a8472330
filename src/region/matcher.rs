use deunicode::deunicode;

/// Folds a region name into a comparison key
///
/// The key is the ASCII transliteration of the name, lowercased, with runs of
/// whitespace collapsed to one space and runs of dashes collapsed to one `-`.
/// Two names that fold to the same key designate the same region.
///
/// # Examples
///
/// ```
/// use deputes_scraper::region::fold_region_name;
///
/// assert_eq!(fold_region_name("  Île-de-France "), "ile-de-france");
/// assert_eq!(fold_region_name("Provence-Alpes-Côte d’Azur"), "provence-alpes-cote d'azur");
/// ```
pub fn fold_region_name(name: &str) -> String {
    let ascii = deunicode(name).to_lowercase();
    let spaced = ascii.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut key = String::with_capacity(spaced.len());
    for c in spaced.chars() {
        if c == '-' && key.ends_with('-') {
            continue;
        }
        key.push(c);
    }
    key
}
