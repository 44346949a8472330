//! Region enumeration for Deputes-Scraper
//!
//! The listing page groups deputies under one `<h2>` heading per region. This
//! module owns the fixed set of region names the site exposes and turns user
//! input into an ordered, duplicate-free list of regions to scrape.

mod matcher;

pub use matcher::fold_region_name;

use crate::RegionError;
use std::collections::HashSet;
use std::fmt;

/// Region headings found on the listing page, in site order
pub const VALID_REGIONS: [&str; 14] = [
    "Auvergne-Rhône-Alpes",
    "Bourgogne-Franche-Comté",
    "Bretagne",
    "Centre-Val de Loire",
    "Corse",
    "Grand Est",
    "Hauts-de-France",
    "Ile-de-France",
    "Normandie",
    "Nouvelle-Aquitaine",
    "Occitanie",
    "Pays de la Loire",
    "Provence-Alpes-Côte d'Azur",
    "Réunion",
];

/// Regions scraped when none are requested
pub const DEFAULT_REGIONS: [&str; 2] = ["Ile-de-France", "Provence-Alpes-Côte d'Azur"];

/// Keyword selecting every canonical region
pub const ALL_KEYWORD: &str = "all";

/// A validated region, always holding its canonical spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region(&'static str);

impl Region {
    /// Canonical name as it appears in the listing page heading
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Every canonical region, in site order
    pub fn all() -> Vec<Region> {
        VALID_REGIONS.iter().copied().map(Region).collect()
    }

    /// The default selection
    pub fn defaults() -> Vec<Region> {
        DEFAULT_REGIONS.iter().filter_map(|name| normalize_region(name)).collect()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Matches user input against the canonical region list
///
/// Comparison ignores case, surrounding whitespace, accents and dash style.
///
/// # Examples
///
/// ```
/// use deputes_scraper::region::normalize_region;
///
/// assert_eq!(normalize_region("île-de-france").unwrap().name(), "Ile-de-France");
/// assert!(normalize_region("Atlantide").is_none());
/// ```
pub fn normalize_region(input: &str) -> Option<Region> {
    let key = fold_region_name(input);
    if key.is_empty() {
        return None;
    }

    VALID_REGIONS
        .iter()
        .copied()
        .find(|valid| fold_region_name(valid) == key)
        .map(Region)
}

/// Resolves requested region names into the ordered list of regions to scrape
///
/// # Rules
///
/// - An empty request selects [`DEFAULT_REGIONS`]
/// - `all` (any case) selects every region in canonical order
/// - Otherwise regions keep input order; repeats are dropped after the first
/// - Any value that matches no region fails the whole call, naming each offender
///
/// # Returns
///
/// * `Ok(Vec<Region>)` - The regions to scrape
/// * `Err(RegionError)` - At least one value is not a known region
pub fn resolve_regions<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Region>, RegionError> {
    if inputs.is_empty() {
        return Ok(Region::defaults());
    }

    let mut selected = Vec::new();
    let mut invalid = Vec::new();
    let mut wants_all = false;

    for input in inputs {
        let input = input.as_ref();
        if input.trim().eq_ignore_ascii_case(ALL_KEYWORD) {
            wants_all = true;
            continue;
        }
        match normalize_region(input) {
            Some(region) => selected.push(region),
            None => invalid.push(input.to_string()),
        }
    }

    if !invalid.is_empty() {
        return Err(RegionError::Invalid { values: invalid });
    }

    if wants_all {
        return Ok(Region::all());
    }

    let mut seen = HashSet::new();
    selected.retain(|region| seen.insert(*region));
    Ok(selected)
}
