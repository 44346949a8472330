//! Extraction schemas for listing and profile pages
//!
//! The scraper never touches markup directly: it goes through an
//! [`ExtractionSchema`], so fixture HTML can be parsed without a network and
//! the site-specific selectors stay in one place.

use crate::model::{DeputyTarget, Record};
use crate::region::Region;
use crate::ParseError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Path prefix of deputy profile links on the listing page
const FICHE_PREFIX: &str = "/deputes/fiche/";

/// Id marker inside a profile link (`/deputes/fiche/OMC_PA12345`)
const OMC_ID_PREFIX: &str = "OMC_PA";

/// Some profile pages carry the dotted class string as a single class token
const CIRCONSCRIPTION_LITERAL_CLASS: &str = r#"div[class="_mb-small._centered-text"] span._big"#;

/// Deputies found under one region heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionListing {
    /// Profile pages to fetch, in document order
    pub deputies: Vec<DeputyTarget>,

    /// Rows that could not be turned into a target
    pub rejected: Vec<ParseError>,
}

/// Site-specific markup knowledge
///
/// Implementations must be stateless: the same schema is shared by every worker.
pub trait ExtractionSchema: Send + Sync {
    /// URL of the page listing deputies by region
    fn listing_url(&self) -> &str;

    /// Extracts the deputies listed under `region`
    ///
    /// # Returns
    ///
    /// * `Ok(RegionListing)` - At least one deputy, plus any malformed rows
    /// * `Err(ParseError)` - Region heading missing or no deputy found
    fn parse_listing(&self, html: &str, region: Region) -> Result<RegionListing, ParseError>;

    /// Builds a record from a fetched profile page
    fn parse_profile(&self, html: &str, deputy: &DeputyTarget) -> Result<Record, ParseError>;
}

/// Schema for the Assemblée nationale website
///
/// # Listing Page Structure
///
/// ```text
/// <h2>Region</h2>
///   <h4 class="departementTitre">Department</h4>
///   <div> <li><a href="/deputes/fiche/OMC_PA123">Name</a></li> ... </div>
///   <h4 class="departementTitre">...</h4>
///   ...
/// <h2>Next region</h2>
/// ```
///
/// # Profile Page Fields
///
/// | Field | Selector |
/// |-------|----------|
/// | email | `a[href^="mailto:"]` |
/// | groupe | `a.h4._colored.link` |
/// | circonscription | `div._mb-small._centered-text span._big` |
#[derive(Debug, Clone)]
pub struct AssembleeSchema {
    listing_url: String,
    base_url: Url,
}

impl AssembleeSchema {
    /// Creates a schema reading `listing_url` and resolving profiles against `base_url`
    pub fn new(listing_url: &str, base_url: &str) -> Result<Self, url::ParseError> {
        Url::parse(listing_url)?;
        Ok(Self {
            listing_url: listing_url.to_string(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Turns one listing link into a target, or explains why it cannot
    ///
    /// `/deputes/fiche/OMC_PA<id>` becomes `<base>/dyn/deputes/PA<id>`.
    fn build_target(&self, name: String, href: &str, region: Region) -> Result<DeputyTarget, ParseError> {
        if name.is_empty() {
            return Err(ParseError::MissingName {
                href: href.to_string(),
            });
        }

        let digits: String = href
            .strip_prefix(FICHE_PREFIX)
            .and_then(|rest| rest.strip_prefix(OMC_ID_PREFIX))
            .map(|rest| rest.chars().take_while(char::is_ascii_digit).collect())
            .unwrap_or_default();

        if digits.is_empty() {
            return Err(ParseError::MissingId {
                href: href.to_string(),
            });
        }

        let profile_url = self
            .base_url
            .join(&format!("/dyn/deputes/PA{}", digits))
            .map_err(|_| ParseError::MissingId {
                href: href.to_string(),
            })?;

        Ok(DeputyTarget {
            name,
            region: region.name().to_string(),
            profile_url: profile_url.to_string(),
        })
    }
}

impl ExtractionSchema for AssembleeSchema {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn parse_listing(&self, html: &str, region: Region) -> Result<RegionListing, ParseError> {
        let document = Html::parse_document(html);
        let not_found = || ParseError::RegionNotFound {
            region: region.name().to_string(),
        };

        let h2_selector = Selector::parse("h2").map_err(|_| not_found())?;
        let heading = document
            .select(&h2_selector)
            .find(|h2| element_text(h2) == region.name())
            .ok_or_else(not_found)?;

        let mut listing = RegionListing::default();
        let mut in_department = false;

        // Walk the headings' siblings: each departementTitre <h4> opens a block
        // of <div>s that lasts until the next <h4>; the next <h2> ends the region.
        for sibling in heading.next_siblings() {
            let Some(element) = ElementRef::wrap(sibling) else {
                continue;
            };

            match element.value().name() {
                "h2" => break,
                "h4" => {
                    in_department = element
                        .value()
                        .classes()
                        .any(|class| class == "departementTitre");
                }
                "div" if in_department => self.collect_rows(element, region, &mut listing),
                _ => {}
            }
        }

        if listing.deputies.is_empty() && listing.rejected.is_empty() {
            return Err(ParseError::NoDeputies {
                region: region.name().to_string(),
            });
        }

        Ok(listing)
    }

    fn parse_profile(&self, html: &str, deputy: &DeputyTarget) -> Result<Record, ParseError> {
        let document = Html::parse_document(html);

        let email = extract_email(&document);
        let groupe = first_text(&document, "a.h4._colored.link");
        let circonscription = first_text(&document, CIRCONSCRIPTION_LITERAL_CLASS)
            .or_else(|| first_text(&document, "div._mb-small._centered-text span._big"));

        if email.is_none() && groupe.is_none() && circonscription.is_none() {
            return Err(ParseError::EmptyProfile {
                name: deputy.name.clone(),
            });
        }

        tracing::debug!("Email for {} => {:?}", deputy.name, email);

        Ok(Record {
            nom: deputy.name.clone(),
            region: deputy.region.clone(),
            email,
            groupe,
            circonscription,
        })
    }
}

impl AssembleeSchema {
    /// Collects the profile links of one department block
    fn collect_rows(&self, block: ElementRef<'_>, region: Region, listing: &mut RegionListing) {
        let (Ok(li_selector), Ok(a_selector)) = (Selector::parse("li"), Selector::parse("a[href]"))
        else {
            return;
        };

        for li in block.select(&li_selector) {
            let Some(link) = li.select(&a_selector).next() else {
                continue;
            };
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if !href.starts_with(FICHE_PREFIX) {
                continue;
            }

            match self.build_target(element_text(&link), href, region) {
                Ok(target) => {
                    if !listing
                        .deputies
                        .iter()
                        .any(|known| known.profile_url == target.profile_url)
                    {
                        listing.deputies.push(target);
                    }
                }
                Err(err) => {
                    tracing::warn!("Skipping malformed row in {}: {}", region, err);
                    listing.rejected.push(err);
                }
            }
        }
    }
}

/// Text content of an element with whitespace runs collapsed
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element matching `css`, if non-empty
fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|s| !s.is_empty())
}

/// Address of the first `mailto:` link
fn extract_email(document: &Html) -> Option<String> {
    let selector = Selector::parse("a[href^='mailto:']").ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| href.strip_prefix("mailto:"))
        .map(|address| address.trim().to_string())
        .find(|address| !address.is_empty())
}
