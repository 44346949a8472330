use std::fmt;

/// A deputy profile page waiting to be fetched
///
/// Built by the extraction schema from one listing row; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeputyTarget {
    /// Name as printed on the listing page
    pub name: String,

    /// Canonical region the deputy is listed under
    pub region: String,

    /// Absolute URL of the profile page to fetch
    pub profile_url: String,
}

impl fmt::Display for DeputyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.region)
    }
}
