use crate::FieldError;
use std::fmt;
use std::str::FromStr;

/// Public data of one deputy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Full name as printed on the listing page
    pub nom: String,

    /// Canonical region name
    pub region: String,

    /// Contact address, absent when the profile publishes none
    pub email: Option<String>,

    /// Parliamentary group
    pub groupe: Option<String>,

    /// Constituency label (e.g. "2ème circonscription")
    pub circonscription: Option<String>,
}

impl Record {
    /// Returns the value of a column, or `""` when the value is absent
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nom => &self.nom,
            Field::Region => &self.region,
            Field::Email => self.email.as_deref().unwrap_or(""),
            Field::Groupe => self.groupe.as_deref().unwrap_or(""),
            Field::Circonscription => self.circonscription.as_deref().unwrap_or(""),
        }
    }
}

/// A record column that can be selected with `--fields`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nom,
    Region,
    Email,
    Groupe,
    Circonscription,
}

impl Field {
    /// Every field, in default output order
    pub const ALL: [Field; 5] = [
        Field::Nom,
        Field::Region,
        Field::Email,
        Field::Groupe,
        Field::Circonscription,
    ];

    /// Identifier accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Field::Nom => "nom",
            Field::Region => "region",
            Field::Email => "email",
            Field::Groupe => "groupe",
            Field::Circonscription => "circonscription",
        }
    }

    /// Capitalised label used in text and table headers
    pub fn label(&self) -> &'static str {
        match self {
            Field::Nom => "Nom",
            Field::Region => "Region",
            Field::Email => "Email",
            Field::Groupe => "Groupe",
            Field::Circonscription => "Circonscription",
        }
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| FieldError::Unknown(s.trim().to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
