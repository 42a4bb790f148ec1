//! School records and their categorical attributes.
//!
//! A [`School`] is immutable once loaded. Matching only reads it; contact
//! fields are carried through untouched for reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spatial::GeoPoint;

/// Education level of a school.
///
/// Known levels parse from both the Arabic labels used in the source dataset
/// and their English keys. Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Primary,
    Intermediate,
    Secondary,
    Other(String),
}

impl Level {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "المرحلة الإبتدائية" | "المرحلة الابتدائية" | "primary" | "Primary" => Self::Primary,
            "المرحلة المتوسطة" | "intermediate" | "Intermediate" => Self::Intermediate,
            "المرحلة الثانوية" | "secondary" | "Secondary" => Self::Secondary,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Primary => "primary",
            Self::Intermediate => "intermediate",
            Self::Secondary => "secondary",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Level {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

/// Gender designation of a school.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Boys,
    Girls,
    Other(String),
}

impl Gender {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "بنين" | "boys" | "Boys" => Self::Boys,
            "بنات" | "girls" | "Girls" => Self::Girls,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Boys => "boys",
            Self::Girls => "girls",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

/// Principal contact details, carried through for reporting only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub principal_name: String,
    pub principal_phone: String,
    pub email: String,
}

/// A school as consumed by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    /// Unique, stable identifier. The plan is keyed by it.
    pub id: String,
    pub name: String,
    pub level: Level,
    pub gender: Gender,
    pub location: GeoPoint,
    /// Administrative sector label.
    pub sector: String,
    pub contact: Contact,
}

impl School {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: Level,
        gender: Gender,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            gender,
            location,
            sector: String::new(),
            contact: Contact::default(),
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }

    /// Whether the school can take part in matching.
    ///
    /// A zero latitude or longitude marks a record without a usable location;
    /// it is a data-quality marker, not a real position.
    pub fn is_eligible(&self) -> bool {
        let GeoPoint { lat, lon } = self.location;
        lat.is_finite() && lon.is_finite() && lat != 0.0 && lon != 0.0
    }
}
