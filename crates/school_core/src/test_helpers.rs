//! Test helpers: fixture schools around Madinah.
//!
//! Shared by unit tests, integration tests, benches and downstream crates.

use crate::school::{Contact, Gender, Level, School};
use crate::spatial::GeoPoint;

/// Two primary-school sites about 7.22 km apart.
pub const MADINAH_A: (f64, f64) = (24.4672, 39.6024);
pub const MADINAH_B: (f64, f64) = (24.5247, 39.5692);

/// Build a school with the given attributes and an id-derived name.
pub fn school_at(id: &str, level: Level, gender: Gender, (lat, lon): (f64, f64)) -> School {
    School::new(id, format!("School {id}"), level, gender, GeoPoint::new(lat, lon))
}

pub fn primary_boys(id: &str, location: (f64, f64)) -> School {
    school_at(id, Level::Primary, Gender::Boys, location)
}

/// A small mixed dataset: several cohorts, a lone secondary school, and one
/// record at (0, 0) that must be excluded from matching.
pub fn madinah_fixture() -> Vec<School> {
    let contact = |name: &str, phone: &str| Contact {
        principal_name: name.to_string(),
        principal_phone: phone.to_string(),
        email: format!("{}@schools.example", name.to_lowercase()),
    };

    vec![
        primary_boys("1001", MADINAH_A)
            .with_sector("Central")
            .with_contact(contact("Salem", "0500000001")),
        primary_boys("1002", MADINAH_B)
            .with_sector("North")
            .with_contact(contact("Khalid", "0500000002")),
        primary_boys("1003", (24.4700, 39.6100))
            .with_sector("Central")
            .with_contact(contact("Fahad", "0500000003")),
        primary_boys("1004", (24.7000, 39.9000)).with_sector("Remote"),
        school_at("2001", Level::Primary, Gender::Girls, (24.4680, 39.6030))
            .with_sector("Central")
            .with_contact(contact("Noura", "0500000011")),
        school_at("2002", Level::Primary, Gender::Girls, (24.4800, 39.5900))
            .with_sector("Central")
            .with_contact(contact("Huda", "0500000012")),
        school_at("3001", Level::Secondary, Gender::Boys, (24.4690, 39.6040))
            .with_sector("Central"),
        primary_boys("9999", (0.0, 0.0)).with_sector("Unknown"),
    ]
}
