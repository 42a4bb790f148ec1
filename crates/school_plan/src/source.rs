//! Loading school records from the source dataset.
//!
//! The dataset is either a plain JSON array of records or a TypeScript module
//! of the form `export const schoolsData: School[] = [ ... ];` whose object
//! keys may be unquoted. Records without a usable location, without an
//! identifier, or repeating an earlier identifier are skipped; the counts are
//! reported in [`LoadSummary`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use school_core::school::{Contact, Gender, Level, School};
use school_core::spatial::GeoPoint;
use serde::{Deserialize, Deserializer};

use crate::error::{PlanError, Result};

/// A record as it appears in the source dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSchoolRecord {
    #[serde(rename = "SchoolID", default, deserialize_with = "loose_text")]
    pub school_id: String,
    #[serde(rename = "SchoolName", default, deserialize_with = "loose_text")]
    pub school_name: String,
    #[serde(rename = "Level", default, deserialize_with = "loose_text")]
    pub level: String,
    #[serde(rename = "SchoolGender", default, deserialize_with = "loose_text")]
    pub gender: String,
    #[serde(rename = "Latitude", default, deserialize_with = "loose_number")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "loose_number")]
    pub longitude: Option<f64>,
    #[serde(rename = "SectorDescription", default, deserialize_with = "loose_text")]
    pub sector: String,
    #[serde(rename = "PrincipalName", default, deserialize_with = "loose_text")]
    pub principal_name: String,
    #[serde(rename = "PrincipalPhone", default, deserialize_with = "loose_text")]
    pub principal_phone: String,
    #[serde(rename = "SchoolEmail", default, deserialize_with = "loose_text")]
    pub school_email: String,
}

impl RawSchoolRecord {
    /// Coordinates, if both are present, finite and non-zero.
    pub fn location(&self) -> Option<GeoPoint> {
        let (lat, lon) = (self.latitude?, self.longitude?);
        let usable = |v: f64| v.is_finite() && v != 0.0;
        (usable(lat) && usable(lon)).then(|| GeoPoint::new(lat, lon))
    }

    /// Convert into a matchable school; `None` without a usable location.
    pub fn into_school(self) -> Option<School> {
        let location = self.location()?;
        let school = School::new(
            self.school_id,
            self.school_name,
            Level::from_label(&self.level),
            Gender::from_label(&self.gender),
            location,
        )
        .with_sector(self.sector)
        .with_contact(Contact {
            principal_name: self.principal_name,
            principal_phone: self.principal_phone,
            email: self.school_email,
        });
        Some(school)
    }
}

/// Values that may arrive as strings, numbers, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde::de::IgnoredAny),
}

fn loose_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Text(text)) => text.trim().to_string(),
        Some(LooseValue::Number(number)) => number.to_string(),
        Some(LooseValue::Other(_)) | None => String::new(),
    })
}

fn loose_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(LooseValue::Number(number)) => number.as_f64(),
        Some(LooseValue::Other(_)) | None => None,
    })
}

/// What happened to the raw records during loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub raw_records: usize,
    pub loaded: usize,
    /// Missing, unparseable or zero coordinates.
    pub skipped_location: usize,
    pub skipped_missing_id: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone)]
pub struct LoadedSchools {
    pub schools: Vec<School>,
    pub summary: LoadSummary,
}

/// Read and parse the dataset at `path`.
pub fn load_schools(path: impl AsRef<Path>) -> Result<LoadedSchools> {
    let path = path.as_ref();
    log::info!("Loading schools from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| PlanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content, path)?;
    let loaded = schools_from_records(records);
    log::info!(
        "Loaded {} of {} records ({} without location, {} without id, {} duplicates)",
        loaded.summary.loaded,
        loaded.summary.raw_records,
        loaded.summary.skipped_location,
        loaded.summary.skipped_missing_id,
        loaded.summary.duplicates
    );
    Ok(loaded)
}

/// Parse dataset text. `origin` is only used in error messages.
pub fn parse_records(content: &str, origin: &Path) -> Result<Vec<RawSchoolRecord>> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }

    let array = extract_schools_array(content).ok_or_else(|| PlanError::MissingSchoolsData {
        path: origin.to_path_buf(),
    })?;
    Ok(serde_json::from_str(&typescript_to_json(array))?)
}

/// Slice out the array literal assigned to `schoolsData`.
fn extract_schools_array(content: &str) -> Option<&str> {
    static DECLARATION: OnceLock<Regex> = OnceLock::new();
    let declaration = DECLARATION.get_or_init(|| {
        Regex::new(r"export\s+const\s+schoolsData\b[^=]*=\s*").expect("valid declaration regex")
    });

    let after = declaration.find(content)?.end();
    let rest = &content[after..];
    let start = rest.find('[')?;
    let end = rest.rfind(']')?;
    (start < end).then(|| &rest[start..=end])
}

/// Turn a JavaScript object-literal array into JSON: quote bare keys and
/// drop trailing commas. String literals are matched whole and left as they
/// are, so commas and colons inside values are never rewritten.
fn typescript_to_json(literal: &str) -> String {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| {
        Regex::new(
            r#"(?x)
              "(?:[^"\\]|\\.)*"                                      # string literal
            | (?P<lead>[{,]\s*)(?P<key>[A-Za-z_][A-Za-z0-9_]*)\s*:  # bare key
            | ,(?P<close>\s*[}\]])                                 # trailing comma
            "#,
        )
        .expect("valid literal regex")
    });

    token
        .replace_all(literal, |caps: &Captures<'_>| {
            if let (Some(lead), Some(key)) = (caps.name("lead"), caps.name("key")) {
                format!("{}\"{}\":", lead.as_str(), key.as_str())
            } else if let Some(close) = caps.name("close") {
                close.as_str().to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Convert raw records, skipping unusable ones and keeping the first of any
/// repeated identifier.
pub fn schools_from_records(records: Vec<RawSchoolRecord>) -> LoadedSchools {
    let mut summary = LoadSummary {
        raw_records: records.len(),
        ..LoadSummary::default()
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut schools = Vec::with_capacity(records.len());

    for record in records {
        if record.school_id.is_empty() {
            summary.skipped_missing_id += 1;
            continue;
        }
        let Some(school) = record.into_school() else {
            summary.skipped_location += 1;
            continue;
        };
        if !seen.insert(school.id.clone()) {
            log::warn!("Duplicate school id {}; keeping the first record", school.id);
            summary.duplicates += 1;
            continue;
        }
        schools.push(school);
    }

    summary.loaded = schools.len();
    LoadedSchools { schools, summary }
}
