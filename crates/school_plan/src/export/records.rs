//! Serializable views of a plan, keyed the way downstream consumers expect.

use school_core::matching::AlternativeAssignment;
use school_core::plan::PlanEntry;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub school_id: String,
    pub school_name: String,
    pub level: String,
    pub gender: String,
    pub sector: String,
    pub latitude: f64,
    pub longitude: f64,
    pub alternatives: Vec<AlternativeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeRecord {
    pub priority: u32,
    pub alternative_school_id: String,
    pub alternative_school_name: String,
    pub alternative_sector: String,
    pub distance_km: f64,
    pub principal_name: String,
    pub principal_phone: String,
    pub alternative_latitude: f64,
    pub alternative_longitude: f64,
}

impl From<&PlanEntry<'_>> for PlanRecord {
    fn from(entry: &PlanEntry<'_>) -> Self {
        let school = entry.school;
        Self {
            school_id: school.id.clone(),
            school_name: school.name.clone(),
            level: school.level.to_string(),
            gender: school.gender.to_string(),
            sector: school.sector.clone(),
            latitude: school.location.lat,
            longitude: school.location.lon,
            alternatives: entry.alternatives.iter().map(AlternativeRecord::from).collect(),
        }
    }
}

impl From<&AlternativeAssignment<'_>> for AlternativeRecord {
    fn from(assignment: &AlternativeAssignment<'_>) -> Self {
        let alternative = assignment.alternative;
        Self {
            priority: assignment.priority,
            alternative_school_id: alternative.id.clone(),
            alternative_school_name: alternative.name.clone(),
            alternative_sector: alternative.sector.clone(),
            distance_km: assignment.distance_km,
            principal_name: alternative.contact.principal_name.clone(),
            principal_phone: alternative.contact.principal_phone.clone(),
            alternative_latitude: alternative.location.lat,
            alternative_longitude: alternative.location.lon,
        }
    }
}

/// Compact per-school view embedded in the TypeScript module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolAlternativesRecord {
    pub school_id: String,
    pub school_name: String,
    pub level: String,
    pub gender: String,
    pub sector: String,
    pub alternatives: Vec<AlternativeSchoolRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeSchoolRecord {
    pub priority: u32,
    pub school_id: String,
    pub school_name: String,
    pub sector: String,
    pub distance_km: f64,
    pub principal_name: String,
    pub principal_phone: String,
}

impl From<&PlanEntry<'_>> for SchoolAlternativesRecord {
    fn from(entry: &PlanEntry<'_>) -> Self {
        let school = entry.school;
        Self {
            school_id: school.id.clone(),
            school_name: school.name.clone(),
            level: school.level.to_string(),
            gender: school.gender.to_string(),
            sector: school.sector.clone(),
            alternatives: entry
                .alternatives
                .iter()
                .map(|assignment| AlternativeSchoolRecord {
                    priority: assignment.priority,
                    school_id: assignment.alternative.id.clone(),
                    school_name: assignment.alternative.name.clone(),
                    sector: assignment.alternative.sector.clone(),
                    distance_km: assignment.distance_km,
                    principal_name: assignment.alternative.contact.principal_name.clone(),
                    principal_phone: assignment.alternative.contact.principal_phone.clone(),
                })
                .collect(),
        }
    }
}
