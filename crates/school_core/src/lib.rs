//! Alternative school matching.
//!
//! Assigns every school a ranked list of nearby fallback sites that share its
//! education level and gender designation.
//!
//! # Quick Start
//!
//! ```
//! use school_core::matching::MatchLimits;
//! use school_core::plan::PlanBuilder;
//! use school_core::statistics::PlanStatistics;
//! use school_core::test_helpers::madinah_fixture;
//!
//! let schools = madinah_fixture();
//! let plan = PlanBuilder::new(&schools, MatchLimits::new(10.0, 3)).build();
//! let stats = PlanStatistics::from_plan(&plan);
//! assert_eq!(stats.total_schools, plan.len());
//! ```
//!
//! # Architecture
//!
//! - [`spatial`]: coordinates and haversine distance
//! - [`school`]: school records, levels and genders
//! - [`cohort`]: grouping by (level, gender)
//! - [`matching`]: per-school alternative selection
//! - [`plan`]: plan building over every eligible school
//! - [`statistics`]: coverage and distance metrics

pub mod cohort;
pub mod matching;
pub mod plan;
pub mod school;
pub mod spatial;
pub mod statistics;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use cohort::{CohortKey, Cohorts};
pub use matching::{AlternativeAssignment, AlternativeSelector, MatchLimits, NearestAlternatives};
pub use plan::{Plan, PlanBuilder, PlanEntry, PlanTally};
pub use school::{Contact, Gender, Level, School};
pub use spatial::{haversine_km, GeoPoint};
pub use statistics::{CoverageCounts, DistanceSummary, PlanStatistics};
