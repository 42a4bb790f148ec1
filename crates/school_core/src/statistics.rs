//! Coverage and distance statistics derived from a completed plan.
//!
//! Everything here is computed after the fact from the immutable [`Plan`];
//! no counters are shared with the builder.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::plan::{Plan, PlanEntry};
use crate::spatial::round_km;

/// Schools with and without at least one alternative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageCounts {
    pub with_alternatives: usize,
    pub without_alternatives: usize,
}

impl CoverageCounts {
    fn record(&mut self, has_alternatives: bool) {
        if has_alternatives {
            self.with_alternatives += 1;
        } else {
            self.without_alternatives += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.with_alternatives + self.without_alternatives
    }

    /// Share of schools with alternatives, 0.0 when there are none.
    pub fn coverage_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.with_alternatives as f64 / total as f64,
        }
    }
}

/// Summary of every assignment distance in a plan.
///
/// With no samples, `mean_km`, `median_km` and `max_km` are 0.0 and `min_km`
/// is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSummary {
    pub samples: usize,
    /// Rounded to two decimals.
    pub mean_km: f64,
    pub median_km: f64,
    pub min_km: Option<f64>,
    pub max_km: f64,
}

impl DistanceSummary {
    pub fn from_samples(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                samples: 0,
                mean_km: 0.0,
                median_km: 0.0,
                min_km: None,
                max_km: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        let median = if sorted.len() % 2 == 0 {
            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
        } else {
            sorted[sorted.len() / 2]
        };

        Self {
            samples: sorted.len(),
            mean_km: round_km(mean),
            median_km: round_km(median),
            min_km: sorted.first().copied(),
            max_km: sorted.last().copied().unwrap_or(0.0),
        }
    }
}

/// Aggregate metrics for one plan.
///
/// Breakdowns are keyed by the source school's level, gender and sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStatistics {
    pub total_schools: usize,
    pub coverage: CoverageCounts,
    pub by_level: BTreeMap<String, CoverageCounts>,
    pub by_gender: BTreeMap<String, CoverageCounts>,
    pub by_sector: BTreeMap<String, CoverageCounts>,
    /// Over every assignment, not just the closest per school.
    pub distance: DistanceSummary,
}

impl PlanStatistics {
    pub fn from_plan(plan: &Plan<'_>) -> Self {
        let mut coverage = CoverageCounts::default();
        let mut by_level: BTreeMap<String, CoverageCounts> = BTreeMap::new();
        let mut by_gender: BTreeMap<String, CoverageCounts> = BTreeMap::new();
        let mut by_sector: BTreeMap<String, CoverageCounts> = BTreeMap::new();

        for PlanEntry { school, alternatives } in plan {
            let has = !alternatives.is_empty();
            coverage.record(has);
            by_level.entry(school.level.to_string()).or_default().record(has);
            by_gender.entry(school.gender.to_string()).or_default().record(has);
            by_sector.entry(school.sector.clone()).or_default().record(has);
        }

        let distances: Vec<f64> = plan.assignments().map(|a| a.distance_km).collect();

        Self {
            total_schools: plan.len(),
            coverage,
            by_level,
            by_gender,
            by_sector,
            distance: DistanceSummary::from_samples(&distances),
        }
    }
}
