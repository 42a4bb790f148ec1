use serde::{Deserialize, Serialize};

use crate::school::School;

/// Default cap on the distance to an alternative, in kilometers.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Default cap on the number of alternatives per school.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// Thresholds applied when selecting alternatives.
///
/// Passed explicitly to every selection so plans with different limits can be
/// built side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchLimits {
    /// Inclusive upper bound on the great-circle distance.
    pub max_distance_km: f64,
    pub max_alternatives: usize,
}

impl MatchLimits {
    pub fn new(max_distance_km: f64, max_alternatives: usize) -> Self {
        Self {
            max_distance_km,
            max_alternatives,
        }
    }
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE_KM, DEFAULT_MAX_ALTERNATIVES)
    }
}

/// One ranked alternative for a source school.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlternativeAssignment<'a> {
    pub source: &'a School,
    pub alternative: &'a School,
    /// Great-circle distance rounded to two decimals.
    pub distance_km: f64,
    /// 1 is the closest alternative.
    pub priority: u32,
}
