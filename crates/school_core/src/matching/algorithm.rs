use crate::school::School;

use super::types::{AlternativeAssignment, MatchLimits};

/// Strategy for picking the alternatives of one school out of its cohort.
///
/// Implementations must be pure: the result depends only on the arguments,
/// so the plan builder can run selections for different schools in any order
/// or in parallel.
pub trait AlternativeSelector: Send + Sync {
    /// Select ranked alternatives for `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - The school that needs fallback sites
    /// * `cohort` - Every school sharing the source's level and gender,
    ///   the source itself included
    /// * `limits` - Distance and count caps
    ///
    /// # Returns
    ///
    /// Assignments in priority order, starting at priority 1. An empty list
    /// means no candidate qualified; it is not an error.
    fn select<'a>(
        &self,
        source: &'a School,
        cohort: &[&'a School],
        limits: &MatchLimits,
    ) -> Vec<AlternativeAssignment<'a>>;
}
