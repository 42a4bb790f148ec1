use crate::school::School;
use crate::spatial::round_km;

use super::algorithm::AlternativeSelector;
use super::types::{AlternativeAssignment, MatchLimits};

/// Nearest-first selection within a distance cap.
///
/// # Algorithm Behavior
///
/// 1. Skips the source school itself (matched by identifier)
/// 2. Computes the haversine distance from the source to every other member
/// 3. Keeps members with distance ≤ `max_distance_km`
/// 4. Sorts by exact distance, breaking ties by identifier ascending
/// 5. Keeps the first `max_alternatives` and numbers them from 1
///
/// The distance cap is applied to the exact distance; the reported distance
/// is rounded to two decimals afterwards.
///
/// # Performance
///
/// O(n log n) in the cohort size. Every member is compared, there is no
/// spatial index.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestAlternatives;

impl AlternativeSelector for NearestAlternatives {
    fn select<'a>(
        &self,
        source: &'a School,
        cohort: &[&'a School],
        limits: &MatchLimits,
    ) -> Vec<AlternativeAssignment<'a>> {
        if limits.max_alternatives == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<(&'a School, f64)> = cohort
            .iter()
            .copied()
            .filter(|candidate| candidate.id != source.id)
            .map(|candidate| (candidate, source.location.distance_km(&candidate.location)))
            .filter(|(_, distance_km)| *distance_km <= limits.max_distance_km)
            .collect();

        candidates.sort_by(|(a, a_km), (b, b_km)| {
            a_km.total_cmp(b_km).then_with(|| a.id.cmp(&b.id))
        });
        candidates.truncate(limits.max_alternatives);

        candidates
            .into_iter()
            .zip(1u32..)
            .map(|((alternative, distance_km), priority)| AlternativeAssignment {
                source,
                alternative,
                distance_km: round_km(distance_km),
                priority,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::school::{Gender, Level};
    use crate::test_helpers::{primary_boys, MADINAH_A, MADINAH_B};

    fn ids<'a>(assignments: &[AlternativeAssignment<'a>]) -> Vec<&'a str> {
        assignments.iter().map(|a| a.alternative.id.as_str()).collect()
    }

    #[test]
    fn picks_neighbor_within_radius() {
        let a = primary_boys("A", MADINAH_A);
        let b = primary_boys("B", MADINAH_B);
        let cohort = vec![&a, &b];

        let result = NearestAlternatives.select(&a, &cohort, &MatchLimits::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].alternative.id, "B");
        assert_eq!(result[0].priority, 1);
        assert_eq!(result[0].distance_km, 7.22);
        assert!(std::ptr::eq(result[0].source, &a));
    }

    #[test]
    fn never_selects_self() {
        let a = primary_boys("A", MADINAH_A);
        let twin = primary_boys("A", MADINAH_A);
        let cohort = vec![&a, &twin];
        let result = NearestAlternatives.select(&a, &cohort, &MatchLimits::default());
        assert!(result.is_empty());
    }

    #[test]
    fn lone_school_has_no_alternatives() {
        let a = primary_boys("A", MADINAH_A);
        let result = NearestAlternatives.select(&a, &[&a], &MatchLimits::default());
        assert!(result.is_empty());
    }

    #[test]
    fn excludes_candidates_beyond_radius() {
        let a = primary_boys("A", MADINAH_A);
        let b = primary_boys("B", MADINAH_B);
        let limits = MatchLimits::new(5.0, 3);
        let result = NearestAlternatives.select(&a, &[&a, &b], &limits);
        assert!(result.is_empty());
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let a = primary_boys("A", (0.5, 10.0));
        let b = primary_boys("B", (1.5, 10.0));
        let exact = a.location.distance_km(&b.location);

        let at_boundary = NearestAlternatives.select(&a, &[&a, &b], &MatchLimits::new(exact, 3));
        assert_eq!(ids(&at_boundary), vec!["B"]);

        let just_below = MatchLimits::new(exact - 1e-9, 3);
        assert!(NearestAlternatives.select(&a, &[&a, &b], &just_below).is_empty());
    }

    #[test]
    fn ranks_by_distance_and_truncates() {
        let source = primary_boys("S", (24.50, 39.60));
        let far = primary_boys("far", (24.54, 39.60));
        let near = primary_boys("near", (24.51, 39.60));
        let mid = primary_boys("mid", (24.52, 39.60));
        let cohort = vec![&far, &source, &near, &mid];

        let result = NearestAlternatives.select(&source, &cohort, &MatchLimits::new(10.0, 2));

        assert_eq!(ids(&result), vec!["near", "mid"]);
        assert_eq!(result.iter().map(|a| a.priority).collect::<Vec<_>>(), vec![1, 2]);
        assert!(result[0].distance_km <= result[1].distance_km);
    }

    #[test]
    fn equal_distances_tie_break_on_identifier() {
        let source = primary_boys("S", (24.50, 39.60));
        let first = primary_boys("z-campus", (24.52, 39.60));
        let second = primary_boys("a-campus", (24.52, 39.60));
        let cohort = vec![&source, &first, &second];

        let result = NearestAlternatives.select(&source, &cohort, &MatchLimits::default());

        assert_eq!(ids(&result), vec!["a-campus", "z-campus"]);
        assert_eq!(result[0].distance_km, result[1].distance_km);
    }

    #[test]
    fn zero_cap_yields_nothing() {
        let a = primary_boys("A", MADINAH_A);
        let b = primary_boys("B", MADINAH_B);
        let result = NearestAlternatives.select(&a, &[&a, &b], &MatchLimits::new(10.0, 0));
        assert!(result.is_empty());
    }

    #[test]
    fn ignores_cohort_attributes_it_is_given() {
        // The selector trusts the cohort it receives; grouping happens upstream.
        let a = primary_boys("A", MADINAH_A);
        let mut b = primary_boys("B", MADINAH_B);
        b.level = Level::Secondary;
        b.gender = Gender::Girls;
        let result = NearestAlternatives.select(&a, &[&a, &b], &MatchLimits::default());
        assert_eq!(ids(&result), vec!["B"]);
    }
}
