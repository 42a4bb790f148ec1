#![allow(dead_code)]

use school_core::plan::Plan;

/// Alternative ids for a school, in priority order.
pub fn alternative_ids<'a>(plan: &Plan<'a>, school_id: &str) -> Vec<&'a str> {
    plan.get(school_id)
        .unwrap_or_else(|| panic!("school {school_id} missing from plan"))
        .iter()
        .map(|a| a.alternative.id.as_str())
        .collect()
}

/// Assert the per-source ordering invariants on every entry of the plan.
pub fn assert_well_formed(plan: &Plan<'_>) {
    let limits = plan.limits();
    for entry in plan {
        assert!(entry.alternatives.len() <= limits.max_alternatives);
        for (i, assignment) in entry.alternatives.iter().enumerate() {
            assert_eq!(assignment.priority as usize, i + 1, "priorities must be 1..k");
            assert_ne!(assignment.alternative.id, entry.school.id, "no self match");
            assert!(std::ptr::eq(assignment.source, entry.school));
            // The cap applies to the exact distance; rounding may add up to 0.005.
            assert!(assignment.distance_km <= limits.max_distance_km + 0.005);
            assert_eq!(assignment.alternative.level, entry.school.level);
            assert_eq!(assignment.alternative.gender, entry.school.gender);
        }
        for pair in entry.alternatives.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km, "distances non-decreasing");
        }
    }
}
