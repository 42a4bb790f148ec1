//! Cohort grouping: partitions schools by (level, gender).
//!
//! A cohort is the universe of match candidates for each of its members.
//! Grouping is a stable partition: every school lands in exactly one cohort
//! and keeps its relative input order there.

use std::collections::BTreeMap;
use std::fmt;

use crate::school::{Gender, Level, School};

/// Composite key identifying a cohort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CohortKey {
    pub level: Level,
    pub gender: Gender,
}

impl CohortKey {
    pub fn new(level: Level, gender: Gender) -> Self {
        Self { level, gender }
    }

    pub fn of(school: &School) -> Self {
        Self::new(school.level.clone(), school.gender.clone())
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.level, self.gender)
    }
}

/// Schools grouped by cohort, borrowing from the caller's collection.
#[derive(Debug, Default)]
pub struct Cohorts<'a> {
    groups: BTreeMap<CohortKey, Vec<&'a School>>,
}

impl<'a> Cohorts<'a> {
    /// Group the given schools. Callers pass only eligible schools; grouping
    /// itself does not filter.
    pub fn group<I>(schools: I) -> Self
    where
        I: IntoIterator<Item = &'a School>,
    {
        let mut groups: BTreeMap<CohortKey, Vec<&'a School>> = BTreeMap::new();
        for school in schools {
            groups.entry(CohortKey::of(school)).or_default().push(school);
        }
        Self { groups }
    }

    pub fn get(&self, key: &CohortKey) -> Option<&[&'a School]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// The cohort a school belongs to, including the school itself.
    ///
    /// Empty when the school was not part of the grouping.
    pub fn cohort_of(&self, school: &School) -> &[&'a School] {
        self.get(&CohortKey::of(school)).unwrap_or(&[])
    }

    /// Cohorts in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CohortKey, &[&'a School])> {
        self.groups.iter().map(|(key, members)| (key, members.as_slice()))
    }

    /// Number of cohorts.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of grouped schools across all cohorts.
    pub fn school_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
