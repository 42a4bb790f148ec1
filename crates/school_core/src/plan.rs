//! Plan building: runs the selector over every eligible school.
//!
//! The [`Plan`] maps each eligible school identifier to its ranked
//! alternatives, keeping input order. Schools with no qualifying alternative
//! are still present with an empty list, so "considered, no match" stays
//! distinguishable from "never considered".

use std::collections::HashMap;

use crate::cohort::Cohorts;
use crate::matching::{AlternativeAssignment, AlternativeSelector, MatchLimits, NearestAlternatives};
use crate::school::School;

/// Alternatives recorded for one source school.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry<'a> {
    pub school: &'a School,
    /// Priority order; possibly empty.
    pub alternatives: Vec<AlternativeAssignment<'a>>,
}

impl PlanEntry<'_> {
    pub fn has_alternatives(&self) -> bool {
        !self.alternatives.is_empty()
    }
}

/// Count of schools with and without at least one alternative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanTally {
    pub with_alternatives: usize,
    pub without_alternatives: usize,
}

impl PlanTally {
    fn record(&mut self, entry: &PlanEntry<'_>) {
        if entry.has_alternatives() {
            self.with_alternatives += 1;
        } else {
            self.without_alternatives += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.with_alternatives + self.without_alternatives
    }
}

/// The complete assignment of alternatives for one run.
///
/// Read-only once built. Entries keep the order in which schools were
/// supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<'a> {
    entries: Vec<PlanEntry<'a>>,
    index: HashMap<&'a str, usize>,
    limits: MatchLimits,
    tally: PlanTally,
}

impl<'a> Plan<'a> {
    fn empty(limits: MatchLimits, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            limits,
            tally: PlanTally::default(),
        }
    }

    /// Assemble a plan from entries produced elsewhere, e.g. by a parallel
    /// runner. A repeated identifier keeps its first entry.
    pub fn from_entries<I>(entries: I, limits: MatchLimits) -> Self
    where
        I: IntoIterator<Item = PlanEntry<'a>>,
    {
        let entries = entries.into_iter();
        let mut plan = Self::empty(limits, entries.size_hint().0);
        for entry in entries {
            plan.push(entry);
        }
        plan
    }

    fn push(&mut self, entry: PlanEntry<'a>) {
        let id = entry.school.id.as_str();
        if self.index.contains_key(id) {
            log::warn!("School {id} appears more than once; keeping its first entry");
            return;
        }
        self.tally.record(&entry);
        self.index.insert(id, self.entries.len());
        self.entries.push(entry);
    }

    /// Alternatives for a school, or `None` if it was never considered.
    pub fn get(&self, school_id: &str) -> Option<&[AlternativeAssignment<'a>]> {
        self.entry(school_id).map(|entry| entry.alternatives.as_slice())
    }

    pub fn entry(&self, school_id: &str) -> Option<&PlanEntry<'a>> {
        self.index.get(school_id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, school_id: &str) -> bool {
        self.index.contains_key(school_id)
    }

    pub fn entries(&self) -> &[PlanEntry<'a>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry<'a>> {
        self.entries.iter()
    }

    /// Entries with at least one alternative, in input order.
    pub fn with_alternatives(&self) -> impl Iterator<Item = &PlanEntry<'a>> {
        self.entries.iter().filter(|entry| entry.has_alternatives())
    }

    /// Every assignment across the plan.
    pub fn assignments(&self) -> impl Iterator<Item = &AlternativeAssignment<'a>> {
        self.entries.iter().flat_map(|entry| entry.alternatives.iter())
    }

    /// Number of schools in the plan.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limits(&self) -> &MatchLimits {
        &self.limits
    }

    /// Counts accumulated while the plan was assembled.
    pub fn tally(&self) -> PlanTally {
        self.tally
    }

    /// Counts derived afresh from the entries. Always equal to [`Plan::tally`].
    pub fn recount(&self) -> PlanTally {
        let mut tally = PlanTally::default();
        for entry in &self.entries {
            tally.record(entry);
        }
        tally
    }
}

impl<'p, 'a> IntoIterator for &'p Plan<'a> {
    type Item = &'p PlanEntry<'a>;
    type IntoIter = std::slice::Iter<'p, PlanEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Prepares eligible schools and cohorts, then selects alternatives.
///
/// # Examples
///
/// ```
/// use school_core::matching::MatchLimits;
/// use school_core::plan::PlanBuilder;
/// use school_core::school::{Gender, Level, School};
/// use school_core::spatial::GeoPoint;
///
/// let schools = vec![
///     School::new("A", "North", Level::Primary, Gender::Boys, GeoPoint::new(24.4672, 39.6024)),
///     School::new("B", "South", Level::Primary, Gender::Boys, GeoPoint::new(24.5247, 39.5692)),
/// ];
/// let plan = PlanBuilder::new(&schools, MatchLimits::default()).build();
/// assert_eq!(plan.get("A").unwrap()[0].alternative.id, "B");
/// ```
pub struct PlanBuilder<'a, S = NearestAlternatives> {
    eligible: Vec<&'a School>,
    cohorts: Cohorts<'a>,
    selector: S,
    limits: MatchLimits,
}

impl<'a> PlanBuilder<'a, NearestAlternatives> {
    /// Filter out schools without a usable location and group the rest.
    pub fn new(schools: &'a [School], limits: MatchLimits) -> Self {
        let eligible: Vec<&'a School> = schools.iter().filter(|s| s.is_eligible()).collect();
        let excluded = schools.len() - eligible.len();
        if excluded > 0 {
            log::info!("Excluded {excluded} schools without usable coordinates");
        }
        let cohorts = Cohorts::group(eligible.iter().copied());
        for (key, members) in cohorts.iter() {
            log::debug!("Cohort {key}: {} schools", members.len());
        }

        Self {
            eligible,
            cohorts,
            selector: NearestAlternatives,
            limits,
        }
    }
}

impl<'a, S: AlternativeSelector> PlanBuilder<'a, S> {
    /// Swap the selection strategy.
    pub fn with_selector<T: AlternativeSelector>(self, selector: T) -> PlanBuilder<'a, T> {
        PlanBuilder {
            eligible: self.eligible,
            cohorts: self.cohorts,
            selector,
            limits: self.limits,
        }
    }

    /// Eligible schools in input order.
    pub fn eligible(&self) -> &[&'a School] {
        &self.eligible
    }

    pub fn cohorts(&self) -> &Cohorts<'a> {
        &self.cohorts
    }

    pub fn limits(&self) -> &MatchLimits {
        &self.limits
    }

    /// Run the selector for a single school against its cohort.
    pub fn select_for(&self, school: &'a School) -> PlanEntry<'a> {
        let cohort = self.cohorts.cohort_of(school);
        PlanEntry {
            school,
            alternatives: self.selector.select(school, cohort, &self.limits),
        }
    }

    /// Select alternatives for every eligible school, sequentially.
    pub fn build(&self) -> Plan<'a> {
        let plan = Plan::from_entries(
            self.eligible.iter().copied().map(|school| self.select_for(school)),
            self.limits,
        );
        let tally = plan.tally();
        debug_assert_eq!(tally, plan.recount());
        log::info!(
            "Plan built: {} schools with alternatives, {} without",
            tally.with_alternatives,
            tally.without_alternatives
        );
        plan
    }
}
