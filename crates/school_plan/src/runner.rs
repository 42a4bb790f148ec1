//! Parallel plan execution using rayon.
//!
//! Selection for one school only reads the shared cohorts, so schools are
//! processed independently across the pool and reassembled in input order.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use school_core::matching::MatchLimits;
use school_core::plan::{Plan, PlanBuilder, PlanEntry};
use school_core::school::School;

use crate::config::validate_limits;
use crate::error::Result;

/// Execution settings for [`run_plan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Worker threads. `None` uses rayon's default (one per core).
    pub threads: Option<usize>,
    pub show_progress: bool,
}

impl RunOptions {
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Build the plan for `schools` on a rayon thread pool.
///
/// The result is identical to `PlanBuilder::new(schools, limits).build()`;
/// only the work is spread across threads.
///
/// # Errors
///
/// Returns an error if `limits` are invalid or the thread pool cannot be
/// created.
pub fn run_plan<'a>(
    schools: &'a [School],
    limits: MatchLimits,
    options: &RunOptions,
) -> Result<Plan<'a>> {
    validate_limits(&limits)?;

    let builder = PlanBuilder::new(schools, limits);
    let eligible = builder.eligible();
    let progress = progress_bar(eligible.len(), options.show_progress);

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = options.threads {
        pool = pool.num_threads(threads);
    }
    let pool = pool.build()?;
    log::debug!(
        "Selecting alternatives for {} schools on {} threads",
        eligible.len(),
        pool.current_num_threads()
    );

    let entries: Vec<PlanEntry<'a>> = pool.install(|| {
        eligible
            .par_iter()
            .map(|&school| {
                let entry = builder.select_for(school);
                if let Some(bar) = &progress {
                    bar.inc(1);
                }
                entry
            })
            .collect()
    });

    if let Some(bar) = &progress {
        bar.finish_with_message("Completed");
    }

    let plan = Plan::from_entries(entries, limits);
    let tally = plan.tally();
    log::info!(
        "Plan built: {} schools with alternatives, {} without",
        tally.with_alternatives,
        tally.without_alternatives
    );
    Ok(plan)
}

fn progress_bar(total: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total == 0 {
        return None;
    }
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    Some(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_core::test_helpers::madinah_fixture;

    #[test]
    fn matches_sequential_build() {
        let schools = madinah_fixture();
        let limits = MatchLimits::default();
        let sequential = PlanBuilder::new(&schools, limits).build();
        let parallel = run_plan(&schools, limits, &RunOptions::default().with_threads(Some(2)))
            .expect("plan runs");
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn rejects_negative_distance() {
        let schools = madinah_fixture();
        let result = run_plan(&schools, MatchLimits::new(-1.0, 3), &RunOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn empty_input_builds_empty_plan() {
        let plan = run_plan(&[], MatchLimits::default(), &RunOptions::default().with_progress(true))
            .expect("plan runs");
        assert!(plan.is_empty());
        assert_eq!(plan.tally().total(), 0);
    }
}
