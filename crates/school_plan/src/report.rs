//! Human-readable plan reports.
//!
//! Reports write to any [`Write`] so the binary can target stdout and tests
//! can target a buffer.

use std::collections::BTreeMap;
use std::io::{self, Write};

use school_core::cohort::Cohorts;
use school_core::plan::{Plan, PlanEntry};
use school_core::statistics::{CoverageCounts, PlanStatistics};

const RULE_WIDTH: usize = 80;

/// Whole-number percentage of `part` in `total`; 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}

pub fn write_statistics_report<W: Write>(out: &mut W, stats: &PlanStatistics) -> io::Result<()> {
    write_heading(out, "Mutual operation plan statistics")?;

    let total = stats.total_schools;
    let coverage = &stats.coverage;
    writeln!(out)?;
    writeln!(out, "Overview:")?;
    writeln!(out, "  - Total schools: {total}")?;
    writeln!(
        out,
        "  - With alternatives: {} ({}%)",
        coverage.with_alternatives,
        percent(coverage.with_alternatives, total)
    )?;
    writeln!(
        out,
        "  - Without alternatives: {} ({}%)",
        coverage.without_alternatives,
        percent(coverage.without_alternatives, total)
    )?;

    let distance = &stats.distance;
    if let Some(min_km) = distance.min_km {
        writeln!(out)?;
        writeln!(out, "Distances ({} assignments):", distance.samples)?;
        writeln!(out, "  - Mean: {:.2} km", distance.mean_km)?;
        writeln!(out, "  - Median: {:.2} km", distance.median_km)?;
        writeln!(out, "  - Min: {min_km:.2} km")?;
        writeln!(out, "  - Max: {:.2} km", distance.max_km)?;
    }

    write_breakdown(out, "By level:", &stats.by_level, false)?;
    write_breakdown(out, "By gender:", &stats.by_gender, false)?;
    write_breakdown(out, "By sector:", &stats.by_sector, true)
}

fn write_breakdown<W: Write>(
    out: &mut W,
    title: &str,
    groups: &BTreeMap<String, CoverageCounts>,
    with_percent: bool,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    for (name, counts) in groups {
        let name = if name.is_empty() { "(unspecified)" } else { name.as_str() };
        if with_percent {
            writeln!(
                out,
                "  - {name}: {}/{} ({}%)",
                counts.with_alternatives,
                counts.total(),
                percent(counts.with_alternatives, counts.total())
            )?;
        } else {
            writeln!(
                out,
                "  - {name}: {}/{} with alternatives",
                counts.with_alternatives,
                counts.total()
            )?;
        }
    }
    Ok(())
}

/// The first `sample_size` schools that have alternatives, in plan order.
pub fn write_sample_report<W: Write>(
    out: &mut W,
    plan: &Plan<'_>,
    sample_size: usize,
) -> io::Result<()> {
    write_heading(out, "Sample of the mutual operation plan")?;
    for entry in plan.with_alternatives().take(sample_size) {
        write_school_alternatives(out, entry)?;
    }
    Ok(())
}

/// One school and its ranked alternatives.
pub fn write_school_alternatives<W: Write>(out: &mut W, entry: &PlanEntry<'_>) -> io::Result<()> {
    let school = entry.school;
    writeln!(out)?;
    writeln!(out, "{} [{}]", school.name, school.id)?;
    writeln!(out, "  Level: {} | Gender: {}", school.level, school.gender)?;
    writeln!(out, "  Sector: {}", school.sector)?;
    writeln!(out, "  Location: ({}, {})", school.location.lat, school.location.lon)?;

    if entry.alternatives.is_empty() {
        writeln!(out, "  No alternatives within range")?;
        return Ok(());
    }

    writeln!(out, "  Alternatives:")?;
    for assignment in &entry.alternatives {
        let alternative = assignment.alternative;
        writeln!(out, "    {}. {} [{}]", assignment.priority, alternative.name, alternative.id)?;
        writeln!(
            out,
            "       Distance: {:.2} km | Sector: {}",
            assignment.distance_km, alternative.sector
        )?;
        let contact = &alternative.contact;
        if !contact.principal_name.is_empty() || !contact.principal_phone.is_empty() {
            writeln!(
                out,
                "       Principal: {} {}",
                contact.principal_name, contact.principal_phone
            )?;
        }
    }
    Ok(())
}

/// Cohort sizes in key order.
pub fn write_cohort_overview<W: Write>(out: &mut W, cohorts: &Cohorts<'_>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Schools by level and gender:")?;
    for (key, members) in cohorts.iter() {
        writeln!(out, "  - {key}: {} schools", members.len())?;
    }
    Ok(())
}
