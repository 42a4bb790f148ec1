//! Plan and statistics export.
//!
//! This module writes a finished plan as JSON, CSV or a TypeScript module,
//! and plan statistics as JSON. Schools without alternatives are left out of
//! the plan files; they only show up in the statistics.

use std::path::{Path, PathBuf};

use school_core::plan::Plan;
use school_core::statistics::PlanStatistics;

use crate::config::{ExportFormat, PlanConfig};
use crate::error::Result;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/records.rs"]
pub mod records;
#[path = "export/typescript.rs"]
mod typescript;
#[path = "export/writer_utils.rs"]
mod writer_utils;

pub use records::{AlternativeRecord, PlanRecord};

/// Export the plan as a pretty-printed JSON array of [`PlanRecord`]s.
///
/// Returns the number of schools written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn export_plan_json(plan: &Plan<'_>, path: impl AsRef<Path>) -> Result<usize> {
    writer_utils::write_output(path.as_ref(), |file| json::export_plan_json_impl(plan, file))
}

/// Export the plan to CSV, one row per assignment.
///
/// Returns the number of rows written, excluding the header.
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails.
pub fn export_plan_csv(plan: &Plan<'_>, path: impl AsRef<Path>) -> Result<usize> {
    writer_utils::write_output(path.as_ref(), |file| csv::export_plan_csv_impl(plan, file))
}

/// Export the plan as a TypeScript module exporting `mutualOperationPlan`.
pub fn export_plan_typescript(plan: &Plan<'_>, path: impl AsRef<Path>) -> Result<usize> {
    writer_utils::write_output(path.as_ref(), |file| {
        typescript::export_plan_typescript_impl(plan, file)
    })
}

pub fn export_statistics_json(stats: &PlanStatistics, path: impl AsRef<Path>) -> Result<()> {
    writer_utils::write_output(path.as_ref(), |file| json::export_statistics_json_impl(stats, file))
}

/// Records for every school with at least one alternative, in plan order.
pub fn plan_records(plan: &Plan<'_>) -> Vec<PlanRecord> {
    json::plan_records(plan)
}

/// Write every format enabled in `config` into its output directory.
///
/// Returns the written paths in the order the formats are listed.
pub fn write_exports(
    plan: &Plan<'_>,
    stats: &PlanStatistics,
    config: &PlanConfig,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(config.exports.formats.len());
    for &format in &config.exports.formats {
        let path = config.output_path(format);
        match format {
            ExportFormat::Json => {
                let count = export_plan_json(plan, &path)?;
                log::info!("Wrote {count} schools to {}", path.display());
            }
            ExportFormat::Csv => {
                let rows = export_plan_csv(plan, &path)?;
                log::info!("Wrote {rows} assignments to {}", path.display());
            }
            ExportFormat::TypeScript => {
                let count = export_plan_typescript(plan, &path)?;
                log::info!("Wrote TypeScript module with {count} schools to {}", path.display());
            }
            ExportFormat::Statistics => {
                export_statistics_json(stats, &path)?;
                log::info!("Wrote statistics to {}", path.display());
            }
        }
        written.push(path);
    }
    Ok(written)
}
