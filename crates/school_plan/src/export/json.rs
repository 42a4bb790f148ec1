use std::io::Write;

use school_core::plan::Plan;
use school_core::statistics::PlanStatistics;

use super::records::PlanRecord;
use crate::error::Result;

/// Schools with at least one alternative, in plan order.
pub(crate) fn plan_records(plan: &Plan<'_>) -> Vec<PlanRecord> {
    plan.with_alternatives().map(PlanRecord::from).collect()
}

pub(crate) fn export_plan_json_impl<W: Write>(plan: &Plan<'_>, mut writer: W) -> Result<usize> {
    let records = plan_records(plan);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.flush()?;
    Ok(records.len())
}

pub(crate) fn export_statistics_json_impl<W: Write>(
    stats: &PlanStatistics,
    mut writer: W,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, stats)?;
    writer.flush()?;
    Ok(())
}
