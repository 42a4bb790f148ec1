use std::io::Write;

use school_core::plan::Plan;

use super::records::SchoolAlternativesRecord;
use crate::error::Result;

const INTERFACES: &str = "\
export interface AlternativeSchool {
    priority: number;
    schoolId: string;
    schoolName: string;
    sector: string;
    distanceKm: number;
    principalName: string;
    principalPhone: string;
}

export interface SchoolAlternatives {
    schoolId: string;
    schoolName: string;
    level: string;
    gender: string;
    sector: string;
    alternatives: AlternativeSchool[];
}
";

const HELPERS: &str = "\
export function getAlternativesForSchool(schoolId: string): SchoolAlternatives | undefined {
    return mutualOperationPlan.find(s => s.schoolId === schoolId);
}

export function getAlternativesByName(schoolName: string): SchoolAlternatives | undefined {
    return mutualOperationPlan.find(s => s.schoolName === schoolName);
}
";

/// Write a self-contained module exporting `mutualOperationPlan` and two
/// lookup helpers. Output is deterministic for a given plan.
pub(crate) fn export_plan_typescript_impl<W: Write>(
    plan: &Plan<'_>,
    mut writer: W,
) -> Result<usize> {
    let records: Vec<SchoolAlternativesRecord> =
        plan.with_alternatives().map(SchoolAlternativesRecord::from).collect();
    let data = serde_json::to_string_pretty(&records)?;

    writeln!(writer, "// Mutual operation plan: alternative schools by level and gender.")?;
    writeln!(writer, "// Schools with alternatives: {}", records.len())?;
    writeln!(
        writer,
        "// Limits: {} km, up to {} alternatives per school",
        plan.limits().max_distance_km,
        plan.limits().max_alternatives
    )?;
    writeln!(writer)?;
    writeln!(writer, "{INTERFACES}")?;
    writeln!(writer, "export const mutualOperationPlan: SchoolAlternatives[] = {data};")?;
    writeln!(writer)?;
    write!(writer, "{HELPERS}")?;
    writer.flush()?;
    Ok(records.len())
}
