use std::io::Write;

use school_core::plan::Plan;

use crate::error::Result;

/// Lets spreadsheet tools detect UTF-8 for Arabic names.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub(crate) const HEADERS: [&str; 14] = [
    "school_id",
    "school_name",
    "level",
    "gender",
    "sector",
    "alternative_school_id",
    "alternative_school_name",
    "alternative_sector",
    "distance_km",
    "priority",
    "alternative_principal_name",
    "alternative_principal_phone",
    "alternative_latitude",
    "alternative_longitude",
];

/// One row per assignment, grouped by source school in plan order.
pub(crate) fn export_plan_csv_impl<W: Write>(plan: &Plan<'_>, mut writer: W) -> Result<usize> {
    writer.write_all(UTF8_BOM)?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    let mut rows = 0;
    for entry in plan {
        let school = entry.school;
        for assignment in &entry.alternatives {
            let alternative = assignment.alternative;
            let distance = format!("{:.2}", assignment.distance_km);
            let priority = assignment.priority.to_string();
            let latitude = alternative.location.lat.to_string();
            let longitude = alternative.location.lon.to_string();
            wtr.write_record([
                school.id.as_str(),
                school.name.as_str(),
                school.level.as_str(),
                school.gender.as_str(),
                school.sector.as_str(),
                alternative.id.as_str(),
                alternative.name.as_str(),
                alternative.sector.as_str(),
                distance.as_str(),
                priority.as_str(),
                alternative.contact.principal_name.as_str(),
                alternative.contact.principal_phone.as_str(),
                latitude.as_str(),
                longitude.as_str(),
            ])?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}
