mod support;

use school_core::matching::MatchLimits;
use school_core::plan::PlanBuilder;
use school_core::school::{Gender, Level};
use school_core::statistics::PlanStatistics;
use school_plan::config::{ExportFormat, PlanConfig};
use school_plan::export::write_exports;
use school_plan::{load_schools, run_plan, LoadSummary, PlanError, RunOptions};
use tempfile::tempdir;

use support::write_dataset;

#[test]
fn loads_typescript_dataset() {
    let dir = tempdir().unwrap();
    let loaded = load_schools(write_dataset(dir.path())).unwrap();

    assert_eq!(
        loaded.summary,
        LoadSummary {
            raw_records: 7,
            loaded: 4,
            skipped_location: 2,
            skipped_missing_id: 0,
            duplicates: 1,
        }
    );

    let first = &loaded.schools[0];
    assert_eq!(first.id, "1001");
    assert_eq!(first.name, "ابتدائية الأولى");
    assert_eq!(first.level, Level::Primary);
    assert_eq!(first.gender, Gender::Boys);
    assert_eq!(first.contact.email, "1001@schools.example");
    assert_eq!(loaded.schools[1].id, "1002");
    assert_eq!(loaded.schools[3].level, Level::Secondary);
}

#[test]
fn missing_dataset_is_a_read_error() {
    let dir = tempdir().unwrap();
    let err = load_schools(dir.path().join("absent.ts")).unwrap_err();
    assert!(matches!(err, PlanError::Read { .. }));
}

#[test]
fn parallel_run_matches_sequential_build() {
    let dir = tempdir().unwrap();
    let loaded = load_schools(write_dataset(dir.path())).unwrap();
    let limits = MatchLimits::default();

    let sequential = PlanBuilder::new(&loaded.schools, limits).build();
    for threads in [Some(1), Some(3), None] {
        let options = RunOptions::default().with_threads(threads);
        let parallel = run_plan(&loaded.schools, limits, &options).unwrap();
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn writes_every_enabled_export() {
    let dir = tempdir().unwrap();
    let loaded = load_schools(write_dataset(dir.path())).unwrap();
    let plan = run_plan(&loaded.schools, MatchLimits::default(), &RunOptions::default()).unwrap();
    let stats = PlanStatistics::from_plan(&plan);

    let mut config = PlanConfig::default();
    config.output_directory = dir.path().join("out");
    config.exports.formats = ExportFormat::ALL.to_vec();

    let written = write_exports(&plan, &stats, &config).unwrap();
    assert_eq!(written.len(), 4);
    assert!(written.iter().all(|path| path.exists()));

    // JSON: only the Madinah primary-boys pair has alternatives.
    let json_text = std::fs::read_to_string(config.output_path(ExportFormat::Json)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["schoolId"], "1001");
    assert_eq!(records[0]["level"], "primary");
    let alternative = &records[0]["alternatives"][0];
    assert_eq!(alternative["priority"], 1);
    assert_eq!(alternative["alternativeSchoolId"], "1002");
    assert_eq!(alternative["distanceKm"], 7.22);
    assert_eq!(alternative["principalName"], "Khalid");
    assert_eq!(alternative["alternativeLatitude"], 24.5247);

    // CSV: BOM, header, one row per assignment.
    let csv_text = std::fs::read_to_string(config.output_path(ExportFormat::Csv)).unwrap();
    let csv_text = csv_text.strip_prefix('\u{feff}').expect("UTF-8 BOM");
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "school_id");
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][5], "1002");
    assert_eq!(&rows[0][8], "7.22");
    assert_eq!(&rows[1][5], "1001");

    let ts = std::fs::read_to_string(config.output_path(ExportFormat::TypeScript)).unwrap();
    assert!(ts.contains("export const mutualOperationPlan: SchoolAlternatives[] = ["));
    assert!(ts.contains("export function getAlternativesForSchool(schoolId: string)"));
    assert!(ts.contains("export function getAlternativesByName(schoolName: string)"));
    assert!(ts.contains("\"schoolName\": \"ابتدائية الثانية\""));

    let stats_json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(config.output_path(ExportFormat::Statistics)).unwrap(),
    )
    .unwrap();
    assert_eq!(stats_json["total_schools"], 4);
    assert_eq!(stats_json["coverage"]["with_alternatives"], 2);
    assert_eq!(stats_json["distance"]["samples"], 2);
}

#[test]
fn typescript_export_is_deterministic() {
    let dir = tempdir().unwrap();
    let loaded = load_schools(write_dataset(dir.path())).unwrap();
    let plan = PlanBuilder::new(&loaded.schools, MatchLimits::default()).build();

    let first = dir.path().join("a.ts");
    let second = dir.path().join("b.ts");
    school_plan::export::export_plan_typescript(&plan, &first).unwrap();
    school_plan::export::export_plan_typescript(&plan, &second).unwrap();
    assert_eq!(
        std::fs::read_to_string(first).unwrap(),
        std::fs::read_to_string(second).unwrap()
    );
}
