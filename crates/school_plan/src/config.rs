//! Planner configuration, stored as TOML.
//!
//! Every field has a default, so a partial file is valid. Command-line flags
//! are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use school_core::matching::MatchLimits;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Output formats the planner can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    TypeScript,
    Statistics,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::TypeScript,
        ExportFormat::Statistics,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub formats: Vec<ExportFormat>,
    pub json_file: String,
    pub csv_file: String,
    pub typescript_file: String,
    pub statistics_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: vec![ExportFormat::Json, ExportFormat::Csv],
            json_file: "mutual_operation_plan.json".to_string(),
            csv_file: "mutual_operation_plan.csv".to_string(),
            typescript_file: "mutualOperation.ts".to_string(),
            statistics_file: "mutual_operation_statistics.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// School dataset: a JSON array or a TypeScript module exporting `schoolsData`.
    pub input: PathBuf,
    pub output_directory: PathBuf,
    /// Worker threads for plan building. `None` uses one per core.
    pub threads: Option<usize>,
    /// Schools shown in the sample report.
    pub sample_size: usize,
    pub limits: MatchLimits,
    pub exports: ExportConfig,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("src/data/schools.ts"),
            output_directory: PathBuf::from("output"),
            threads: None,
            sample_size: 5,
            limits: MatchLimits::default(),
            exports: ExportConfig::default(),
        }
    }
}

impl PlanConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PlanConfig = toml::from_str(&content)?;
        validate_limits(&config.limits)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| PlanError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Where the given format is written.
    pub fn output_path(&self, format: ExportFormat) -> PathBuf {
        let file = match format {
            ExportFormat::Json => &self.exports.json_file,
            ExportFormat::Csv => &self.exports.csv_file,
            ExportFormat::TypeScript => &self.exports.typescript_file,
            ExportFormat::Statistics => &self.exports.statistics_file,
        };
        self.output_directory.join(file)
    }
}

/// Reject limits the matcher cannot interpret.
pub fn validate_limits(limits: &MatchLimits) -> Result<()> {
    if !limits.max_distance_km.is_finite() || limits.max_distance_km < 0.0 {
        return Err(PlanError::InvalidLimits(format!(
            "max_distance_km must be a finite, non-negative number of kilometers (got {})",
            limits.max_distance_km
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_the_planner_defaults() {
        let config = PlanConfig::default();
        assert_eq!(config.limits, MatchLimits::new(10.0, 3));
        assert_eq!(config.sample_size, 5);
        assert_eq!(
            config.output_path(ExportFormat::Csv),
            PathBuf::from("output/mutual_operation_plan.csv")
        );
    }

    #[test]
    fn round_trips_through_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let mut config = PlanConfig::default();
        config.threads = Some(2);
        config.limits = MatchLimits::new(7.5, 2);
        config.exports.formats = ExportFormat::ALL.to_vec();

        config.save_to_file(&path).unwrap();
        let loaded = PlanConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_takes_defaults() {
        let config: PlanConfig = toml::from_str(
            r#"
            input = "schools.json"

            [limits]
            max_alternatives = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("schools.json"));
        assert_eq!(config.limits.max_alternatives, 5);
        assert_eq!(config.limits.max_distance_km, 10.0);
        assert_eq!(config.exports, ExportConfig::default());
    }

    #[test]
    fn rejects_negative_distance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, "[limits]\nmax_distance_km = -1.0\n").unwrap();
        let err = PlanConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLimits(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PlanConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
