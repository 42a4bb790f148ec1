use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures of the planner's I/O collaborators. The matching core itself
/// cannot fail.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no `export const schoolsData = [...]` array found in {}", .path.display())]
    MissingSchoolsData { path: PathBuf },

    #[error("malformed school data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config file: {0}")]
    ConfigDecode(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("invalid match limits: {0}")]
    InvalidLimits(String),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PlanError {
    /// Attach `path` to an I/O failure raised while writing that file.
    ///
    /// Encoder errors that wrap an I/O failure are unwrapped too; everything
    /// else is returned unchanged.
    pub fn for_output(self, path: &Path) -> Self {
        let source = match self {
            PlanError::Io(source) => source,
            PlanError::Json(error) if error.is_io() => io::Error::from(error),
            PlanError::Csv(error) if error.is_io_error() => io::Error::from(error),
            other => return other,
        };
        PlanError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
