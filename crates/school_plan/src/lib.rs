//! Loading, parallel building, export and reporting around the
//! alternative-school matcher in `school_core`.
//!
//! # Architecture
//!
//! - [`config`]: TOML planner configuration
//! - [`source`]: reading the school dataset (JSON or TypeScript module)
//! - [`runner`]: building plans on a rayon thread pool
//! - [`export`]: JSON, CSV, TypeScript and statistics output
//! - [`report`]: text reports for the terminal
//! - [`error`]: the [`PlanError`] type shared by all of the above

pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod runner;
pub mod source;

pub use config::{ExportConfig, ExportFormat, PlanConfig};
pub use error::{PlanError, Result};
pub use runner::{run_plan, RunOptions};
pub use source::{load_schools, LoadSummary, LoadedSchools};
