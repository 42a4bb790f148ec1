use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::error::{PlanError, Result};

/// Create (or truncate) `path`, creating missing parent directories.
pub(crate) fn create_output_file(path: impl AsRef<Path>) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let write_error = |source| PlanError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let file = File::create(path).map_err(write_error)?;
    Ok(BufWriter::new(file))
}

/// Create `path` and run `write` against it. I/O failures while writing are
/// reported against `path`.
pub(crate) fn write_output<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(BufWriter<File>) -> Result<T>,
{
    let file = create_output_file(path)?;
    write(file).map_err(|error| error.for_output(path))
}
