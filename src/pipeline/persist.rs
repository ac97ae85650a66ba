//! Atomic JSON artifact persistence.
//!
//! Artifacts are serialized into a temporary file in the destination
//! directory and renamed into place only after the whole document has
//! been written, so a crashed or failed stage never leaves a partial
//! artifact at the final path.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{LexigraphError, Result};

/// Serialize `value` as pretty-printed JSON and atomically move it to
/// `path`, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut file, value).map_err(|err| LexigraphError::Persist {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    file.write_all(b"\n")?;
    file.flush()?;
    file.persist(path).map_err(|err| LexigraphError::Persist {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(())
}

/// Read and parse a persisted artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|err| LexigraphError::Artifact {
        path: path.to_path_buf(),
        source: err,
    })
}
