//! Header file writing.

use crate::error::CodegenError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `content` to `path` through a sibling temp file and a rename, so
/// readers never observe a partially written header.
///
/// The temp file gets a unique name in the target directory, so no
/// existing file is touched besides `path`. Missing parent directories are
/// created.
///
/// # Errors
/// Returns `CodegenError::Io` if a directory, the temp file or the rename
/// fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), CodegenError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Dropped on any error path, which removes the temp file.
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.persist(path).map_err(|err| err.error)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote header");
    Ok(())
}
