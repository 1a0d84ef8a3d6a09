use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::config;

/// Returns `input` with [`config::OUTPUT_SUFFIX`] appended to its file name.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(config::OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Replaces `path` with `contents` without ever exposing a partially written file.
///
/// The data goes to a temporary file in the same directory, which is then renamed over `path`. On
/// failure the temporary file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    debug!("staging output in {}", file.path().display());

    file.write_all(contents)
        .context("failed to write temporary file")?;
    file.as_file()
        .sync_all()
        .context("failed to flush temporary file")?;

    file.persist(path)
        .with_context(|| format!("failed to move output into place at {}", path.display()))?;

    info!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Sets the output file's mode to [`config::OUTPUT_MODE`].
#[cfg(unix)]
pub fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(config::OUTPUT_MODE))
        .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    info!("set mode {:o} on {}", config::OUTPUT_MODE, path.display());
    Ok(())
}

#[cfg(not(unix))]
pub fn mark_executable(path: &Path) -> Result<()> {
    // Only the read-only bit is portable; nothing to do for executability.
    fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
    debug!("no executable bit on this platform, leaving {} as is", path.display());
    Ok(())
}
