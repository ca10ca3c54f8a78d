//! Output file writing

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CodegenError, Result};

/// Mode for every generated file, so the connector build can rewrite them
pub const OUTPUT_FILE_MODE: u32 = 0o666;

/// Write `contents` to `path`, creating parent directories
pub fn write_output_file(contents: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| CodegenError::io(path, e))?;
    set_output_permissions(path)?;
    debug!(file = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}

#[cfg(unix)]
fn set_output_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(OUTPUT_FILE_MODE))
        .map_err(|e| CodegenError::io(path, e))
}

#[cfg(not(unix))]
fn set_output_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
