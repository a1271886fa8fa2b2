//! Vendor installer invocation and permission normalization.
//!
//! The extracted bundle carries its own installer script at
//! `aws/install`; converging to `present` means marking it executable,
//! running it with the target directories, and normalizing the install
//! tree to mode 755 afterwards (the bundle ships some files without
//! group/other read bits).

use crate::error::{Error, Result};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;
use walkdir::WalkDir;

/// Path of the vendor installer inside the extracted bundle.
pub const INSTALLER_PATH: &str = "aws/install";

/// Run the vendor installer from `extracted` against `bin_dir` and
/// `install_dir`, then set `install_dir` contents to mode 755.
///
/// A non-zero installer exit aborts with `Error::Install` carrying the
/// captured stderr.
pub fn run_installer(extracted: &Path, bin_dir: &Path, install_dir: &Path) -> Result<()> {
    let installer = extracted.join(INSTALLER_PATH);
    make_executable(&installer)?;

    log::info!(
        "running {} --bin-dir {} --install-dir {}",
        installer.display(),
        bin_dir.display(),
        install_dir.display()
    );

    let output = Command::new(&installer)
        .arg("--bin-dir")
        .arg(bin_dir)
        .arg("--install-dir")
        .arg(install_dir)
        .output()
        .map_err(|e| Error::Install(format!("failed to execute {}: {}", installer.display(), e)))?;

    if !output.status.success() {
        return Err(Error::Install(format!(
            "installer exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    set_mode_recursive(install_dir, 0o755)
}

/// Mark a file executable (mode 755).
pub fn make_executable(path: &Path) -> Result<()> {
    set_mode(path, 0o755)
}

/// Recursively set every entry under `dir` (and `dir` itself) to `mode`.
pub fn set_mode_recursive(dir: &Path, mode: u32) -> Result<()> {
    for entry in WalkDir::new(dir) {
        let entry =
            entry.map_err(|e| Error::Install(format!("walking {}: {}", dir.display(), e)))?;
        set_mode(entry.path(), mode)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    let mut perms = fs::metadata(path)
        .map_err(|e| Error::Install(format!("stat {}: {}", path.display(), e)))?
        .permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)
        .map_err(|e| Error::Install(format!("chmod {}: {}", path.display(), e)))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
