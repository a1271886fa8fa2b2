//! Uninstall helpers.
//!
//! Every removal is guarded by an existence check so that removing an
//! already-absent path is a no-op rather than an error. There is no
//! rollback: items removed before a failure stay removed.

use crate::error::{Error, Result};
use crate::probe::{AWS_BINARY, AWS_COMPLETER};
use std::fs;
use std::io;
use std::path::Path;

/// Remove the tool binary, its completion helper, and the install tree.
pub fn uninstall(bin_dir: &Path, install_dir: &Path) -> Result<()> {
    remove_file_if_exists(&bin_dir.join(AWS_BINARY))?;
    remove_file_if_exists(&bin_dir.join(AWS_COMPLETER))?;
    remove_dir_if_exists(install_dir)
}

/// Remove a file when present.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("removed {}", path.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Error::removal(path, err)),
    }
}

/// Recursively remove a directory when present.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            log::info!("removed {}", path.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Error::removal(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_uninstall_removes_everything() {
        let tmp = TempDir::new().unwrap();
        let bin_dir = tmp.path().join("bin");
        let install_dir = tmp.path().join("aws-cli");
        fs::create_dir_all(&bin_dir).unwrap();
        fs::create_dir_all(install_dir.join("v2/dist")).unwrap();
        fs::write(bin_dir.join(AWS_BINARY), b"fake").unwrap();
        fs::write(bin_dir.join(AWS_COMPLETER), b"fake").unwrap();
        fs::write(install_dir.join("v2/dist/aws"), b"fake").unwrap();

        uninstall(&bin_dir, &install_dir).unwrap();

        assert!(!bin_dir.join(AWS_BINARY).exists());
        assert!(!bin_dir.join(AWS_COMPLETER).exists());
        assert!(!install_dir.exists());
    }

    #[test]
    fn test_uninstall_tolerates_partial_state() {
        let tmp = TempDir::new().unwrap();
        let bin_dir = tmp.path().join("bin");
        let install_dir = tmp.path().join("aws-cli");
        fs::create_dir_all(&bin_dir).unwrap();
        // Only the binary exists; no completer, no install dir.
        fs::write(bin_dir.join(AWS_BINARY), b"fake").unwrap();

        uninstall(&bin_dir, &install_dir).unwrap();
        assert!(!bin_dir.join(AWS_BINARY).exists());
    }

    #[test]
    fn test_removals_are_idempotent() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("gone");
        remove_file_if_exists(&file).unwrap();
        remove_file_if_exists(&file).unwrap();

        let dir = tmp.path().join("gone-dir");
        remove_dir_if_exists(&dir).unwrap();
        remove_dir_if_exists(&dir).unwrap();
    }
}
