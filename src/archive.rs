//! Zip archive extraction.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::result::ZipError;

/// Unpack `archive` fully into `dest_dir`, creating it if absent.
///
/// Returns `dest_dir`. A malformed archive maps to `Error::Extract`,
/// write failures to `Error::Io`.
pub fn extract(archive: &Path, dest_dir: &Path) -> Result<PathBuf> {
    log::debug!("extracting {} to {}", archive.display(), dest_dir.display());

    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let mut zip = zip::ZipArchive::new(file).map_err(map_zip_error)?;

    std::fs::create_dir_all(dest_dir).map_err(|e| Error::io(dest_dir, e))?;
    zip.extract(dest_dir).map_err(map_zip_error)?;

    Ok(dest_dir.to_path_buf())
}

/// Directory name the archive is extracted into: the archive file name
/// without its final extension ("awscli-exe-linux-x86_64.zip" becomes
/// "awscli-exe-linux-x86_64").
#[must_use]
pub fn archive_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().into_owned())
}

fn map_zip_error(err: ZipError) -> Error {
    match err {
        ZipError::Io(io_err) => Error::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => Error::Extract(other.to_string()),
    }
}
