//! Reconciliation engine.
//!
//! One run: validate the request, probe the host, derive a [`Plan`],
//! apply it, and report an [`Outcome`]. Inspection-only runs return
//! before any mutating component is reached; apply-mode failures abort
//! the sequence in place (no rollback) and surface on the outcome.

use crate::archive;
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::install;
use crate::plan::plan;
use crate::probe::probe;
use crate::remove;
use crate::types::{DesiredState, Outcome, Plan, Request};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Staging directory for the downloaded bundle and its extraction.
///
/// A caller-supplied directory is used as-is and never deleted. An
/// ephemeral directory is owned by this value and removed when it goes
/// out of scope, on every exit path of the install sequence.
pub enum StagingArea {
    /// Caller-supplied directory, left on disk afterwards.
    Provided(PathBuf),
    /// Process-owned temporary directory, deleted on drop.
    Ephemeral(TempDir),
}

impl StagingArea {
    /// Use `dir` when given, otherwise allocate an ephemeral directory.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
                Ok(Self::Provided(dir.to_path_buf()))
            }
            None => {
                let tmp = TempDir::new().map_err(|e| Error::io(std::env::temp_dir(), e))?;
                Ok(Self::Ephemeral(tmp))
            }
        }
    }

    /// Path of the staging directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Provided(path) => path,
            Self::Ephemeral(tmp) => tmp.path(),
        }
    }
}

/// Drives one reconciliation run end to end.
///
/// Holds the fetch primitive behind a trait so tests can run the whole
/// engine without network access:
///
/// ```
/// use awsup::{MockFetcher, Reconciler};
///
/// let fetcher = MockFetcher::new();
/// let reconciler = Reconciler::with_fetcher(Box::new(fetcher));
/// # let _ = reconciler;
/// ```
pub struct Reconciler {
    fetcher: Box<dyn Fetcher>,
}

impl Reconciler {
    /// Create a reconciler with the default HTTP fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fetcher: Box::new(HttpFetcher::new()),
        }
    }

    /// Create a reconciler with a custom fetcher (useful for testing).
    #[must_use]
    pub fn with_fetcher(fetcher: Box<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Converge the host to the requested state.
    ///
    /// Never panics and never returns `Err`: failures are reported on
    /// the outcome record so callers always get the diagnostics gathered
    /// up to the failure point.
    pub fn reconcile(&self, request: &Request) -> Outcome {
        let mut outcome = Outcome::default();

        if let Err(err) = request.validate() {
            outcome.fail(&err);
            return outcome;
        }

        let host = match probe(&request.bin_dir) {
            Ok(host) => host,
            Err(err) => {
                outcome.fail(&err);
                return outcome;
            }
        };

        match plan(request.state, host, request.apply_changes) {
            Plan::NoOp { message } => Outcome::unchanged(message),
            Plan::WouldChange => {
                let message = match request.state {
                    DesiredState::Present => "aws cli would be installed",
                    _ => "aws cli would be removed",
                };
                Outcome::changed(message)
            }
            Plan::Install => {
                // Mutation starts here: changed stays true even if a
                // later step fails.
                let mut outcome = Outcome::changed("aws cli installed successfully");
                if let Err(err) = self.install(request, &mut outcome) {
                    outcome.fail(&err);
                }
                outcome
            }
            Plan::Uninstall => {
                let mut outcome = Outcome::changed("aws cli removed");
                if let Err(err) = remove::uninstall(&request.bin_dir, &request.install_dir) {
                    outcome.fail(&err);
                }
                outcome
            }
        }
    }

    /// Install sequence: stage, fetch, extract, run the vendor
    /// installer, normalize permissions. Diagnostic paths are recorded
    /// on the outcome as soon as they exist so they survive failures.
    fn install(&self, request: &Request, outcome: &mut Outcome) -> Result<()> {
        let staging = StagingArea::resolve(request.download_dir.as_deref())?;

        let download_path = staging.path().join(&request.download_file_name);
        self.fetcher.fetch(&request.download_url, &download_path)?;
        outcome.download_path = Some(download_path.clone());

        let extracted = staging
            .path()
            .join(archive::archive_stem(&request.download_file_name));
        archive::extract(&download_path, &extracted)?;
        outcome.extracted_path = Some(extracted.clone());

        install::run_installer(&extracted, &request.bin_dir, &request.install_dir)

        // An ephemeral staging area is deleted when `staging` drops,
        // whether the sequence succeeded or not.
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
