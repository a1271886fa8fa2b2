//! Core types for AWS CLI reconciliation.

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Default download URL for the AWS CLI v2 Linux x86_64 bundle.
pub const DEFAULT_DOWNLOAD_URL: &str = "https://awscli.amazonaws.com/awscli-exe-linux-x86_64.zip";

/// Default file name for the downloaded bundle.
pub const DEFAULT_DOWNLOAD_FILE_NAME: &str = "awscli-exe-linux-x86_64.zip";

/// Default directory the `aws` binary is linked into.
pub const DEFAULT_BIN_DIR: &str = "/usr/local/bin";

/// Default directory the AWS CLI files are installed into.
pub const DEFAULT_INSTALL_DIR: &str = "/usr/local/aws-cli";

/// Desired state of the AWS CLI on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// The tool should be installed.
    Present,
    /// The tool should not be installed.
    Absent,
    /// Reserved: update to a newer version. Currently a deliberate no-op.
    Update,
}

/// Immutable reconciliation request.
///
/// Constructed once per invocation, consumed read-only by the engine.
/// Builder-style setters keep callers from spelling out every field:
///
/// ```
/// use awsup::{DesiredState, Request};
///
/// let request = Request::new(DesiredState::Present)
///     .bin_dir("/opt/bin")
///     .install_dir("/opt/aws-cli")
///     .check_mode(true);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    /// Desired state of the tool.
    pub state: DesiredState,
    /// URL to download the installer bundle from.
    pub download_url: String,
    /// Where to download the bundle. `None` means an ephemeral staging
    /// directory owned (and deleted) by the engine.
    pub download_dir: Option<PathBuf>,
    /// File name for the downloaded bundle inside the staging directory.
    pub download_file_name: String,
    /// Directory the `aws` binary lives in.
    pub bin_dir: PathBuf,
    /// Directory the AWS CLI files are installed into.
    pub install_dir: PathBuf,
    /// When `false`, inspection-only: report what would change without
    /// touching the host or the network.
    pub apply_changes: bool,
}

impl Request {
    /// Create a request with vendor defaults for everything but the state.
    #[must_use]
    pub fn new(state: DesiredState) -> Self {
        Self {
            state,
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            download_dir: None,
            download_file_name: DEFAULT_DOWNLOAD_FILE_NAME.to_string(),
            bin_dir: PathBuf::from(DEFAULT_BIN_DIR),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            apply_changes: true,
        }
    }

    /// Set the download URL.
    #[must_use]
    pub fn download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = url.into();
        self
    }

    /// Use a caller-supplied staging directory instead of an ephemeral one.
    #[must_use]
    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Set the downloaded bundle file name.
    #[must_use]
    pub fn download_file_name(mut self, name: impl Into<String>) -> Self {
        self.download_file_name = name.into();
        self
    }

    /// Set the bin directory.
    #[must_use]
    pub fn bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = dir.into();
        self
    }

    /// Set the install directory.
    #[must_use]
    pub fn install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    /// Enable or disable inspection-only mode.
    #[must_use]
    pub fn check_mode(mut self, check: bool) -> Self {
        self.apply_changes = !check;
        self
    }

    /// Validate the data-model invariants.
    ///
    /// Directories must be absolute and the download file name must be a
    /// single non-empty path component.
    pub fn validate(&self) -> Result<()> {
        if self.download_url.is_empty() {
            return Err(Error::InvalidRequest("download_url is empty".to_string()));
        }
        if !is_plain_file_name(&self.download_file_name) {
            return Err(Error::InvalidRequest(format!(
                "download_file_name must be a plain file name, got '{}'",
                self.download_file_name
            )));
        }
        require_absolute("bin_dir", &self.bin_dir)?;
        require_absolute("install_dir", &self.install_dir)?;
        if let Some(dir) = &self.download_dir {
            require_absolute("download_dir", dir)?;
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn require_absolute(field: &str, path: &Path) -> Result<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "{} must be an absolute path, got '{}'",
            field,
            path.display()
        )))
    }
}

/// Result of probing the host for the managed tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProbe {
    /// Whether the `aws` binary exists in the requested bin directory.
    pub tool_present: bool,
}

/// Action decided by the planner for a single reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Host already matches the desired state.
    NoOp {
        /// Outcome message to report.
        message: String,
    },
    /// A change is required but the run is inspection-only.
    WouldChange,
    /// Run the install sequence.
    Install,
    /// Run the uninstall sequence.
    Uninstall,
}

/// Outcome record of a reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outcome {
    /// Whether host state was (or would be) mutated.
    pub changed: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Where the bundle was downloaded, when a download happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_path: Option<PathBuf>,
    /// Where the bundle was extracted, when an extraction happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_path: Option<PathBuf>,
    /// Error description, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    /// Successful outcome that made no changes.
    #[must_use]
    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Successful outcome that changed (or would change) host state.
    #[must_use]
    pub fn changed(message: impl Into<String>) -> Self {
        Self {
            changed: true,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Whether the run failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Record a failure on this outcome, preserving `changed` and any
    /// diagnostic paths gathered before the error.
    pub fn fail(&mut self, error: &Error) {
        self.message = format!("An error occurred: {}", error);
        self.error = Some(error.to_string());
    }
}
