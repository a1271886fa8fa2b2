//! Host state probing.
//!
//! The probe is the only side-effecting inspection in the pipeline: it
//! answers "is the tool installed?" once per run, and the planner works
//! from that answer alone.

use crate::error::{Error, Result};
use crate::types::HostProbe;
use std::io;
use std::path::Path;

/// File name of the managed binary.
pub const AWS_BINARY: &str = "aws";

/// File name of the companion shell-completion binary.
pub const AWS_COMPLETER: &str = "aws_completer";

/// Probe the host for the AWS CLI binary in `bin_dir`.
///
/// "Not found" means absent; any other filesystem error is a probe
/// failure, distinct from absence. The check follows symlinks: the
/// vendor installer links `bin_dir/aws` into the install tree, so a
/// dangling link (install tree deleted by hand) reads as absent and
/// `present` converges by reinstalling.
pub fn probe(bin_dir: &Path) -> Result<HostProbe> {
    let binary = bin_dir.join(AWS_BINARY);
    match binary.metadata() {
        Ok(_) => Ok(HostProbe { tool_present: true }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Ok(HostProbe { tool_present: false })
        }
        Err(err) => Err(Error::Probe {
            path: binary,
            source: err,
        }),
    }
}
