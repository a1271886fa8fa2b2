//! # awsup
//!
//! Declarative installer and lifecycle manager for the AWS CLI v2 on
//! Linux hosts.
//!
//! Given a desired state (`present`, `absent`, `update`) and a set of
//! location parameters, awsup probes the host, decides whether action is
//! required, and converges with the minimal set of operations: download
//! the vendor bundle, unpack it, run the bundled installer, normalize
//! permissions, or remove installed files. Every run reports whether a
//! change occurred and a human-readable message.
//!
//! ## Example
//!
//! ```no_run
//! use awsup::{DesiredState, Reconciler, Request};
//!
//! let request = Request::new(DesiredState::Present)
//!     .bin_dir("/usr/local/bin")
//!     .install_dir("/usr/local/aws-cli");
//!
//! let outcome = Reconciler::new().reconcile(&request);
//! println!("changed: {} ({})", outcome.changed, outcome.message);
//! ```
//!
//! ## Design
//!
//! The pipeline is probe → plan → apply. Probing is the only
//! side-effecting inspection and happens exactly once per run; the
//! planner is a pure function over the probe result, so dry-run
//! (`check_mode`) semantics are decided before any filesystem or network
//! call. Ephemeral staging directories are owned values deleted on every
//! exit path. Nothing is retried and nothing is rolled back: a failure
//! aborts the sequence and surfaces on the outcome record.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod install;
pub mod plan;
pub mod probe;
pub mod remove;
pub mod types;

pub use engine::{Reconciler, StagingArea};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher, MockFetcher};
pub use plan::plan;
pub use probe::probe;
pub use types::{DesiredState, HostProbe, Outcome, Plan, Request};
