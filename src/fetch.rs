//! Artifact fetching.
//!
//! The [`Fetcher`] trait abstracts the download primitive so the engine
//! can be exercised without network access. The real implementation is
//! [`HttpFetcher`]; tests use [`MockFetcher`], which also keeps a ledger
//! of every call so inspection-only runs can prove the network was never
//! touched.

use crate::error::{Error, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Fetches a remote resource to a local path.
pub trait Fetcher: Send + Sync {
    /// Stream the resource at `url` into `dest`.
    ///
    /// A single attempt, no retries. Returns the destination path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Fetch` on transport or HTTP-status failure and
    /// `Error::Io` if the destination cannot be written.
    fn fetch(&self, url: &str, dest: &Path) -> Result<PathBuf>;
}

/// Blocking HTTP fetcher backed by a ureq agent.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Create a fetcher with default agent settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<PathBuf> {
        log::debug!("downloading {} to {}", url, dest.display());

        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", "awsup")
            .call()
            .map_err(|err| match err {
                ureq::Error::StatusCode(code) => Error::Fetch {
                    url: url.to_string(),
                    message: "server returned an error status".to_string(),
                    status: Some(code),
                },
                other => Error::fetch(url, other.to_string()),
            })?;

        let mut file = File::create(dest).map_err(|e| Error::io(dest, e))?;
        let mut body = response.body_mut().as_reader();
        io::copy(&mut body, &mut file).map_err(|e| Error::io(dest, e))?;

        Ok(dest.to_path_buf())
    }
}

/// Mock fetcher for testing without network access.
///
/// Serves configured byte payloads per URL and records every fetch call.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    payloads: Arc<Mutex<std::collections::HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the bytes served for a URL.
    pub fn add_payload(&self, url: impl Into<String>, data: Vec<u8>) {
        let mut payloads = self.payloads.lock().unwrap();
        payloads.insert(url.into(), data);
    }

    /// All `(url, dest)` pairs fetched so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of fetch calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));

        let payloads = self.payloads.lock().unwrap();
        let data = payloads
            .get(url)
            .ok_or_else(|| Error::fetch(url, "mock payload not configured"))?;

        std::fs::write(dest, data).map_err(|e| Error::io(dest, e))?;
        Ok(dest.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mock_fetcher_writes_payload() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("cli.zip");

        let mock = MockFetcher::new();
        mock.add_payload("mock://cli.zip", vec![1, 2, 3]);

        let path = mock.fetch("mock://cli.zip", &dest).unwrap();
        assert_eq!(path, dest);
        assert_eq!(std::fs::read(&dest).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_mock_fetcher_records_calls() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("cli.zip");

        let mock = MockFetcher::new();
        mock.add_payload("mock://cli.zip", vec![0]);
        mock.fetch("mock://cli.zip", &dest).unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].0, "mock://cli.zip");
        assert_eq!(mock.calls()[0].1, dest);
    }

    #[test]
    fn test_mock_fetcher_unconfigured_url_fails() {
        let tmp = TempDir::new().unwrap();
        let mock = MockFetcher::new();

        let result = mock.fetch("mock://missing.zip", &tmp.path().join("out"));
        assert!(matches!(result, Err(Error::Fetch { .. })));
        // The failed attempt is still recorded.
        assert_eq!(mock.call_count(), 1);
    }
}
