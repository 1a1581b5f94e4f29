//! Network fetching for install artifacts.
//!
//! Downloads are one-shot per provisioning run (the Node.js setup script
//! and, when the package manager has no yq, the yq release binary), so
//! there is no caching layer.

use std::time::Duration;

use crate::error::{BerthError, Result};

/// Fetches install artifacts over HTTP.
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    /// Create a fetcher with the specified timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch a text resource (e.g. a setup script).
    pub fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.get(url)?;
        response.text().map_err(|e| BerthError::DownloadFailed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch a binary resource (e.g. a release asset).
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url)?;
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BerthError::DownloadFailed {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| BerthError::DownloadFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(BerthError::DownloadFailed {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        Ok(response)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn fetch_text_returns_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/setup.sh");
            then.status(200).body("#!/bin/bash\necho setup\n");
        });

        let fetcher = Fetcher::default();
        let body = fetcher.fetch_text(&server.url("/setup.sh")).unwrap();
        assert!(body.starts_with("#!/bin/bash"));
    }

    #[test]
    fn fetch_bytes_returns_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/yq_linux_amd64");
            then.status(200).body(&[0x7f, b'E', b'L', b'F']);
        });

        let fetcher = Fetcher::default();
        let bytes = fetcher.fetch_bytes(&server.url("/yq_linux_amd64")).unwrap();
        assert_eq!(bytes, vec![0x7f, b'E', b'L', b'F']);
    }

    #[test]
    fn http_error_status_is_download_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let fetcher = Fetcher::default();
        let err = fetcher.fetch_text(&server.url("/missing")).unwrap_err();
        assert!(matches!(err, BerthError::DownloadFailed { .. }));
        assert!(err.to_string().contains("404"));
    }
}
