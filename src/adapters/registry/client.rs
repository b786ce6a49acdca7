//! HTTP client for the Base Bibliotek feed
//!
//! The feed publishes snapshot files at `<bburl>/bb-<YYYY-MM-DD>.xml` (daily
//! diffs) and `<bburl>/bb-full.xml` (full dump), protected by HTTP basic
//! auth. Daily diffs are mirrored conditionally; the full dump is always
//! replaced.

use crate::config::{BibsyncConfig, SecretString};
use crate::domain::errors::RegistryError;
use crate::domain::result::Result;
use chrono::{DateTime, Utc};
use reqwest::header::IF_MODIFIED_SINCE;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Client for downloading snapshot files from the Base Bibliotek feed
pub struct RegistryClient {
    /// HTTP client for making requests
    client: Client,

    /// Base URL of the feed, without trailing slash
    base_url: String,

    /// Basic-auth username for the feed
    username: String,

    /// Basic-auth password for the feed
    password: SecretString,
}

impl RegistryClient {
    /// Create a new feed client from the loaded configuration
    pub fn new(config: &BibsyncConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RegistryError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.bburl.trim_end_matches('/').to_string(),
            username: config.bbuser.clone(),
            password: config.bbpass.clone(),
        })
    }

    /// Mirror a feed file to a local path.
    ///
    /// When a local copy exists, the request carries an `If-Modified-Since`
    /// header derived from its mtime and HTTP 304 leaves the copy
    /// untouched. HTTP 404 means the feed has no file under this name; for
    /// a daily diff that is an expected possibility, but it still aborts
    /// the run.
    pub async fn mirror(&self, file_name: &str, dest: &Path) -> Result<()> {
        self.fetch(file_name, dest, true).await
    }

    /// Download a feed file to a local path unconditionally, overwriting
    /// any existing copy. Used for the full dump.
    pub async fn replace(&self, file_name: &str, dest: &Path) -> Result<()> {
        self.fetch(file_name, dest, false).await
    }

    async fn fetch(&self, file_name: &str, dest: &Path, conditional: bool) -> Result<()> {
        let url = format!("{}/{}", self.base_url, file_name);

        let mut request = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(self.password.expose_secret()));

        if conditional {
            if let Some(header) = if_modified_since_header(dest).await {
                request = request.header(IF_MODIFIED_SINCE, header);
            }
        }

        tracing::debug!(url = %url, conditional = conditional, "Fetching snapshot");

        let response = request
            .send()
            .await
            .map_err(|e| RegistryError::ConnectionFailed(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_MODIFIED => {
                tracing::debug!(url = %url, "Snapshot unchanged, keeping local copy");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(RegistryError::SnapshotNotFound { url }.into()),
            status if status.is_success() => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| RegistryError::ConnectionFailed(e.to_string()))?;

                if let Some(parent) = dest.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| RegistryError::Io(e.to_string()))?;
                }

                tokio::fs::write(dest, &body)
                    .await
                    .map_err(|e| RegistryError::Io(e.to_string()))?;

                tracing::info!(
                    url = %url,
                    dest = %dest.display(),
                    bytes = body.len(),
                    "Snapshot downloaded"
                );
                Ok(())
            }
            status => Err(RegistryError::DownloadFailed {
                status: status.as_u16(),
                url,
            }
            .into()),
        }
    }
}

/// Build an `If-Modified-Since` value (IMF-fixdate) from a local file's
/// mtime, or `None` when the file does not exist.
async fn if_modified_since_header(dest: &Path) -> Option<String> {
    let metadata = tokio::fs::metadata(dest).await.ok()?;
    let modified = metadata.modified().ok()?;
    Some(format_http_date(modified))
}

fn format_http_date(when: SystemTime) -> String {
    let when: DateTime<Utc> = when.into();
    when.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_http_date() {
        // 2015-02-06 12:30:00 UTC
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_423_225_800);
        assert_eq!(format_http_date(when), "Fri, 06 Feb 2015 12:30:00 GMT");
    }

    #[tokio::test]
    async fn test_if_modified_since_absent_file() {
        let header = if_modified_since_header(Path::new("/nonexistent/bb.xml")).await;
        assert!(header.is_none());
    }
}
