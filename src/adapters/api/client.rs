//! Target API client
//!
//! One client instance is built at startup and shared across the run. The
//! API is session-based, so the underlying HTTP client keeps a cookie
//! store: `authenticate` establishes the session and every `upsert` reuses
//! it.

use super::response;
use crate::config::{BibsyncConfig, SecretString};
use crate::domain::errors::ApiError;
use crate::domain::record::TargetRecord;
use crate::domain::result::Result;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::collections::BTreeMap;
use std::time::Duration;

/// Result of one upsert call
///
/// A failed upsert (the API answers with a non-"ok" status) is a normal
/// value of this type, never an error.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// Whether the API reported `status = ok`
    pub success: bool,

    /// The parsed response fields
    pub response: BTreeMap<String, String>,

    /// The HTTP status line of the response
    pub status_line: String,

    /// Human-readable per-record message
    pub message: String,
}

impl UpsertOutcome {
    /// Outcome for an upsert whose request never produced a parseable
    /// response (transport error, unparseable body). Reported like any
    /// other failure so the loop keeps going.
    pub fn request_failed(message: String) -> Self {
        Self {
            success: false,
            response: BTreeMap::new(),
            status_line: String::new(),
            message,
        }
    }
}

/// Client for the target library-system API
pub struct ApiClient {
    /// HTTP client with a cookie store for the API session
    client: Client,

    /// Base URL of the API, without trailing slash
    endpoint: String,

    /// User ID for the authentication endpoint
    userid: String,

    /// Password for the authentication endpoint
    password: SecretString,
}

impl ApiClient {
    /// Create a new API client from the loaded configuration
    pub fn new(config: &BibsyncConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .cookie_store(true)
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            userid: config.userid.clone(),
            password: config.password.clone(),
        })
    }

    /// Authenticate against the API, once, before any record is processed.
    ///
    /// Anything other than a parseable response with `status = ok` is fatal
    /// to the whole run.
    pub async fn authenticate(&self) -> Result<()> {
        let url = format!("{}/authentication", self.endpoint);

        tracing::debug!(url = %url, userid = %self.userid, "Authenticating against the target API");

        let form = [
            ("userid", self.userid.as_str()),
            ("password", self.password.expose_secret().as_ref()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let status_line = response.status().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        tracing::debug!(status = %status_line, body = %body, "Authentication response");

        let fields = parse_fields(&body)?;
        if response::status_is_ok(&fields) {
            tracing::info!(userid = %self.userid, "Authenticated against the target API");
            Ok(())
        } else {
            let status = fields.get("status").map(|s| s.trim()).unwrap_or_default();
            Err(ApiError::AuthenticationFailed(format!("{status_line} - {status}")).into())
        }
    }

    /// Upsert one mapped record.
    ///
    /// Returns an error only for connection-level failures (transport
    /// errors, unparseable bodies); a non-"ok" API status is a normal
    /// [`UpsertOutcome`] with `success = false`.
    pub async fn upsert(&self, record: &TargetRecord) -> Result<UpsertOutcome> {
        let url = format!("{}/upsert", self.endpoint);

        tracing::debug!(url = %url, record = ?record, "Upserting record");

        let response = self
            .client
            .post(&url)
            .form(record)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let status_line = response.status().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        tracing::debug!(status = %status_line, body = %body, "Upsert response");

        let fields = parse_fields(&body)?;
        let success = response::status_is_ok(&fields);
        let message = response::build_message(record, &status_line, &fields);

        Ok(UpsertOutcome {
            success,
            response: fields,
            status_line,
            message,
        })
    }
}

fn parse_fields(body: &str) -> Result<BTreeMap<String, String>> {
    Ok(response::parse_fields(body)?)
}
