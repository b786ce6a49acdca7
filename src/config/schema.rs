//! Configuration schema types
//!
//! This module defines the configuration and field-mapping structures for
//! bibsync. The configuration file is a flat TOML document; the mapping file
//! is a flat TOML table of `target-field = "source-field"` pairs.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

/// Main bibsync configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Loaded once at startup and immutable thereafter.
#[derive(Debug, Clone, Deserialize)]
pub struct BibsyncConfig {
    /// Username for the Base Bibliotek feed (HTTP basic auth)
    pub bbuser: String,

    /// Password for the Base Bibliotek feed
    /// Stored securely in memory and automatically zeroized on drop
    pub bbpass: SecretString,

    /// User ID sent to the target API's authentication endpoint
    pub userid: String,

    /// Password sent to the target API's authentication endpoint
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Directory where snapshot files are stored and read
    pub datadir: String,

    /// Base URL of the target API
    pub endpoint: String,

    /// Name of the field the target system matches incoming records on,
    /// merged into every upserted record as `matchfield`
    pub matchfield: String,

    /// Branch code merged into every upserted record as `branchcode`
    pub branchcode: String,

    /// Category code merged into every upserted record as `categorycode`
    pub categorycode: String,

    /// Base URL of the Base Bibliotek feed
    #[serde(default = "default_bburl")]
    pub bburl: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub loglevel: String,

    /// Directory for rotated JSON log files; file logging is disabled
    /// when unset
    #[serde(default)]
    pub logdir: Option<String>,
}

impl BibsyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.bbuser.is_empty() {
            return Err("bbuser cannot be empty".to_string());
        }

        if self.bbpass.expose_secret().is_empty() {
            return Err("bbpass cannot be empty".to_string());
        }

        if self.userid.is_empty() {
            return Err("userid cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("password cannot be empty".to_string());
        }

        if self.datadir.is_empty() {
            return Err("datadir cannot be empty".to_string());
        }

        validate_http_url("endpoint", &self.endpoint)?;
        validate_http_url("bburl", &self.bburl)?;

        if self.matchfield.is_empty() {
            return Err("matchfield cannot be empty".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.loglevel.as_str()) {
            return Err(format!(
                "Invalid loglevel '{}'. Must be one of: {}",
                self.loglevel,
                valid_levels.join(", ")
            ));
        }

        Ok(())
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{key} cannot be empty"));
    }

    let url = Url::parse(value).map_err(|e| format!("{key} is not a valid URL: {e}"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("{key} must start with http:// or https://"));
    }

    Ok(())
}

/// Field mapping table
///
/// Maps target field names to the source record fields they are filled
/// from. Loaded once, immutable, iterated in key order so upserted records
/// are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping(BTreeMap<String, String>);

impl FieldMapping {
    /// Create a mapping from target-field → source-field pairs
    pub fn new(pairs: BTreeMap<String, String>) -> Self {
        Self(pairs)
    }

    /// Iterate over (target field, source field) pairs in target-key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of mapped target fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no fields are mapped
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Default value functions
fn default_bburl() -> String {
    "https://www.nb.no/baser/bibliotek/eksport/biblev".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> BibsyncConfig {
        BibsyncConfig {
            bbuser: "feeduser".to_string(),
            bbpass: secret_string("feedpass".to_string()),
            userid: "apiuser".to_string(),
            password: secret_string("apipass".to_string()),
            datadir: "/var/lib/bibsync".to_string(),
            endpoint: "https://ils.example.org/api".to_string(),
            matchfield: "cardnumber".to_string(),
            branchcode: "MAIN".to_string(),
            categorycode: "B".to_string(),
            bburl: default_bburl(),
            loglevel: "info".to_string(),
            logdir: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let mut config = valid_config();
        config.bbuser = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.bbpass = secret_string(String::new());
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.userid = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.password = secret_string(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_datadir_rejected() {
        let mut config = valid_config();
        config.datadir = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.contains("datadir"));
    }

    #[test]
    fn test_endpoint_must_be_http_url() {
        let mut config = valid_config();
        config.endpoint = "ils.example.org/api".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "ftp://ils.example.org/api".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "http://ils.example.org/api".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_loglevel_rejected() {
        let mut config = valid_config();
        config.loglevel = "chatty".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("loglevel"));
    }

    #[test]
    fn test_empty_matchfield_rejected() {
        let mut config = valid_config();
        config.matchfield = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_field_mapping_iterates_in_key_order() {
        let mapping: FieldMapping = [
            ("surname".to_string(), "inst".to_string()),
            ("address1".to_string(), "padr".to_string()),
            ("city".to_string(), "ppoststed".to_string()),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["address1", "city", "surname"]);
    }

    #[test]
    fn test_field_mapping_empty() {
        let mapping = FieldMapping::default();
        assert!(mapping.is_empty());
        assert_eq!(mapping.len(), 0);
    }
}
