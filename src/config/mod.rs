//! Configuration management for bibsync.
//!
//! This module provides TOML-based loading, parsing, and validation for the
//! two declarative documents a run needs: the connection/credentials
//! configuration and the field-mapping table.
//!
//! # Overview
//!
//! Bibsync uses TOML files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Validation on load
//! - Credentials held in zeroizing [`SecretString`] containers
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bibsync::config::{load_config, load_mapping};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("bibsync.toml")?;
//! let mapping = load_mapping("mapping.toml")?;
//!
//! println!("Feed: {}", config.bburl);
//! println!("API endpoint: {}", config.endpoint);
//! println!("{} mapped fields", mapping.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! bbuser = "feeduser"
//! bbpass = "${BB_PASSWORD}"
//! userid = "bibsync"
//! password = "${API_PASSWORD}"
//! datadir = "/var/lib/bibsync"
//! endpoint = "https://ils.example.org/cgi-bin/koha/svc"
//! matchfield = "cardnumber"
//! branchcode = "MAIN"
//! categorycode = "B"
//! ```
//!
//! # Example Mapping
//!
//! ```toml
//! cardnumber = "bibnr"
//! surname = "inst"
//! address1 = "padr"
//! zipcode = "ppostnr"
//! city = "ppoststed"
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution:
//!
//! ```bash
//! export BB_PASSWORD="secret-password"
//! export API_PASSWORD="secret-password"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_mapping};
pub use schema::{BibsyncConfig, FieldMapping};
pub use secret::{secret_string, SecretString, SecretValue};
