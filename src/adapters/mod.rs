//! External system integrations for bibsync.
//!
//! This module provides adapters for the two remote systems a run talks to:
//!
//! - [`registry`] - Base Bibliotek feed (snapshot download and parsing)
//! - [`api`] - Target library-system API (authentication and upserts)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies: HTTP and XML details stay in
//! this layer, and the core sync loop sees only domain types. Each client
//! is constructed once at startup from the loaded configuration and passed
//! by reference into the run; there is no ambient or static state.
//!
//! ```rust,no_run
//! use bibsync::adapters::api::ApiClient;
//! use bibsync::adapters::registry::RegistryClient;
//! use bibsync::config::load_config;
//!
//! # async fn example() -> bibsync::domain::Result<()> {
//! let config = load_config("bibsync.toml")?;
//!
//! let registry = RegistryClient::new(&config)?;
//! let api = ApiClient::new(&config)?;
//! api.authenticate().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod registry;
