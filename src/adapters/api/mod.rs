//! Target library-system API integration
//!
//! The API is session-based: one authentication call establishes the
//! session (a cookie held by the shared HTTP client), then one upsert call
//! is made per mapped record.

pub mod client;
pub mod response;

pub use client::{ApiClient, UpsertOutcome};
