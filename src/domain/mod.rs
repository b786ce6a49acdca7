//! Domain models and types for bibsync.
//!
//! This module contains the core domain types and business rules shared by
//! every layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Record types** ([`SourceRecord`], [`TargetRecord`])
//! - **Error types** ([`BibsyncError`], [`RegistryError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```rust
//! use bibsync::domain::{BibsyncError, Result};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     Ok(())
//! }
//! ```
//!
//! A failed upsert is deliberately NOT an error: the target API answering
//! with a non-"ok" status for one record is a normal, reportable outcome
//! that must not abort the run.

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types
pub use errors::{ApiError, BibsyncError, RegistryError};
pub use record::{SourceRecord, TargetRecord};
pub use result::Result;
