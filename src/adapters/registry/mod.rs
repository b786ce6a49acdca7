//! Base Bibliotek feed integration
//!
//! The registry adapter covers both sides of the feed: downloading snapshot
//! files over HTTP ([`RegistryClient`]) and reading a local snapshot into
//! source records ([`Snapshot`]).

pub mod client;
pub mod snapshot;

pub use client::RegistryClient;
pub use snapshot::Snapshot;
