//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the export pipeline expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `url` types in any signature
//! - Failures are reported as `SharingPortError`, never transport errors

pub mod sharing;

pub use sharing::{SharingClientPort, SharingPortError, SharingPortResult};
