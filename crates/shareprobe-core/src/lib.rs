#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod credentials;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types for convenience
pub use credentials::{
    CredentialSource, Credentials, CredentialsError, DEFAULT_PROFILE_PATH, ProfileFileSource,
};
pub use domain::{
    FileEntry, Outcome, OutcomeStatus, RunSummary, SchemaDescriptor, ShareDescriptor,
    TableDescriptor, TableParseError,
};
pub use ports::{SharingClientPort, SharingPortError, SharingPortResult};
pub use utils::format_bytes;
