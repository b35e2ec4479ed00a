//! Delta Sharing client port definitions.
//!
//! This module defines the port trait and error type for talking to a
//! sharing server. The actual implementation lives in `shareprobe-client`.

mod client;
mod error;

pub use client::SharingClientPort;
pub use error::{SharingPortError, SharingPortResult};
