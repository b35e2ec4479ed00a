//! Fatal export errors.
//!
//! Anything here aborts a run. Per-table failures never surface as an
//! `ExportError`; they become `Outcome`s instead.

use shareprobe_core::{CredentialsError, SharingPortError, TableDescriptor};
use thiserror::Error;

/// Errors that abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The sharing profile could not be loaded.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// The sharing client could not be constructed.
    #[error("Failed to connect to sharing endpoint: {0}")]
    Connect(#[source] SharingPortError),

    /// Listing shares, schemas or tables failed.
    #[error("Discovery failed while listing {scope}: {source}")]
    Discovery {
        /// What was being listed
        scope: String,
        #[source]
        source: SharingPortError,
    },

    /// The run was cancelled before discovery finished.
    #[error("Export cancelled")]
    Cancelled,

    /// The requested table is not exposed by the endpoint.
    #[error("Table '{table}' was not found on the sharing endpoint")]
    TableNotFound {
        /// The table that was looked up
        table: TableDescriptor,
    },

    /// The file query for a single looked-up table failed.
    #[error("Failed to query files for '{table}': {source}")]
    Query {
        /// The table that was queried
        table: TableDescriptor,
        #[source]
        source: SharingPortError,
    },

    /// The looked-up table has no files.
    #[error("Table '{table}' has no files")]
    NoFiles {
        /// The table that was queried
        table: TableDescriptor,
    },
}

impl ExportError {
    pub(crate) fn discovery(scope: impl Into<String>, source: SharingPortError) -> Self {
        Self::Discovery {
            scope: scope.into(),
            source,
        }
    }

    /// Whether the profile itself has to be fixed, including a token the
    /// endpoint rejects.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Credentials(_)
                | Self::Connect(SharingPortError::Configuration { .. })
                | Self::Discovery {
                    source: SharingPortError::Unauthorized { .. },
                    ..
                }
        )
    }
}
