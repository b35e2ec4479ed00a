//! Port trait implementation for `SharingClient`.
//!
//! This module implements the core-owned `SharingClientPort` trait for
//! `SharingClient`, handling the conversion between wire types and core DTOs.

use async_trait::async_trait;
use shareprobe_core::{
    FileEntry, SchemaDescriptor, ShareDescriptor, SharingClientPort, SharingPortError,
    SharingPortResult, TableDescriptor,
};

use crate::client::SharingClient;
use crate::error::SharingError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `SharingError` to core `SharingPortError`.
fn map_error(err: SharingError) -> SharingPortError {
    match err {
        SharingError::ApiRequestFailed {
            status,
            url,
            message,
        } => match status {
            404 => SharingPortError::NotFound { resource: url },
            401 | 403 => SharingPortError::Unauthorized {
                message: message.unwrap_or_else(|| format!("status {status} for {url}")),
            },
            429 => SharingPortError::RateLimited,
            _ => SharingPortError::Network {
                message: SharingError::ApiRequestFailed {
                    status,
                    url,
                    message,
                }
                .to_string(),
            },
        },
        SharingError::InvalidResponse { message } => SharingPortError::InvalidResponse { message },
        SharingError::JsonParse(e) => SharingPortError::InvalidResponse {
            message: e.to_string(),
        },
        SharingError::Network(e) => SharingPortError::Network {
            message: e.to_string(),
        },
        e @ (SharingError::CannotBeABase { .. }
        | SharingError::InvalidHeader(_)
        | SharingError::InvalidUrl(_)) => SharingPortError::Configuration {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> SharingClientPort for SharingClient<B> {
    fn base_url(&self) -> &str {
        &self.endpoint_display
    }

    async fn list_shares(&self) -> SharingPortResult<Vec<ShareDescriptor>> {
        let shares = self.fetch_shares().await.map_err(map_error)?;
        Ok(shares
            .into_iter()
            .map(|s| ShareDescriptor::new(s.name))
            .collect())
    }

    async fn list_schemas(&self, share: &str) -> SharingPortResult<Vec<SchemaDescriptor>> {
        let schemas = self.fetch_schemas(share).await.map_err(map_error)?;
        Ok(schemas
            .into_iter()
            .map(|s| SchemaDescriptor::new(s.name))
            .collect())
    }

    async fn list_tables(
        &self,
        share: &str,
        schema: &str,
    ) -> SharingPortResult<Vec<TableDescriptor>> {
        let tables = self.fetch_tables(share, schema).await.map_err(map_error)?;
        Ok(tables
            .into_iter()
            .map(|t| TableDescriptor::new(share, schema, t.name))
            .collect())
    }

    async fn query_table_files(
        &self,
        table: &TableDescriptor,
    ) -> SharingPortResult<Vec<FileEntry>> {
        self.fetch_table_files(table).await.map_err(map_error)
    }
}
