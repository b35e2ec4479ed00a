//! Single-file transfer of a signed URL to local disk.
//!
//! Transfers are single-step and non-resumable. A failed transfer leaves
//! whatever was written in place for inspection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors from a single file transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The storage service answered with an error status.
    #[error("Download failed: HTTP {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL without its signature
        url: String,
    },

    /// The request or the response stream failed.
    #[error("Download from {url} failed: {source}")]
    Network {
        /// URL without its signature
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Writing the destination file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built.
    #[error("Failed to build download client: {0}")]
    Client(#[source] reqwest::Error),
}

impl TransferError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Moves the bytes behind a signed URL into a local file.
#[async_trait]
pub trait FileTransfer: Send + Sync {
    /// Download `url` into `destination`, returning the bytes written.
    ///
    /// The parent directory already exists when this is called.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, TransferError>;
}

/// Streams signed URLs to disk with reqwest.
///
/// Uses its own client with no `Authorization` header: signed URLs carry
/// their own credentials and storage services reject extra ones.
pub struct HttpFileTransfer {
    client: reqwest::Client,
}

impl HttpFileTransfer {
    pub fn new() -> Result<Self, TransferError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("shareprobe/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(TransferError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FileTransfer for HttpFileTransfer {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, TransferError> {
        let shown = unsigned(url);
        let network = |source| TransferError::Network {
            url: shown.clone(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        if !response.status().is_success() {
            return Err(TransferError::Status {
                status: response.status().as_u16(),
                url: shown.clone(),
            });
        }

        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| TransferError::io(destination, e))?;

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(network)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| TransferError::io(destination, e))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| TransferError::io(destination, e))?;

        tracing::debug!(
            url = %shown,
            path = %destination.display(),
            bytes = written,
            "Transfer complete"
        );
        Ok(written)
    }
}

/// Strip the query string, which holds the URL signature.
pub(crate) fn unsigned(url: &str) -> String {
    url.split_once('?')
        .map_or(url, |(base, _)| base)
        .to_string()
}
