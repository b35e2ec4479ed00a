//! CLI bootstrap - the composition root.
//!
//! This module is the only place where the sharing client is constructed.
//! Handlers receive either a ready `CliContext` or the `connect` function
//! to hand to the export runner.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use shareprobe_client::{DefaultSharingClient, SharingClientConfig};
use shareprobe_core::{
    CredentialSource, Credentials, ProfileFileSource, SharingClientPort, SharingPortResult,
};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Location of the sharing profile.
    pub profile_path: PathBuf,
    /// Timeout for sharing API calls.
    pub timeout: Duration,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            profile_path: cli.config.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }
}

/// Connected client for commands that talk to the endpoint directly.
pub struct CliContext {
    pub client: Arc<dyn SharingClientPort>,
}

/// Build the sharing client from loaded credentials.
pub fn connect(
    credentials: &Credentials,
    config: &CliConfig,
) -> SharingPortResult<Arc<dyn SharingClientPort>> {
    let client_config =
        SharingClientConfig::from_credentials(credentials).with_timeout(config.timeout);
    let client = DefaultSharingClient::new(&client_config)?;
    tracing::debug!(endpoint = client.base_url(), "Sharing client ready");
    Ok(Arc::new(client))
}

/// Load the profile and connect.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let credentials = ProfileFileSource
        .load(&config.profile_path)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let client = connect(&credentials, config).map_err(|e| match e {
        shareprobe_core::SharingPortError::Configuration { message } => CliError::Config(message),
        other => CliError::Unavailable(other.to_string()),
    })?;
    Ok(CliContext { client })
}
