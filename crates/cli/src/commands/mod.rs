//! CLI command implementations, one module per subcommand.

use std::path::PathBuf;

use anyhow::Result;
use satgate_client::api::ApiClient;
use satgate_config::Config;

pub mod configure;
pub mod mint;
pub mod mode;
pub mod ping;
pub mod report;
pub mod revoke;
pub mod spend;
pub mod status;
pub mod tokens;

/// Shared invocation context: resolved config plus the global flags.
pub struct Ctx {
    /// Resolved configuration.
    pub config: Config,
    /// Explicit `--config` path, when given.
    pub config_path: Option<PathBuf>,
    /// `--json`: print raw payloads instead of tables.
    pub json: bool,
    /// `--yes`: skip confirmation prompts.
    pub yes: bool,
    /// `--dry-run`: show the request without executing it.
    pub dry_run: bool,
}

impl Ctx {
    /// Build an API client for the resolved target.
    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::from_config(&self.config)?)
    }
}
