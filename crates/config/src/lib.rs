//! Configuration loading for the SatGate CLI.
//!
//! Configuration is resolved from three layers, later layers winning:
//!
//! 1. YAML config file (default `~/.satgate/config.yaml`)
//! 2. `SATGATE_*` environment variables
//! 3. Surface auto-detection from the gateway URL
//!
//! The resolved [`Config`] is a plain value handed to client construction;
//! there is no process-global configuration state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No gateway URL configured.
    #[error("gateway URL not configured. Run 'satgate configure' or set SATGATE_GATEWAY")]
    MissingGateway,

    /// Cloud surface selected but no bearer token present.
    #[error("bearer token not configured for cloud surface. Set SATGATE_BEARER_TOKEN")]
    MissingBearerToken,

    /// Gateway surface selected but no admin token present.
    #[error("admin token not configured. Set SATGATE_ADMIN_TOKEN")]
    MissingAdminToken,

    /// Config file could not be written.
    #[error("cannot write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be serialized.
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Which backend dialect the CLI talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Self-hosted gateway admin API.
    Gateway,
    /// Multi-tenant cloud delegation API.
    Cloud,
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gateway => write!(f, "gateway"),
            Self::Cloud => write!(f, "cloud"),
        }
    }
}

/// On-disk representation of the config file.
///
/// Every field is optional so a partial file merges cleanly with
/// environment overrides and defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Surface override (`gateway` | `cloud`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    /// Gateway base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// Admin token (gateway surface).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
    /// Bearer token (cloud surface).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Tenant slug (cloud surface).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Output format (`table` | `json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Fully resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Active surface.
    pub surface: Surface,
    /// Gateway base URL.
    pub gateway: String,
    /// Admin token (gateway surface).
    pub admin_token: String,
    /// Bearer token (cloud surface).
    pub bearer_token: String,
    /// Tenant slug (cloud surface, may be empty).
    pub tenant: String,
    /// Output format.
    pub format: String,
}

/// Default gateway URL when nothing is configured.
pub const DEFAULT_GATEWAY: &str = "http://localhost:9090";

impl Config {
    /// Load configuration from the given file (or the default location),
    /// then apply environment overrides, auto-detection, and defaults.
    ///
    /// A missing or unreadable config file is not an error; the CLI can run
    /// entirely from environment variables.
    pub fn load(cfg_file: Option<&Path>) -> Self {
        let path = cfg_file
            .map(Path::to_path_buf)
            .or_else(Self::default_path);

        let file = path
            .as_deref()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|data| serde_yaml::from_str::<FileConfig>(&data).ok())
            .unwrap_or_default();

        if let Some(p) = &path {
            debug!(path = %p.display(), "Loaded config file");
        }

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Resolve a [`FileConfig`] plus an environment lookup into a final
    /// configuration. Split out from [`Config::load`] so the layering is
    /// testable without touching the process environment.
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |env_key: &str, file_val: Option<String>| {
            env(env_key).filter(|v| !v.is_empty()).or(file_val)
        };

        let surface_raw = pick("SATGATE_SURFACE", file.surface);
        let gateway = pick("SATGATE_GATEWAY", file.gateway)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GATEWAY.to_string());

        let surface = match surface_raw.as_deref() {
            Some("cloud") => Surface::Cloud,
            Some("gateway") => Surface::Gateway,
            _ => detect_surface(&gateway),
        };

        Self {
            surface,
            gateway,
            admin_token: pick("SATGATE_ADMIN_TOKEN", file.admin_token).unwrap_or_default(),
            bearer_token: pick("SATGATE_BEARER_TOKEN", file.bearer_token).unwrap_or_default(),
            tenant: pick("SATGATE_TENANT", file.tenant).unwrap_or_default(),
            format: pick("SATGATE_FORMAT", file.format)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "table".to_string()),
        }
    }

    /// Default config file location (`~/.satgate/config.yaml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".satgate").join("config.yaml"))
    }

    /// Auth header (key, value) appropriate to the active surface.
    pub fn auth_header(&self) -> (&'static str, String) {
        match self.surface {
            Surface::Cloud => ("Authorization", format!("Bearer {}", self.bearer_token)),
            Surface::Gateway => ("X-Admin-Token", self.admin_token.clone()),
        }
    }

    /// Check that required configuration is present for the active surface.
    ///
    /// # Errors
    /// Returns an error naming the missing value and how to set it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.is_empty() {
            return Err(ConfigError::MissingGateway);
        }
        match self.surface {
            Surface::Cloud if self.bearer_token.is_empty() => {
                Err(ConfigError::MissingBearerToken)
            }
            Surface::Gateway if self.admin_token.is_empty() => {
                Err(ConfigError::MissingAdminToken)
            }
            _ => Ok(()),
        }
    }
}

impl FileConfig {
    /// Write this config to the given path, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, data).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Auto-detect the surface from the gateway URL.
///
/// Hostnames carrying the cloud domain marker select the cloud surface;
/// everything else is assumed to be a self-hosted gateway.
fn detect_surface(gateway: &str) -> Surface {
    if gateway.contains("cloud.satgate.io") || gateway.contains("satgate.io/api") {
        Surface::Cloud
    } else {
        Surface::Gateway
    }
}
