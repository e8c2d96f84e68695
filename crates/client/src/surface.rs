//! Surface profiles.
//!
//! A profile is a pure data description of one backend dialect: where each
//! canonical operation lives, which unit system monetary values use, and
//! what the budget field is called in request bodies. There are exactly two
//! profiles, selected once per invocation from configuration.

use satgate_config::Surface;

use crate::error::ApiError;

/// Immutable description of one backend dialect.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceProfile {
    /// Which dialect this is.
    pub surface: Surface,
    /// Monetary unit scale: 1 = values are already major units (dollars),
    /// 100 = integer minor-unit credits needing division.
    pub unit_scale: i64,
    /// Request body field name for the budget ceiling.
    pub budget_field: &'static str,
}

impl SurfaceProfile {
    /// The profile for a surface.
    pub const fn for_surface(surface: Surface) -> Self {
        match surface {
            Surface::Gateway => Self {
                surface,
                unit_scale: 1,
                budget_field: "budget",
            },
            Surface::Cloud => Self {
                surface,
                unit_scale: 100,
                budget_field: "budget_limit_credits",
            },
        }
    }

    /// Mint endpoint.
    pub const fn mint_path(&self) -> &'static str {
        match self.surface {
            Surface::Gateway => "/admin/tokens/mint",
            Surface::Cloud => "/cloud/delegation-v2/delegate",
        }
    }

    /// Revoke endpoint for a token.
    pub fn revoke_path(&self, token_id: &str) -> String {
        match self.surface {
            Surface::Gateway => format!("/admin/tokens/{token_id}/revoke"),
            Surface::Cloud => format!("/cloud/delegation-v2/revoke/{token_id}"),
        }
    }

    /// Token detail endpoint.
    pub fn token_detail_path(&self, token_id: &str) -> String {
        match self.surface {
            Surface::Gateway => format!("/admin/tokens/{token_id}"),
            Surface::Cloud => format!("/cloud/delegation-v2/token/{token_id}"),
        }
    }

    /// Token listing endpoint. The cloud surface returns a delegation tree
    /// here; the gateway returns a flat list.
    pub const fn list_tokens_path(&self) -> &'static str {
        match self.surface {
            Surface::Gateway => "/admin/tokens",
            Surface::Cloud => "/cloud/delegation-v2/tree",
        }
    }

    /// Spend endpoint, with optional agent/period filters (gateway only;
    /// the cloud rollup endpoint takes no filters).
    pub fn spend_path(&self, agent: Option<&str>, period: Option<&str>) -> String {
        match self.surface {
            Surface::Cloud => "/cloud/delegation-v2/cost-rollups".to_string(),
            Surface::Gateway => {
                let mut path = String::from("/admin/spend");
                let mut sep = '?';
                if let Some(agent) = agent {
                    path.push(sep);
                    path.push_str("agent=");
                    path.push_str(agent);
                    sep = '&';
                }
                if let Some(period) = period {
                    path.push(sep);
                    path.push_str("period=");
                    path.push_str(period);
                }
                path
            }
        }
    }

    /// Route policy listing endpoint. Not available on the cloud surface.
    pub fn routes_path(&self) -> Result<&'static str, ApiError> {
        match self.surface {
            Surface::Gateway => Ok("/admin/routes"),
            Surface::Cloud => Err(ApiError::InvalidRequest(
                "route listing is not available on the cloud surface".to_string(),
            )),
        }
    }

    /// Liveness endpoint.
    pub const fn health_path(&self) -> &'static str {
        match self.surface {
            Surface::Gateway => "/admin/ping",
            Surface::Cloud => "/healthz",
        }
    }

    /// Threat report endpoint. Not available on the cloud surface.
    pub fn threats_path(&self) -> Result<&'static str, ApiError> {
        match self.surface {
            Surface::Gateway => Ok("/admin/reports/threats"),
            Surface::Cloud => Err(ApiError::InvalidRequest(
                "threat reports are not available on the cloud surface".to_string(),
            )),
        }
    }
}
