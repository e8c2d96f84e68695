//! High-level API client: one method per canonical operation.
//!
//! Each method runs the same pipeline: translate the canonical intent into
//! a wire request for the active surface, execute it, check the status
//! against the operation's accepted set, then normalize the payload.

use satgate_config::{Config, Surface};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::model::{MintReceipt, Route, SpendReport, ThreatReport, Token};
use crate::normalize::{self, Normalized};
use crate::request::{self, MintRequest, WireRequest};
use crate::surface::SurfaceProfile;
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Result of a read operation: the normalized value plus the raw payload
/// for `--json` passthrough.
#[derive(Debug)]
pub struct Fetched<T> {
    /// Verbatim response body.
    pub raw: String,
    /// Normalized result.
    pub result: Normalized<T>,
}

/// Client for one configured SatGate target.
pub struct ApiClient {
    transport: Box<dyn Transport>,
    profile: SurfaceProfile,
}

impl ApiClient {
    /// Build a client over an HTTP transport from resolved configuration.
    ///
    /// # Errors
    /// Returns an error when the configuration is incomplete for the
    /// selected surface.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Ok(Self::new(
            HttpTransport::from_config(config)?,
            SurfaceProfile::for_surface(config.surface),
        ))
    }

    /// Build a client over any transport. The seam exists for tests and
    /// alternative transports.
    pub fn new(transport: impl Transport + 'static, profile: SurfaceProfile) -> Self {
        Self {
            transport: Box::new(transport),
            profile,
        }
    }

    /// The active surface.
    pub const fn surface(&self) -> Surface {
        self.profile.surface
    }

    /// The active surface profile.
    pub const fn profile(&self) -> &SurfaceProfile {
        &self.profile
    }

    /// The configured target URL.
    pub fn target(&self) -> &str {
        self.transport.target()
    }

    /// Translate a mint without executing it, for dry-run display.
    ///
    /// # Errors
    /// [`ApiError::InvalidRequest`] when required fields are missing.
    pub fn mint_preview(&self, req: &MintRequest) -> Result<WireRequest, ApiError> {
        request::mint(&self.profile, req)
    }

    /// Mint a new capability token.
    ///
    /// # Errors
    /// [`ApiError::InvalidRequest`] before any network call when required
    /// fields are missing; [`ApiError::UnexpectedStatus`] on anything but
    /// 200/201.
    pub async fn mint(&self, req: &MintRequest) -> Result<Fetched<MintReceipt>, ApiError> {
        let wire = request::mint(&self.profile, req)?;
        let response = self.transport.execute(&wire).await?;
        accept(&response, &[200, 201])?;

        info!(agent = %req.agent, surface = %self.surface(), "Token minted");
        Ok(Fetched {
            raw: response.text(),
            result: normalize::mint_receipt(&response.body)?,
        })
    }

    /// Revoke a token. Irreversible.
    ///
    /// # Errors
    /// [`ApiError::NotFound`] on 404; [`ApiError::UnexpectedStatus`] on
    /// anything but 200/204.
    pub async fn revoke(&self, token_id: &str) -> Result<String, ApiError> {
        let wire = request::revoke(&self.profile, token_id)?;
        let response = self.transport.execute(&wire).await?;
        if response.status == 404 {
            return Err(ApiError::NotFound(token_id.to_string()));
        }
        accept(&response, &[200, 204])?;

        info!(token_id, surface = %self.surface(), "Token revoked");
        Ok(response.text())
    }

    /// Best-effort display name for a token: attempt the detail lookup,
    /// and on any failure fall back to the raw id. Used to enrich the
    /// revoke confirmation; a lookup failure must never block the revoke.
    pub async fn display_name(&self, token_id: &str) -> String {
        match self.token_detail(token_id).await {
            Ok(detail) => match detail.result {
                Normalized::Known(token) if !token.name.is_empty() => {
                    format!("{token_id} ({})", token.name)
                }
                _ => token_id.to_string(),
            },
            Err(err) => {
                warn!(token_id, error = %err, "Token detail lookup failed; using id");
                token_id.to_string()
            }
        }
    }

    /// Fetch one token's detail.
    ///
    /// # Errors
    /// [`ApiError::NotFound`] on 404; [`ApiError::UnexpectedStatus`] on
    /// other non-200 statuses.
    pub async fn token_detail(&self, token_id: &str) -> Result<Fetched<Token>, ApiError> {
        let wire = request::token_detail(&self.profile, token_id)?;
        let response = self.transport.execute(&wire).await?;
        if response.status == 404 {
            return Err(ApiError::NotFound(token_id.to_string()));
        }
        accept(&response, &[200])?;

        Ok(Fetched {
            raw: response.text(),
            result: normalize::token_detail(&response.body, &self.profile)?,
        })
    }

    /// List all tokens as a flat sequence, trees already flattened and
    /// credits already converted.
    ///
    /// # Errors
    /// [`ApiError::UnexpectedStatus`] on non-200;
    /// [`ApiError::MalformedResponse`] on a runaway delegation tree.
    pub async fn list_tokens(&self) -> Result<Fetched<Vec<Token>>, ApiError> {
        let wire = request::list_tokens(&self.profile);
        let response = self.transport.execute(&wire).await?;
        accept(&response, &[200])?;

        Ok(Fetched {
            raw: response.text(),
            result: normalize::token_list(&response.body, &self.profile)?,
        })
    }

    /// Query spend, optionally filtered by agent and period (gateway
    /// filters; the cloud rollup endpoint ignores them).
    ///
    /// # Errors
    /// [`ApiError::UnexpectedStatus`] on non-200.
    pub async fn spend(
        &self,
        agent: Option<&str>,
        period: Option<&str>,
    ) -> Result<Fetched<SpendReport>, ApiError> {
        let wire = request::spend(&self.profile, agent, period);
        let response = self.transport.execute(&wire).await?;
        accept(&response, &[200])?;

        Ok(Fetched {
            raw: response.text(),
            result: normalize::spend(&response.body, &self.profile)?,
        })
    }

    /// List route policies (gateway surface only).
    ///
    /// # Errors
    /// [`ApiError::InvalidRequest`] on the cloud surface;
    /// [`ApiError::UnexpectedStatus`] on non-200.
    pub async fn routes(&self) -> Result<Fetched<Vec<Route>>, ApiError> {
        let wire = request::routes(&self.profile)?;
        let response = self.transport.execute(&wire).await?;
        accept(&response, &[200])?;

        Ok(Fetched {
            raw: response.text(),
            result: normalize::routes(&response.body)?,
        })
    }

    /// Fetch the health payload along with its status code. Unlike the
    /// other reads, non-200 statuses are returned for display rather than
    /// treated as failures.
    ///
    /// # Errors
    /// [`ApiError::Transport`] when the target is unreachable.
    pub async fn health(&self) -> Result<(u16, Value), ApiError> {
        let wire = request::health(&self.profile);
        let response = self.transport.execute(&wire).await?;
        Ok((response.status, normalize::health(&response.body)))
    }

    /// Fetch the threat report (gateway surface only).
    ///
    /// # Errors
    /// [`ApiError::InvalidRequest`] on the cloud surface;
    /// [`ApiError::UnexpectedStatus`] on non-200.
    pub async fn threat_report(&self) -> Result<Fetched<ThreatReport>, ApiError> {
        let wire = request::threat_report(&self.profile)?;
        let response = self.transport.execute(&wire).await?;
        accept(&response, &[200])?;

        Ok(Fetched {
            raw: response.text(),
            result: normalize::threat_report(&response.body)?,
        })
    }
}

/// Check the response status against the operation's accepted set.
fn accept(response: &RawResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        Ok(())
    } else {
        Err(ApiError::UnexpectedStatus {
            status: response.status,
            body: response.text(),
        })
    }
}
