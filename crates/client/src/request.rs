//! Canonical requests and the wire-request translator.
//!
//! The translator maps one canonical operator intent onto the concrete
//! (method, path, body) triple the active surface expects. It is pure:
//! no network I/O, no side effects, and required-field validation happens
//! here, before any call is issued.

use satgate_config::Surface;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::money::{major_to_minor, Money};
use crate::surface::SurfaceProfile;

/// HTTP method of a wire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A concrete request ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured base URL.
    pub path: String,
    /// JSON body, when the operation carries one.
    pub body: Option<Value>,
}

impl WireRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }
}

/// Route allowlist for a mint. The sentinel `*` and an empty list both
/// mean "all routes" on both surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteAllowlist {
    /// No route restriction.
    #[default]
    All,
    /// Restricted to the given path patterns, in order.
    Only(Vec<String>),
}

impl RouteAllowlist {
    /// Parse a comma-separated flag value. Blank entries are dropped;
    /// `""` and `"*"` normalize to [`RouteAllowlist::All`].
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "*" {
            return Self::All;
        }
        let routes: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
        if routes.is_empty() {
            Self::All
        } else {
            Self::Only(routes)
        }
    }

    /// Whether this grants all routes.
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Canonical mint request.
#[derive(Debug, Clone, Default)]
pub struct MintRequest {
    /// Agent name. Required, non-empty.
    pub agent: String,
    /// Budget ceiling in major units. Zero means unlimited.
    pub budget: Money,
    /// Budget currency code.
    pub currency: String,
    /// Expiry expression (e.g. `30d`, `24h`). Opaque to the client;
    /// empty means no expiry.
    pub expiry: String,
    /// Route allowlist.
    pub routes: RouteAllowlist,
    /// Parent token id for delegation (cloud surface only).
    pub parent_id: Option<String>,
}

/// Build the mint wire request for the active surface.
///
/// Gateway carries `budget`/`currency`/`expiry`/`routes` directly; cloud
/// converts the budget to integer credits under the profile's budget field
/// and nests routes under `scope.routes` (defaulting to `["*"]`).
///
/// # Errors
/// [`ApiError::InvalidRequest`] when the agent name is empty.
pub fn mint(profile: &SurfaceProfile, req: &MintRequest) -> Result<WireRequest, ApiError> {
    if req.agent.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "agent name is required".to_string(),
        ));
    }

    let mut body = Map::new();
    body.insert("name".to_string(), json!(req.agent));

    match profile.surface {
        Surface::Gateway => {
            if !req.budget.is_zero() {
                body.insert(
                    profile.budget_field.to_string(),
                    json!(req.budget.as_dollars()),
                );
                let currency = if req.currency.is_empty() {
                    "USD"
                } else {
                    &req.currency
                };
                body.insert("currency".to_string(), json!(currency));
            }
            if let RouteAllowlist::Only(routes) = &req.routes {
                body.insert("routes".to_string(), json!(routes));
            }
        }
        Surface::Cloud => {
            if !req.budget.is_zero() {
                body.insert(
                    profile.budget_field.to_string(),
                    json!(major_to_minor(req.budget.as_dollars(), profile.unit_scale)),
                );
            }
            let routes = match &req.routes {
                RouteAllowlist::All => vec!["*".to_string()],
                RouteAllowlist::Only(routes) => routes.clone(),
            };
            body.insert("scope".to_string(), json!({ "routes": routes }));
            if let Some(parent) = &req.parent_id {
                body.insert("parent_id".to_string(), json!(parent));
            }
        }
    }

    if !req.expiry.is_empty() {
        body.insert("expiry".to_string(), json!(req.expiry));
    }

    Ok(WireRequest {
        method: Method::Post,
        path: profile.mint_path().to_string(),
        body: Some(Value::Object(body)),
    })
}

/// Build the revoke wire request: DELETE on gateway, bodyless POST on
/// cloud.
///
/// # Errors
/// [`ApiError::InvalidRequest`] when the token id is empty.
pub fn revoke(profile: &SurfaceProfile, token_id: &str) -> Result<WireRequest, ApiError> {
    if token_id.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "token id is required".to_string(),
        ));
    }
    let method = match profile.surface {
        Surface::Gateway => Method::Delete,
        Surface::Cloud => Method::Post,
    };
    Ok(WireRequest {
        method,
        path: profile.revoke_path(token_id),
        body: None,
    })
}

/// Token detail request.
///
/// # Errors
/// [`ApiError::InvalidRequest`] when the token id is empty.
pub fn token_detail(profile: &SurfaceProfile, token_id: &str) -> Result<WireRequest, ApiError> {
    if token_id.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "token id is required".to_string(),
        ));
    }
    Ok(WireRequest::get(profile.token_detail_path(token_id)))
}

/// Token listing request.
pub fn list_tokens(profile: &SurfaceProfile) -> WireRequest {
    WireRequest::get(profile.list_tokens_path())
}

/// Spend query request.
pub fn spend(
    profile: &SurfaceProfile,
    agent: Option<&str>,
    period: Option<&str>,
) -> WireRequest {
    WireRequest::get(profile.spend_path(agent, period))
}

/// Route policy listing request.
///
/// # Errors
/// [`ApiError::InvalidRequest`] on the cloud surface, which has no route
/// listing.
pub fn routes(profile: &SurfaceProfile) -> Result<WireRequest, ApiError> {
    Ok(WireRequest::get(profile.routes_path()?))
}

/// Liveness request.
pub fn health(profile: &SurfaceProfile) -> WireRequest {
    WireRequest::get(profile.health_path())
}

/// Threat report request.
///
/// # Errors
/// [`ApiError::InvalidRequest`] on the cloud surface.
pub fn threat_report(profile: &SurfaceProfile) -> Result<WireRequest, ApiError> {
    Ok(WireRequest::get(profile.threats_path()?))
}
