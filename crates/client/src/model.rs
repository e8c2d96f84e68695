//! Canonical model types.
//!
//! These are the surface-independent representations the rest of the
//! program renders. Monetary fields are always major units ([`Money`]);
//! raw credits never leave the normalization layer.

use crate::money::Money;

/// Token lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStatus {
    /// Token is live.
    Active,
    /// Token has been revoked.
    Revoked,
    /// Status string not recognized (or absent).
    #[default]
    Unknown,
}

impl TokenStatus {
    /// Parse a wire status string, degrading to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "revoked" => Self::Revoked,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked => write!(f, "revoked"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One capability token, normalized from either surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    /// Unique identifier within a listing.
    pub id: String,
    /// Display name (usually the agent name).
    pub name: String,
    /// Lifecycle status.
    pub status: TokenStatus,
    /// Amount consumed, major units.
    pub spent: Money,
    /// Budget ceiling, major units. Zero means unlimited.
    pub budget: Money,
    /// Opaque expiry timestamp; empty means no expiry.
    pub expires_at: String,
    /// Parent token id, for delegation lineage.
    pub parent_id: Option<String>,
    /// Delegated child tokens. Populated only while the source tree is
    /// being normalized; flattening clears it.
    pub children: Vec<Token>,
    /// Depth in the delegation tree (0 for roots and flat listings).
    pub depth: usize,
}

impl Token {
    /// Whether the token has no budget ceiling.
    pub const fn is_unlimited(&self) -> bool {
        self.budget.is_zero()
    }
}

/// Per-agent spend line in an org summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSpend {
    /// Agent name.
    pub name: String,
    /// Amount consumed.
    pub spent: Money,
    /// Budget ceiling. Zero means unlimited.
    pub budget: Money,
}

/// Org-wide spend summary (gateway surface shape).
#[derive(Debug, Clone, PartialEq)]
pub struct OrgSpend {
    /// Total budget allocated across agents.
    pub total_allocated: Money,
    /// Total consumed.
    pub total_consumed: Money,
    /// Per-agent breakdown.
    pub agents: Vec<AgentSpend>,
}

impl OrgSpend {
    /// Consumed as a percentage of allocated, when allocated is non-zero.
    pub fn utilization(&self) -> Option<f64> {
        if self.total_allocated.is_zero() {
            None
        } else {
            Some(self.total_consumed.as_dollars() / self.total_allocated.as_dollars() * 100.0)
        }
    }
}

/// One cost-center line in a rollup (cloud surface shape).
#[derive(Debug, Clone, PartialEq)]
pub struct CostCenterRollup {
    /// Cost center name.
    pub cost_center: String,
    /// Owning department.
    pub department: String,
    /// Amount consumed.
    pub consumed: Money,
    /// Amount allocated.
    pub allocated: Money,
    /// Utilization percent. Server-supplied value when present, otherwise
    /// recomputed from consumed/allocated.
    pub percent_used: f64,
}

/// Result of a spend query. The two variants are structurally distinct
/// shapes; the normalizer disambiguates by shape, not by surface tag.
#[derive(Debug, Clone, PartialEq)]
pub enum SpendReport {
    /// Flat org/per-agent summary.
    Org(OrgSpend),
    /// Cost-center rollup.
    CostCenters(Vec<CostCenterRollup>),
}

/// One route policy entry (gateway `/admin/routes`).
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Path pattern.
    pub path: String,
    /// Policy mode (observe, control, charge, public, ...).
    pub policy: String,
    /// Optional human name.
    pub name: String,
}

/// What came back from a successful mint.
///
/// Servers vary here: the token record may be nested under a `token` key,
/// and the secret macaroon may live under `macaroon_token`, `macaroon`, or
/// as a bare `token` string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintReceipt {
    /// New token id, when the server reported one.
    pub id: Option<String>,
    /// Reported status.
    pub status: Option<String>,
    /// Granted routes.
    pub routes: Vec<String>,
    /// Expiry timestamp.
    pub expires_at: Option<String>,
    /// The serialized macaroon. Shown once, never retrievable again.
    pub macaroon: Option<String>,
}

/// One threat category count.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatCategory {
    /// Category name.
    pub name: String,
    /// Blocked request count.
    pub count: i64,
}

/// One recent threat event.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatEvent {
    /// Event timestamp.
    pub time: String,
    /// Threat type.
    pub kind: String,
    /// Agent involved.
    pub agent: String,
    /// Route targeted.
    pub route: String,
    /// Action taken.
    pub action: String,
}

/// Threat report (gateway surface).
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatReport {
    /// Total blocked requests.
    pub total_blocked: i64,
    /// Per-category counts.
    pub categories: Vec<ThreatCategory>,
    /// Most recent events.
    pub recent: Vec<ThreatEvent>,
}
