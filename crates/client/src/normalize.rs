//! Response normalization.
//!
//! The two surfaces return the "same" entities under different envelope
//! keys, field spellings, and unit systems, and permissive JSON decoding
//! zero-fills absent fields instead of erroring. Parsing successfully is
//! therefore not evidence that a shape matched: every candidate shape has a
//! validity predicate, and candidates are tried in a fixed precedence order
//! (wrapped envelope first, then the bare top-level value). When nothing
//! validates, the raw payload is handed back for verbatim display so the
//! CLI always shows *something* instead of failing on a schema it does not
//! recognize.
//!
//! Unit conversion happens here, exactly once: canonical values leave this
//! module in major units regardless of origin surface.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::model::{
    AgentSpend, CostCenterRollup, MintReceipt, OrgSpend, Route, SpendReport, ThreatCategory,
    ThreatEvent, ThreatReport, Token, TokenStatus,
};
use crate::money::Money;
use crate::surface::SurfaceProfile;
use crate::tree;

/// Outcome of normalization: a value decoded from a recognized shape, or
/// the raw payload for verbatim display.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    /// A known shape matched and passed its validity predicate.
    Known(T),
    /// No known shape validated; render this verbatim.
    Unrecognized(Value),
}

impl<T> Normalized<T> {
    /// The decoded value, if a shape matched.
    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unrecognized(_) => None,
        }
    }

    /// Whether a known shape matched.
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Parse raw bytes into a JSON value. Empty bodies (204 responses) parse
/// as null.
fn parse(data: &[u8]) -> Result<Value, ApiError> {
    if data.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(data)
        .map_err(|e| ApiError::MalformedResponse(format!("response is not JSON: {e}")))
}

/// Try candidate decoders in precedence order; the first whose result
/// passes its validity predicate wins. Candidates must return `None` both
/// on decode failure and on semantically empty decodes.
fn decode_first<T>(value: Value, candidates: &[&dyn Fn(&Value) -> Option<T>]) -> Normalized<T> {
    for candidate in candidates {
        if let Some(decoded) = candidate(&value) {
            return Normalized::Known(decoded);
        }
    }
    debug!("no known response shape validated");
    Normalized::Unrecognized(value)
}

/// Pretty-print a JSON value for verbatim display.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Whether an unrecognized payload is just an empty listing: `[]`, or an
/// object whose `key` entry is an empty array. Lets callers render "none
/// configured" instead of dumping raw JSON for the legitimate-empty case.
pub fn is_empty_listing(value: &Value, key: &str) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => matches!(map.get(key), Some(Value::Array(items)) if items.is_empty()),
        _ => false,
    }
}

/// Whether an unrecognized token payload is a legitimately empty listing
/// under either surface's envelope key (`tokens` or `tree`) or as a bare
/// array.
pub fn is_empty_token_listing(value: &Value) -> bool {
    is_empty_listing(value, "tokens") || is_empty_listing(value, "tree")
}

// ============================================================================
// Tokens
// ============================================================================

/// Wire shape of a token on either surface. Cloud trees spell the
/// monetary fields in credits under their own names; aliases fold both
/// spellings into one struct and the profile's unit scale sorts out the
/// units afterwards.
#[derive(Debug, Default, Deserialize)]
struct WireToken {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default, alias = "spent_credits")]
    spent: f64,
    #[serde(default, alias = "budget_limit_credits")]
    budget: f64,
    #[serde(default)]
    expires_at: String,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    children: Vec<WireToken>,
}

fn canonical_token(wire: WireToken, scale: i64) -> Token {
    Token {
        id: wire.id,
        name: wire.name,
        status: TokenStatus::parse(&wire.status),
        spent: Money::from_wire(wire.spent, scale),
        budget: Money::from_wire(wire.budget, scale),
        expires_at: wire.expires_at,
        parent_id: wire.parent_id,
        children: wire
            .children
            .into_iter()
            .map(|child| canonical_token(child, scale))
            .collect(),
        depth: 0,
    }
}

/// Decode a token sequence. Valid only when non-empty and every token
/// carries an identifier; a zero-filled decode of some unrelated array is
/// rejected here.
fn tokens_from(value: &Value, scale: i64) -> Option<Vec<Token>> {
    let wires: Vec<WireToken> = serde_json::from_value(value.clone()).ok()?;
    let tokens: Vec<Token> = wires
        .into_iter()
        .map(|wire| canonical_token(wire, scale))
        .collect();
    let valid = !tokens.is_empty() && tokens.iter().all(|t| !t.id.is_empty());
    valid.then_some(tokens)
}

/// Decode a single token record. Valid when it carries an id or a name.
fn token_from(value: &Value, scale: i64) -> Option<Token> {
    if !value.is_object() {
        return None;
    }
    let wire: WireToken = serde_json::from_value(value.clone()).ok()?;
    let token = canonical_token(wire, scale);
    (!token.id.is_empty() || !token.name.is_empty()).then_some(token)
}

/// Normalize a token listing from either surface into a flat pre-order
/// sequence with unit conversion applied.
///
/// Shape precedence: `{"tokens": [...]}` → `{"tree": [...]}` → bare array.
///
/// # Errors
/// [`ApiError::MalformedResponse`] on a non-JSON body or a delegation tree
/// past the node bound.
pub fn token_list(
    data: &[u8],
    profile: &SurfaceProfile,
) -> Result<Normalized<Vec<Token>>, ApiError> {
    let scale = profile.unit_scale;
    let value = parse(data)?;
    let decoded = decode_first(
        value,
        &[
            &|v: &Value| v.get("tokens").and_then(|t| tokens_from(t, scale)),
            &|v: &Value| v.get("tree").and_then(|t| tokens_from(t, scale)),
            &|v: &Value| tokens_from(v, scale),
        ],
    );
    match decoded {
        Normalized::Known(roots) => Ok(Normalized::Known(tree::flatten(roots)?)),
        other => Ok(other),
    }
}

/// Normalize a token detail response.
///
/// Shape precedence: `{"token": {...}}` → bare object.
///
/// # Errors
/// [`ApiError::MalformedResponse`] on a non-JSON body.
pub fn token_detail(data: &[u8], profile: &SurfaceProfile) -> Result<Normalized<Token>, ApiError> {
    let scale = profile.unit_scale;
    let value = parse(data)?;
    Ok(decode_first(
        value,
        &[
            &|v: &Value| v.get("token").and_then(|t| token_from(t, scale)),
            &|v: &Value| token_from(v, scale),
        ],
    ))
}

// ============================================================================
// Spend
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct WireAgentSpend {
    #[serde(default)]
    name: String,
    #[serde(default)]
    spent: f64,
    #[serde(default)]
    budget: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WireOrgSpend {
    #[serde(default)]
    total_allocated: f64,
    #[serde(default)]
    total_consumed: f64,
    #[serde(default)]
    agents: Vec<WireAgentSpend>,
}

/// Cloud rollups spell their fields in camelCase; snake_case aliases keep
/// older payloads decoding.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRollup {
    #[serde(default, alias = "cost_center")]
    cost_center: String,
    #[serde(default)]
    department: String,
    #[serde(default, alias = "total_consumed")]
    total_consumed: f64,
    #[serde(default, alias = "total_allocated")]
    total_allocated: f64,
    #[serde(default, alias = "percent_used")]
    percent_used: Option<f64>,
}

/// Decode an org spend summary. An all-zero decode merely parsed — an
/// absent field degrades to its zero value — so it is rejected as
/// non-authoritative, not reported as a zero-allocation summary.
fn org_from(value: &Value, scale: i64) -> Option<SpendReport> {
    if !value.is_object() {
        return None;
    }
    let wire: WireOrgSpend = serde_json::from_value(value.clone()).ok()?;
    if wire.total_allocated <= 0.0 && wire.agents.is_empty() {
        return None;
    }
    Some(SpendReport::Org(OrgSpend {
        total_allocated: Money::from_wire(wire.total_allocated, scale),
        total_consumed: Money::from_wire(wire.total_consumed, scale),
        agents: wire
            .agents
            .into_iter()
            .map(|agent| AgentSpend {
                name: agent.name,
                spent: Money::from_wire(agent.spent, scale),
                budget: Money::from_wire(agent.budget, scale),
            })
            .collect(),
    }))
}

/// Decode a cost-center rollup sequence. The server-supplied utilization
/// percent wins over recomputation when present.
fn rollups_from(value: &Value, scale: i64) -> Option<SpendReport> {
    let wires: Vec<WireRollup> = serde_json::from_value(value.clone()).ok()?;
    if wires.is_empty() {
        return None;
    }
    let rollups = wires
        .into_iter()
        .map(|wire| {
            let consumed = Money::from_wire(wire.total_consumed, scale);
            let allocated = Money::from_wire(wire.total_allocated, scale);
            let percent_used = wire.percent_used.unwrap_or_else(|| {
                if allocated.is_zero() {
                    0.0
                } else {
                    consumed.as_dollars() / allocated.as_dollars() * 100.0
                }
            });
            CostCenterRollup {
                cost_center: wire.cost_center,
                department: wire.department,
                consumed,
                allocated,
                percent_used,
            }
        })
        .collect();
    Some(SpendReport::CostCenters(rollups))
}

/// Normalize a spend query response. The two result variants are
/// disambiguated by shape and validity, not by surface tag, because either
/// surface can legitimately return an absent or empty result.
///
/// Shape precedence: `{"rollups": [...]}` → bare rollup array → bare org
/// summary object.
///
/// # Errors
/// [`ApiError::MalformedResponse`] on a non-JSON body.
pub fn spend(data: &[u8], profile: &SurfaceProfile) -> Result<Normalized<SpendReport>, ApiError> {
    let scale = profile.unit_scale;
    let value = parse(data)?;
    Ok(decode_first(
        value,
        &[
            &|v: &Value| v.get("rollups").and_then(|r| rollups_from(r, scale)),
            &|v: &Value| rollups_from(v, scale),
            &|v: &Value| org_from(v, scale),
        ],
    ))
}

// ============================================================================
// Routes
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct WireRoute {
    #[serde(default)]
    path: String,
    #[serde(default)]
    policy: String,
    #[serde(default)]
    name: String,
}

/// Decode a route listing. Valid only when non-empty with at least one
/// real path; any object zero-decodes into an empty listing otherwise.
fn routes_from(value: &Value) -> Option<Vec<Route>> {
    let wires: Vec<WireRoute> = serde_json::from_value(value.clone()).ok()?;
    let routes: Vec<Route> = wires
        .into_iter()
        .map(|wire| Route {
            path: wire.path,
            policy: wire.policy,
            name: wire.name,
        })
        .collect();
    let valid = !routes.is_empty() && routes.iter().any(|r| !r.path.is_empty());
    valid.then_some(routes)
}

/// Normalize a route policy listing.
///
/// Shape precedence: `{"routes": [...]}` → bare array.
///
/// # Errors
/// [`ApiError::MalformedResponse`] on a non-JSON body.
pub fn routes(data: &[u8]) -> Result<Normalized<Vec<Route>>, ApiError> {
    let value = parse(data)?;
    Ok(decode_first(
        value,
        &[
            &|v: &Value| v.get("routes").and_then(routes_from),
            &routes_from,
        ],
    ))
}

// ============================================================================
// Mint receipt
// ============================================================================

fn json_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn nonempty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn receipt_from(value: &Value) -> Option<MintReceipt> {
    let obj = value.as_object()?;

    // Cloud nests the token record under `token`; gateway answers flat.
    let record = match obj.get("token") {
        Some(Value::Object(nested)) => nested,
        _ => obj,
    };

    let routes = record
        .get("scope")
        .and_then(|scope| scope.get("routes"))
        .or_else(|| record.get("routes"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(json_display).collect())
        .unwrap_or_default();

    // The secret macaroon lives at the top level under several historical
    // names; a bare string under `token` is the oldest spelling.
    let macaroon = obj
        .get("macaroon_token")
        .and_then(nonempty_str)
        .or_else(|| obj.get("macaroon").and_then(nonempty_str))
        .or_else(|| obj.get("token").and_then(nonempty_str));

    let receipt = MintReceipt {
        id: record.get("id").map(json_display),
        status: record.get("status").and_then(nonempty_str),
        routes,
        expires_at: record.get("expires_at").and_then(nonempty_str),
        macaroon,
    };
    (receipt.id.is_some() || receipt.macaroon.is_some()).then_some(receipt)
}

/// Normalize a mint response.
///
/// # Errors
/// [`ApiError::MalformedResponse`] on a non-JSON body.
pub fn mint_receipt(data: &[u8]) -> Result<Normalized<MintReceipt>, ApiError> {
    let value = parse(data)?;
    Ok(decode_first(value, &[&receipt_from]))
}

// ============================================================================
// Threat report
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct WireThreatCategory {
    #[serde(default)]
    name: String,
    #[serde(default)]
    count: i64,
}

#[derive(Debug, Default, Deserialize)]
struct WireThreatEvent {
    #[serde(default)]
    time: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    agent: String,
    #[serde(default)]
    route: String,
    #[serde(default)]
    action: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireThreatReport {
    #[serde(default)]
    total_blocked: i64,
    #[serde(default)]
    categories: Vec<WireThreatCategory>,
    #[serde(default)]
    recent_threats: Vec<WireThreatEvent>,
}

fn threats_from(value: &Value) -> Option<ThreatReport> {
    if !value.is_object() {
        return None;
    }
    let wire: WireThreatReport = serde_json::from_value(value.clone()).ok()?;
    if wire.total_blocked <= 0 {
        return None;
    }
    Some(ThreatReport {
        total_blocked: wire.total_blocked,
        categories: wire
            .categories
            .into_iter()
            .map(|c| ThreatCategory {
                name: c.name,
                count: c.count,
            })
            .collect(),
        recent: wire
            .recent_threats
            .into_iter()
            .map(|e| ThreatEvent {
                time: e.time,
                kind: e.kind,
                agent: e.agent,
                route: e.route,
                action: e.action,
            })
            .collect(),
    })
}

/// Normalize a threat report.
///
/// # Errors
/// [`ApiError::MalformedResponse`] on a non-JSON body.
pub fn threat_report(data: &[u8]) -> Result<Normalized<ThreatReport>, ApiError> {
    let value = parse(data)?;
    Ok(decode_first(value, &[&threats_from]))
}

// ============================================================================
// Health
// ============================================================================

/// Parse a health payload tolerantly; plain-text ping bodies come back as
/// null and the caller renders what it has.
pub fn health(data: &[u8]) -> Value {
    serde_json::from_slice(data).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use satgate_config::Surface;

    use super::*;

    fn gateway() -> SurfaceProfile {
        SurfaceProfile::for_surface(Surface::Gateway)
    }

    fn cloud() -> SurfaceProfile {
        SurfaceProfile::for_surface(Surface::Cloud)
    }

    #[test]
    fn test_token_list_wrapped_gateway() {
        let body = br#"{"tokens": [
            {"id": "tok_1", "name": "crawler", "status": "active", "spent": 4.5, "budget": 20.0, "expires_at": "2026-09-01T00:00:00Z"},
            {"id": "tok_2", "name": "indexer", "status": "revoked", "spent": 0, "budget": 0}
        ]}"#;

        let tokens = token_list(body, &gateway()).unwrap().known().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].id, "tok_1");
        assert_eq!(tokens[0].spent, Money::from_cents(450));
        assert_eq!(tokens[0].budget, Money::from_cents(2000));
        assert_eq!(tokens[0].status, TokenStatus::Active);
        assert_eq!(tokens[1].status, TokenStatus::Revoked);
        assert!(tokens[1].is_unlimited());
    }

    #[test]
    fn test_token_list_bare_array() {
        let body = br#"[{"id": "tok_1", "name": "a", "status": "active", "spent": 1.0, "budget": 2.0}]"#;
        let tokens = token_list(body, &gateway()).unwrap().known().unwrap();
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_token_list_cloud_tree_flattens_and_converts() {
        // Credits throughout; children nested under the root
        let body = br#"{"tree": [
            {"id": "root", "name": "org", "status": "active",
             "spent_credits": 2500, "budget_limit_credits": 10000,
             "children": [
                {"id": "child_a", "name": "crawler", "status": "active",
                 "spent_credits": 500, "budget_limit_credits": 1000},
                {"id": "child_b", "name": "indexer", "status": "revoked",
                 "spent_credits": 0, "budget_limit_credits": 0}
             ]}
        ]}"#;

        let tokens = token_list(body, &cloud()).unwrap().known().unwrap();
        let ids: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "child_a", "child_b"]);

        // No downstream code ever sees raw credits
        assert_eq!(tokens[0].spent, Money::from_cents(2500));
        assert_eq!(tokens[0].budget, Money::from_cents(10_000));
        assert_eq!(tokens[1].spent.to_string(), "$5.00");
        assert_eq!(tokens[1].parent_id.as_deref(), Some("root"));
        assert_eq!(tokens[1].depth, 1);
        assert!(tokens.iter().all(|t| t.children.is_empty()));
    }

    #[test]
    fn test_token_list_empty_is_unrecognized() {
        let unrecognized = token_list(br#"{"tokens": []}"#, &gateway()).unwrap();
        assert!(!unrecognized.is_known());
        assert!(matches!(
            &unrecognized,
            Normalized::Unrecognized(v) if is_empty_token_listing(v)
        ));
    }

    #[test]
    fn test_empty_listing_covers_both_envelopes() {
        // Either surface's empty envelope renders as "no tokens", not raw
        // JSON, and so does a bare empty array.
        for body in [&br#"{"tokens": []}"#[..], br#"{"tree": []}"#, b"[]"] {
            let outcome = token_list(body, &cloud()).unwrap();
            assert!(matches!(
                &outcome,
                Normalized::Unrecognized(v) if is_empty_token_listing(v)
            ));
        }

        // A non-listing object is not mistaken for an empty listing
        assert!(!is_empty_token_listing(&serde_json::json!({"ok": true})));
        assert!(!is_empty_token_listing(&serde_json::json!({"tree": [1]})));
    }

    #[test]
    fn test_token_list_non_json_is_malformed() {
        let err = token_list(b"<html>502 Bad Gateway</html>", &gateway()).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn test_token_detail_wrapped_and_bare() {
        let wrapped = br#"{"token": {"id": "tok_1", "name": "crawler", "status": "active", "spent": 3.0}}"#;
        let token = token_detail(wrapped, &gateway()).unwrap().known().unwrap();
        assert_eq!(token.id, "tok_1");
        assert_eq!(token.spent, Money::from_cents(300));

        let bare = br#"{"id": "tok_2", "name": "indexer", "status": "weird"}"#;
        let token = token_detail(bare, &gateway()).unwrap().known().unwrap();
        assert_eq!(token.id, "tok_2");
        assert_eq!(token.status, TokenStatus::Unknown);
    }

    #[test]
    fn test_spend_org_summary() {
        let body = br#"{"total_allocated": 100.0, "total_consumed": 25.0,
            "agents": [{"name": "crawler", "spent": 25.0, "budget": 50.0}]}"#;
        let report = spend(body, &gateway()).unwrap().known().unwrap();
        let SpendReport::Org(org) = report else {
            panic!("expected org summary");
        };
        assert_eq!(org.total_allocated, Money::from_cents(10_000));
        assert_eq!(org.agents.len(), 1);
        assert!((org.utilization().unwrap() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spend_empty_agents_rejected_as_non_authoritative() {
        // Parsed fine, but an all-zero decode is a false positive
        let outcome = spend(br#"{"agents": []}"#, &gateway()).unwrap();
        assert!(!outcome.is_known());
    }

    #[test]
    fn test_spend_cloud_rollups_convert_credits() {
        let body = br#"{"rollups": [
            {"costCenter": "ml-infra", "department": "eng",
             "totalConsumed": 2500, "totalAllocated": 10000}
        ]}"#;
        let report = spend(body, &cloud()).unwrap().known().unwrap();
        let SpendReport::CostCenters(rollups) = report else {
            panic!("expected rollups");
        };
        assert_eq!(rollups[0].consumed.to_string(), "$25.00");
        assert_eq!(rollups[0].allocated.to_string(), "$100.00");
        assert!((rollups[0].percent_used - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spend_server_percent_wins_over_recomputation() {
        let body = br#"{"rollups": [
            {"costCenter": "ml-infra", "department": "eng",
             "totalConsumed": 2500, "totalAllocated": 10000, "percentUsed": 24.6}
        ]}"#;
        let report = spend(body, &cloud()).unwrap().known().unwrap();
        let SpendReport::CostCenters(rollups) = report else {
            panic!("expected rollups");
        };
        assert!((rollups[0].percent_used - 24.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spend_bare_rollup_array() {
        let body = br#"[{"cost_center": "ops", "department": "it",
            "total_consumed": 100, "total_allocated": 400}]"#;
        let report = spend(body, &cloud()).unwrap().known().unwrap();
        assert!(matches!(report, SpendReport::CostCenters(r) if r.len() == 1));
    }

    #[test]
    fn test_spend_unknown_shape_falls_back_verbatim() {
        let body = br#"{"window": "7d", "series": [1, 2, 3]}"#;
        let outcome = spend(body, &gateway()).unwrap();
        let Normalized::Unrecognized(raw) = outcome else {
            panic!("expected fallback");
        };
        assert_eq!(raw["window"], "7d");
    }

    #[test]
    fn test_routes_wrapped_and_bare() {
        let wrapped = br#"{"routes": [{"path": "/v1/search", "policy": "charge", "name": "search"}]}"#;
        let routes_list = routes(wrapped).unwrap().known().unwrap();
        assert_eq!(routes_list[0].policy, "charge");

        let bare = br#"[{"path": "/v1/fetch", "policy": "observe"}]"#;
        let routes_list = routes(bare).unwrap().known().unwrap();
        assert_eq!(routes_list[0].path, "/v1/fetch");

        // Arbitrary objects zero-decode into an empty listing; reject
        let outcome = routes(br#"{"mode": "observe"}"#).unwrap();
        assert!(!outcome.is_known());
    }

    #[test]
    fn test_mint_receipt_cloud_wrapped() {
        let body = br#"{"token": {"id": "tok_9", "status": "active",
            "scope": {"routes": ["/v1/search"]}, "expires_at": "2026-09-01T00:00:00Z"},
            "macaroon_token": "MDAxb..."}"#;
        let receipt = mint_receipt(body).unwrap().known().unwrap();
        assert_eq!(receipt.id.as_deref(), Some("tok_9"));
        assert_eq!(receipt.routes, vec!["/v1/search"]);
        assert_eq!(receipt.macaroon.as_deref(), Some("MDAxb..."));
    }

    #[test]
    fn test_mint_receipt_gateway_flat() {
        let body = br#"{"id": "tok_3", "status": "active", "routes": ["*"], "macaroon": "AgEDb..."}"#;
        let receipt = mint_receipt(body).unwrap().known().unwrap();
        assert_eq!(receipt.id.as_deref(), Some("tok_3"));
        assert_eq!(receipt.macaroon.as_deref(), Some("AgEDb..."));
    }

    #[test]
    fn test_mint_receipt_bare_token_string() {
        let body = br#"{"id": "tok_4", "token": "AgEDb..."}"#;
        let receipt = mint_receipt(body).unwrap().known().unwrap();
        assert_eq!(receipt.macaroon.as_deref(), Some("AgEDb..."));

        let unknown = mint_receipt(br#"{"ok": true}"#).unwrap();
        assert!(!unknown.is_known());
    }

    #[test]
    fn test_threat_report_validity() {
        let body = br#"{"total_blocked": 12,
            "categories": [{"name": "prompt-injection", "count": 9}],
            "recent_threats": [{"time": "12:00", "type": "injection",
                "agent": "crawler", "route": "/v1/search", "action": "blocked"}]}"#;
        let report = threat_report(body).unwrap().known().unwrap();
        assert_eq!(report.total_blocked, 12);
        assert_eq!(report.recent[0].kind, "injection");

        // Zero blocked is indistinguishable from an absent report
        let outcome = threat_report(br#"{"total_blocked": 0}"#).unwrap();
        assert!(!outcome.is_known());
    }

    #[test]
    fn test_health_tolerates_non_json() {
        assert_eq!(health(b"pong"), Value::Null);
        assert_eq!(health(br#"{"status": "ok"}"#)["status"], "ok");
    }
}
