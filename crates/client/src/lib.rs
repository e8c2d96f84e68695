//! Client library for the SatGate admin APIs.
//!
//! SatGate exposes the same logical service through two backend dialects
//! ("surfaces"): the self-hosted **gateway** admin API and the multi-tenant
//! **cloud** delegation API. The two differ in paths, request field names,
//! response envelopes, and unit conventions (dollars vs. integer credits,
//! flat token lists vs. delegation trees).
//!
//! This crate hides that split behind one canonical model:
//!
//! - [`surface`] — immutable per-surface profile data (paths, unit scale,
//!   budget field name)
//! - [`request`] — translates canonical operations into wire requests for
//!   the active surface
//! - [`normalize`] — decodes the weakly-typed JSON responses of either
//!   surface into the canonical model, tolerating multiple shapes
//! - [`money`] — fixed-point currency conversion between credits and
//!   dollars
//! - [`tree`] — flattens cloud delegation trees into flat token lists
//! - [`transport`] — the HTTP seam ([`transport::Transport`] trait plus a
//!   reqwest implementation)
//! - [`api`] — [`api::ApiClient`], one method per canonical operation
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use satgate_client::api::ApiClient;
//! use satgate_config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None);
//!     let client = ApiClient::from_config(&config)?;
//!
//!     for token in client.list_tokens().await?.result.known().unwrap_or_default() {
//!         println!("{} {} {}", token.id, token.name, token.spent);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod model;
pub mod money;
pub mod normalize;
pub mod request;
pub mod surface;
pub mod transport;
pub mod tree;

pub use api::ApiClient;
pub use error::ApiError;
pub use model::{Token, TokenStatus};
pub use money::Money;
pub use normalize::Normalized;
pub use surface::SurfaceProfile;
