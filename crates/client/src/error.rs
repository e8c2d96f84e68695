//! Error taxonomy for API operations.

use thiserror::Error;

/// Errors that can occur while talking to a SatGate surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required canonical field is missing or invalid. Raised before any
    /// network call is made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The target could not be reached (connection refused, timeout).
    #[error("cannot reach gateway at {target}: {source}")]
    Transport {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a status outside the accepted set.
    #[error("API returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// 404 on token detail or revoke.
    #[error("token {0} not found")]
    NotFound(String),

    /// No known response shape validated, or the payload is structurally
    /// pathological (runaway delegation tree, non-JSON body).
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration is incomplete for the selected surface.
    #[error(transparent)]
    Config(#[from] satgate_config::ConfigError),

    /// Request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
