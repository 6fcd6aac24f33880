// Error taxonomy for the gateway
//
// Provider failures are transport/auth/quota problems talking to the LLM
// backend. Classification failures mean the model answered outside the
// template enum. Format failures never appear here: the artifact protocol
// recovers from them locally and flags the result instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::server::types::ErrorBody;

/// Failure talking to an LLM completion endpoint.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} API request failed with status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// The provider answered successfully but carried no usable text.
    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: String },

    #[error("failed to reach {provider}: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {provider} response: {reason}")]
    Decode { provider: String, reason: String },

    #[error("{provider} did not respond within {secs}s")]
    Timeout { provider: String, secs: u64 },
}

impl ProviderError {
    /// Short machine-readable reason, used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::EmptyResponse { .. } => "empty-response",
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
            Self::Timeout { .. } => "timeout",
        }
    }
}

/// The classifier's answer was not one of the template tokens.
#[derive(Debug, Error)]
#[error("Unexpected response format: {raw_answer}")]
pub struct ClassificationError {
    pub raw_answer: String,
}

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error("{0}")]
    InvalidRequest(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Classification(_) => StatusCode::FORBIDDEN,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to callers. Provider payloads stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Provider(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Provider(ref err) = self {
            tracing::error!(reason = err.reason(), "provider call failed: {}", err);
        } else {
            tracing::warn!(status = status.as_u16(), "request rejected: {}", self);
        }
        (
            status,
            Json(ErrorBody {
                msg: self.public_message(),
            }),
        )
            .into_response()
    }
}
