//! Gateway error taxonomy and its HTTP mapping.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::types::ErrorEnvelope;
use crate::agent::AgentError;

pub const MESSAGE_REQUIRED: &str = "Message is required";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or empty request; the client should fix it.
    #[error("{0}")]
    InvalidInput(String),

    /// The reasoning engine or a tool failed.
    #[error(transparent)]
    AgentFailure(#[from] AgentError),

    #[error("Agent did not respond within {0:?}")]
    Timeout(Duration),

    /// A bug on our side; details stay in the logs.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AgentFailure(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            code: self.status().as_u16(),
            detail: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}
