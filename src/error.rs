// Error type shared by every gateway operation

use alloy_primitives::B256;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no wallet connected")]
    NotConnected,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC error: {message} ({code})")]
    Rpc { code: i64, message: String },

    #[error("transaction {0} reverted")]
    Reverted(B256),

    #[error("malformed contract response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Stable tag reported to the UI next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotConnected => "not_connected",
            GatewayError::InvalidInput(_) => "invalid_input",
            GatewayError::Transport(_) => "transport",
            GatewayError::Rpc { .. } => "rpc",
            GatewayError::Reverted(_) => "reverted",
            GatewayError::Decode(_) => "decode",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::NotConnected => StatusCode::UNAUTHORIZED,
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::Reverted(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Transport(_) | GatewayError::Rpc { .. } | GatewayError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl From<alloy_sol_types::Error> for GatewayError {
    fn from(e: alloy_sol_types::Error) -> Self {
        GatewayError::Decode(e.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));
        (self.status(), body).into_response()
    }
}
