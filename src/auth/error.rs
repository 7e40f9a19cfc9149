use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure the auth subsystem can report to a caller.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid password")]
    InvalidCredentials,
    #[error("registration failed")]
    RegistrationFailed,
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
    #[error("hashing error: {0}")]
    Hashing(String),
    #[error("token signing error: {0}")]
    Signing(String),
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("token not provided")]
    MissingToken,
    #[error("{0}")]
    MalformedHeader(&'static str),
    #[error("invalid token")]
    Unauthorized,
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        Self::Storage(err.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken
            | Self::MalformedHeader(_)
            | Self::Unauthorized
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Hashing(_) | Self::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to the client. Internal causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Hashing(_) | Self::Signing(_) => "internal error".into(),
            Self::TokenExpired | Self::TokenInvalid => Self::Unauthorized.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
