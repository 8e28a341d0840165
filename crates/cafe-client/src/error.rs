//! Client error type
//!
//! Failed API calls decode the server's `{"error":{...}}` body into
//! [`ClientError::Api`] so callers can branch on the error code.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} ({status}, {code})")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("unexpected response {status}: {body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    #[error("not signed in")]
    NotAuthenticated,

    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Deserialize)]
struct ErrorPayload {
    code: String,
    message: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

impl ClientError {
    /// Build from a non-success response body
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope { error }) => Self::Api {
                status,
                code: error.code,
                message: error.message,
                details: error.details.filter(|d| !d.is_null()),
            },
            Err(_) => Self::UnexpectedResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    /// HTTP status of a failed API call
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Server error code such as `NICKNAME_TAKEN`
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True when the session should be dropped and the user asked to sign in
    pub fn is_auth_failure(&self) -> bool {
        if matches!(self, Self::NotAuthenticated) {
            return true;
        }
        matches!(
            self.code(),
            Some("MISSING_AUTH" | "INVALID_TOKEN" | "TOKEN_EXPIRED")
        )
    }
}
