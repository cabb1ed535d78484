use jsonwebtoken::errors::Error as JwtError;
use reqwest::{Error as HttpError, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::model::common::eligibility::ReasonCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Config(#[from] Box<figment::Error>),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// A request refused locally, before anything was sent.
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// The server refused the request; `message` is its own wording.
    #[error("Rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The local eligibility gate refused before any request was sent.
    #[error("Not eligible to vote: {0}")]
    Ineligible(ReasonCode),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Build the error for a non-success response from the server's status
    /// and raw body. The server's message is kept verbatim.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// The text to show the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. }
            | Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::NotFound(message) => message.clone(),
            Self::Ineligible(reason) => reason.message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Error bodies are `{"message": ...}` or `{"error": ...}`, or plain text.
fn server_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.or(parsed.error),
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_message_is_kept_verbatim() {
        let err = Error::from_response(
            StatusCode::CONFLICT,
            r#"{"message": "You have already voted in this election"}"#,
        );
        match err {
            Error::Rejected { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "You have already voted in this election");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn error_field_and_plain_text() {
        let err = Error::from_response(StatusCode::BAD_REQUEST, r#"{"error": "Election closed"}"#);
        assert_eq!(err.user_message(), "Election closed");

        let err = Error::from_response(StatusCode::BAD_GATEWAY, "upstream timed out\n");
        assert_eq!(err.user_message(), "upstream timed out");
    }

    #[test]
    fn empty_body_falls_back_to_reason() {
        let err = Error::from_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.user_message(), "Internal Server Error");
        // JSON without a message field also falls back.
        let err = Error::from_response(StatusCode::FORBIDDEN, "{}");
        assert_eq!(err.user_message(), "Forbidden");
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            Error::from_response(StatusCode::UNAUTHORIZED, "{}"),
            Error::Unauthorized(_)
        ));
        assert!(matches!(
            Error::from_response(StatusCode::NOT_FOUND, "{}"),
            Error::NotFound(_)
        ));
        assert!(matches!(
            Error::from_response(StatusCode::FORBIDDEN, "{}"),
            Error::Rejected { status: 403, .. }
        ));
    }

    #[test]
    fn local_refusal_message() {
        let err = Error::BadRequest("Pick approve or reject".to_string());
        assert_eq!(err.user_message(), "Pick approve or reject");
        assert_eq!(err.to_string(), "Bad request: Pick approve or reject");
    }

    #[test]
    fn ineligible_message() {
        let err = Error::Ineligible(ReasonCode::NotVerified);
        assert_eq!(
            err.user_message(),
            "Your account must be verified before you can vote."
        );
        assert_eq!(err.to_string(), "Not eligible to vote: NOT_VERIFIED");
    }
}
