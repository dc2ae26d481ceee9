//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::{error, info};

/// Shown when the topic is missing or blank.
pub const MISSING_TOPIC_MESSAGE: &str = "Please enter a topic.";
/// Shown when no Gemini credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Gemini API key is not configured.";
/// Shown for any failure talking to the upstream model.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to generate card news.";
/// Shown when the model's answer can't be turned into cards.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse the AI response.";

/// Errors for the cardnews application.
#[derive(Debug)]
pub enum CardNewsError {
    /// The topic was missing, empty or only whitespace
    MissingTopic,
    /// The request was malformed in some other way
    BadRequest(String),
    /// Missing or invalid CSRF token
    Unauthorized,
    /// No credential for the text generation service
    MissingCredential,
    /// The text generation call failed, for whatever reason
    Upstream(String),
    /// The model's answer wasn't the JSON document we asked for
    Parse(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl CardNewsError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CardNewsError::MissingTopic | CardNewsError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CardNewsError::Unauthorized => StatusCode::UNAUTHORIZED,
            CardNewsError::MissingCredential
            | CardNewsError::Upstream(_)
            | CardNewsError::Parse(_)
            | CardNewsError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to hand back to the caller. Upstream and parse
    /// details only go to the log.
    pub fn client_message(&self) -> String {
        match self {
            CardNewsError::MissingTopic => MISSING_TOPIC_MESSAGE.to_string(),
            CardNewsError::BadRequest(message) => message.clone(),
            CardNewsError::Unauthorized => "Invalid or missing session.".to_string(),
            CardNewsError::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            CardNewsError::Upstream(_) => UPSTREAM_FAILURE_MESSAGE.to_string(),
            CardNewsError::Parse(_) => PARSE_FAILURE_MESSAGE.to_string(),
            CardNewsError::InternalServerError(_) => "Internal server error".to_string(),
        }
    }

    /// Writes the error to the log at a level matching who is at fault.
    pub fn log(&self) {
        match self {
            CardNewsError::MissingTopic => info!("Generation requested without a topic"),
            CardNewsError::BadRequest(message) => info!("Bad request received: {message}"),
            CardNewsError::Unauthorized => info!("Unauthorized request received"),
            CardNewsError::MissingCredential => {
                error!("Generation requested but no Gemini API key is configured")
            }
            CardNewsError::Upstream(message) => error!("Upstream generation error: {message}"),
            CardNewsError::Parse(message) => error!("Failed to parse model output: {message}"),
            CardNewsError::InternalServerError(message) => {
                error!("Internal server error: {message}")
            }
        }
    }
}

impl std::fmt::Display for CardNewsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardNewsError::MissingTopic => write!(f, "missing topic"),
            CardNewsError::BadRequest(message) => write!(f, "bad request: {message}"),
            CardNewsError::Unauthorized => write!(f, "unauthorized"),
            CardNewsError::MissingCredential => write!(f, "missing Gemini API key"),
            CardNewsError::Upstream(message) => write!(f, "upstream error: {message}"),
            CardNewsError::Parse(message) => write!(f, "parse error: {message}"),
            CardNewsError::InternalServerError(message) => {
                write!(f, "internal server error: {message}")
            }
        }
    }
}

impl std::error::Error for CardNewsError {}

impl From<reqwest::Error> for CardNewsError {
    fn from(err: reqwest::Error) -> Self {
        CardNewsError::Upstream(err.to_string())
    }
}

impl From<std::io::Error> for CardNewsError {
    fn from(err: std::io::Error) -> Self {
        CardNewsError::InternalServerError(err.to_string())
    }
}

impl From<axum::http::Error> for CardNewsError {
    fn from(err: axum::http::Error) -> Self {
        CardNewsError::InternalServerError(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for CardNewsError {
    fn from(err: tower_sessions::session::Error) -> Self {
        CardNewsError::InternalServerError(err.to_string())
    }
}

/// JSON body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human readable message
    pub error: String,
}

impl IntoResponse for CardNewsError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        let body = ErrorBody {
            error: self.client_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_fault() {
        assert_eq!(
            CardNewsError::MissingTopic.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CardNewsError::MissingCredential.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            CardNewsError::Parse("eof".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_detail_is_not_exposed() {
        let err = CardNewsError::Upstream("quota exceeded for key abc".to_string());
        assert_eq!(err.client_message(), UPSTREAM_FAILURE_MESSAGE);
        assert_ne!(
            CardNewsError::Parse("x".to_string()).client_message(),
            err.client_message()
        );
    }
}
