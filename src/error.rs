use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Everything that can go wrong between receiving a push and posting it to Discord.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("could not read request body: {0}")]
    UnreadableBody(String),

    #[error("could not parse push payload: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("no changes in push event")]
    NoChanges,

    #[error("failed to send message, status: {0}")]
    UnexpectedStatus(String),

    #[error("failed to reach Discord: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0} is required")]
    ConfigurationMissing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnreadableBody(_) | Self::MalformedJson(_) | Self::NoChanges => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent back to the webhook caller. Send failures stay generic.
    fn public_message(&self) -> &'static str {
        match self {
            Self::UnreadableBody(_) => "Invalid request body",
            Self::MalformedJson(_) => "Error parsing JSON",
            Self::NoChanges => "No changes in push event",
            _ => "Failed to send message to Discord",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.public_message()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
