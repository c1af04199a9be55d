use axum::http::StatusCode;
use thiserror::Error;

/// HTTP-facing error for the counter API.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failure of a remote increment call, as seen by the tracking client.
///
/// The tracker treats every variant the same way (log and drop), so the
/// distinction exists only for the log line.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("counter request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("counter request rejected with status {0}")]
    Rejected(reqwest::StatusCode),
}
