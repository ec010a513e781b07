//! Publisher error types with HTTP status code mapping.
//!
//! [`PublisherError`] is the central error type. Connection-level variants
//! end the connection's publishing task; the rest surface while parsing
//! configuration, query parameters, or inbound frames.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid stream variant: broadcast"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Publisher error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Connection | 502 Bad Gateway           |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    /// Unknown stream variant name.
    #[error("invalid stream variant: {0}")]
    InvalidVariant(String),

    /// Unknown frame encoding name.
    #[error("invalid frame encoding: {0}")]
    InvalidEncoding(String),

    /// Malformed EUI-48 device identifier.
    #[error("invalid device id: {0}")]
    InvalidDeviceId(String),

    /// Frame bytes are not a valid protobuf message.
    #[error("frame decode failed: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Decoded epoch step is neither a device join nor a single summary.
    #[error("epoch step does not map to a topology step")]
    UnsupportedStep,

    /// Frame could not be written to the connection.
    #[error("send failed: {0}")]
    Send(String),

    /// Transport error while reading from the connection.
    #[error("receive failed: {0}")]
    Receive(String),

    /// Peer closed the connection before sending its handshake.
    #[error("connection closed before handshake")]
    ConnectionClosed,

    /// Fatal configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PublisherError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidVariant(_) => 1001,
            Self::InvalidEncoding(_) => 1002,
            Self::InvalidDeviceId(_) => 1003,
            Self::Decode(_) => 1004,
            Self::UnsupportedStep => 1005,
            Self::Send(_) => 2001,
            Self::Receive(_) => 2002,
            Self::ConnectionClosed => 2003,
            Self::Config(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidVariant(_)
            | Self::InvalidEncoding(_)
            | Self::InvalidDeviceId(_)
            | Self::Decode(_)
            | Self::UnsupportedStep => StatusCode::BAD_REQUEST,
            Self::Send(_) | Self::Receive(_) | Self::ConnectionClosed => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error ends a connection's publishing loop.
    #[must_use]
    pub const fn is_connection_level(&self) -> bool {
        matches!(
            self,
            Self::Send(_) | Self::Receive(_) | Self::ConnectionClosed
        )
    }
}

impl IntoResponse for PublisherError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
