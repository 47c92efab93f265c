//! Error types for the request pipeline.
//!
//! # Design
//! `ApiError` is the closed set of failures a caller sees from `send`.
//! Transport failures are folded into `Custom` there. `send_multipart`
//! instead lets the transport failure through untouched, so its error type
//! is the wider `UploadError`.

use thiserror::Error;

/// Failures surfaced by `ApiClient` and `ApiManager`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request had no usable target URL.
    #[error("Invalid URL")]
    InvalidUrl,

    /// The transport produced something that is not an HTTP response.
    #[error("Invalid server response")]
    InvalidResponse,

    /// The response body could not be decoded into the requested type.
    #[error("Failed to decode response")]
    DecodingError,

    /// The status code fell outside the accepted band.
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Any other failure, carried as its description.
    #[error("{0}")]
    Custom(String),
}

/// Failure reported by a `Transport` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be turned into a wire request (bad verb, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connection, TLS, timeout or read failure.
    #[error("network failure: {0}")]
    Network(String),
}

/// Failures surfaced by `ApiManager::send_multipart`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(ApiError::InvalidUrl.to_string(), "Invalid URL");
        assert_eq!(ApiError::InvalidResponse.to_string(), "Invalid server response");
        assert_eq!(ApiError::DecodingError.to_string(), "Failed to decode response");
        assert_eq!(ApiError::ServerError(503).to_string(), "Server error: 503");
        assert_eq!(ApiError::Custom("offline".to_string()).to_string(), "offline");
    }

    #[test]
    fn upload_error_is_transparent() {
        let err = UploadError::from(TransportError::Network("timed out".to_string()));
        assert_eq!(err.to_string(), "network failure: timed out");
        let err = UploadError::from(ApiError::ServerError(500));
        assert_eq!(err.to_string(), "Server error: 500");
    }
}
