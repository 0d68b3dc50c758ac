use std::fmt;

use reqwest::blocking::Response;
use thiserror::Error;

/// Message attached to every [`ServiceError`].
pub const SERVICE_ERROR_MESSAGE: &str = "Server returned an HTTP error";

/// Body substituted when the body of a failed response cannot be read.
pub const UNREADABLE_BODY: &str = "failed to read response body";

#[derive(Error, Debug)]
pub enum FastPdfError {
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl FastPdfError {
    /// Returns the decoded service response when the remote call failed with a non-200 status.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            FastPdfError::Service(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FastPdfError>;

/// A failed remote call, carrying enough of the response to diagnose it
/// without issuing the request again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// HTTP status code
    pub status_code: u16,
    /// Canonical reason phrase for the status code, empty when unknown
    pub status: String,
    /// Raw response body
    pub body: String,
    /// Human readable summary
    pub message: String,
}

impl ServiceError {
    pub fn new(status_code: u16, status: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status_code,
            status: status.into(),
            body: body.into(),
            message: SERVICE_ERROR_MESSAGE.to_string(),
        }
    }

    /// Drains a non-success response into a `ServiceError`.
    ///
    /// Never fails: a body that cannot be read is replaced with
    /// [`UNREADABLE_BODY`].
    pub fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(status = status.as_u16(), error = %err, "Could not read error response body");
                UNREADABLE_BODY.to_string()
            }
        };

        Self::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body,
        )
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. Status Code: {}, Response: {}",
            self.message, self.status_code, self.body
        )
    }
}

impl std::error::Error for ServiceError {}
