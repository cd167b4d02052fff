//! Error types for the Confluence client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] RemoteError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Export response is missing the {0} marker")]
    Extraction(&'static str),

    #[error("PDF export job reported failure")]
    ExportFailed,

    #[error("PDF export timed out after {attempts} status polls")]
    ExportTimeout { attempts: u32 },

    #[error("Expected a {expected} response body")]
    UnexpectedBody { expected: &'static str },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structured error body returned by the Confluence REST API.
///
/// Built from any decoded response whose `statusCode` field is 400 or
/// above. Optional flags default to `false` when the body omits them.
#[derive(Debug, Error)]
#[error("Confluence API error {status_code}: {message}")]
pub struct RemoteError {
    /// Top-level error message from the response body
    pub message: String,

    /// HTTP-style status code carried in the body
    pub status_code: u16,

    /// Per-field messages from the body's `errors` list
    pub error_messages: Vec<String>,

    /// Whether the request was authorized
    pub authorized: bool,

    /// Whether the request was valid
    pub valid: bool,
}

impl RemoteError {
    /// Build a `RemoteError` from a decoded error body, if the body carries
    /// a failing status code.
    ///
    /// Returns `None` for bodies without a numeric `statusCode >= 400`, so
    /// success payloads (and non-JSON byte payloads) pass through untouched.
    pub(crate) fn from_body(body: &serde_json::Value) -> Option<Self> {
        let status_code = body.get("statusCode")?.as_u64()?;
        if status_code < 400 {
            return None;
        }

        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string();

        let error_messages = body
            .get("errors")
            .and_then(|e| e.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("message"))
                    .filter_map(|m| m.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(RemoteError {
            message,
            status_code: status_code as u16,
            error_messages,
            authorized: body
                .get("authorized")
                .and_then(|a| a.as_bool())
                .unwrap_or(false),
            valid: body.get("valid").and_then(|v| v.as_bool()).unwrap_or(false),
        })
    }
}
