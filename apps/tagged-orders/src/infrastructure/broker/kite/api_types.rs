//! Kite Connect API wire types.

use serde::Deserialize;

/// Response envelope wrapping every Kite JSON response.
///
/// Success: `{"status": "success", "data": ...}`.
/// Failure: `{"status": "error", "message": "...", "error_type": "TokenException"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct KiteEnvelope<T> {
    /// `success` or `error`.
    pub status: String,
    /// Payload on success.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Exception class on error.
    #[serde(default)]
    pub error_type: Option<String>,
}

impl<T> KiteEnvelope<T> {
    /// Whether the call succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Error envelope, decoded without caring about `data`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct KiteErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}
