//! Uniform response envelope for the transport layer.

use serde::Serialize;

/// Response envelope shared by every operation.
///
/// Success responses carry `success: true` and a `data` payload; failures
/// carry `success: false` and a human-readable `message`. The absent side
/// is omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable error message, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload in a success envelope.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Wraps an error message in a failure envelope.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
