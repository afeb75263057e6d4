//! Errors raised while talking to the rendering service.

use thiserror::Error;

/// Failure of a single render call.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The request never got a response (DNS, TLS, connection reset, timeout).
    #[error("Failed to send render request: {0}")]
    Request(#[source] wreq::Error),

    /// The service answered with a non-success status.
    #[error("Render request failed with status: {0}")]
    Status(u16),

    /// The response body could not be read as text.
    #[error("Failed to read render response body: {0}")]
    Body(#[source] wreq::Error),

    /// The request payload could not be serialized.
    #[error("Failed to encode render request: {0}")]
    Encode(#[from] serde_json::Error),
}
