//! Delivery error types.

use thiserror::Error;

/// Errors from a single delivery attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The collector answered with a non-2xx status.
    #[error("collector returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A transport-level error occurred.
    #[error("network error: {0}")]
    Network(String),
}
