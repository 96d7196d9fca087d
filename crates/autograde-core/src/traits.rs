//! Core trait definitions for report delivery.
//!
//! The transport trait is implemented by the `autograde-delivery` crate;
//! keeping it here lets the grading side stay free of HTTP details and lets
//! tests substitute a scripted transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::report::GradeReport;

/// Upper bound on the response-body snippet captured into logs.
pub const BODY_SNIPPET_MAX: usize = 256;

/// A channel that delivers one grade report to a collector.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    /// Human-readable transport name (e.g. "http").
    fn name(&self) -> &str;

    /// Deliver one report. A receipt means the collector accepted it; any
    /// error is a failed attempt the caller may retry.
    async fn send(&self, report: &GradeReport) -> anyhow::Result<DeliveryReceipt>;
}

/// Evidence of a successful delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// HTTP-style status code.
    pub status: u16,
    /// Leading bytes of the response body, for the run log.
    pub body_snippet: String,
}

/// Truncate a response body for logging.
pub fn snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_MAX {
        return body.to_string();
    }
    let mut end = BODY_SNIPPET_MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
