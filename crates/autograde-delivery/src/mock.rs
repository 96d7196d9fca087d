//! Mock transport for testing delivery policies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use autograde_core::report::GradeReport;
use autograde_core::traits::{DeliveryReceipt, ReportTransport};

/// A transport that plays back a scripted sequence of attempt outcomes.
///
/// Once the script is exhausted every further attempt is accepted, so a
/// mock built from failures alone models a collector that recovers.
pub struct MockTransport {
    script: Mutex<VecDeque<anyhow::Result<DeliveryReceipt>>>,
    call_count: AtomicU32,
    last_report: Mutex<Option<GradeReport>>,
}

impl MockTransport {
    /// Scripted outcomes, consumed front to back.
    pub fn new(script: Vec<anyhow::Result<DeliveryReceipt>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            call_count: AtomicU32::new(0),
            last_report: Mutex::new(None),
        }
    }

    /// A transport that accepts everything.
    pub fn accepting() -> Self {
        Self::new(Vec::new())
    }

    /// Number of delivery attempts made against this transport.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The report most recently sent, if any.
    pub fn last_report(&self) -> Option<GradeReport> {
        self.last_report.lock().unwrap().clone()
    }

    fn accepted() -> DeliveryReceipt {
        DeliveryReceipt {
            status: 200,
            body_snippet: "ok".to_string(),
        }
    }
}

#[async_trait]
impl ReportTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, report: &GradeReport) -> anyhow::Result<DeliveryReceipt> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_report.lock().unwrap() = Some(report.clone());

        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(Self::accepted()),
        }
    }
}
