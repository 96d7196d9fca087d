//! Parameterized retry with exponential backoff.
//!
//! The policy is independent of the transport, so it can be unit-tested
//! with a scripted mock and a zero-length backoff unit.

use std::time::Duration;

use autograde_core::report::GradeReport;
use autograde_core::runlog::RunLog;
use autograde_core::traits::ReportTransport;

/// Retry schedule for report delivery.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts before giving up.
    pub max_attempts: u32,
    /// Exponential base.
    pub base: u32,
    /// Backoff time unit.
    pub unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base: 2,
            unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay slept after failed attempt `attempt` (0-based):
    /// `unit * base^attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.unit * self.base.saturating_pow(attempt)
    }
}

/// Deliver `report`, retrying per `policy`. Returns true iff any attempt
/// succeeded.
///
/// Every attempt outcome is appended to the run log; backoff is slept
/// between attempts only, never after the final failure.
pub async fn deliver_with_retry(
    transport: &dyn ReportTransport,
    report: &GradeReport,
    policy: &RetryPolicy,
    log: &RunLog,
) -> bool {
    for attempt in 0..policy.max_attempts {
        match transport.send(report).await {
            Ok(receipt) => {
                let _ = log.append(&format!(
                    "delivery ok via {} on attempt {}: status={} body={}",
                    transport.name(),
                    attempt + 1,
                    receipt.status,
                    receipt.body_snippet
                ));
                tracing::info!(
                    attempt = attempt + 1,
                    status = receipt.status,
                    "report delivered"
                );
                return true;
            }
            Err(e) => {
                let _ = log.append(&format!("delivery attempt {} failed: {e:#}", attempt + 1));
                tracing::warn!(attempt = attempt + 1, "delivery attempt failed: {e:#}");
                if attempt + 1 < policy.max_attempts {
                    tokio::time::sleep(policy.backoff(attempt)).await;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use autograde_core::keyfile::AnswerKey;
    use autograde_core::traits::DeliveryReceipt;

    use crate::error::DeliveryError;
    use crate::mock::MockTransport;

    fn empty_report() -> GradeReport {
        GradeReport::grade("CyberPlayer", &BTreeMap::new(), &AnswerKey::default(), 10)
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base: 2,
            unit: Duration::ZERO,
        }
    }

    fn transient(status: u16) -> anyhow::Error {
        DeliveryError::HttpStatus {
            status,
            body: "try later".to_string(),
        }
        .into()
    }

    fn test_log() -> (tempfile::TempDir, RunLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("run.log"));
        (dir, log)
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn first_attempt_success() {
        let (_dir, log) = test_log();
        let transport = MockTransport::accepting();

        let sent = deliver_with_retry(&transport, &empty_report(), &fast_policy(), &log).await;

        assert!(sent);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn succeeds_on_third_attempt() {
        let (_dir, log) = test_log();
        let transport = MockTransport::new(vec![
            Err(transient(502)),
            Err(transient(502)),
            Ok(DeliveryReceipt {
                status: 200,
                body_snippet: "recorded".to_string(),
            }),
        ]);

        let sent = deliver_with_retry(&transport, &empty_report(), &fast_policy(), &log).await;

        assert!(sent);
        assert_eq!(transport.call_count(), 3);

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("delivery attempt 1 failed"));
        assert!(lines[1].contains("delivery attempt 2 failed"));
        assert!(lines[2].contains("delivery ok via mock on attempt 3"));
        assert!(lines[2].contains("status=200"));
    }

    #[tokio::test]
    async fn exhausts_attempts_and_reports_failure() {
        let (_dir, log) = test_log();
        let transport = MockTransport::new(vec![
            Err(transient(500)),
            Err(transient(500)),
            Err(transient(500)),
        ]);

        let sent = deliver_with_retry(&transport, &empty_report(), &fast_policy(), &log).await;

        assert!(!sent);
        assert_eq!(transport.call_count(), 3);

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content
            .lines()
            .all(|line| line.contains("failed") && line.contains("500")));
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_between_attempts_only() {
        let (_dir, log) = test_log();
        let transport = MockTransport::new(vec![
            Err(transient(500)),
            Err(transient(500)),
            Err(transient(500)),
        ]);
        let policy = RetryPolicy {
            max_attempts: 3,
            base: 2,
            unit: Duration::from_secs(1),
        };

        let start = tokio::time::Instant::now();
        let sent = deliver_with_retry(&transport, &empty_report(), &policy, &log).await;

        assert!(!sent);
        // 1s after attempt 1, 2s after attempt 2, nothing after attempt 3.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }
}
