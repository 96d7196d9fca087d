//! HTTP collector client.

use async_trait::async_trait;
use tracing::instrument;

use autograde_core::report::GradeReport;
use autograde_core::traits::{snippet, DeliveryReceipt, ReportTransport};

use crate::error::DeliveryError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// POSTs grade reports as JSON to the configured collector endpoint.
pub struct HttpCollector {
    endpoint: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpCollector {
    pub fn new(endpoint: &str, timeout_secs: Option<u64>) -> Self {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            endpoint: endpoint.to_string(),
            timeout_secs,
            client,
        }
    }
}

#[async_trait]
impl ReportTransport for HttpCollector {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, report), fields(endpoint = %self.endpoint))]
    async fn send(&self, report: &GradeReport) -> anyhow::Result<DeliveryReceipt> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(report)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout(self.timeout_secs)
                } else {
                    DeliveryError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if !(200..300).contains(&status) {
            return Err(DeliveryError::HttpStatus {
                status,
                body: snippet(&body),
            }
            .into());
        }

        Ok(DeliveryReceipt {
            status,
            body_snippet: snippet(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use autograde_core::keyfile::AnswerKey;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_report() -> GradeReport {
        let (key, _) = AnswerKey::build("1) Han Shot First\n", (1..=5).map(|q| q.to_string()));
        let mut answers = BTreeMap::new();
        for q in 1..=5 {
            answers.insert(q.to_string(), String::new());
        }
        answers.insert("1".to_string(), "Han Shot First".to_string());
        GradeReport::grade("CyberPlayer", &answers, &key, 10)
    }

    #[tokio::test]
    async fn accepted_report_yields_receipt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "player": "CyberPlayer",
                "score": 10,
                "max_score": 50,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("recorded"))
            .expect(1)
            .mount(&server)
            .await;

        let collector = HttpCollector::new(&format!("{}/submit", server.uri()), None);
        let receipt = collector.send(&sample_report()).await.unwrap();

        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.body_snippet, "recorded");
    }

    #[tokio::test]
    async fn non_2xx_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let collector = HttpCollector::new(&server.uri(), None);
        let err = collector.send(&sample_report()).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("503"), "unexpected error: {msg}");
        assert!(msg.contains("maintenance"));
    }

    #[tokio::test]
    async fn unreachable_collector_is_a_network_error() {
        // Nothing listens on the reserved port 1.
        let collector = HttpCollector::new("http://127.0.0.1:1/submit", Some(1));
        let err = collector.send(&sample_report()).await.unwrap_err();

        assert!(
            err.to_string().contains("network error") || err.to_string().contains("timed out"),
            "unexpected error: {err:#}"
        );
    }
}
