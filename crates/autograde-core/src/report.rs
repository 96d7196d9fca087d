//! Grade report types — the per-run scoring record sent to the collector.
//!
//! Serde field names here are the collector wire format; renaming a field
//! changes the protocol.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::sha256_hex;
use crate::keyfile::AnswerKey;
use crate::normalize::normalize;

/// Per-question grading record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    /// The answer exactly as extracted from the submission.
    pub student_raw: String,
    /// The normalized form that was digested.
    pub normalized: String,
    /// Digest of the normalized submitted answer.
    pub student_sha256: String,
    /// Digest from the answer key (empty when the key lacks the question).
    pub expected_sha256: String,
    /// Exact, case-sensitive digest match.
    pub correct: bool,
    /// Points awarded: zero or the per-question maximum.
    pub points: u32,
}

/// Aggregate grade report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    pub player: String,
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub max_score: u32,
    pub breakdown: BTreeMap<String, QuestionResult>,
}

impl GradeReport {
    /// Grade extracted answers against a key, stamping the report with the
    /// current UTC time.
    pub fn grade(
        player: &str,
        answers: &BTreeMap<String, String>,
        key: &AnswerKey,
        points_per_question: u32,
    ) -> Self {
        let mut breakdown = BTreeMap::new();
        let mut score = 0;

        for (id, raw) in answers {
            let normalized = normalize(raw);
            let student_sha256 = sha256_hex(&normalized);
            let expected_sha256 = key.expected(id).unwrap_or_default().to_string();
            let correct = student_sha256 == expected_sha256;
            let points = if correct { points_per_question } else { 0 };
            score += points;

            breakdown.insert(
                id.clone(),
                QuestionResult {
                    student_raw: raw.clone(),
                    normalized,
                    student_sha256,
                    expected_sha256,
                    correct,
                    points,
                },
            );
        }

        let max_score = points_per_question * breakdown.len() as u32;

        Self {
            player: player.to_string(),
            timestamp: Utc::now(),
            score,
            max_score,
            breakdown,
        }
    }
}
