//! Runtime configuration.
//!
//! Every path, endpoint, and point value flows through [`AutogradeConfig`]
//! so tests can substitute temp locations without touching durable paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level autograde configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutogradeConfig {
    /// Identity reported to the collector.
    #[serde(default = "default_player")]
    pub player: String,
    /// Collector endpoint receiving grade reports.
    #[serde(default = "default_collector_url")]
    pub collector_url: String,
    /// The answer-key digest file written by keygen and read by grade.
    #[serde(default = "default_answer_key_path")]
    pub answer_key_path: PathBuf,
    /// Submission locations, checked in priority order.
    #[serde(default = "default_submission_paths")]
    pub submission_paths: Vec<PathBuf>,
    /// Append-only run log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Points awarded per correct question.
    #[serde(default = "default_points")]
    pub points_per_question: u32,
    /// Number of graded questions.
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    /// Per-attempt delivery timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Delivery attempts before giving up.
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,
    /// Exponential backoff base.
    #[serde(default = "default_backoff_base")]
    pub backoff_base: u32,
    /// Backoff time unit in milliseconds.
    #[serde(default = "default_backoff_unit")]
    pub backoff_unit_ms: u64,
}

fn default_player() -> String {
    "CyberPlayer".to_string()
}
fn default_collector_url() -> String {
    "https://example-leaderboard.example.org/submit".to_string()
}
fn default_answer_key_path() -> PathBuf {
    PathBuf::from("/opt/autograde/answer_hashes.json")
}
fn default_submission_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/home/CyberPlayer/Desktop/answers.txt"),
        PathBuf::from("/home/CyberPlayer/Desktop/StartHere.txt"),
    ]
}
fn default_log_path() -> PathBuf {
    PathBuf::from("/var/log/autograde.log")
}
fn default_points() -> u32 {
    10
}
fn default_question_count() -> u32 {
    5
}
fn default_timeout() -> u64 {
    10
}
fn default_attempts() -> u32 {
    3
}
fn default_backoff_base() -> u32 {
    2
}
fn default_backoff_unit() -> u64 {
    1000
}

impl Default for AutogradeConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
            collector_url: default_collector_url(),
            answer_key_path: default_answer_key_path(),
            submission_paths: default_submission_paths(),
            log_path: default_log_path(),
            points_per_question: default_points(),
            question_count: default_question_count(),
            request_timeout_secs: default_timeout(),
            max_attempts: default_attempts(),
            backoff_base: default_backoff_base(),
            backoff_unit_ms: default_backoff_unit(),
        }
    }
}

impl AutogradeConfig {
    /// Question ids `"1".."question_count"` in grading order.
    pub fn question_ids(&self) -> impl Iterator<Item = String> {
        (1..=self.question_count).map(|q| q.to_string())
    }

    /// Maximum achievable score.
    pub fn max_score(&self) -> u32 {
        self.points_per_question * self.question_count
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `autograde.toml` in the current directory
/// 2. `/etc/autograde/config.toml`
///
/// Environment overrides: `AUTOGRADE_COLLECTOR_URL`, `AUTOGRADE_PLAYER`.
pub fn load_config() -> Result<AutogradeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AutogradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("autograde.toml");
        let system = PathBuf::from("/etc/autograde/config.toml");
        if local.exists() {
            Some(local)
        } else if system.exists() {
            Some(system)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AutogradeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AutogradeConfig::default(),
    };

    if let Ok(url) = std::env::var("AUTOGRADE_COLLECTOR_URL") {
        config.collector_url = url;
    }
    if let Ok(player) = std::env::var("AUTOGRADE_PLAYER") {
        config.player = player;
    }

    Ok(config)
}
