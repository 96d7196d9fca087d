//! Answer-key digest store.
//!
//! The key file maps question ids to SHA-256 digests of normalized
//! instructor answers: `{"1": {"sha256": "..."}}`. It is written once by
//! keygen, read on every grading run, and never contains a plaintext answer.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::digest::sha256_hex;
use crate::extract::{extract_answer, KEY_STRATEGIES};
use crate::normalize::normalize;

/// Reserved non-digest value stored when the instructor sheet has no answer
/// for a question. Exact hex comparison can never match it, so an empty
/// submitted answer cannot score against an absent reference.
pub const MISSING_REFERENCE: &str = "missing";

/// One key-file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// Lowercase hex SHA-256 of the normalized answer, or
    /// [`MISSING_REFERENCE`].
    pub sha256: String,
}

/// The on-disk digest mapping from question id to entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKey {
    pub entries: BTreeMap<String, KeyEntry>,
}

/// A warning raised while building a key.
#[derive(Debug, Clone)]
pub struct KeyWarning {
    /// The question id the warning is about.
    pub question: String,
    /// Warning message.
    pub message: String,
}

impl AnswerKey {
    /// Expected digest for a question, if the key carries one.
    pub fn expected(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|e| e.sha256.as_str())
    }

    /// Build a key from instructor document text.
    ///
    /// Instructor sheets use the single-line `N) answer` form only. Absent
    /// answers produce a warning and store [`MISSING_REFERENCE`] instead of
    /// any digest.
    pub fn build<I>(text: &str, ids: I) -> (Self, Vec<KeyWarning>)
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries = BTreeMap::new();
        let mut warnings = Vec::new();

        for id in ids {
            let raw = extract_answer(text, &id, KEY_STRATEGIES);
            let sha256 = if raw.is_empty() {
                warnings.push(KeyWarning {
                    question: id.clone(),
                    message: format!(
                        "no answer found for question {id}; storing missing-reference sentinel"
                    ),
                });
                MISSING_REFERENCE.to_string()
            } else {
                sha256_hex(&normalize(&raw))
            };
            entries.insert(id, KeyEntry { sha256 });
        }

        (Self { entries }, warnings)
    }

    /// Save as pretty JSON, creating parent directories and leaving the file
    /// world-readable.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize answer key")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write answer key to {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))
                .with_context(|| format!("failed to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    /// Load a key from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answer key from {}", path.display()))?;
        let key: AnswerKey =
            serde_json::from_str(&content).context("failed to parse answer key JSON")?;
        Ok(key)
    }
}
