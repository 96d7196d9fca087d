//! Grading engine — orchestrates one grading run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::AutogradeConfig;
use crate::error::GradeError;
use crate::extract::{extract_all, SUBMISSION_STRATEGIES};
use crate::keyfile::AnswerKey;
use crate::report::GradeReport;
use crate::runlog::RunLog;

/// One-shot grading engine.
///
/// Loads the answer key, locates and parses the submission, and produces a
/// [`GradeReport`]. Delivery is the caller's concern: a run that fails to
/// load its inputs never reaches the network.
pub struct GradingEngine {
    config: AutogradeConfig,
    log: RunLog,
}

impl GradingEngine {
    pub fn new(config: AutogradeConfig, log: RunLog) -> Self {
        Self { config, log }
    }

    /// First configured submission path that exists on disk.
    fn find_submission(&self) -> Option<PathBuf> {
        self.config
            .submission_paths
            .iter()
            .find(|p| p.is_file())
            .cloned()
    }

    /// Run one grading pass.
    pub fn run(&self) -> Result<GradeReport, GradeError> {
        if !self.config.answer_key_path.is_file() {
            let _ = self.log.append(&format!(
                "answer key file missing: {}",
                self.config.answer_key_path.display()
            ));
            return Err(GradeError::KeyMissing(self.config.answer_key_path.clone()));
        }
        let key =
            AnswerKey::load(&self.config.answer_key_path).map_err(GradeError::KeyUnreadable)?;

        let Some(submission) = self.find_submission() else {
            let _ = self.log.append("no submission document found; skipping run");
            return Err(GradeError::SubmissionMissing);
        };

        let text = std::fs::read_to_string(&submission).map_err(|source| {
            GradeError::SubmissionUnreadable {
                path: submission.clone(),
                source,
            }
        })?;

        let answers: BTreeMap<String, String> =
            extract_all(&text, self.config.question_ids(), SUBMISSION_STRATEGIES);

        let report = GradeReport::grade(
            &self.config.player,
            &answers,
            &key,
            self.config.points_per_question,
        );

        tracing::info!(
            score = report.score,
            max_score = report.max_score,
            submission = %submission.display(),
            "graded submission"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &std::path::Path) -> AutogradeConfig {
        AutogradeConfig {
            answer_key_path: dir.join("answer_hashes.json"),
            submission_paths: vec![dir.join("answers.txt"), dir.join("StartHere.txt")],
            log_path: dir.join("run.log"),
            ..AutogradeConfig::default()
        }
    }

    fn write_key(config: &AutogradeConfig) {
        let (key, _) = AnswerKey::build("1) Han Shot First\n2) 42\n", config.question_ids());
        key.save(&config.answer_key_path).unwrap();
    }

    #[test]
    fn missing_key_aborts_before_anything_else() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(&config.submission_paths[0], "1) Han Shot First\n").unwrap();

        let engine = GradingEngine::new(config.clone(), RunLog::new(&config.log_path));
        let err = engine.run().unwrap_err();

        assert!(matches!(err, GradeError::KeyMissing(_)));
        assert!(err.is_operational());
        let log = std::fs::read_to_string(&config.log_path).unwrap();
        assert!(log.contains("answer key file missing"));
    }

    #[test]
    fn missing_submission_aborts_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_key(&config);

        let engine = GradingEngine::new(config.clone(), RunLog::new(&config.log_path));
        let err = engine.run().unwrap_err();

        assert!(matches!(err, GradeError::SubmissionMissing));
        let log = std::fs::read_to_string(&config.log_path).unwrap();
        assert!(log.contains("no submission document found"));
    }

    #[test]
    fn grades_a_matching_submission() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_key(&config);
        std::fs::write(&config.submission_paths[0], "1) Han Shot First\n2) 42\n").unwrap();

        let engine = GradingEngine::new(config.clone(), RunLog::new(&config.log_path));
        let report = engine.run().unwrap();

        assert_eq!(report.score, 20);
        assert_eq!(report.max_score, 50);
        assert_eq!(report.player, "CyberPlayer");
    }

    #[test]
    fn first_submission_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_key(&config);
        std::fs::write(&config.submission_paths[0], "1) Han Shot First\n").unwrap();
        std::fs::write(&config.submission_paths[1], "1) wrong\n").unwrap();

        let engine = GradingEngine::new(config.clone(), RunLog::new(&config.log_path));
        let report = engine.run().unwrap();

        assert!(report.breakdown["1"].correct);
    }

    #[test]
    fn fallback_submission_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_key(&config);
        std::fs::write(&config.submission_paths[1], "2) 42\n").unwrap();

        let engine = GradingEngine::new(config.clone(), RunLog::new(&config.log_path));
        let report = engine.run().unwrap();

        assert_eq!(report.score, 10);
    }

    #[test]
    fn corrupt_key_is_not_operational() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(&config.answer_key_path, "this is not json").unwrap();
        std::fs::write(&config.submission_paths[0], "1) x\n").unwrap();

        let engine = GradingEngine::new(config.clone(), RunLog::new(&config.log_path));
        let err = engine.run().unwrap_err();

        assert!(matches!(err, GradeError::KeyUnreadable(_)));
        assert!(!err.is_operational());
    }
}
