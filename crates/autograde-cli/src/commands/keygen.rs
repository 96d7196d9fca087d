//! The `autograde keygen` command.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};

use autograde_core::config::load_config_from;
use autograde_core::keyfile::AnswerKey;

pub fn execute(
    instructor_file: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    if !instructor_file.is_file() {
        eprintln!("File not found: {}", instructor_file.display());
        process::exit(2);
    }

    let text = std::fs::read_to_string(&instructor_file).with_context(|| {
        format!(
            "failed to read instructor sheet: {}",
            instructor_file.display()
        )
    })?;

    let (key, warnings) = AnswerKey::build(&text, config.question_ids());
    for w in &warnings {
        eprintln!("Warning: {}", w.message);
        tracing::warn!(question = %w.question, "{}", w.message);
    }

    let out_path = output.unwrap_or(config.answer_key_path);
    key.save(&out_path)?;

    println!("Wrote hashes-only answer key to {}", out_path.display());
    Ok(())
}
