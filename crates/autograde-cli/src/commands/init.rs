//! The `autograde init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("autograde.toml").exists() {
        println!("autograde.toml already exists, skipping.");
    } else {
        std::fs::write("autograde.toml", SAMPLE_CONFIG)?;
        println!("Created autograde.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit autograde.toml with your collector endpoint and paths");
    println!("  2. Run: autograde keygen /path/to/instructor_answers.txt");
    println!("  3. Schedule: autograde grade (systemd timer or cron)");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# autograde configuration

player = "CyberPlayer"
collector_url = "https://example-leaderboard.example.org/submit"
answer_key_path = "/opt/autograde/answer_hashes.json"
submission_paths = [
    "/home/CyberPlayer/Desktop/answers.txt",
    "/home/CyberPlayer/Desktop/StartHere.txt",
]
log_path = "/var/log/autograde.log"
points_per_question = 10
question_count = 5
request_timeout_secs = 10
max_attempts = 3
backoff_base = 2
backoff_unit_ms = 1000
"#;
