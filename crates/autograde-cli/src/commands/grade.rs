//! The `autograde grade` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use uuid::Uuid;

use autograde_core::config::{load_config_from, AutogradeConfig};
use autograde_core::engine::GradingEngine;
use autograde_core::report::GradeReport;
use autograde_core::runlog::RunLog;
use autograde_delivery::{deliver_with_retry, HttpCollector, RetryPolicy};

pub async fn execute(config_path: Option<PathBuf>, offline: bool) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let log = RunLog::new(&config.log_path);
    let run_id = Uuid::new_v4();

    // The agent runs unattended under a timer, so everything below this
    // boundary ends up in the run log rather than on a terminal.
    if let Err(e) = grade_and_report(&config, &log, run_id, offline).await {
        let _ = log.append(&format!("run {run_id}: unexpected error: {e:#}"));
        tracing::error!("grading run {run_id} failed: {e:#}");
    }
    Ok(())
}

async fn grade_and_report(
    config: &AutogradeConfig,
    log: &RunLog,
    run_id: Uuid,
    offline: bool,
) -> Result<()> {
    let engine = GradingEngine::new(config.clone(), log.clone());

    let report = match engine.run() {
        Ok(report) => report,
        Err(e) if e.is_operational() => {
            // Already in the run log; the next scheduled run retries.
            tracing::warn!("run {run_id} skipped: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let _ = log.append(&format!(
        "run {run_id}: scored player {} score={}/{}",
        report.player, report.score, report.max_score
    ));
    print_breakdown(&report);

    if offline {
        println!("Offline mode: report not delivered.");
        return Ok(());
    }

    let collector = HttpCollector::new(&config.collector_url, Some(config.request_timeout_secs));
    let policy = RetryPolicy {
        max_attempts: config.max_attempts,
        base: config.backoff_base,
        unit: Duration::from_millis(config.backoff_unit_ms),
    };

    let sent = deliver_with_retry(&collector, &report, &policy, log).await;
    if !sent {
        let _ = log.append(&format!(
            "run {run_id}: failed to deliver report after retries"
        ));
    }
    Ok(())
}

fn print_breakdown(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Correct", "Points"]);

    for (id, question) in &report.breakdown {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(if question.correct { "yes" } else { "no" }),
            Cell::new(question.points),
        ]);
    }

    eprintln!("{table}");
    eprintln!("Score: {}/{}", report.score, report.max_score);
}
