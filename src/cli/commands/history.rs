//! History command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let runs = store.recent_runs(limit).await?;

    if runs.is_empty() {
        println!("No reconcile runs recorded yet.");
        println!();
        println!("Run a pass with: reparr reconcile");
        return Ok(());
    }

    println!("Recent reconcile runs ({} shown)", runs.len());
    println!("{:-<70}", "");

    for run in runs {
        let mode = if run.dry_run { "dry-run" } else { "applied" };
        println!(
            "#{} {} [{}] examined: {} | updated: {} | failed: {}",
            run.id, run.started_at, mode, run.examined, run.updated, run.failed
        );
    }

    Ok(())
}
