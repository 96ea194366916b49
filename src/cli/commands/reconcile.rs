//! Reconcile command handler

use crate::config::Config;
use crate::db::Store;
use crate::parser::VersionResolver;
use crate::services::{ReconcileService, SeaOrmReconcileService};

pub async fn cmd_reconcile(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let resolver = VersionResolver::from_config(&config.parsing);
    let service = SeaOrmReconcileService::new(store, resolver);

    let summary = service.reconcile(dry_run).await?;

    if dry_run {
        println!("Dry run - nothing was written.");
        println!();
        if summary.changes.is_empty() {
            println!("All collected records already agree with their filenames.");
        } else {
            println!("Pending changes:");
            for change in &summary.changes {
                println!(
                    "  #{} {} : {} -> {}",
                    change.id,
                    change.title,
                    change.stored.as_deref().unwrap_or("(none)"),
                    change.resolved
                );
            }
        }
    } else {
        for change in &summary.changes {
            println!(
                "  #{} {} : {} -> {}",
                change.id,
                change.title,
                change.stored.as_deref().unwrap_or("(none)"),
                change.resolved
            );
        }
    }

    println!();
    println!("{:-<70}", "");
    println!("Reconcile complete!");
    println!("  Examined: {}", summary.examined);
    println!("  Updated:  {}", summary.updated);
    println!("  Failed:   {}", summary.failed);

    Ok(())
}
