//! Report command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::media::MediaState;
use crate::parser::VersionResolver;
use crate::services::{ReconcileService, SeaOrmReconcileService};

pub async fn cmd_report(
    config: &Config,
    unclassified: bool,
    page: u64,
    limit: u64,
    json: bool,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let resolver = VersionResolver::from_config(&config.parsing);
    let service = SeaOrmReconcileService::new(store.clone(), resolver);

    let rows = service.report(unclassified, page, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        if unclassified {
            println!("No unclassified records on page {page}.");
        } else {
            println!("No collected records on page {page}.");
        }
        return Ok(());
    }

    let heading = if unclassified {
        "Unclassified records"
    } else {
        "Collected records"
    };
    println!("{} (page {}, {} shown)", heading, page, rows.len());
    println!("{:-<70}", "");

    for row in &rows {
        let marker = if row.has_drift() { "*" } else { " " };
        println!("{} #{} {}", marker, row.id, row.title);
        println!(
            "    file: {}",
            row.filled_by_file.as_deref().unwrap_or("(none)")
        );
        println!(
            "    version: {} | resolved: {}",
            row.stored_version.as_deref().unwrap_or("(none)"),
            row.resolved_version
        );
    }

    let total = store.count_by_state(MediaState::Collected).await?;

    println!();
    println!("Total collected records: {total}");
    println!("Legend: * stored version disagrees with the filename");
    println!("Apply corrections with: reparr reconcile");

    Ok(())
}
