//! Daemon command handler

use crate::config::Config;
use crate::db::Store;
use crate::parser::VersionResolver;
use crate::services::{ReconcileService, Scheduler, SeaOrmReconcileService};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

pub async fn cmd_daemon(config: &Config) -> anyhow::Result<()> {
    info!(
        "Reparr v{} starting in daemon mode...",
        env!("CARGO_PKG_VERSION")
    );

    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    store.ping().await?;

    let resolver = VersionResolver::from_config(&config.parsing);
    let service: Arc<dyn ReconcileService> =
        Arc::new(SeaOrmReconcileService::new(store, resolver));

    let scheduler = Arc::new(Scheduler::new(service, config.scheduler.clone()));

    let scheduler_handle = {
        let sched = Arc::clone(&scheduler);
        tokio::spawn(async move {
            if let Err(e) = sched.start().await {
                error!("Scheduler error: {}", e);
            }
        })
    };

    info!("Daemon running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    scheduler.stop().await;
    scheduler_handle.abort();
    info!("Daemon stopped");

    Ok(())
}
