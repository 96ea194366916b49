use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::config::SchedulerConfig;
use crate::services::ReconcileService;

/// Drives periodic reconciliation passes in daemon mode.
pub struct Scheduler {
    service: Arc<dyn ReconcileService>,
    config: SchedulerConfig,
    running: Arc<RwLock<bool>>,
}

impl Scheduler {
    pub fn new(service: Arc<dyn ReconcileService>, config: SchedulerConfig) -> Self {
        Self {
            service,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Scheduler is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;
        info!("Starting background scheduler");

        if let Some(cron_expr) = &self.config.cron_expression {
            self.run_with_cron(cron_expr).await
        } else {
            self.run_with_interval().await
        }
    }

    async fn run_with_cron(&self, cron_expr: &str) -> Result<()> {
        let mut sched = JobScheduler::new().await?;

        let service = Arc::clone(&self.service);
        let running = Arc::clone(&self.running);

        let job = Job::new_async(cron_expr, move |_uuid, _lock| {
            let service = Arc::clone(&service);
            let running = Arc::clone(&running);
            Box::pin(async move {
                if !*running.read().await {
                    return;
                }
                run_pass(service.as_ref()).await;
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;

        info!("Scheduler running with cron: {}", cron_expr);

        loop {
            if !*self.running.read().await {
                break;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        sched.shutdown().await?;
        Ok(())
    }

    async fn run_with_interval(&self) -> Result<()> {
        let interval_mins = self.config.check_interval_minutes.max(1);

        info!("Scheduler running: reconcile every {}m", interval_mins);

        let mut check_interval = interval(Duration::from_secs(u64::from(interval_mins) * 60));

        loop {
            check_interval.tick().await;
            if !*self.running.read().await {
                break;
            }
            run_pass(self.service.as_ref()).await;
        }

        Ok(())
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}

async fn run_pass(service: &dyn ReconcileService) {
    let start = std::time::Instant::now();
    info!(
        event = "job_started",
        job_name = "reconcile_versions",
        "Starting scheduled reconcile pass"
    );

    match service.reconcile(false).await {
        Ok(summary) => info!(
            event = "job_finished",
            job_name = "reconcile_versions",
            examined = summary.examined,
            updated = summary.updated,
            failed = summary.failed,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Scheduled reconcile pass finished"
        ),
        Err(e) => error!(
            event = "job_failed",
            job_name = "reconcile_versions",
            error = %e,
            "Scheduled reconcile pass failed"
        ),
    }
}
