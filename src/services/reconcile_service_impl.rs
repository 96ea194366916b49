//! `SeaORM` implementation of the [`ReconcileService`] trait.

use crate::db::Store;
use crate::parser::VersionResolver;
use crate::services::reconcile_service::{
    ReconcileError, ReconcileService, ReconcileSummary, ReportRow, VersionChange,
};
use tracing::{info, warn};

/// SeaORM-backed reconciliation over the `media_items` table.
pub struct SeaOrmReconcileService {
    store: Store,
    resolver: VersionResolver,
}

impl SeaOrmReconcileService {
    #[must_use]
    pub const fn new(store: Store, resolver: VersionResolver) -> Self {
        Self { store, resolver }
    }

    #[must_use]
    pub const fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    fn to_report_row(&self, record: crate::models::media::MediaRecord) -> ReportRow {
        let resolved_version = self
            .resolver
            .resolve(record.filled_by_file.as_deref())
            .to_string();

        ReportRow {
            id: record.id,
            title: record.title,
            filled_by_file: record.filled_by_file,
            stored_version: record.version,
            resolved_version,
        }
    }
}

#[async_trait::async_trait]
impl ReconcileService for SeaOrmReconcileService {
    async fn reconcile(&self, dry_run: bool) -> Result<ReconcileSummary, ReconcileError> {
        let started_at = chrono::Utc::now().to_rfc3339();

        // Failing to read the batch at all is a hard error; nothing has
        // been touched yet.
        let records = self
            .store
            .list_collected()
            .await
            .map_err(|e| ReconcileError::Database(e.to_string()))?;

        let mut summary = ReconcileSummary::default();

        for record in records {
            if !record.is_collected() {
                continue;
            }
            summary.examined += 1;

            let Some(file) = record
                .filled_by_file
                .as_deref()
                .filter(|f| !f.is_empty())
            else {
                continue;
            };

            let resolved = self.resolver.resolve(Some(file));
            if record.version.as_deref() == Some(resolved) {
                continue;
            }

            if !dry_run {
                if let Err(e) = self.store.update_media_version(record.id, resolved).await {
                    warn!(
                        media_id = record.id,
                        error = %e,
                        "Failed to persist resolved version, skipping record"
                    );
                    summary.failed += 1;
                    continue;
                }
            }

            summary.updated += 1;
            summary.changes.push(VersionChange {
                id: record.id,
                title: record.title,
                stored: record.version,
                resolved: resolved.to_string(),
            });
        }

        let finished_at = chrono::Utc::now().to_rfc3339();

        if let Err(e) = self
            .store
            .record_run(
                &started_at,
                &finished_at,
                dry_run,
                summary.examined,
                summary.updated,
                summary.failed,
            )
            .await
        {
            warn!(error = %e, "Failed to record reconcile run");
        }

        info!(
            examined = summary.examined,
            updated = summary.updated,
            failed = summary.failed,
            dry_run,
            "Reconcile pass finished"
        );

        Ok(summary)
    }

    async fn report(
        &self,
        unclassified_only: bool,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<ReportRow>, ReconcileError> {
        if unclassified_only {
            // The unclassified filter has to see every record before
            // pagination, otherwise page boundaries shift as records get
            // classified.
            let records = self
                .store
                .list_collected()
                .await
                .map_err(|e| ReconcileError::Database(e.to_string()))?;

            let start = usize::try_from(page.saturating_sub(1).saturating_mul(page_size))
                .unwrap_or(usize::MAX);
            let take = usize::try_from(page_size).unwrap_or(usize::MAX);

            let rows = records
                .into_iter()
                .filter(|record| match record.filled_by_file.as_deref() {
                    Some(file) if !file.is_empty() => !self.resolver.matches_any(file),
                    _ => true,
                })
                .skip(start)
                .take(take)
                .map(|record| self.to_report_row(record))
                .collect();

            return Ok(rows);
        }

        let records = self
            .store
            .list_collected_page(page, page_size)
            .await
            .map_err(|e| ReconcileError::Database(e.to_string()))?;

        Ok(records
            .into_iter()
            .map(|record| self.to_report_row(record))
            .collect())
    }
}
