use crate::entities::{prelude::*, reconcile_runs};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

/// Repository for the reconciliation audit trail.
pub struct RunRepository {
    conn: DatabaseConnection,
}

impl RunRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn record(
        &self,
        started_at: &str,
        finished_at: &str,
        dry_run: bool,
        examined: u64,
        updated: u64,
        failed: u64,
    ) -> Result<()> {
        let active_model = reconcile_runs::ActiveModel {
            started_at: Set(started_at.to_string()),
            finished_at: Set(finished_at.to_string()),
            dry_run: Set(dry_run),
            examined: Set(i64::try_from(examined).unwrap_or(i64::MAX)),
            updated: Set(i64::try_from(updated).unwrap_or(i64::MAX)),
            failed: Set(i64::try_from(failed).unwrap_or(i64::MAX)),
            ..Default::default()
        };

        ReconcileRuns::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<reconcile_runs::Model>> {
        let rows = ReconcileRuns::find()
            .order_by_desc(reconcile_runs::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
