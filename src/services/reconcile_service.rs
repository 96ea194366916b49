//! Domain service for version reconciliation.
//!
//! The service re-resolves every collected record's stored filename against
//! the configured version rules and corrects drift between the stored and
//! resolved version. The API layer for this tool is the CLI; all logic lives
//! here so it can be driven and tested without it.

use serde::Serialize;
use thiserror::Error;

/// Domain errors for reconciliation operations.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<sea_orm::DbErr> for ReconcileError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReconcileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// One version correction, applied or pending (dry run).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionChange {
    pub id: i64,
    pub title: String,
    pub stored: Option<String>,
    pub resolved: String,
}

/// Outcome of a reconciliation pass.
///
/// `updated` counts records actually written (or, in a dry run, records that
/// would be written). A record whose resolution already agrees with its
/// stored version is examined but never counted as updated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileSummary {
    pub examined: u64,
    pub updated: u64,
    pub failed: u64,
    pub changes: Vec<VersionChange>,
}

/// One row of the read-only reconciliation report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub id: i64,
    pub title: String,
    pub filled_by_file: Option<String>,
    pub stored_version: Option<String>,
    pub resolved_version: String,
}

impl ReportRow {
    /// True when stored and resolved versions disagree.
    #[must_use]
    pub fn has_drift(&self) -> bool {
        self.stored_version.as_deref() != Some(self.resolved_version.as_str())
    }
}

#[async_trait::async_trait]
pub trait ReconcileService: Send + Sync {
    /// Runs one reconciliation pass over all collected records.
    ///
    /// With `dry_run` set, computes the same diff without persisting
    /// anything. A per-record persistence failure is tallied and skipped;
    /// only a failure to read the batch at all is an error.
    async fn reconcile(&self, dry_run: bool) -> Result<ReconcileSummary, ReconcileError>;

    /// One page of collected records with their resolved versions.
    ///
    /// With `unclassified_only` set, restricts the report to records whose
    /// filename matches no configured rule (records without a filename
    /// included); pagination then applies to the filtered set.
    async fn report(
        &self,
        unclassified_only: bool,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<ReportRow>, ReconcileError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_row_drift() {
        let row = ReportRow {
            id: 1,
            title: "Show".to_string(),
            filled_by_file: Some("Show.1080p.mkv".to_string()),
            stored_version: Some("4K".to_string()),
            resolved_version: "1080p".to_string(),
        };
        assert!(row.has_drift());

        let agreeing = ReportRow {
            stored_version: Some("1080p".to_string()),
            ..row.clone()
        };
        assert!(!agreeing.has_drift());

        let missing = ReportRow {
            stored_version: None,
            ..row
        };
        assert!(missing.has_drift());
    }
}
