use crate::models::media::{MediaRecord, MediaState};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use crate::entities::reconcile_runs::Model as ReconcileRun;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn media_repo(&self) -> repositories::media::MediaRepository {
        repositories::media::MediaRepository::new(self.conn.clone())
    }

    fn runs_repo(&self) -> repositories::runs::RunRepository {
        repositories::runs::RunRepository::new(self.conn.clone())
    }

    pub async fn insert_media(
        &self,
        title: &str,
        filled_by_file: Option<&str>,
        version: Option<&str>,
        state: MediaState,
    ) -> Result<i64> {
        self.media_repo()
            .insert(title, filled_by_file, version, state)
            .await
    }

    pub async fn get_media(&self, id: i64) -> Result<Option<MediaRecord>> {
        self.media_repo().get(id).await
    }

    pub async fn list_collected(&self) -> Result<Vec<MediaRecord>> {
        self.media_repo().list_collected().await
    }

    pub async fn list_collected_page(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<MediaRecord>> {
        self.media_repo().list_collected_page(page, page_size).await
    }

    pub async fn count_by_state(&self, state: MediaState) -> Result<u64> {
        self.media_repo().count_by_state(state).await
    }

    pub async fn update_media_version(&self, id: i64, version: &str) -> Result<()> {
        self.media_repo().update_version(id, version).await
    }

    pub async fn record_run(
        &self,
        started_at: &str,
        finished_at: &str,
        dry_run: bool,
        examined: u64,
        updated: u64,
        failed: u64,
    ) -> Result<()> {
        self.runs_repo()
            .record(started_at, finished_at, dry_run, examined, updated, failed)
            .await
    }

    pub async fn recent_runs(&self, limit: u64) -> Result<Vec<ReconcileRun>> {
        self.runs_repo().recent(limit).await
    }
}
