use crate::entities::{media_items, prelude::*};
use crate::models::media::{MediaRecord, MediaState};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

/// Repository for media library records.
pub struct MediaRepository {
    conn: DatabaseConnection,
}

impl MediaRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: media_items::Model) -> MediaRecord {
        MediaRecord {
            id: m.id,
            title: m.title,
            filled_by_file: m.filled_by_file,
            version: m.version,
            state: m.state,
            added_at: m.added_at,
            last_updated: m.last_updated,
        }
    }

    pub async fn insert(
        &self,
        title: &str,
        filled_by_file: Option<&str>,
        version: Option<&str>,
        state: MediaState,
    ) -> Result<i64> {
        let active_model = media_items::ActiveModel {
            title: Set(title.to_string()),
            filled_by_file: Set(filled_by_file.map(str::to_string)),
            version: Set(version.map(str::to_string)),
            state: Set(state.as_str().to_string()),
            added_at: Set(chrono::Utc::now().to_rfc3339()),
            last_updated: Set(None),
            ..Default::default()
        };

        let res = MediaItems::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<MediaRecord>> {
        let row = MediaItems::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    /// All collected records, ordered by title ascending.
    pub async fn list_collected(&self) -> Result<Vec<MediaRecord>> {
        let rows = MediaItems::find()
            .filter(media_items::Column::State.eq(MediaState::Collected.as_str()))
            .order_by_asc(media_items::Column::Title)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// One page of collected records, ordered by title ascending. Pages are 1-based.
    pub async fn list_collected_page(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<MediaRecord>> {
        let paginator = MediaItems::find()
            .filter(media_items::Column::State.eq(MediaState::Collected.as_str()))
            .order_by_asc(media_items::Column::Title)
            .paginate(&self.conn, page_size);

        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn count_by_state(&self, state: MediaState) -> Result<u64> {
        let count = MediaItems::find()
            .filter(media_items::Column::State.eq(state.as_str()))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    /// Writes a new version onto a record. Errors when the record is gone.
    pub async fn update_version(&self, id: i64, version: &str) -> Result<()> {
        let res = MediaItems::update_many()
            .col_expr(
                media_items::Column::Version,
                sea_orm::sea_query::Expr::value(version),
            )
            .col_expr(
                media_items::Column::LastUpdated,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(media_items::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if res.rows_affected == 0 {
            anyhow::bail!("media item {id} not found");
        }

        debug!("Updated version for media item {}: {}", id, version);
        Ok(())
    }
}
