use adhyayan_core::models::{
    Content, ContentFilter, ContentStats, ContentStatus, NewContent, StatusChange,
};
use adhyayan_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::traits::ContentStore;

const CONTENT_COLUMNS: &str = "id, title, description, content_type, file_url, video_url, \
     department, branch, year, subject, topic, uploader_id, status, rating, rating_count, \
     views, downloads, tags, reviewed_by, reviewed_at, rejection_reason, created_at, updated_at";

/// Repository for uploaded content
#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContentStore for ContentRepository {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, content), fields(db.table = "content", db.operation = "insert"))]
    async fn create(&self, content: NewContent) -> Result<Content, AppError> {
        let sql = format!(
            r#"
            INSERT INTO content (
                title, description, content_type, file_url, video_url,
                department, branch, year, subject, topic, uploader_id, tags
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        );

        let created = sqlx::query_as::<Postgres, Content>(&sql)
            .bind(&content.title)
            .bind(&content.description)
            .bind(content.content_type)
            .bind(&content.file_url)
            .bind(&content.video_url)
            .bind(&content.department)
            .bind(&content.branch)
            .bind(&content.year)
            .bind(&content.subject)
            .bind(&content.topic)
            .bind(content.uploader_id)
            .bind(&content.tags)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        let sql = format!("SELECT {} FROM content WHERE id = $1", CONTENT_COLUMNS);
        let content = sqlx::query_as::<Postgres, Content>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(content)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content", db.operation = "select"))]
    async fn list(&self, filter: &ContentFilter) -> Result<Vec<Content>, AppError> {
        // LIMIT NULL means no limit in PostgreSQL.
        let sql = format!(
            r#"
            SELECT {}
            FROM content
            WHERE ($1::content_status IS NULL OR status = $1)
              AND ($2::content_type IS NULL OR content_type = $2)
              AND ($3::uuid IS NULL OR uploader_id = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            CONTENT_COLUMNS
        );

        let items = sqlx::query_as::<Postgres, Content>(&sql)
            .bind(filter.status)
            .bind(filter.content_type)
            .bind(filter.uploader_id)
            .bind(filter.limit)
            .bind(filter.offset.max(0))
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    #[tracing::instrument(skip(self, change), fields(db.table = "content", db.operation = "update", db.record_id = %change.content_id))]
    async fn set_status(&self, change: StatusChange) -> Result<Option<Content>, AppError> {
        let sql = format!(
            r#"
            UPDATE content
            SET status = $2, reviewed_by = $3, reviewed_at = NOW(),
                rejection_reason = $4, updated_at = NOW()
            WHERE id = $1 AND status = $5
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        );

        let updated = sqlx::query_as::<Postgres, Content>(&sql)
            .bind(change.content_id)
            .bind(change.new_status)
            .bind(change.reviewer_id)
            .bind(&change.reason)
            .bind(change.expected)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content", db.operation = "update", db.record_id = %id))]
    async fn increment_views(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        let sql = format!(
            "UPDATE content SET views = views + 1 WHERE id = $1 RETURNING {}",
            CONTENT_COLUMNS
        );
        let updated = sqlx::query_as::<Postgres, Content>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content", db.operation = "update", db.record_id = %id))]
    async fn increment_downloads(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        let sql = format!(
            "UPDATE content SET downloads = downloads + 1 WHERE id = $1 RETURNING {}",
            CONTENT_COLUMNS
        );
        let updated = sqlx::query_as::<Postgres, Content>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content", db.operation = "update", db.record_id = %id))]
    async fn add_rating(&self, id: Uuid, rating: i32) -> Result<Option<Content>, AppError> {
        let sql = format!(
            r#"
            UPDATE content
            SET rating = (rating * rating_count + $2::double precision) / (rating_count + 1),
                rating_count = rating_count + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        );
        let updated = sqlx::query_as::<Postgres, Content>(&sql)
            .bind(id)
            .bind(rating as f64)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content", db.operation = "select"))]
    async fn stats(&self) -> Result<ContentStats, AppError> {
        let rows = sqlx::query_as::<Postgres, (ContentStatus, i64)>(
            "SELECT status, COUNT(*) FROM content GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut stats = ContentStats::default();
        for (status, count) in rows {
            match status {
                ContentStatus::Pending => stats.pending = count,
                ContentStatus::Approved => stats.approved = count,
                ContentStatus::Rejected => stats.rejected = count,
            }
        }
        Ok(stats)
    }
}
