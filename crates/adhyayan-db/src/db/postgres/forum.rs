use adhyayan_core::models::{ForumPost, ForumReply, NewPost, PostFilter};
use adhyayan_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::traits::ForumStore;

const POST_COLUMNS: &str =
    "id, author_id, title, body, branch, subject, upvotes, reply_count, created_at, updated_at";

/// Repository for forum threads and replies
#[derive(Clone)]
pub struct ForumRepository {
    pool: PgPool,
}

impl ForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ForumStore for ForumRepository {
    #[tracing::instrument(skip(self, post), fields(db.table = "forum_posts", db.operation = "insert"))]
    async fn create_post(&self, post: NewPost) -> Result<ForumPost, AppError> {
        let sql = format!(
            r#"
            INSERT INTO forum_posts (author_id, title, body, branch, subject)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            POST_COLUMNS
        );

        let created = sqlx::query_as::<Postgres, ForumPost>(&sql)
            .bind(post.author_id)
            .bind(&post.title)
            .bind(&post.body)
            .bind(&post.branch)
            .bind(&post.subject)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "forum_posts", db.operation = "select", db.record_id = %id))]
    async fn get_post(&self, id: Uuid) -> Result<Option<ForumPost>, AppError> {
        let sql = format!("SELECT {} FROM forum_posts WHERE id = $1", POST_COLUMNS);
        let post = sqlx::query_as::<Postgres, ForumPost>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    #[tracing::instrument(skip(self), fields(db.table = "forum_posts", db.operation = "select"))]
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<ForumPost>, AppError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM forum_posts
            WHERE ($1::text IS NULL OR LOWER(branch) = LOWER($1))
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            POST_COLUMNS
        );

        let posts = sqlx::query_as::<Postgres, ForumPost>(&sql)
            .bind(filter.branch.as_deref().map(str::trim))
            .bind(filter.limit)
            .bind(filter.offset.max(0))
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    #[tracing::instrument(skip(self, body), fields(db.table = "forum_replies", db.operation = "insert"))]
    async fn add_reply(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: String,
    ) -> Result<Option<ForumReply>, AppError> {
        let mut tx = self.pool.begin().await?;

        let bumped = sqlx::query(
            "UPDATE forum_posts SET reply_count = reply_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        if bumped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let reply = sqlx::query_as::<Postgres, ForumReply>(
            r#"
            INSERT INTO forum_replies (post_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, author_id, body, created_at
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(&body)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(reply))
    }

    #[tracing::instrument(skip(self), fields(db.table = "forum_replies", db.operation = "select"))]
    async fn list_replies(&self, post_id: Uuid) -> Result<Vec<ForumReply>, AppError> {
        let replies = sqlx::query_as::<Postgres, ForumReply>(
            r#"
            SELECT id, post_id, author_id, body, created_at
            FROM forum_replies
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(replies)
    }

    #[tracing::instrument(skip(self), fields(db.table = "forum_posts", db.operation = "update", db.record_id = %post_id))]
    async fn upvote(&self, post_id: Uuid) -> Result<Option<ForumPost>, AppError> {
        let sql = format!(
            "UPDATE forum_posts SET upvotes = upvotes + 1 WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        );
        let post = sqlx::query_as::<Postgres, ForumPost>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    #[tracing::instrument(skip(self), fields(db.table = "forum_posts", db.operation = "delete", db.record_id = %id))]
    async fn delete_post(&self, id: Uuid) -> Result<bool, AppError> {
        // Replies go with the post (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM forum_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
