use adhyayan_core::models::{NewUser, UpdateProfileRequest, User};
use adhyayan_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::traits::UserStore;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, branch, year, points, created_at, updated_at";

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for UserRepository {
    #[tracing::instrument(skip(self, user), fields(db.table = "users", db.operation = "insert"))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (name, email, password_hash, role, branch, year)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<Postgres, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(&user.branch)
            .bind(&user.year)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if duplicate {
                    AppError::Conflict("An account with this email already exists".to_string())
                } else {
                    AppError::from(e)
                }
            })
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<Postgres, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self, email), fields(db.table = "users", db.operation = "select"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<Postgres, User>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self, update), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                branch = COALESCE($3, branch),
                year = COALESCE($4, year),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let user = sqlx::query_as::<Postgres, User>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(&update.branch)
            .bind(&update.year)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    async fn add_points(&self, id: Uuid, delta: i64) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET points = points + $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<Postgres, User>(&sql)
            .bind(id)
            .bind(delta)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    async fn leaderboard(&self, branch: Option<&str>, limit: i64) -> Result<Vec<User>, AppError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM users
            WHERE ($1::text IS NULL OR LOWER(branch) = LOWER($1))
            ORDER BY points DESC, name ASC
            LIMIT $2
            "#,
            USER_COLUMNS
        );

        let users = sqlx::query_as::<Postgres, User>(&sql)
            .bind(branch.map(str::trim))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
