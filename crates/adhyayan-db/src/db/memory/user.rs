use std::sync::Arc;

use adhyayan_core::models::{normalize_email, NewUser, UpdateProfileRequest, User};
use adhyayan_core::AppError;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::traits::UserStore;

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        let email = normalize_email(&user.email);
        if users.iter().any(|u| normalize_email(&u.email) == email) {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            branch: user.branch,
            year: user.year,
            points: 0,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| normalize_email(&u.email) == email)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(branch) = update.branch {
            user.branch = Some(branch);
        }
        if let Some(year) = update.year {
            user.year = Some(year);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn add_points(&self, id: Uuid, delta: i64) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.points += delta;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn leaderboard(&self, branch: Option<&str>, limit: i64) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        let branch = branch.map(|b| b.trim().to_lowercase());
        let mut ranked: Vec<User> = users
            .iter()
            .filter(|u| match (&branch, &u.branch) {
                (None, _) => true,
                (Some(want), Some(have)) => have.trim().to_lowercase() == *want,
                (Some(_), None) => false,
            })
            .cloned()
            .collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(limit.max(0) as usize);
        Ok(ranked)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.read().await.len() as i64)
    }
}
