use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A discussion thread
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ForumPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub branch: Option<String>,
    pub subject: Option<String>,
    pub upvotes: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reply within a thread
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ForumReply {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A thread with its replies, oldest reply first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ForumThread {
    #[serde(flatten)]
    pub post: ForumPost,
    pub replies: Vec<ForumReply>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000, message = "Body must be between 1 and 10000 characters"))]
    pub body: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub branch: Option<String>,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(min = 1, max = 5000, message = "Reply must be between 1 and 5000 characters"))]
    pub body: String,
}

/// Store input for a new thread
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub branch: Option<String>,
    pub subject: Option<String>,
}

/// Filter for listing threads
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub branch: Option<String>,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl PostFilter {
    /// Branch filter is case-insensitive.
    pub fn matches(&self, post: &ForumPost) -> bool {
        match (&self.branch, &post.branch) {
            (None, _) => true,
            (Some(want), Some(have)) => want.trim().eq_ignore_ascii_case(have.trim()),
            (Some(_), None) => false,
        }
    }
}
