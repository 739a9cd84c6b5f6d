use adhyayan_core::models::{
    Content, ContentFilter, ContentStats, ForumPost, ForumReply, NewContent, NewPost, NewUser,
    PostFilter, StatusChange, UpdateProfileRequest, User,
};
use adhyayan_core::AppError;
use uuid::Uuid;

/// Uploaded study material
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Connectivity check used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    /// Insert a new upload with status `pending`.
    async fn create(&self, content: NewContent) -> Result<Content, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Content>, AppError>;

    /// Items matching `filter`, newest first. A `None` limit returns every match.
    async fn list(&self, filter: &ContentFilter) -> Result<Vec<Content>, AppError>;

    /// Apply a review outcome if, and only if, the item is still in
    /// `change.expected`. Returns `None` when the item is missing or was
    /// already moved by someone else.
    async fn set_status(&self, change: StatusChange) -> Result<Option<Content>, AppError>;

    async fn increment_views(&self, id: Uuid) -> Result<Option<Content>, AppError>;

    async fn increment_downloads(&self, id: Uuid) -> Result<Option<Content>, AppError>;

    /// Fold one rating into the running average.
    async fn add_rating(&self, id: Uuid, rating: i32) -> Result<Option<Content>, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn stats(&self) -> Result<ContentStats, AppError>;
}

/// Accounts and points
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Case-insensitive email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>, AppError>;

    async fn add_points(&self, id: Uuid, delta: i64) -> Result<Option<User>, AppError>;

    /// Users ordered by points descending, then name. `branch` matches
    /// case-insensitively.
    async fn leaderboard(&self, branch: Option<&str>, limit: i64) -> Result<Vec<User>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

/// Discussion threads and replies
#[async_trait::async_trait]
pub trait ForumStore: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<ForumPost, AppError>;

    async fn get_post(&self, id: Uuid) -> Result<Option<ForumPost>, AppError>;

    /// Newest first.
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<ForumPost>, AppError>;

    /// Returns `None` when the post does not exist.
    async fn add_reply(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: String,
    ) -> Result<Option<ForumReply>, AppError>;

    /// Oldest first.
    async fn list_replies(&self, post_id: Uuid) -> Result<Vec<ForumReply>, AppError>;

    async fn upvote(&self, post_id: Uuid) -> Result<Option<ForumPost>, AppError>;

    /// Deletes the post and its replies. Returns `false` when nothing was deleted.
    async fn delete_post(&self, id: Uuid) -> Result<bool, AppError>;
}
