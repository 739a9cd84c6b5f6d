use std::sync::Arc;

use adhyayan_core::models::{ForumPost, ForumReply, NewPost, PostFilter};
use adhyayan_core::AppError;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::paginate;
use crate::db::traits::ForumStore;

#[derive(Default)]
struct ForumData {
    posts: Vec<ForumPost>,
    replies: Vec<ForumReply>,
}

#[derive(Clone, Default)]
pub struct MemoryForumStore {
    data: Arc<RwLock<ForumData>>,
}

impl MemoryForumStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ForumStore for MemoryForumStore {
    async fn create_post(&self, post: NewPost) -> Result<ForumPost, AppError> {
        let now = Utc::now();
        let created = ForumPost {
            id: Uuid::new_v4(),
            author_id: post.author_id,
            title: post.title,
            body: post.body,
            branch: post.branch,
            subject: post.subject,
            upvotes: 0,
            reply_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.data.write().await.posts.push(created.clone());
        Ok(created)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<ForumPost>, AppError> {
        let data = self.data.read().await;
        Ok(data.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<ForumPost>, AppError> {
        let data = self.data.read().await;
        let matching = data.posts.iter().rev().filter(|p| filter.matches(p)).cloned();
        Ok(paginate(matching, filter.offset, filter.limit))
    }

    async fn add_reply(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: String,
    ) -> Result<Option<ForumReply>, AppError> {
        let mut data = self.data.write().await;
        let now = Utc::now();
        let Some(post) = data.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        post.reply_count += 1;
        post.updated_at = now;

        let reply = ForumReply {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            body,
            created_at: now,
        };
        data.replies.push(reply.clone());
        Ok(Some(reply))
    }

    async fn list_replies(&self, post_id: Uuid) -> Result<Vec<ForumReply>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .replies
            .iter()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn upvote(&self, post_id: Uuid) -> Result<Option<ForumPost>, AppError> {
        let mut data = self.data.write().await;
        let Some(post) = data.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        post.upvotes += 1;
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, AppError> {
        let mut data = self.data.write().await;
        let before = data.posts.len();
        data.posts.retain(|p| p.id != id);
        if data.posts.len() == before {
            return Ok(false);
        }
        data.replies.retain(|r| r.post_id != id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, branch: Option<&str>) -> NewPost {
        NewPost {
            author_id: Uuid::new_v4(),
            title: title.to_string(),
            body: "How do I prepare?".to_string(),
            branch: branch.map(str::to_string),
            subject: None,
        }
    }

    #[tokio::test]
    async fn test_replies_bump_count_and_cascade() {
        let store = MemoryForumStore::new();
        let thread = store.create_post(post("DBMS viva", Some("CSE"))).await.unwrap();

        let first = store
            .add_reply(thread.id, Uuid::new_v4(), "Revise normalization".to_string())
            .await
            .unwrap()
            .unwrap();
        store
            .add_reply(thread.id, Uuid::new_v4(), "And transactions".to_string())
            .await
            .unwrap();

        let stored = store.get_post(thread.id).await.unwrap().unwrap();
        assert_eq!(stored.reply_count, 2);

        let replies = store.list_replies(thread.id).await.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].id, first.id);

        assert!(store
            .add_reply(Uuid::new_v4(), Uuid::new_v4(), "lost".to_string())
            .await
            .unwrap()
            .is_none());

        assert!(store.delete_post(thread.id).await.unwrap());
        assert!(store.list_replies(thread.id).await.unwrap().is_empty());
        assert!(!store.delete_post(thread.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_posts_filters_by_branch() {
        let store = MemoryForumStore::new();
        store.create_post(post("one", Some("CSE"))).await.unwrap();
        store.create_post(post("two", Some("IT"))).await.unwrap();
        store.create_post(post("three", None)).await.unwrap();

        let all = store.list_posts(&PostFilter::default()).await.unwrap();
        assert_eq!(all[0].title, "three");
        assert_eq!(all.len(), 3);

        let cse = store
            .list_posts(&PostFilter {
                branch: Some("cse".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(cse.len(), 1);
        assert_eq!(cse[0].title, "one");
    }

    #[tokio::test]
    async fn test_upvote() {
        let store = MemoryForumStore::new();
        let thread = store.create_post(post("Maths 1 PYQs", None)).await.unwrap();
        store.upvote(thread.id).await.unwrap();
        let voted = store.upvote(thread.id).await.unwrap().unwrap();
        assert_eq!(voted.upvotes, 2);
        assert!(store.upvote(Uuid::new_v4()).await.unwrap().is_none());
    }
}
