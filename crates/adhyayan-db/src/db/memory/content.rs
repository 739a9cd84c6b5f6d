use std::sync::Arc;

use adhyayan_core::models::{
    next_rating, Content, ContentFilter, ContentStats, ContentStatus, NewContent, StatusChange,
};
use adhyayan_core::AppError;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::paginate;
use crate::db::traits::ContentStore;

/// Content kept in insertion order
#[derive(Clone, Default)]
pub struct MemoryContentStore {
    items: Arc<RwLock<Vec<Content>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> Option<Content>
    where
        F: FnOnce(&mut Content),
    {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|c| c.id == id)?;
        apply(item);
        Some(item.clone())
    }
}

#[async_trait::async_trait]
impl ContentStore for MemoryContentStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn create(&self, content: NewContent) -> Result<Content, AppError> {
        let now = Utc::now();
        let created = Content {
            id: Uuid::new_v4(),
            title: content.title,
            description: content.description,
            content_type: content.content_type,
            file_url: content.file_url,
            video_url: content.video_url,
            department: content.department,
            branch: content.branch,
            year: content.year,
            subject: content.subject,
            topic: content.topic,
            uploader_id: content.uploader_id,
            status: ContentStatus::Pending,
            rating: 0.0,
            rating_count: 0,
            views: 0,
            downloads: 0,
            tags: content.tags,
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };

        self.items.write().await.push(created.clone());
        tracing::debug!(content_id = %created.id, "Stored content in memory");
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, filter: &ContentFilter) -> Result<Vec<Content>, AppError> {
        let items = self.items.read().await;
        let matching = items.iter().rev().filter(|c| filter.matches(c)).cloned();
        Ok(paginate(matching, filter.offset, filter.limit))
    }

    async fn set_status(&self, change: StatusChange) -> Result<Option<Content>, AppError> {
        let mut items = self.items.write().await;
        let Some(item) = items
            .iter_mut()
            .find(|c| c.id == change.content_id && c.status == change.expected)
        else {
            return Ok(None);
        };

        let now = Utc::now();
        item.status = change.new_status;
        item.reviewed_by = Some(change.reviewer_id);
        item.reviewed_at = Some(now);
        item.rejection_reason = change.reason;
        item.updated_at = now;
        Ok(Some(item.clone()))
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        Ok(self.update(id, |c| c.views += 1).await)
    }

    async fn increment_downloads(&self, id: Uuid) -> Result<Option<Content>, AppError> {
        Ok(self.update(id, |c| c.downloads += 1).await)
    }

    async fn add_rating(&self, id: Uuid, rating: i32) -> Result<Option<Content>, AppError> {
        Ok(self
            .update(id, |c| {
                let (average, count) = next_rating(c.rating, c.rating_count, rating);
                c.rating = average;
                c.rating_count = count;
                c.updated_at = Utc::now();
            })
            .await)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|c| c.id != id);
        Ok(items.len() < before)
    }

    async fn stats(&self) -> Result<ContentStats, AppError> {
        let items = self.items.read().await;
        let mut stats = ContentStats::default();
        for item in items.iter() {
            match item.status {
                ContentStatus::Pending => stats.pending += 1,
                ContentStatus::Approved => stats.approved += 1,
                ContentStatus::Rejected => stats.rejected += 1,
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhyayan_core::models::ContentType;

    fn upload(title: &str, uploader_id: Uuid) -> NewContent {
        NewContent {
            title: title.to_string(),
            description: String::new(),
            content_type: ContentType::Note,
            file_url: Some("https://files.example.com/n.pdf".to_string()),
            video_url: None,
            department: "Engineering".to_string(),
            branch: "CSE".to_string(),
            year: "2".to_string(),
            subject: "DSA".to_string(),
            topic: None,
            uploader_id,
            tags: vec![],
        }
    }

    fn approve(id: Uuid, expected: ContentStatus) -> StatusChange {
        StatusChange {
            content_id: id,
            expected,
            new_status: ContentStatus::Approved,
            reviewer_id: Uuid::new_v4(),
            reason: None,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let store = MemoryContentStore::new();
        let created = store.create(upload("Trees", Uuid::new_v4())).await.unwrap();
        assert_eq!(created.status, ContentStatus::Pending);
        assert_eq!(store.get(created.id).await.unwrap().unwrap().title, "Trees");
    }

    #[tokio::test]
    async fn test_set_status_is_compare_and_set() {
        let store = MemoryContentStore::new();
        let created = store.create(upload("Graphs", Uuid::new_v4())).await.unwrap();

        let first = store
            .set_status(approve(created.id, ContentStatus::Pending))
            .await
            .unwrap();
        assert_eq!(first.unwrap().status, ContentStatus::Approved);

        let second = store
            .set_status(approve(created.id, ContentStatus::Pending))
            .await
            .unwrap();
        assert!(second.is_none());

        let missing = store
            .set_status(approve(Uuid::new_v4(), ContentStatus::Pending))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filters() {
        let store = MemoryContentStore::new();
        let uploader = Uuid::new_v4();
        let a = store.create(upload("a", uploader)).await.unwrap();
        let b = store.create(upload("b", Uuid::new_v4())).await.unwrap();
        let c = store.create(upload("c", uploader)).await.unwrap();
        store
            .set_status(approve(a.id, ContentStatus::Pending))
            .await
            .unwrap();

        let all = store.list(&ContentFilter::default()).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);

        let approved = store.list(&ContentFilter::approved()).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a.id);

        let mine = store
            .list(&ContentFilter {
                uploader_id: Some(uploader),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.iter().map(|c| c.id).collect::<Vec<_>>(), vec![c.id, a.id]);

        let page = store
            .list(&ContentFilter {
                limit: Some(1),
                offset: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, b.id);
    }

    #[tokio::test]
    async fn test_counters_rating_and_stats() {
        let store = MemoryContentStore::new();
        let created = store.create(upload("OS", Uuid::new_v4())).await.unwrap();

        store.increment_views(created.id).await.unwrap();
        let viewed = store.increment_views(created.id).await.unwrap().unwrap();
        assert_eq!(viewed.views, 2);

        let downloaded = store.increment_downloads(created.id).await.unwrap().unwrap();
        assert_eq!(downloaded.downloads, 1);

        store.add_rating(created.id, 5).await.unwrap();
        let rated = store.add_rating(created.id, 2).await.unwrap().unwrap();
        assert_eq!(rated.rating_count, 2);
        assert!((rated.rating - 3.5).abs() < f64::EPSILON);

        assert!(store.increment_views(Uuid::new_v4()).await.unwrap().is_none());

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total(), 1);

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
    }
}
