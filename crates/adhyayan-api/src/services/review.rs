//! Admin review of uploads: status transition plus the uploader's reward.
//!
//! Keeps handler logic thin and allows unit testing without HTTP.

use adhyayan_core::constants::POINTS_PER_APPROVED_UPLOAD;
use adhyayan_core::models::{Content, ContentStatus, StatusChange};
use adhyayan_core::{AppError, ReviewDecision};
use adhyayan_db::{ContentStore, UserStore};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReviewService {
    content: Arc<dyn ContentStore>,
    users: Arc<dyn UserStore>,
}

impl ReviewService {
    pub fn new(content: Arc<dyn ContentStore>, users: Arc<dyn UserStore>) -> Self {
        Self { content, users }
    }

    /// Apply `decision` to a pending item.
    ///
    /// The store write is a compare-and-set on the status read here, so two
    /// concurrent approvals cannot both succeed and the uploader is credited
    /// at most once.
    pub async fn review(
        &self,
        content_id: Uuid,
        reviewer_id: Uuid,
        decision: ReviewDecision,
    ) -> Result<Content, AppError> {
        let current = self
            .content
            .get(content_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;

        let target = current.status.apply(&decision)?;

        let change = StatusChange {
            content_id,
            expected: current.status,
            new_status: target,
            reviewer_id,
            reason: decision.reason().map(str::to_string),
        };

        let Some(updated) = self.content.set_status(change).await? else {
            // Someone else reviewed it between our read and write.
            let from = self
                .content
                .get(content_id)
                .await?
                .map(|c| c.status)
                .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;
            return Err(AppError::InvalidTransition { from, to: target });
        };

        if target == ContentStatus::Approved {
            match self
                .users
                .add_points(updated.uploader_id, POINTS_PER_APPROVED_UPLOAD)
                .await?
            {
                Some(uploader) => tracing::debug!(
                    user_id = %uploader.id,
                    points = uploader.points,
                    "Credited uploader for approved content"
                ),
                None => tracing::warn!(
                    user_id = %updated.uploader_id,
                    content_id = %content_id,
                    "Approved content has no matching uploader account"
                ),
            }
        }

        tracing::info!(
            content_id = %content_id,
            reviewer_id = %reviewer_id,
            status = %target,
            "Content reviewed"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhyayan_core::models::{ContentType, NewContent, NewUser, UserRole};
    use adhyayan_db::{MemoryContentStore, MemoryUserStore};

    struct Fixture {
        service: ReviewService,
        content: Arc<MemoryContentStore>,
        users: Arc<MemoryUserStore>,
    }

    fn fixture() -> Fixture {
        let content = Arc::new(MemoryContentStore::new());
        let users = Arc::new(MemoryUserStore::new());
        Fixture {
            service: ReviewService::new(content.clone(), users.clone()),
            content,
            users,
        }
    }

    async fn upload(f: &Fixture) -> (Uuid, Uuid) {
        let uploader = f
            .users
            .create(NewUser {
                name: "Priya".to_string(),
                email: "priya@example.com".to_string(),
                password_hash: None,
                role: UserRole::Student,
                branch: Some("CSE".to_string()),
                year: None,
            })
            .await
            .unwrap();
        let item = f
            .content
            .create(NewContent {
                title: "DBMS unit 2".to_string(),
                description: String::new(),
                content_type: ContentType::Note,
                file_url: Some("https://files.example.com/dbms.pdf".to_string()),
                video_url: None,
                department: "Engineering".to_string(),
                branch: "CSE".to_string(),
                year: "3".to_string(),
                subject: "DBMS".to_string(),
                topic: None,
                uploader_id: uploader.id,
                tags: vec![],
            })
            .await
            .unwrap();
        (item.id, uploader.id)
    }

    #[tokio::test]
    async fn test_approve_awards_points_once() {
        let f = fixture();
        let (content_id, uploader_id) = upload(&f).await;
        let admin = Uuid::new_v4();

        let approved = f
            .service
            .review(content_id, admin, ReviewDecision::Approve)
            .await
            .unwrap();
        assert_eq!(approved.status, ContentStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(admin));

        let again = f
            .service
            .review(content_id, admin, ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(again, AppError::InvalidTransition { .. }));

        let uploader = f.users.get(uploader_id).await.unwrap().unwrap();
        assert_eq!(uploader.points, POINTS_PER_APPROVED_UPLOAD);
    }

    #[tokio::test]
    async fn test_reject_records_reason_without_points() {
        let f = fixture();
        let (content_id, uploader_id) = upload(&f).await;

        let rejected = f
            .service
            .review(
                content_id,
                Uuid::new_v4(),
                ReviewDecision::Reject {
                    reason: Some("Blurry scan".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(rejected.status, ContentStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Blurry scan"));

        let err = f
            .service
            .review(content_id, Uuid::new_v4(), ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: ContentStatus::Rejected,
                to: ContentStatus::Approved
            }
        ));

        let uploader = f.users.get(uploader_id).await.unwrap().unwrap();
        assert_eq!(uploader.points, 0);
    }

    #[tokio::test]
    async fn test_missing_content_is_not_found() {
        let f = fixture();
        let err = f
            .service
            .review(Uuid::new_v4(), Uuid::new_v4(), ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
