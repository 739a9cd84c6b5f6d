//! Review workflow for uploaded content
//!
//! Uploads start out `pending`. An admin decision moves them to `approved` or
//! `rejected` exactly once; only approved content is visible to the public.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Content, ContentStatus, User, UserRole};

/// An admin's verdict on a pending upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: Option<String> },
}

impl ReviewDecision {
    pub fn target(&self) -> ContentStatus {
        match self {
            ReviewDecision::Approve => ContentStatus::Approved,
            ReviewDecision::Reject { .. } => ContentStatus::Rejected,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ReviewDecision::Approve => None,
            ReviewDecision::Reject { reason } => reason.as_deref(),
        }
    }
}

impl ContentStatus {
    /// Status after applying `decision`. Only pending content can be reviewed.
    pub fn apply(self, decision: &ReviewDecision) -> Result<ContentStatus, AppError> {
        match self {
            ContentStatus::Pending => Ok(decision.target()),
            from => Err(AppError::InvalidTransition {
                from,
                to: decision.target(),
            }),
        }
    }

    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, ContentStatus::Approved)
    }
}

/// Who is asking to see something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Viewer {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&User> for Viewer {
    fn from(user: &User) -> Self {
        Viewer::new(user.id, user.role)
    }
}

/// Approved content is visible to everyone; anything else only to its
/// uploader and to admins.
pub fn can_view(content: &Content, viewer: Option<&Viewer>) -> bool {
    if content.status.is_publicly_visible() {
        return true;
    }
    viewer.is_some_and(|v| v.is_admin() || v.user_id == content.uploader_id)
}

/// Uploader or admin may delete or otherwise manage an item.
pub fn can_manage(content: &Content, viewer: &Viewer) -> bool {
    viewer.is_admin() || viewer.user_id == content.uploader_id
}
