use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::matcher::ContentFields;

/// Kind of study material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "content_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Note,
    Video,
    Pyq,
    Important,
    Syllabus,
    Timetable,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Note,
        ContentType::Video,
        ContentType::Pyq,
        ContentType::Important,
        ContentType::Syllabus,
        ContentType::Timetable,
    ];

    /// Videos carry a `video_url`; every other type carries a `file_url`.
    pub fn is_video(&self) -> bool {
        matches!(self, ContentType::Video)
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ContentType::Note => write!(f, "note"),
            ContentType::Video => write!(f, "video"),
            ContentType::Pyq => write!(f, "pyq"),
            ContentType::Important => write!(f, "important"),
            ContentType::Syllabus => write!(f, "syllabus"),
            ContentType::Timetable => write!(f, "timetable"),
        }
    }
}

impl FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "note" | "notes" => Ok(ContentType::Note),
            "video" | "videos" => Ok(ContentType::Video),
            "pyq" | "pyqs" => Ok(ContentType::Pyq),
            "important" => Ok(ContentType::Important),
            "syllabus" => Ok(ContentType::Syllabus),
            "timetable" => Ok(ContentType::Timetable),
            _ => Err(anyhow::anyhow!("Invalid content type: {}", s)),
        }
    }
}

/// Review state of an uploaded item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "content_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Pending,
    Approved,
    Rejected,
}

impl Display for ContentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ContentStatus::Pending => write!(f, "pending"),
            ContentStatus::Approved => write!(f, "approved"),
            ContentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ContentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ContentStatus::Pending),
            "approved" => Ok(ContentStatus::Approved),
            "rejected" => Ok(ContentStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid content status: {}", s)),
        }
    }
}

/// A single uploaded study-material record.
///
/// `department`, `branch`, `year`, `subject` and `topic` are the free text typed
/// at upload time; they are reconciled with the catalog when read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub file_url: Option<String>,
    pub video_url: Option<String>,
    pub department: String,
    pub branch: String,
    pub year: String,
    pub subject: String,
    pub topic: Option<String>,
    pub uploader_id: Uuid,
    pub status: ContentStatus,
    pub rating: f64,
    pub rating_count: i32,
    pub views: i64,
    pub downloads: i64,
    pub tags: Vec<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    /// Free-text classification fields, as the matcher consumes them.
    pub fn fields(&self) -> ContentFields<'_> {
        ContentFields {
            department: &self.department,
            branch: &self.branch,
            year: &self.year,
            subject: &self.subject,
            topic: self.topic.as_deref(),
        }
    }

    /// URL of the stored file or video.
    pub fn resource_url(&self) -> Option<&str> {
        if self.content_type.is_video() {
            self.video_url.as_deref().or(self.file_url.as_deref())
        } else {
            self.file_url.as_deref().or(self.video_url.as_deref())
        }
    }
}

/// Content plus its resolved browsing location
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContentResponse {
    #[serde(flatten)]
    pub content: Content,
    /// Canonical browse URL, absent when the classification matches no department
    pub canonical_url: Option<String>,
}

/// Request DTO for uploading content metadata
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateContentRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description cannot exceed 5000 characters"))]
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    #[validate(url(message = "file_url must be a valid URL"))]
    pub file_url: Option<String>,
    #[serde(default)]
    #[validate(url(message = "video_url must be a valid URL"))]
    pub video_url: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, max = 100, message = "Branch is required"))]
    pub branch: String,
    #[validate(length(min = 1, max = 50, message = "Year is required"))]
    pub year: String,
    #[validate(length(min = 1, max = 150, message = "Subject is required"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Topic cannot exceed 150 characters"))]
    pub topic: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 tags are allowed"))]
    pub tags: Vec<String>,
}

/// Store input for a new upload. Always starts out pending.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub content_type: ContentType,
    pub file_url: Option<String>,
    pub video_url: Option<String>,
    pub department: String,
    pub branch: String,
    pub year: String,
    pub subject: String,
    pub topic: Option<String>,
    pub uploader_id: Uuid,
    pub tags: Vec<String>,
}

/// Filter for listing content. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub status: Option<ContentStatus>,
    pub content_type: Option<ContentType>,
    pub uploader_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl ContentFilter {
    pub fn approved() -> Self {
        Self {
            status: Some(ContentStatus::Approved),
            ..Default::default()
        }
    }

    pub fn matches(&self, content: &Content) -> bool {
        self.status.map_or(true, |s| content.status == s)
            && self.content_type.map_or(true, |t| content.content_type == t)
            && self.uploader_id.map_or(true, |u| content.uploader_id == u)
    }
}

/// A status change requested by a reviewer. Applied only while the item is
/// still in `expected`.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub content_id: Uuid,
    pub expected: ContentStatus,
    pub new_status: ContentStatus,
    pub reviewer_id: Uuid,
    pub reason: Option<String>,
}

/// Request DTO for rating content
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RateContentRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

/// Request DTO for rejecting content
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct RejectContentRequest {
    #[serde(default)]
    #[validate(length(max = 500, message = "Reason cannot exceed 500 characters"))]
    pub reason: Option<String>,
}

/// Returned by the download endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct DownloadResponse {
    pub id: Uuid,
    pub url: String,
    pub downloads: i64,
}

/// Per-status content counts for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ContentStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl ContentStats {
    pub fn total(&self) -> i64 {
        self.pending + self.approved + self.rejected
    }
}

/// Running average after adding one rating.
pub fn next_rating(current: f64, count: i32, rating: i32) -> (f64, i32) {
    let count = count.max(0);
    let new_count = count + 1;
    let average = (current * count as f64 + rating as f64) / new_count as f64;
    (average, new_count)
}

/// Trim, lowercase and de-duplicate tags, dropping empties.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
