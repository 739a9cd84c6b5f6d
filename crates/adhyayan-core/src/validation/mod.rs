//! Upload validation
//!
//! Checks that go beyond what the `validator` derives on request DTOs can
//! express: which URL a content type needs, and tag shape.

use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;

use crate::models::{ContentType, CreateContentRequest};

/// Maximum length of a single tag (32 characters)
pub const MAX_TAG_LENGTH: usize = 32;

static TAG_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N} +#.\-]+$"));

/// Videos need a `video_url`; every other type needs a `file_url`.
pub fn validate_resource_urls(
    content_type: ContentType,
    file_url: Option<&str>,
    video_url: Option<&str>,
) -> Result<()> {
    let present = |url: Option<&str>| url.is_some_and(|u| !u.trim().is_empty());

    if content_type.is_video() {
        if !present(video_url) {
            return Err(anyhow::anyhow!("video_url is required for video content"));
        }
    } else if !present(file_url) {
        return Err(anyhow::anyhow!(
            "file_url is required for {} content",
            content_type
        ));
    }

    Ok(())
}

/// Validate a tag
///
/// Rules:
/// - Non-empty after trimming, at most 32 characters
/// - Letters, digits, spaces, `+`, `#`, `.` and `-` only
pub fn validate_tag(tag: &str) -> Result<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(anyhow::anyhow!("Tags cannot be empty"));
    }
    if tag.chars().count() > MAX_TAG_LENGTH {
        return Err(anyhow::anyhow!(
            "Tag '{}' exceeds maximum length of {} characters",
            tag,
            MAX_TAG_LENGTH
        ));
    }

    let pattern = TAG_PATTERN
        .as_ref()
        .map_err(Clone::clone)
        .context("Failed to compile tag validation regex")?;
    if !pattern.is_match(tag) {
        return Err(anyhow::anyhow!(
            "Tag '{}' contains invalid characters. Allowed: letters, digits, space, '+', '#', '.', '-'",
            tag
        ));
    }

    Ok(())
}

/// Required text fields must still have content once trimmed.
pub fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow::anyhow!("{} cannot be blank", field));
    }
    Ok(())
}

/// Cross-field checks for an upload request.
pub fn validate_upload(request: &CreateContentRequest) -> Result<()> {
    for (field, value) in [
        ("title", &request.title),
        ("department", &request.department),
        ("branch", &request.branch),
        ("year", &request.year),
        ("subject", &request.subject),
    ] {
        validate_required(field, value)?;
    }
    validate_resource_urls(
        request.content_type,
        request.file_url.as_deref(),
        request.video_url.as_deref(),
    )?;
    for tag in &request.tags {
        validate_tag(tag)?;
    }
    Ok(())
}
