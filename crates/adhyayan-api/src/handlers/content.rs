use std::sync::Arc;

use adhyayan_core::models::{
    normalize_tags, Content, ContentFilter, ContentResponse, CreateContentRequest,
    DownloadResponse, NewContent, RateContentRequest,
};
use adhyayan_core::validation::validate_upload;
use adhyayan_core::{approval::can_manage, can_view, AppError};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::users::PaginationQuery;
use super::{non_blank, parse_content_type};
use crate::auth::{AuthUser, MaybeUser};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Content not found".to_string())
}

/// Load an item that is open to the public. Pending and rejected items read
/// as missing.
async fn load_approved(state: &AppState, id: Uuid) -> Result<Content, AppError> {
    state
        .db
        .content
        .get(id)
        .await?
        .filter(|c| c.status.is_publicly_visible())
        .ok_or_else(not_found)
}

#[utoipa::path(
    post,
    path = "/api/v0/content",
    tag = "content",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Upload recorded and queued for review", body = ContentResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id, operation = "create_content"))]
pub async fn create_content(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateContentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_upload(&request).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let created = state
        .db
        .content
        .create(NewContent {
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            content_type: request.content_type,
            file_url: non_blank(request.file_url),
            video_url: non_blank(request.video_url),
            department: request.department.trim().to_string(),
            branch: request.branch.trim().to_string(),
            year: request.year.trim().to_string(),
            subject: request.subject.trim().to_string(),
            topic: non_blank(request.topic),
            uploader_id: user.user_id,
            tags: normalize_tags(&request.tags),
        })
        .await?;

    tracing::info!(content_id = %created.id, content_type = %created.content_type, "Content uploaded");

    Ok((StatusCode::CREATED, Json(state.present(created))))
}

#[utoipa::path(
    get,
    path = "/api/v0/content",
    tag = "content",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Approved content, newest first", body = Vec<ContentResponse>),
        (status = 400, description = "Unknown content type", body = ErrorResponse)
    )
)]
pub async fn list_content(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<ContentResponse>>, HttpAppError> {
    let filter = ContentFilter {
        content_type: parse_content_type(query.content_type.as_deref())?,
        limit: Some(state.page_limit(query.limit)),
        offset: query.offset.unwrap_or(0).max(0),
        ..ContentFilter::approved()
    };

    let items = state.db.content.list(&filter).await?;
    Ok(Json(state.present_all(items)))
}

#[utoipa::path(
    get,
    path = "/api/v0/content/{id}",
    tag = "content",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content details", body = ContentResponse),
        (status = 404, description = "Content not found or not visible", body = ErrorResponse)
    )
)]
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    caller: MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, HttpAppError> {
    let viewer = caller.viewer();
    let content = state
        .db
        .content
        .get(id)
        .await?
        .filter(|c| can_view(c, viewer.as_ref()))
        .ok_or_else(not_found)?;

    Ok(Json(state.present(content)))
}

#[utoipa::path(
    post,
    path = "/api/v0/content/{id}/view",
    tag = "content",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "View recorded", body = ContentResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    )
)]
pub async fn record_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, HttpAppError> {
    load_approved(&state, id).await?;
    let updated = state
        .db
        .content
        .increment_views(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(state.present(updated)))
}

#[utoipa::path(
    post,
    path = "/api/v0/content/{id}/download",
    tag = "content",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Download recorded; returns the file location", body = DownloadResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    )
)]
pub async fn record_download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DownloadResponse>, HttpAppError> {
    let content = load_approved(&state, id).await?;
    let url = content
        .resource_url()
        .ok_or_else(|| AppError::NotFound("No file is attached to this content".to_string()))?
        .to_string();

    let updated = state
        .db
        .content
        .increment_downloads(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(DownloadResponse {
        id,
        url,
        downloads: updated.downloads,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v0/content/{id}/rate",
    tag = "content",
    params(("id" = Uuid, Path, description = "Content ID")),
    request_body = RateContentRequest,
    responses(
        (status = 200, description = "Rating folded into the average", body = ContentResponse),
        (status = 400, description = "Rating out of range", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id, content_id = %id))]
pub async fn rate_content(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<RateContentRequest>,
) -> Result<Json<ContentResponse>, HttpAppError> {
    load_approved(&state, id).await?;
    let updated = state
        .db
        .content
        .add_rating(id, request.rating)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(state.present(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v0/content/{id}",
    tag = "content",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 403, description = "Only the uploader or an admin may delete", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state), fields(user_id = %user.user_id, content_id = %id, operation = "delete_content"))]
pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let viewer = user.viewer();
    let content = state
        .db
        .content
        .get(id)
        .await?
        .filter(|c| can_view(c, Some(&viewer)))
        .ok_or_else(not_found)?;

    if !can_manage(&content, &viewer) {
        return Err(AppError::Forbidden(
            "Only the uploader or an admin can delete this content".to_string(),
        )
        .into());
    }

    if !state.db.content.delete(id).await? {
        return Err(not_found().into());
    }

    tracing::info!("Content deleted");
    Ok(StatusCode::NO_CONTENT)
}
