use std::sync::Arc;

use adhyayan_core::models::{
    ContentFilter, ContentResponse, ContentStats, ContentStatus, RejectContentRequest,
};
use adhyayan_core::{AppError, ReviewDecision};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{non_blank, parse_content_type};
use crate::auth::AdminUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewQueueQuery {
    /// pending (default), approved or rejected
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStats {
    pub content: ContentStats,
    pub total_content: i64,
    pub users: i64,
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/content",
    tag = "admin",
    params(ReviewQueueQuery),
    responses(
        (status = 200, description = "Review queue, newest first", body = Vec<ContentResponse>),
        (status = 400, description = "Unknown status or type", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn review_queue(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<ReviewQueueQuery>,
) -> Result<Json<Vec<ContentResponse>>, HttpAppError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => ContentStatus::Pending,
        Some(s) => s
            .parse::<ContentStatus>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
    };

    let filter = ContentFilter {
        status: Some(status),
        content_type: parse_content_type(query.content_type.as_deref())?,
        uploader_id: None,
        limit: Some(state.page_limit(query.limit)),
        offset: query.offset.unwrap_or(0).max(0),
    };

    let items = state.db.content.list(&filter).await?;
    Ok(Json(state.present_all(items)))
}

#[utoipa::path(
    post,
    path = "/api/v0/admin/content/{id}/approve",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content approved; uploader credited", body = ContentResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse),
        (status = 409, description = "Content already reviewed", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state), fields(admin_id = %admin.0.user_id, content_id = %id))]
pub async fn approve_content(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, HttpAppError> {
    let updated = state
        .review
        .review(id, admin.0.user_id, ReviewDecision::Approve)
        .await?;

    Ok(Json(state.present(updated)))
}

#[utoipa::path(
    post,
    path = "/api/v0/admin/content/{id}/reject",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Content ID")),
    request_body = RejectContentRequest,
    responses(
        (status = 200, description = "Content rejected", body = ContentResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse),
        (status = 409, description = "Content already reviewed", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(admin_id = %admin.0.user_id, content_id = %id))]
pub async fn reject_content(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<RejectContentRequest>,
) -> Result<Json<ContentResponse>, HttpAppError> {
    let decision = ReviewDecision::Reject {
        reason: non_blank(request.reason),
    };
    let updated = state
        .review
        .review(id, admin.0.user_id, decision)
        .await?;

    Ok(Json(state.present(updated)))
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/stats",
    tag = "admin",
    responses(
        (status = 200, description = "Content counts per status and user count", body = AdminStats),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<Json<AdminStats>, HttpAppError> {
    let content = state.db.content.stats().await?;
    let users = state.db.users.count().await?;

    Ok(Json(AdminStats {
        total_content: content.total(),
        content,
        users,
    }))
}
