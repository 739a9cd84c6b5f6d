use std::sync::Arc;

use adhyayan_core::models::{
    ContentFilter, ContentResponse, PublicProfile, UpdateProfileRequest, UserResponse,
};
use adhyayan_core::AppError;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{non_blank, parse_content_type};
use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Filter by content type
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v0/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<UserResponse>, HttpAppError> {
    let account = state
        .db
        .users
        .get(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(Json(account.into()))
}

#[utoipa::path(
    put,
    path = "/api/v0/users/me",
    tag = "users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id))]
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, HttpAppError> {
    let update = UpdateProfileRequest {
        name: non_blank(request.name),
        branch: non_blank(request.branch),
        year: non_blank(request.year),
    };

    let account = state
        .db
        .users
        .update_profile(user.user_id, update)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(Json(account.into()))
}

#[utoipa::path(
    get,
    path = "/api/v0/users/me/uploads",
    tag = "users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Own uploads in every status, newest first", body = Vec<ContentResponse>),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn my_uploads(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<ContentResponse>>, HttpAppError> {
    let filter = ContentFilter {
        uploader_id: Some(user.user_id),
        content_type: parse_content_type(query.content_type.as_deref())?,
        limit: Some(state.page_limit(query.limit)),
        offset: query.offset.unwrap_or(0).max(0),
        ..Default::default()
    };

    let items = state.db.content.list(&filter).await?;
    Ok(Json(state.present_all(items)))
}

#[utoipa::path(
    get,
    path = "/api/v0/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Public profile", body = PublicProfile),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicProfile>, HttpAppError> {
    let user = state
        .db
        .users
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
