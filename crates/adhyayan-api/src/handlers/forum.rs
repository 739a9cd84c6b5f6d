use std::sync::Arc;

use adhyayan_core::constants::POINTS_PER_FORUM_REPLY;
use adhyayan_core::models::{
    CreatePostRequest, CreateReplyRequest, ForumPost, ForumReply, ForumThread, NewPost,
    PostFilter,
};
use adhyayan_core::AppError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::non_blank;
use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostsQuery {
    pub branch: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/v0/forum/posts",
    tag = "forum",
    params(PostsQuery),
    responses(
        (status = 200, description = "Threads, newest first", body = Vec<ForumPost>)
    )
)]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostsQuery>,
) -> Result<Json<Vec<ForumPost>>, HttpAppError> {
    let filter = PostFilter {
        branch: non_blank(query.branch),
        limit: Some(state.page_limit(query.limit)),
        offset: query.offset.unwrap_or(0).max(0),
    };

    Ok(Json(state.db.forum.list_posts(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/v0/forum/posts/{id}",
    tag = "forum",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Thread with replies, oldest reply first", body = ForumThread),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ForumThread>, HttpAppError> {
    let post = state
        .db
        .forum
        .get_post(id)
        .await?
        .ok_or_else(post_not_found)?;
    let replies = state.db.forum.list_replies(id).await?;

    Ok(Json(ForumThread { post, replies }))
}

#[utoipa::path(
    post,
    path = "/api/v0/forum/posts",
    tag = "forum",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Thread created", body = ForumPost),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id))]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let post = state
        .db
        .forum
        .create_post(NewPost {
            author_id: user.user_id,
            title: request.title.trim().to_string(),
            body: request.body.trim().to_string(),
            branch: non_blank(request.branch),
            subject: non_blank(request.subject),
        })
        .await?;

    tracing::info!(post_id = %post.id, "Forum post created");
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    post,
    path = "/api/v0/forum/posts/{id}/replies",
    tag = "forum",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = CreateReplyRequest,
    responses(
        (status = 201, description = "Reply added; author credited", body = ForumReply),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id, post_id = %id))]
pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateReplyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let reply = state
        .db
        .forum
        .add_reply(id, user.user_id, request.body.trim().to_string())
        .await?
        .ok_or_else(post_not_found)?;

    if state
        .db
        .users
        .add_points(user.user_id, POINTS_PER_FORUM_REPLY)
        .await?
        .is_none()
    {
        tracing::warn!("Reply author has no account to credit");
    }

    Ok((StatusCode::CREATED, Json(reply)))
}

#[utoipa::path(
    post,
    path = "/api/v0/forum/posts/{id}/upvote",
    tag = "forum",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Upvote counted", body = ForumPost),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn upvote_post(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ForumPost>, HttpAppError> {
    let post = state
        .db
        .forum
        .upvote(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/api/v0/forum/posts/{id}",
    tag = "forum",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Thread and replies deleted"),
        (status = 403, description = "Only the author or an admin may delete", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state), fields(user_id = %user.user_id, post_id = %id))]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let post = state
        .db
        .forum
        .get_post(id)
        .await?
        .ok_or_else(post_not_found)?;

    if post.author_id != user.user_id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only the author or an admin can delete this post".to_string(),
        )
        .into());
    }

    if !state.db.forum.delete_post(id).await? {
        return Err(post_not_found().into());
    }

    Ok(StatusCode::NO_CONTENT)
}
