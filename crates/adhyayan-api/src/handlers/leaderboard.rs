use std::sync::Arc;

use adhyayan_core::constants::DEFAULT_LEADERBOARD_SIZE;
use adhyayan_core::models::{rank_users, LeaderboardEntry};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::non_blank;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Only users of this branch (case-insensitive)
    pub branch: Option<String>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v0/leaderboard",
    tag = "leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Users by points, highest first; ties share a rank", body = Vec<LeaderboardEntry>)
    )
)]
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, HttpAppError> {
    let limit = state.page_limit(Some(query.limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE)));
    let branch = non_blank(query.branch);

    let users = state
        .db
        .users
        .leaderboard(branch.as_deref(), limit)
        .await?;

    Ok(Json(rank_users(users)))
}
