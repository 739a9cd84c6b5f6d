use std::sync::Arc;

use adhyayan_core::models::{ContentFilter, ContentHit, SearchResponse};
use adhyayan_core::search::rank;
use adhyayan_core::AppError;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::parse_content_type;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free-text query
    pub q: Option<String>,
    /// Restrict to one content type
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v0/search",
    tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Ranked approved content and matching catalog entries", body = SearchResponse),
        (status = 400, description = "Missing query or unknown type", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "search"))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, HttpAppError> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(AppError::BadRequest("Query parameter 'q' is required".to_string()).into());
    }

    let limit = state.page_limit(query.limit) as usize;
    let filter = ContentFilter {
        content_type: parse_content_type(query.content_type.as_deref())?,
        ..ContentFilter::approved()
    };

    let candidates = state.db.content.list(&filter).await?;
    let results: Vec<ContentHit> = rank(candidates, q)
        .into_iter()
        .take(limit)
        .map(|(score, content)| ContentHit {
            score,
            content: state.present(content),
        })
        .collect();

    let mut catalog = state.catalog.find_subjects(q);
    catalog.truncate(limit);

    tracing::debug!(
        results = results.len(),
        catalog_hits = catalog.len(),
        "Search completed"
    );

    Ok(Json(SearchResponse {
        query: q.to_string(),
        count: results.len(),
        results,
        catalog,
    }))
}
