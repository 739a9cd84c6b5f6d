use std::sync::Arc;

use adhyayan_core::matcher::{ResolveQuery, ResolvedLocation};
use adhyayan_core::{resolve, Catalog};
use axum::{
    extract::{Query, State},
    Json,
};

use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v0/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "The full department / branch / year / subject / topic tree", body = Catalog)
    )
)]
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

/// Run the matcher on ad-hoc classification text, as an upload form would
/// before submitting.
#[utoipa::path(
    get,
    path = "/api/v0/catalog/resolve",
    tag = "catalog",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Matched nodes and canonical browse URL", body = ResolvedLocation)
    )
)]
pub async fn resolve_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolvedLocation> {
    let resolved = resolve(&state.catalog, &query.fields());
    Json(resolved.to_location())
}
