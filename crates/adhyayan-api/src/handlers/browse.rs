//! Hierarchy browsing: one endpoint per level of the catalog.
//!
//! The first three levels only describe the tree. The subject level also lists
//! the approved content whose free-text classification resolves beneath it.

use std::sync::Arc;

use adhyayan_core::catalog::browse_url;
use adhyayan_core::matcher::{BrowsePath, NamedSlug};
use adhyayan_core::models::{ContentFilter, ContentResponse};
use adhyayan_core::{AppError, CatalogNode};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::parse_content_type;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Breadcrumb {
    pub slug: String,
    pub name: String,
    pub url: String,
}

/// A department, branch or year with its direct children
#[derive(Debug, Serialize, ToSchema)]
pub struct BrowseNodeResponse {
    pub node: CatalogNode,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub children: Vec<CatalogNode>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectPageResponse {
    pub node: CatalogNode,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub topics: Vec<CatalogNode>,
    /// Topic the content list is narrowed to, if any
    pub topic: Option<NamedSlug>,
    pub content: Vec<ContentResponse>,
    pub count: usize,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubjectQuery {
    /// Topic slug
    pub topic: Option<String>,
    /// Content type
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

fn breadcrumbs(trail: &[&CatalogNode]) -> Vec<Breadcrumb> {
    let mut slugs: Vec<&str> = Vec::with_capacity(trail.len());
    trail
        .iter()
        .map(|node| {
            slugs.push(node.slug.as_str());
            Breadcrumb {
                slug: node.slug.clone(),
                name: node.name.clone(),
                url: browse_url(&slugs),
            }
        })
        .collect()
}

fn walk<'a>(state: &'a AppState, slugs: &[&str]) -> Result<Vec<&'a CatalogNode>, AppError> {
    state
        .catalog
        .trail(slugs)
        .ok_or_else(|| AppError::NotFound(format!("No catalog entry at {}", browse_url(slugs))))
}

fn node_page(state: &AppState, slugs: &[&str]) -> Result<BrowseNodeResponse, AppError> {
    let trail = walk(state, slugs)?;
    let node = trail[trail.len() - 1];
    Ok(BrowseNodeResponse {
        node: node.shallow(),
        breadcrumbs: breadcrumbs(&trail),
        children: node.children.iter().map(CatalogNode::shallow).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v0/browse/{department}",
    tag = "browse",
    params(("department" = String, Path, description = "Department slug")),
    responses(
        (status = 200, description = "Department and its branches", body = BrowseNodeResponse),
        (status = 404, description = "Unknown department", body = ErrorResponse)
    )
)]
pub async fn browse_department(
    State(state): State<Arc<AppState>>,
    Path(department): Path<String>,
) -> Result<Json<BrowseNodeResponse>, HttpAppError> {
    Ok(Json(node_page(&state, &[department.as_str()])?))
}

#[utoipa::path(
    get,
    path = "/api/v0/browse/{department}/{branch}",
    tag = "browse",
    params(
        ("department" = String, Path, description = "Department slug"),
        ("branch" = String, Path, description = "Branch slug")
    ),
    responses(
        (status = 200, description = "Branch and its years", body = BrowseNodeResponse),
        (status = 404, description = "Unknown path", body = ErrorResponse)
    )
)]
pub async fn browse_branch(
    State(state): State<Arc<AppState>>,
    Path((department, branch)): Path<(String, String)>,
) -> Result<Json<BrowseNodeResponse>, HttpAppError> {
    Ok(Json(node_page(&state, &[department.as_str(), branch.as_str()])?))
}

#[utoipa::path(
    get,
    path = "/api/v0/browse/{department}/{branch}/{year}",
    tag = "browse",
    params(
        ("department" = String, Path, description = "Department slug"),
        ("branch" = String, Path, description = "Branch slug"),
        ("year" = String, Path, description = "Year slug")
    ),
    responses(
        (status = 200, description = "Year and its subjects", body = BrowseNodeResponse),
        (status = 404, description = "Unknown path", body = ErrorResponse)
    )
)]
pub async fn browse_year(
    State(state): State<Arc<AppState>>,
    Path((department, branch, year)): Path<(String, String, String)>,
) -> Result<Json<BrowseNodeResponse>, HttpAppError> {
    Ok(Json(node_page(
        &state,
        &[department.as_str(), branch.as_str(), year.as_str()],
    )?))
}

#[utoipa::path(
    get,
    path = "/api/v0/browse/{department}/{branch}/{year}/{subject}",
    tag = "browse",
    params(
        ("department" = String, Path, description = "Department slug"),
        ("branch" = String, Path, description = "Branch slug"),
        ("year" = String, Path, description = "Year slug"),
        ("subject" = String, Path, description = "Subject slug"),
        SubjectQuery
    ),
    responses(
        (status = 200, description = "Subject, its topics and approved content filed under it", body = SubjectPageResponse),
        (status = 400, description = "Unknown content type", body = ErrorResponse),
        (status = 404, description = "Unknown path or topic", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query))]
pub async fn browse_subject(
    State(state): State<Arc<AppState>>,
    Path((department, branch, year, subject)): Path<(String, String, String, String)>,
    Query(query): Query<SubjectQuery>,
) -> Result<Json<SubjectPageResponse>, HttpAppError> {
    let trail = walk(
        &state,
        &[
            department.as_str(),
            branch.as_str(),
            year.as_str(),
            subject.as_str(),
        ],
    )?;
    let node = trail[trail.len() - 1];

    let topic = match query.topic.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(slug) => Some(node.child(slug).ok_or_else(|| {
            AppError::NotFound(format!("Subject '{}' has no topic '{}'", node.name, slug))
        })?),
    };

    let filter = ContentFilter {
        content_type: parse_content_type(query.content_type.as_deref())?,
        ..ContentFilter::approved()
    };
    let here = BrowsePath {
        department,
        branch: Some(branch),
        year: Some(year),
        subject: Some(subject),
    };

    // Classification is free text, so filing happens at read time.
    let items = state.db.content.list(&filter).await?;
    let content: Vec<ContentResponse> = items
        .into_iter()
        .filter(|item| {
            let resolved = state.locate(item);
            resolved.is_under(&here)
                && topic.map_or(true, |t| resolved.topic.is_some_and(|rt| rt.slug == t.slug))
        })
        .map(|item| state.present(item))
        .collect();

    tracing::debug!(matched = content.len(), "Subject page assembled");

    Ok(Json(SubjectPageResponse {
        node: node.shallow(),
        breadcrumbs: breadcrumbs(&trail),
        topics: node.children.iter().map(CatalogNode::shallow).collect(),
        topic: topic.map(|t| NamedSlug {
            slug: t.slug.clone(),
            name: t.name.clone(),
        }),
        count: content.len(),
        content,
    }))
}
