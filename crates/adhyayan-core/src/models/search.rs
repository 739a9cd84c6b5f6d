use serde::Serialize;
use utoipa::ToSchema;

use super::ContentResponse;
use crate::catalog::NodeKind;

/// A ranked content hit
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContentHit {
    pub score: u32,
    #[serde(flatten)]
    pub content: ContentResponse,
}

/// A catalog subject or topic whose name matches the query
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogHit {
    pub kind: NodeKind,
    pub name: String,
    /// Breadcrumb from department down to the hit, e.g. "Engineering / CSE / 2nd Year"
    pub path: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ContentHit>,
    pub catalog: Vec<CatalogHit>,
    pub count: usize,
}
