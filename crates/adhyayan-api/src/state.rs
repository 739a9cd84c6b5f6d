//! Application state shared by every handler.

use adhyayan_core::constants::clamp_limit;
use adhyayan_core::models::{Content, ContentResponse};
use adhyayan_core::{resolve, Catalog, Config, ResolvedPath};
use adhyayan_db::Stores;
use std::sync::Arc;

use crate::auth::JwtService;
use crate::services::ReviewService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub db: Stores,
    pub jwt: JwtService,
    pub review: ReviewService,
}

impl AppState {
    /// Where an item's free-text classification lands in the catalog.
    pub fn locate<'a>(&'a self, content: &Content) -> ResolvedPath<'a> {
        resolve(&self.catalog, &content.fields())
    }

    /// Attach the canonical browse URL to a stored item.
    pub fn present(&self, content: Content) -> ContentResponse {
        let canonical_url = self.locate(&content).canonical_url();
        ContentResponse {
            content,
            canonical_url,
        }
    }

    pub fn present_all(&self, items: Vec<Content>) -> Vec<ContentResponse> {
        items.into_iter().map(|c| self.present(c)).collect()
    }

    /// Requested page size, clamped to the configured maximum.
    pub fn page_limit(&self, limit: Option<i64>) -> i64 {
        clamp_limit(limit, self.config.max_page_size())
    }
}
