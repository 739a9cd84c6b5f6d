//! Shared state construction

use crate::auth::JwtService;
use crate::services::ReviewService;
use crate::state::AppState;
use adhyayan_core::{Catalog, Config};
use adhyayan_db::Stores;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Assemble [`AppState`] from configuration and already-connected stores.
pub fn initialize_services(config: &Config, stores: Stores) -> Result<Arc<AppState>> {
    let catalog = Catalog::builtin();
    catalog
        .validate()
        .context("Built-in catalog failed validation")?;
    tracing::info!(
        departments = catalog.departments().len(),
        "Catalog loaded"
    );

    let jwt = JwtService::new(config.jwt_secret(), config.jwt_expiry_hours());

    let review = ReviewService::new(stores.content.clone(), stores.users.clone());

    Ok(Arc::new(AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        db: stores,
        jwt,
        review,
    }))
}
