//! Domain route groups (auth, catalog, content, admin, forum, etc.).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/auth/register", API_PREFIX), post(handlers::auth::register))
        .route(&format!("{}/auth/login", API_PREFIX), post(handlers::auth::login))
}

pub fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/catalog", API_PREFIX), get(handlers::catalog::get_catalog))
        .route(
            &format!("{}/catalog/resolve", API_PREFIX),
            get(handlers::catalog::resolve_location),
        )
}

pub fn browse_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/browse/{{department}}", API_PREFIX),
            get(handlers::browse::browse_department),
        )
        .route(
            &format!("{}/browse/{{department}}/{{branch}}", API_PREFIX),
            get(handlers::browse::browse_branch),
        )
        .route(
            &format!("{}/browse/{{department}}/{{branch}}/{{year}}", API_PREFIX),
            get(handlers::browse::browse_year),
        )
        .route(
            &format!(
                "{}/browse/{{department}}/{{branch}}/{{year}}/{{subject}}",
                API_PREFIX
            ),
            get(handlers::browse::browse_subject),
        )
}

pub fn search_routes() -> Router<Arc<AppState>> {
    Router::new().route(&format!("{}/search", API_PREFIX), get(handlers::search::search))
}

pub fn leaderboard_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/leaderboard", API_PREFIX),
        get(handlers::leaderboard::leaderboard),
    )
}

pub fn content_public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/content", API_PREFIX), get(handlers::content::list_content))
        .route(&format!("{}/content/{{id}}", API_PREFIX), get(handlers::content::get_content))
        .route(
            &format!("{}/content/{{id}}/view", API_PREFIX),
            post(handlers::content::record_view),
        )
        .route(
            &format!("{}/content/{{id}}/download", API_PREFIX),
            post(handlers::content::record_download),
        )
}

pub fn content_protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/content", API_PREFIX), post(handlers::content::create_content))
        .route(
            &format!("{}/content/{{id}}", API_PREFIX),
            delete(handlers::content::delete_content),
        )
        .route(
            &format!("{}/content/{{id}}/rate", API_PREFIX),
            post(handlers::content::rate_content),
        )
}

pub fn profile_routes() -> Router<Arc<AppState>> {
    Router::new().route(&format!("{}/users/{{id}}", API_PREFIX), get(handlers::users::get_profile))
}

pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/users/me", API_PREFIX),
            get(handlers::users::get_me).put(handlers::users::update_me),
        )
        .route(
            &format!("{}/users/me/uploads", API_PREFIX),
            get(handlers::users::my_uploads),
        )
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/admin/content", API_PREFIX),
            get(handlers::admin::review_queue),
        )
        .route(
            &format!("{}/admin/content/{{id}}/approve", API_PREFIX),
            post(handlers::admin::approve_content),
        )
        .route(
            &format!("{}/admin/content/{{id}}/reject", API_PREFIX),
            post(handlers::admin::reject_content),
        )
        .route(&format!("{}/admin/stats", API_PREFIX), get(handlers::admin::stats))
}

pub fn forum_public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/forum/posts", API_PREFIX), get(handlers::forum::list_posts))
        .route(&format!("{}/forum/posts/{{id}}", API_PREFIX), get(handlers::forum::get_post))
}

pub fn forum_protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/forum/posts", API_PREFIX), post(handlers::forum::create_post))
        .route(
            &format!("{}/forum/posts/{{id}}", API_PREFIX),
            delete(handlers::forum::delete_post),
        )
        .route(
            &format!("{}/forum/posts/{{id}}/replies", API_PREFIX),
            post(handlers::forum::create_reply),
        )
        .route(
            &format!("{}/forum/posts/{{id}}/upvote", API_PREFIX),
            post(handlers::forum::upvote_post),
        )
}
