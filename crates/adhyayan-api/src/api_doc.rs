//! OpenAPI documentation.
//! Paths in handler annotations are written with the `/api/v0` prefix from
//! [`crate::constants::API_PREFIX`].

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use adhyayan_core::{catalog, matcher, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Adhyayan API",
        version = "0.1.0",
        description = "Study-material platform (v0): browse notes, videos and previous-year papers by department, branch, year and subject; upload material for admin review; search, rate and discuss. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Auth
        handlers::auth::register,
        handlers::auth::login,
        // Users
        handlers::users::get_me,
        handlers::users::update_me,
        handlers::users::my_uploads,
        handlers::users::get_profile,
        // Content
        handlers::content::create_content,
        handlers::content::list_content,
        handlers::content::get_content,
        handlers::content::record_view,
        handlers::content::record_download,
        handlers::content::rate_content,
        handlers::content::delete_content,
        // Admin
        handlers::admin::review_queue,
        handlers::admin::approve_content,
        handlers::admin::reject_content,
        handlers::admin::stats,
        // Catalog & browsing
        handlers::catalog::get_catalog,
        handlers::catalog::resolve_location,
        handlers::browse::browse_department,
        handlers::browse::browse_branch,
        handlers::browse::browse_year,
        handlers::browse::browse_subject,
        // Search & leaderboard
        handlers::search::search,
        handlers::leaderboard::leaderboard,
        // Forum
        handlers::forum::list_posts,
        handlers::forum::get_post,
        handlers::forum::create_post,
        handlers::forum::create_reply,
        handlers::forum::upvote_post,
        handlers::forum::delete_post,
    ),
    components(
        schemas(
            // Content models
            models::Content,
            models::ContentType,
            models::ContentStatus,
            models::ContentResponse,
            models::CreateContentRequest,
            models::RateContentRequest,
            models::RejectContentRequest,
            models::DownloadResponse,
            models::ContentStats,
            // User models
            models::UserRole,
            models::UserResponse,
            models::PublicProfile,
            models::RegisterRequest,
            models::LoginRequest,
            models::AuthResponse,
            models::UpdateProfileRequest,
            models::LeaderboardEntry,
            // Catalog
            catalog::Catalog,
            catalog::CatalogNode,
            catalog::NodeKind,
            matcher::NamedSlug,
            matcher::ResolvedLocation,
            handlers::browse::Breadcrumb,
            handlers::browse::BrowseNodeResponse,
            handlers::browse::SubjectPageResponse,
            // Search
            models::SearchResponse,
            models::ContentHit,
            models::CatalogHit,
            // Forum
            models::ForumPost,
            models::ForumReply,
            models::ForumThread,
            models::CreatePostRequest,
            models::CreateReplyRequest,
            // Admin
            handlers::admin::AdminStats,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration and sign-in"),
        (name = "users", description = "Own account and public profiles"),
        (name = "content", description = "Upload, read, rate and delete study material"),
        (name = "admin", description = "Review queue and moderation"),
        (name = "catalog", description = "The static hierarchy and the content matcher"),
        (name = "browse", description = "Department / branch / year / subject pages"),
        (name = "search", description = "Full-text search over approved content"),
        (name = "leaderboard", description = "Contributor points ranking"),
        (name = "forum", description = "Discussion threads")
    )
)]
pub struct ApiDoc;
