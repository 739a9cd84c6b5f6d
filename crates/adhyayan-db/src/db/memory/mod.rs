//! In-memory store implementations
//!
//! Data lives behind a `tokio::sync::RwLock` and is lost when the process
//! exits. Used by `DATABASE_BACKEND=memory` and by the test suites.

pub mod content;
pub mod forum;
pub mod user;

pub use content::MemoryContentStore;
pub use forum::MemoryForumStore;
pub use user::MemoryUserStore;

/// Apply offset and optional limit to an already ordered iterator.
pub(crate) fn paginate<T>(
    items: impl Iterator<Item = T>,
    offset: i64,
    limit: Option<i64>,
) -> Vec<T> {
    let items = items.skip(offset.max(0) as usize);
    match limit {
        Some(limit) => items.take(limit.max(0) as usize).collect(),
        None => items.collect(),
    }
}
