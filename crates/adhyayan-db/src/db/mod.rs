//! Database repositories for data access layer
//!
//! Each store trait has two implementations: `postgres/` (sqlx) and `memory/`
//! (process-local, lost on restart). [`Stores`] bundles one of each kind so the
//! API can be wired to either backend from configuration.

mod traits;
//
// PostgreSQL repositories
pub mod postgres;
//
// In-memory stores
pub mod memory;

use std::sync::Arc;

use sqlx::PgPool;

pub use memory::{MemoryContentStore, MemoryForumStore, MemoryUserStore};
pub use postgres::{ContentRepository, ForumRepository, UserRepository};
pub use traits::{ContentStore, ForumStore, UserStore};

/// One store of each kind, behind trait objects
#[derive(Clone)]
pub struct Stores {
    pub content: Arc<dyn ContentStore>,
    pub users: Arc<dyn UserStore>,
    pub forum: Arc<dyn ForumStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            content: Arc::new(ContentRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            forum: Arc::new(ForumRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        Self {
            content: Arc::new(MemoryContentStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            forum: Arc::new(MemoryForumStore::new()),
        }
    }
}
