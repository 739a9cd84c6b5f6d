//! PostgreSQL store implementations

pub mod content;
pub mod forum;
pub mod user;

pub use content::ContentRepository;
pub use forum::ForumRepository;
pub use user::UserRepository;
