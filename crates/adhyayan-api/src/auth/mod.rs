//! Authentication: password hashing, HS256 tokens, and the bearer middleware.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use jwt::{JwtClaims, JwtService};
pub use models::{AdminUser, AuthUser, MaybeUser};
