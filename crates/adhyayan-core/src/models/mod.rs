//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod content;
mod forum;
mod leaderboard;
mod search;
mod user;

pub use content::*;
pub use forum::*;
pub use leaderboard::*;
pub use search::*;
pub use user::*;
