//! Adhyayan Core Library
//!
//! This crate provides the domain models, error types, configuration, the static
//! hierarchy catalog, the content matcher and the approval workflow shared by all
//! Adhyayan components. Nothing in here performs I/O.

pub mod approval;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod matcher;
pub mod models;
pub mod search;
pub mod validation;

// Re-export commonly used types
pub use approval::{can_view, ReviewDecision, Viewer};
pub use catalog::{Catalog, CatalogNode, NodeKind};
pub use config::{Config, DatabaseBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use matcher::{best_match, resolve, ContentFields, ResolvedPath};
