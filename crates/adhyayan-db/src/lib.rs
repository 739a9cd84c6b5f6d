//! Adhyayan persistence layer
//!
//! Store traits for content, users and the forum, with a PostgreSQL
//! implementation and an in-memory one for local runs and tests.

pub mod db;

pub use db::*;
