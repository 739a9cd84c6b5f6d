//! API constants
//!
//! Route prefixes shared by the router, the OpenAPI annotations and the tests.

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Current API version segment
pub const API_VERSION: &str = "v0";

/// Versioned prefix every domain route is mounted under
pub const API_PREFIX: &str = "/api/v0";

/// Where the generated OpenAPI document is served
pub const OPENAPI_PATH: &str = "/api/openapi.json";
