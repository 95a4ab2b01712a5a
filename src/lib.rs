//! RustF Utils - stateless helpers for web applications
//!
//! rustf-utils bundles the small helpers every request handler ends up
//! needing:
//! - String manipulation (case conversion, truncation, templates)
//! - Array/map access over `serde_json::Value`
//! - Request introspection through a request-scoped `RequestContext`
//! - IP/URL/e-mail validation
//! - GUIDs, HTML escaping, CSV output, debug dumps and locked file writes

// Enforce error handling best practices
#![cfg_attr(
    not(test),
    warn(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
    )
)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used,))]

pub mod config;
pub mod configuration;
pub mod error;
pub mod http;
pub mod utils;

// Re-export main types for public API
pub use config::{Charset, UtilsConfig};
pub use configuration::CONF;
pub use error::{Error, Result};
pub use http::{InputSource, RequestContext};
pub use utils::{Utils, U};

// Re-export commonly used external types
pub use serde_json::{json, Value};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::*;
    pub use serde_json::json;

    pub use crate::configuration::CONF;
    pub use crate::utils::array::{Key, ToArray};
    pub use crate::utils::http::FetchOptions;
    pub use crate::utils::validation::IpFamily;
    pub use crate::utils::{Utils, U};
}
