//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Disable the POST path-length fallback. When the fallback is
    /// enabled (the default), a urlencoded POST may stand in for a
    /// request whose client cannot issue unusual HTTP methods, either
    /// via the `X-HTTP-Method-Override` header or by matching a route
    /// registered under another method.
    pub disable_path_length_fallback: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            disable_path_length_fallback: false,
        }
    }
}
