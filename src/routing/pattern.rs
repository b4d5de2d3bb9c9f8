//! Pattern contract consumed by the mux.
//!
//! # Responsibilities
//! - Define the matching capability the route table stores
//! - Define the path-parameter map handed to handlers
//!
//! # Design Decisions
//! - The mux never compiles templates; it consumes compiled patterns
//!   through this trait and only relies on three capabilities
//! - Equality during deregistration is string-based (canonical form),
//!   never pointer identity, so independently compiled copies of the
//!   same template deregister each other

use std::collections::HashMap;

/// Path parameters resolved by a successful pattern match,
/// keyed by capture name.
pub type PathParams = HashMap<String, String>;

/// Returned by [`Pattern::matches`] when the path does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch;

impl std::fmt::Display for NoMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pattern does not match")
    }
}

impl std::error::Error for NoMatch {}

/// A compiled path pattern.
///
/// The compiler that produces these is an external collaborator; the mux
/// treats a pattern as opaque apart from the three operations below.
pub trait Pattern: Send + Sync {
    /// Match the split path components plus an optional verb suffix,
    /// producing the resolved path parameters on success.
    fn matches(&self, components: &[&str], verb: &str) -> Result<PathParams, NoMatch>;

    /// Canonical template string. Two patterns with equal canonical
    /// strings are interchangeable for deregistration purposes.
    fn pattern_str(&self) -> &str;

    /// The verb suffix this pattern expects after the final path
    /// component (the `cancel` in `/v1/jobs/{id}:cancel`), or the empty
    /// string when the pattern has none.
    fn verb(&self) -> &str;
}
