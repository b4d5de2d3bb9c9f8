//! Mutable route storage.
//!
//! # Responsibilities
//! - Store the method → ordered bindings mapping
//! - Mutate it safely while dispatch runs on other tasks
//! - Hand out consistent snapshots for lock-free matching
//!
//! # Design Decisions
//! - One `std::sync::RwLock` over the whole table; mutations are rare
//!   control-plane events, snapshots are O(1) Arc-clones
//! - Registration is replace-in-place: re-registering a pattern string
//!   swaps the handler without growing the table under route churn
//! - Deregistration rebuilds the list by copying untouched spans, so a
//!   reader never observes a partially edited sequence
//! - Emptied method entries are retained, not removed from the map

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;

use crate::routing::pattern::{PathParams, Pattern};

/// A route handler: receives the request and the path parameters
/// resolved by the matched pattern.
pub type HandlerFunc =
    Arc<dyn Fn(Request<Body>, PathParams) -> BoxFuture<'static, Response<Body>> + Send + Sync>;

/// Wrap an async closure as a [`HandlerFunc`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerFunc
where
    F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Response<Body>> + Send + 'static,
{
    Arc::new(move |req, params| Box::pin(f(req, params)))
}

/// An immutable (pattern, handler) pair. Updates replace the whole
/// binding; nothing is edited in place after insertion.
#[derive(Clone)]
pub struct Binding {
    pattern: Arc<dyn Pattern>,
    handler: HandlerFunc,
}

impl Binding {
    pub fn new(pattern: Arc<dyn Pattern>, handler: HandlerFunc) -> Self {
        Self { pattern, handler }
    }

    pub fn pattern(&self) -> &dyn Pattern {
        self.pattern.as_ref()
    }

    pub fn handler(&self) -> &HandlerFunc {
        &self.handler
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("pattern", &self.pattern.pattern_str())
            .finish_non_exhaustive()
    }
}

/// Thread-safe method → ordered bindings mapping.
///
/// Lives for the lifetime of the router that owns it. All mutation goes
/// through [`register`](Self::register) / [`deregister`](Self::deregister);
/// dispatch reads through snapshots and never holds the lock while
/// matching patterns or running handlers.
#[derive(Default)]
pub struct RouteTable {
    bindings: RwLock<HashMap<String, Vec<Binding>>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding for `method`.
    ///
    /// Replace-in-place policy: every existing binding whose pattern
    /// string equals the new pattern's is removed, the relative order of
    /// unrelated bindings is preserved, and the new binding is appended
    /// at the end.
    pub fn register(&self, method: &str, pattern: Arc<dyn Pattern>, handler: HandlerFunc) {
        let mut table = self.bindings.write().expect("route table lock poisoned");
        let bindings = table.entry(method.to_string()).or_default();

        let replaced = Self::remove_matching(bindings, pattern.pattern_str());
        bindings.push(Binding::new(pattern.clone(), handler));

        tracing::debug!(
            method,
            pattern = pattern.pattern_str(),
            replaced,
            "route registered"
        );
    }

    /// Remove every binding for `method` whose pattern string equals
    /// `pattern.pattern_str()`. Idempotent; removing a binding that does
    /// not exist is a no-op.
    pub fn deregister(&self, method: &str, pattern: &dyn Pattern) {
        let mut table = self.bindings.write().expect("route table lock poisoned");
        let Some(bindings) = table.get_mut(method) else {
            return;
        };

        let removed = Self::remove_matching(bindings, pattern.pattern_str());
        if removed > 0 {
            tracing::debug!(
                method,
                pattern = pattern.pattern_str(),
                removed,
                "route deregistered"
            );
        }
    }

    /// Consistent view of the bindings for one method. The returned
    /// sequence is detached from the table: later mutations do not
    /// affect it, and iterating it requires no lock.
    pub fn snapshot_for(&self, method: &str) -> Vec<Binding> {
        let table = self.bindings.read().expect("route table lock poisoned");
        table.get(method).cloned().unwrap_or_default()
    }

    /// Consistent view across all methods, for the cross-method
    /// fallback scan.
    pub fn snapshot_all(&self) -> Vec<(String, Vec<Binding>)> {
        let table = self.bindings.read().expect("route table lock poisoned");
        table
            .iter()
            .map(|(method, bindings)| (method.clone(), bindings.clone()))
            .collect()
    }

    /// Rebuild `bindings` without the entries whose pattern string
    /// equals `pattern_str`, copying untouched spans, then swap the new
    /// sequence in. Returns how many entries were dropped.
    fn remove_matching(bindings: &mut Vec<Binding>, pattern_str: &str) -> usize {
        let mut offset = 0;
        let mut rebuilt: Vec<Binding> = Vec::with_capacity(bindings.len());
        for (idx, binding) in bindings.iter().enumerate() {
            if binding.pattern.pattern_str() == pattern_str {
                rebuilt.extend_from_slice(&bindings[offset..idx]);
                offset = idx + 1;
            }
        }
        if offset == 0 {
            return 0;
        }

        let removed = offset - rebuilt.len();
        rebuilt.extend_from_slice(&bindings[offset..]);
        *bindings = rebuilt;
        removed
    }
}
