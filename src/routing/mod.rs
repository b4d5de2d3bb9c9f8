//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, headers)
//!     → router.rs (path split, verb strip, method override)
//!     → table.rs (snapshot of current bindings)
//!     → pattern.rs (candidate match, path params)
//!     → Return: handler invocation or classified miss
//!
//! Route mutation (any time, any task):
//!     register / deregister
//!     → table.rs (exclusive lock, replace or rebuild list)
//!     → next snapshot observes the change
//! ```
//!
//! # Design Decisions
//! - The table is the only shared mutable state; everything else is
//!   per-request
//! - Mutations are linearizable; each dispatch works from a snapshot
//!   taken at lookup time
//! - First match wins within a method (ordered scan)

pub mod pattern;
pub mod router;
pub mod table;

pub use pattern::{NoMatch, PathParams, Pattern};
pub use router::{DynamicRouter, METHOD_OVERRIDE_HEADER};
pub use table::{handler_fn, Binding, HandlerFunc, RouteTable};
