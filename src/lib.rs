//! Concurrency-safe HTTP request mux with hot add/remove of routes.
//!
//! Routes can be registered and deregistered while requests are being
//! served; in-flight dispatch works from a per-request snapshot of the
//! route table and is never interrupted by a concurrent mutation.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::{DispatchError, ErrorRenderer, FormParams, PlainTextRenderer, RouterService};
pub use routing::{handler_fn, DynamicRouter, HandlerFunc, PathParams, Pattern, RouteTable};
