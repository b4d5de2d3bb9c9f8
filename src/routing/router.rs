//! Request dispatch against the mutable route table.
//!
//! # Responsibilities
//! - Parse the request path into components
//! - Strip pattern verb suffixes (`:cancel` style) per candidate
//! - Apply the `X-HTTP-Method-Override` header and POST fallback
//! - Scan the effective method's bindings, then all other methods
//! - Classify misses as BadRequest / NotFound / MethodNotAllowed
//!
//! # Design Decisions
//! - Matching and handler invocation run against a snapshot; the table
//!   lock is never held while either runs, so a slow handler cannot
//!   stall a concurrent registration
//! - Verb stripping is per-pattern: the suffix is removed only when the
//!   candidate declares exactly that verb, which disambiguates verbs
//!   that themselves contain colons
//! - First match wins within a method; once a handler is picked no
//!   further bindings are tried

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};

use crate::config::RouterConfig;
use crate::http::error::{DispatchError, ErrorRenderer, PlainTextRenderer};
use crate::http::form::parse_form;
use crate::routing::pattern::{PathParams, Pattern};
use crate::routing::table::{HandlerFunc, RouteTable};

/// Header a client may use to tunnel an unusual HTTP method through a
/// urlencoded POST.
pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// HTTP request router supporting hot route mutation.
///
/// Routes may be added and removed while requests are in flight;
/// dispatch sees a consistent snapshot of the table per request.
/// Cheap to clone; clones share the same table.
#[derive(Clone)]
pub struct DynamicRouter {
    table: Arc<RouteTable>,
    config: RouterConfig,
    renderer: Arc<dyn ErrorRenderer>,
}

impl Default for DynamicRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl DynamicRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            table: Arc::new(RouteTable::new()),
            config,
            renderer: Arc::new(PlainTextRenderer),
        }
    }

    /// Replace the error renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn ErrorRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Associate `handler` with the (method, pattern) pair. Safe to call
    /// while requests are being dispatched; requests already holding a
    /// snapshot are unaffected.
    pub fn handle(&self, method: &str, pattern: Arc<dyn Pattern>, handler: HandlerFunc) {
        self.table.register(method, pattern, handler);
    }

    /// Remove every binding for (method, pattern), matched by the
    /// pattern's canonical string. Idempotent.
    pub fn handler_deregister(&self, method: &str, pattern: &dyn Pattern) {
        self.table.deregister(method, pattern);
    }

    /// Dispatch a request to the first matching handler, or render the
    /// classified routing error. Never returns an error; rendering is
    /// delegated to the configured [`ErrorRenderer`].
    pub async fn dispatch(&self, req: Request<Body>) -> Response<Body> {
        match self.route(req).await {
            Ok(response) => response,
            Err((req, err)) => {
                tracing::debug!(
                    method = %req.method(),
                    path = req.uri().path(),
                    error = %err,
                    "request not dispatched"
                );
                self.renderer.render(&req, &err)
            }
        }
    }

    async fn route(
        &self,
        mut req: Request<Body>,
    ) -> Result<Response<Body>, (Request<Body>, DispatchError)> {
        let path = req.uri().path().to_string();
        let Some(rest) = path.strip_prefix('/') else {
            return Err((
                req,
                DispatchError::BadRequest("path must start with '/'".to_string()),
            ));
        };

        let components: Vec<&str> = rest.split('/').collect();

        // A last component that is nothing but a verb suffix can never
        // match any pattern.
        if components
            .last()
            .is_some_and(|last| last.starts_with(':'))
        {
            return Err((req, DispatchError::NotFound));
        }

        // Method override only applies to a urlencoded POST; the header
        // value becomes the effective method for the lookups below.
        let override_method = req
            .headers()
            .get(METHOD_OVERRIDE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_uppercase());
        if let Some(name) = override_method.filter(|v| !v.is_empty()) {
            if self.is_path_length_fallback(&req) {
                let method = match Method::from_bytes(name.as_bytes()) {
                    Ok(method) => method,
                    Err(_) => {
                        let msg = format!("invalid method override {name:?}");
                        return Err((req, DispatchError::BadRequest(msg)));
                    }
                };
                *req.method_mut() = method;
                req = match parse_form(req).await {
                    Ok(req) => req,
                    Err((req, msg)) => return Err((req, DispatchError::BadRequest(msg))),
                };
            }
        }

        let effective = req.method().clone();

        for binding in self.table.snapshot_for(effective.as_str()) {
            if let Some(params) = match_components(binding.pattern(), &components) {
                let handler = binding.handler().clone();
                return Ok(handler(req, params).await);
            }
        }

        // Second scan over every other method, both to allow the POST
        // fallback and to tell MethodNotAllowed apart from NotFound.
        for (method, bindings) in self.table.snapshot_all() {
            if method == effective.as_str() {
                continue;
            }
            for binding in bindings {
                let Some(params) = match_components(binding.pattern(), &components) else {
                    continue;
                };

                if self.is_path_length_fallback(&req) {
                    req = match parse_form(req).await {
                        Ok(req) => req,
                        Err((req, msg)) => return Err((req, DispatchError::BadRequest(msg))),
                    };
                    tracing::debug!(
                        requested = %effective,
                        matched = %method,
                        path = %path,
                        "dispatching via POST fallback"
                    );
                    let handler = binding.handler().clone();
                    return Ok(handler(req, params).await);
                }
                return Err((req, DispatchError::MethodNotAllowed));
            }
        }

        Err((req, DispatchError::NotFound))
    }

    fn is_path_length_fallback(&self, req: &Request<Body>) -> bool {
        !self.config.disable_path_length_fallback
            && req.method() == Method::POST
            && req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                == Some("application/x-www-form-urlencoded")
    }
}

/// Try one candidate against the path components, stripping the
/// candidate's own verb suffix from the last component when present.
fn match_components(pattern: &dyn Pattern, components: &[&str]) -> Option<PathParams> {
    let verb = pattern.verb();
    if verb.is_empty() {
        return pattern.matches(components, "").ok();
    }

    let last = *components.last()?;
    let stem = last.strip_suffix(verb)?.strip_suffix(':')?;
    if stem.is_empty() {
        return None;
    }

    let mut trimmed = components.to_vec();
    *trimmed.last_mut()? = stem;
    pattern.matches(&trimmed, verb).ok()
}
