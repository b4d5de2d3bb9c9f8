//! Routing error classification and rendering.
//!
//! # Responsibilities
//! - Name the terminal routing outcomes the mux can decide
//! - Map each outcome to its HTTP status
//! - Let callers plug in their own error body rendering
//!
//! # Design Decisions
//! - The mux decides *which* error applies, never how it is rendered;
//!   rendering goes through the [`ErrorRenderer`] seam
//! - All variants are terminal for the request; retries belong to the
//!   transport layer

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use thiserror::Error;

/// Why a request could not be dispatched to a handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Malformed path, unparsable override form body, or invalid
    /// override usage.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No registered pattern matches the path under any method.
    #[error("no route matches the request path")]
    NotFound,

    /// A pattern matches the path under a different method and the
    /// POST fallback does not apply.
    #[error("a route matches the path under a different method")]
    MethodNotAllowed,
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::BadRequest(_) => StatusCode::BAD_REQUEST,
            DispatchError::NotFound => StatusCode::NOT_FOUND,
            DispatchError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// Renders a classified routing error into an HTTP response.
///
/// Receives the request so renderers can honor `Accept` headers or log
/// request context; the default implementation ignores it.
pub trait ErrorRenderer: Send + Sync {
    fn render(&self, req: &Request<Body>, err: &DispatchError) -> Response<Body>;
}

/// Default renderer: status code plus a plain-text body.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl ErrorRenderer for PlainTextRenderer {
    fn render(&self, _req: &Request<Body>, err: &DispatchError) -> Response<Body> {
        let status = err.status();
        let body = match err {
            DispatchError::BadRequest(msg) => msg.clone(),
            _ => status
                .canonical_reason()
                .unwrap_or("routing error")
                .to_string(),
        };

        Response::builder()
            .status(status)
            .header("content-type", "text/plain; charset=utf-8")
            .body(Body::from(body))
            .expect("static error response must build")
    }
}
