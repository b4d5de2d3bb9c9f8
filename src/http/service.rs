//! Tower service adapter for the router.
//!
//! # Responsibilities
//! - Expose [`DynamicRouter`] as a `tower::Service` so it mounts
//!   directly in a hyper or axum server
//!
//! # Design Decisions
//! - Infallible error type: routing errors are rendered into responses,
//!   never surfaced to the transport

use std::convert::Infallible;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use tower::Service;

use crate::routing::DynamicRouter;

/// `tower::Service` wrapper around a [`DynamicRouter`].
///
/// Cheap to clone; all clones dispatch against the same route table, so
/// routes registered through any handle are visible to every connection.
#[derive(Clone)]
pub struct RouterService {
    router: DynamicRouter,
}

impl RouterService {
    pub fn new(router: DynamicRouter) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &DynamicRouter {
        &self.router
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response<Body>, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let router = self.router.clone();
        Box::pin(async move { Ok(router.dispatch(req).await) })
    }
}
