//! Shared fixtures for integration tests.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use hotmux::{handler_fn, HandlerFunc, PathParams, Pattern};
use hotmux::routing::NoMatch;

/// Segment-list pattern for tests: literal segments plus `{name}`
/// captures, with an optional verb suffix. Stands in for the external
/// pattern compiler.
pub struct TestPattern {
    template: String,
    segments: Vec<String>,
    verb: String,
}

impl TestPattern {
    pub fn new(template: &str) -> Arc<dyn Pattern> {
        Self::with_verb(template, "")
    }

    pub fn with_verb(template: &str, verb: &str) -> Arc<dyn Pattern> {
        let segments = template
            .trim_start_matches('/')
            .split('/')
            .map(str::to_string)
            .collect();
        let canonical = if verb.is_empty() {
            template.to_string()
        } else {
            format!("{template}:{verb}")
        };
        Arc::new(Self {
            template: canonical,
            segments,
            verb: verb.to_string(),
        })
    }
}

impl Pattern for TestPattern {
    fn matches(&self, components: &[&str], verb: &str) -> Result<PathParams, NoMatch> {
        if verb != self.verb || components.len() != self.segments.len() {
            return Err(NoMatch);
        }
        let mut params = PathParams::new();
        for (seg, comp) in self.segments.iter().zip(components) {
            if let Some(name) = seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                params.insert(name.to_string(), comp.to_string());
            } else if seg != comp {
                return Err(NoMatch);
            }
        }
        Ok(params)
    }

    fn pattern_str(&self) -> &str {
        &self.template
    }

    fn verb(&self) -> &str {
        &self.verb
    }
}

/// Handler answering 200 with a fixed body.
pub fn text_handler(body: &'static str) -> HandlerFunc {
    handler_fn(move |_req, _params| async move {
        Response::builder()
            .status(StatusCode::OK)
            .body(Body::from(body))
            .unwrap()
    })
}

/// Handler echoing one resolved path parameter as the response body.
#[allow(dead_code)]
pub fn echo_param_handler(name: &'static str) -> HandlerFunc {
    handler_fn(move |_req, params| async move {
        let value = params.get(name).cloned().unwrap_or_default();
        Response::builder()
            .status(StatusCode::OK)
            .body(Body::from(value))
            .unwrap()
    })
}

/// Collect a response body into a string.
pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Build a GET request for `path`.
pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

/// Build a urlencoded POST request for `path`.
#[allow(dead_code)]
pub fn form_post(path: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}
