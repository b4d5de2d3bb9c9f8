//! Urlencoded form parsing for the POST fallback path.
//!
//! # Responsibilities
//! - Buffer and decode `application/x-www-form-urlencoded` bodies
//! - Expose the decoded pairs to handlers via a request extension
//! - Re-attach the buffered body so handlers can still read it

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::http::Request;

/// Decoded form pairs, inserted into request extensions once the mux
/// has parsed the body on a fallback dispatch.
#[derive(Debug, Clone, Default)]
pub struct FormParams(pub HashMap<String, Vec<String>>);

impl FormParams {
    /// First value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.first().map(String::as_str)
    }
}

/// Buffer the request body and decode it as a urlencoded form.
///
/// On success the decoded [`FormParams`] are stored in the request's
/// extensions and the request is returned with its body re-attached.
/// On failure the request comes back with an empty body alongside the
/// failure message, so the caller can still render an error response.
pub async fn parse_form(req: Request<Body>) -> Result<Request<Body>, (Request<Body>, String)> {
    let (mut parts, body) = req.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let req = Request::from_parts(parts, Body::empty());
            return Err((req, e.to_string()));
        }
    };

    let text = match std::str::from_utf8(&bytes) {
        Ok(text) => text,
        Err(_) => {
            let req = Request::from_parts(parts, Body::from(bytes));
            return Err((req, "invalid form body: not valid UTF-8".to_string()));
        }
    };

    let mut form = FormParams::default();
    for (key, value) in url::form_urlencoded::parse(text.as_bytes()) {
        form.0
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    parts.extensions.insert(form);

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_form_decodes_pairs() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from("a=1&b=two&a=3"))
            .unwrap();

        let req = parse_form(req).await.unwrap();
        let form = req.extensions().get::<FormParams>().unwrap();
        assert_eq!(form.get("a"), Some("1"));
        assert_eq!(form.get("b"), Some("two"));
        assert_eq!(form.0["a"], vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_parse_form_preserves_body() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from("k=v"))
            .unwrap();

        let req = parse_form(req).await.unwrap();
        let bytes = to_bytes(req.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"k=v");
    }

    #[tokio::test]
    async fn test_parse_form_rejects_non_utf8() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from(vec![0xff, 0xfe, b'=', b'1']))
            .unwrap();

        let (_, msg) = parse_form(req).await.unwrap_err();
        assert!(msg.contains("UTF-8"));
    }
}
