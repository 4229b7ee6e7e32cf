//! Inbound → outbound request translation.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method};
use bytes::Bytes;

use crate::error::ValidationError;
use crate::upstream::Upstream;

use super::{ForwardPolicy, ForwardedRequest};

/// Build the outbound request for one inbound gateway call.
///
/// The gateway's own route prefix has already been stripped by the router;
/// `path_suffix` is whatever followed it (possibly empty). The suffix is
/// re-rooted under the upstream's internal API prefix, query parameters are
/// copied in original order with last-wins duplicate handling, and headers
/// are copied or synthesized per policy.
pub fn translate(
    upstream: Upstream,
    method: &Method,
    path_suffix: &str,
    raw_query: Option<&str>,
    headers: &HeaderMap,
    body: Bytes,
    policy: &ForwardPolicy,
) -> Result<ForwardedRequest, ValidationError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if policy.require_bearer {
        match authorization.as_deref() {
            Some(value) if value.starts_with("Bearer ") => {}
            _ => return Err(ValidationError::AuthorizationRequired),
        }
    }

    let mut out_headers = vec![("accept".to_string(), "application/json".to_string())];
    if let Some(value) = authorization {
        out_headers.push(("authorization".to_string(), value));
    }

    // Empty bodies are treated as absent so no Content-Type is forced.
    let body = if matches!(*method, Method::GET | Method::HEAD) || body.is_empty() {
        None
    } else {
        Some(body)
    };

    if body.is_some() {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| value.to_ascii_lowercase().contains("json"))
            .unwrap_or("application/json");
        out_headers.push(("content-type".to_string(), content_type.to_string()));
    }

    Ok(ForwardedRequest {
        method: method.clone(),
        target_path: join_prefix(upstream.api_prefix(), path_suffix),
        query: collect_query(raw_query),
        headers: out_headers,
        body,
    })
}

/// An empty suffix maps to the bare prefix, no dangling slash.
fn join_prefix(prefix: &str, suffix: &str) -> String {
    let suffix = suffix.trim_start_matches('/');
    if suffix.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}/{suffix}")
    }
}

/// Copy query pairs verbatim and in original order; a later duplicate key
/// overwrites the earlier value in place, matching standard URL semantics.
fn collect_query(raw_query: Option<&str>) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let Some(raw) = raw_query else { return pairs };
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value.into_owned(),
            None => pairs.push((key.into_owned(), value.into_owned())),
        }
    }
    pairs
}
