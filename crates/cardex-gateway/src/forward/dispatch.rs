//! Outbound call execution.

use std::time::Duration;

use serde_json::Value;

use super::{ForwardedRequest, UpstreamOutcome};

/// Issue the outbound call and classify what happened.
///
/// The optional timeout bounds the whole exchange (connect, send, read);
/// on expiry reqwest drops the in-flight request, which closes the
/// underlying connection, and the outcome is `TimedOut`. Transport-level
/// failures become `Unreachable` with the underlying message. No retries
/// happen here: some upstream verbs are not idempotent, so retry policy
/// belongs to the caller.
pub async fn dispatch(
    client: &reqwest::Client,
    base_url: &str,
    request: &ForwardedRequest,
    timeout: Option<Duration>,
) -> UpstreamOutcome {
    let url = format!("{}{}", base_url, request.target_path);

    let mut builder = client.request(request.method.clone(), &url);
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }
    if let Some(budget) = timeout {
        builder = builder.timeout(budget);
    }

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => return classify_transport_error(&url, e),
    };

    let status = response.status();
    let body = match response.bytes().await {
        Ok(bytes) => parse_body(&bytes),
        // Body read can still hit the same timeout budget as the send.
        Err(e) if e.is_timeout() => return UpstreamOutcome::TimedOut,
        Err(e) => {
            tracing::warn!("Failed to read upstream body from {}: {}", url, e);
            Value::Object(serde_json::Map::new())
        }
    };

    if status.is_success() {
        UpstreamOutcome::Success { status, body }
    } else {
        UpstreamOutcome::UpstreamError { status, body }
    }
}

fn classify_transport_error(url: &str, e: reqwest::Error) -> UpstreamOutcome {
    if e.is_timeout() {
        tracing::warn!("Upstream call to {} timed out", url);
        return UpstreamOutcome::TimedOut;
    }
    // reqwest wraps the interesting part (DNS, refused, TLS) in its source.
    let cause = match std::error::Error::source(&e) {
        Some(source) => source.to_string(),
        None => e.to_string(),
    };
    tracing::warn!("Upstream call to {} failed: {}", url, cause);
    UpstreamOutcome::Unreachable { cause }
}

/// Best-effort JSON parse: a malformed or empty body degrades to `{}`
/// instead of failing the call — the upstream status stays authoritative.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}
