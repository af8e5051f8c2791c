//! Failure classification.
//!
//! Transport errors, non-2xx responses and 2xx responses carrying a non-OK
//! upstream status all converge here into a [`MapsError`].

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Map, Value};

use super::error::{FailureClass, MapsError, REQUEST_FAILED};

/// The raw outcome of one failed attempt, before classification.
#[derive(Debug)]
pub(crate) enum Failure {
    Transport(reqwest::Error),
    Http {
        status: StatusCode,
        retry_after: Option<Duration>,
        body: Option<Value>,
    },
    Upstream {
        status: StatusCode,
        payload: Value,
    },
}

impl Failure {
    pub(crate) fn class(&self) -> FailureClass {
        match self {
            Self::Transport(_) => FailureClass::Transport,
            Self::Http { .. } => FailureClass::Http,
            Self::Upstream { .. } => FailureClass::Upstream,
        }
    }

    pub(crate) fn is_throttled(&self) -> bool {
        matches!(self, Self::Http { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS)
    }

    /// Delay the provider asked for on a 429, if any.
    pub(crate) fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Http { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Upstream status field of a payload, when it is a string.
pub(crate) fn upstream_status(payload: &Value) -> Option<&str> {
    payload.get("status").and_then(Value::as_str)
}

/// A payload is a logical failure when it names a status other than `OK`.
pub(crate) fn is_logical_failure(payload: &Value) -> bool {
    upstream_status(payload).is_some_and(|status| status != "OK")
}

/// Parse a `Retry-After` header given in seconds.
pub(crate) fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Turn one failure into the normalized error shape.
pub(crate) fn classify(endpoint: &str, failure: &Failure) -> MapsError {
    let error = match failure {
        Failure::Transport(e) => MapsError::new(FailureClass::Transport, REQUEST_FAILED, e.to_string())
            .with_context("transport", transport_cause(e)),
        Failure::Http { status, body, .. } => classify_http(*status, body.as_ref()),
        Failure::Upstream { status, payload } => classify_upstream(*status, payload),
    };
    error.with_context("endpoint", endpoint)
}

fn classify_upstream(status: StatusCode, payload: &Value) -> MapsError {
    let api_status = upstream_status(payload).unwrap_or("UNKNOWN_ERROR");
    let api_error = payload.get("error_message").and_then(Value::as_str);

    let mut error = MapsError::new(
        FailureClass::Upstream,
        api_status,
        api_error.unwrap_or("API request failed"),
    )
    .with_context("status", status.as_u16())
    .with_context("api_status", api_status);

    if let Some(message) = api_error {
        error = error.with_context("api_error", message);
    }
    error
}

fn classify_http(status: StatusCode, body: Option<&Value>) -> MapsError {
    let (api_status, api_message) = body.map(upstream_error_fields).unwrap_or((None, None));

    let kind = api_status
        .clone()
        .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));
    let message = api_message.clone().unwrap_or_else(|| status_line(status));

    let mut error =
        MapsError::new(FailureClass::Http, kind, message).with_context("status", status.as_u16());
    if let Some(api_status) = api_status {
        error = error.with_context("api_status", api_status);
    }
    if let Some(api_message) = api_message {
        error = error.with_context("api_error", api_message);
    }
    error
}

/// Pull a status code and message out of an error body.
///
/// Handles the `{"error": {"status", "message", "errors": [{"reason"}]}}`
/// shape of the newer APIs and the flat `{"status", "error_message"}` shape
/// of the legacy ones.
fn upstream_error_fields(body: &Value) -> (Option<String>, Option<String>) {
    if let Some(error) = body.get("error").filter(|e| e.is_object()) {
        let status = error
            .get("status")
            .and_then(Value::as_str)
            .or_else(|| {
                error
                    .pointer("/errors/0/reason")
                    .and_then(Value::as_str)
            })
            .map(str::to_string);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return (status, message);
    }

    let status = upstream_status(body).map(str::to_string);
    let message = body
        .get("error_message")
        .and_then(Value::as_str)
        .map(str::to_string);
    (status, message)
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

fn transport_cause(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_decode() {
        "decode"
    } else if error.is_body() {
        "body"
    } else {
        "request"
    }
}

/// Context common to every failure of one logical call.
pub(crate) fn base_context(endpoint: &str, url: &str, attempts: u32) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("endpoint".into(), endpoint.into());
    context.insert("url".into(), url.into());
    context.insert("attempts".into(), attempts.into());
    context
}
