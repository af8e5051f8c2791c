//! The single error shape that leaves the maps core.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Kind used when the failure came from the transport, not the provider.
pub const REQUEST_FAILED: &str = "REQUEST_FAILED";
/// Kind used when an address origin could not be resolved.
pub const GEOCODE_FAILED: &str = "GEOCODE_FAILED";
/// Kind used for a rejected IP override.
pub const INVALID_IP: &str = "INVALID_IP";
/// Kind used when arguments are unusable before any request is made.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
/// Kind used when a successful response lacks the data the operation needs.
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
/// Kind used for failures inside this process.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Where a failure originated. Drives retry decisions; never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Network, timeout, connection or body decoding failure.
    Transport,
    /// Non-2xx HTTP response.
    Http,
    /// 2xx response whose payload carried a non-OK status.
    Upstream,
    /// Lookup of static local content that does not exist.
    NotFound,
    /// Input rejected before any request was made.
    InvalidInput,
    /// Bug or setup failure inside this process.
    Internal,
}

impl FailureClass {
    /// Transport and HTTP failures are worth another attempt.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Transport | Self::Http)
    }
}

/// Normalized error: stable `kind`, human `message`, diagnostic `context`.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct MapsError {
    #[serde(skip)]
    pub class: FailureClass,
    pub kind: String,
    pub message: String,
    pub context: Map<String, Value>,
}

impl MapsError {
    pub fn new(class: FailureClass, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class,
            kind: kind.into(),
            message: message.into(),
            context: Map::new(),
        }
    }

    pub fn invalid_input(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureClass::InvalidInput, kind, message)
    }

    pub fn not_found(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureClass::NotFound, kind, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureClass::Internal, INTERNAL_ERROR, message)
    }

    /// Attach one context entry, replacing any previous value for `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Merge `base` under the existing context. Entries already on the error win.
    pub fn merge_context(mut self, base: Map<String, Value>) -> Self {
        for (key, value) in base {
            self.context.entry(key).or_insert(value);
        }
        self
    }

    /// The outward envelope: `{"error": {"code", "message", "context"}}`.
    pub fn to_envelope(&self) -> Value {
        serde_json::json!({
            "error": {
                "code": self.kind,
                "message": self.message,
                "context": self.context,
            }
        })
    }
}
