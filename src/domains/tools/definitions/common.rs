//! Helpers shared by every maps tool: argument parsing, result rendering and
//! route construction.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::domains::maps::{MapsClient, MapsError};
use crate::domains::tools::ToolError;

/// Deserialize tool arguments into the tool's parameter struct.
pub fn parse_arguments<P: DeserializeOwned>(arguments: Value) -> Result<P, ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Success: a one-line summary, the pretty JSON, and the same JSON as
/// structured content.
pub fn structured_result<T: Serialize>(summary: impl Into<String>, data: &T) -> CallToolResult {
    let value = match serde_json::to_value(data) {
        Ok(value) => value,
        Err(e) => {
            return error_result(&MapsError::internal(format!(
                "Failed to serialize result: {e}"
            )));
        }
    };
    let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());

    let mut result = CallToolResult::success(vec![Content::text(summary.into()), Content::text(pretty)]);
    result.structured_content = Some(value);
    result
}

/// Failure: the `{"error": {"code", "message", "context"}}` envelope with
/// `is_error` set. Never a protocol-level error.
pub fn error_result(error: &MapsError) -> CallToolResult {
    warn!(kind = %error.kind, "Tool call failed: {}", error.message);
    let envelope = error.to_envelope();
    let pretty = serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string());

    let mut result = CallToolResult::error(vec![Content::text(pretty)]);
    result.structured_content = Some(envelope);
    result
}

/// Render a client outcome with `summary` derived from the success value.
pub fn render<T, F>(outcome: Result<T, MapsError>, summary: F) -> CallToolResult
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match outcome {
        Ok(data) => structured_result(summary(&data), &data),
        Err(e) => error_result(&e),
    }
}

/// Tool metadata with the input schema generated from `P`.
pub fn tool_model<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Build an rmcp route that parses `P` and runs `handler` against the shared client.
pub fn maps_route<S, P, F, Fut>(tool: Tool, client: Arc<MapsClient>, handler: F) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
    F: Fn(Arc<MapsClient>, P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallToolResult> + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let call = parse_arguments::<P>(Value::Object(args))
            .map(|params| handler(client.clone(), params));
        async move {
            match call {
                Ok(call) => Ok(call.await),
                Err(e) => Err(McpError::invalid_params(e.to_string(), None)),
            }
        }
        .boxed()
    })
}
