use crate::errors::ToolError;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

pub fn ok(id: Value, result: Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id,
        result: Some(result),
        error: None,
    }
}

pub fn err(id: Value, code: i64, message: impl Into<String>) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.into(),
        }),
    }
}

/// Success envelope: one pretty-printed text content block, `isError: false`.
pub fn tool_ok(payload: &Value) -> Value {
    let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_e| "{}".into());
    json!({
      "content": [{ "type": "text", "text": text }],
      "isError": false
    })
}

/// Error envelope: same shape as success so the host treats both uniformly.
pub fn tool_err(tool_name: &str, e: &ToolError) -> Value {
    json!({
      "content": [{ "type": "text", "text": format!("Error {tool_name}: {}", e.message) }],
      "isError": true
    })
}
