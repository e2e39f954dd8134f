//! Tool-dispatch server: binds the query tools to an MCP stdio transport.

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::{info, warn};

use crate::chain::SolanaChain;
use crate::config;

mod jsonrpc;
mod registry;
mod tools;
mod transport;

use jsonrpc::{err, ok, JsonRpcResponse};
use registry::ToolRegistry;

/// Hosts that send a longer line than this are misbehaving; end the session
/// rather than buffer without bound.
const MAX_JSONRPC_LINE_BYTES: usize = 1_048_576;

const PROTOCOL_VERSION: &str = "2025-06-18";

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Value,
    method: String,
    #[serde(default)]
    params: Value,
}

fn initialize_result() -> Value {
    json!({
      "protocolVersion": PROTOCOL_VERSION,
      "serverInfo": { "name": "solquery", "version": env!("CARGO_PKG_VERSION") },
      "capabilities": { "tools": {} }
    })
}

async fn handle_request(
    registry: &ToolRegistry,
    chain: &SolanaChain,
    req: JsonRpcRequest,
) -> JsonRpcResponse {
    match req.method.as_str() {
        "initialize" => ok(req.id, initialize_result()),
        "ping" => ok(req.id, json!({})),
        "tools/list" => ok(req.id, registry.list_tools()),
        "tools/call" => {
            let name = req
                .params
                .get("name")
                .and_then(|name_v| name_v.as_str())
                .unwrap_or("");
            let args = req.params.get("arguments").cloned().unwrap_or(Value::Null);
            ok(req.id, registry.dispatch(chain, name, &args).await)
        }
        _ => err(req.id, -32601, "method not found"),
    }
}

pub async fn run() -> eyre::Result<()> {
    let endpoint = config::rpc_endpoint();
    let chain = SolanaChain::connect(&endpoint);
    // Duplicate or malformed registrations abort here, before the transport
    // is opened.
    let registry = tools::build_registry()?;

    info!(
        endpoint = %endpoint,
        network = config::network_label(&endpoint),
        tools = registry.len(),
        "mcp server ready"
    );

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = stdin.next_line().await? {
        if line.len() > MAX_JSONRPC_LINE_BYTES {
            break;
        }
        let v: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "invalid json on stdin");
                continue;
            }
        };

        // Notifications carry no "id" and get no reply.
        if v.get("id").is_none() {
            continue;
        }

        let req: JsonRpcRequest = match serde_json::from_value(v) {
            Ok(parsed_req) => parsed_req,
            Err(e) => {
                warn!(error = %e, "failed to parse jsonrpc request");
                continue;
            }
        };

        if req.jsonrpc != "2.0" {
            transport::write_frame(&mut stdout, &err(req.id, -32600, "invalid jsonrpc version"))
                .await?;
            continue;
        }

        let resp = handle_request(&registry, &chain, req).await;
        transport::write_frame(&mut stdout, &resp).await?;
    }

    Ok(())
}
