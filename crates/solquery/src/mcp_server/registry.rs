//! Tool schema registry: named input contracts, validation, and dispatch.

use serde_json::{json, Map, Value};
use std::future::Future;
use std::pin::Pin;

use super::jsonrpc::{tool_err, tool_ok};
use crate::chain::SolanaChain;
use crate::errors::ToolError;

/// Input field kinds accepted by tool contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

impl FieldKind {
    const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// One declared input field: kind, whether it is required, an optional default
/// substituted when absent, and optional integer bounds.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    pub bounds: Option<(i64, i64)>,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: true,
            default: None,
            bounds: None,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: None,
            bounds: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn bounded(mut self, min: i64, max: i64) -> Self {
        self.bounds = Some((min, max));
        self
    }
}

/// A named tool and the shape of its input object.
#[derive(Debug, Clone)]
pub struct ToolContract {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl ToolContract {
    pub fn new(name: &'static str, description: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name,
            description,
            fields,
        }
    }

    /// JSON Schema served to the host via `tools/list`.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = vec![];
        for f in &self.fields {
            let mut prop = Map::new();
            prop.insert("type".to_owned(), json!(f.kind.json_type()));
            if !f.description.is_empty() {
                prop.insert("description".to_owned(), json!(f.description));
            }
            if let Some((min, max)) = f.bounds {
                prop.insert("minimum".to_owned(), json!(min));
                prop.insert("maximum".to_owned(), json!(max));
            }
            if let Some(d) = &f.default {
                prop.insert("default".to_owned(), d.clone());
            }
            properties.insert(f.name.to_owned(), Value::Object(prop));
            if f.required {
                required.push(f.name);
            }
        }
        let mut schema = Map::new();
        schema.insert("type".to_owned(), json!("object"));
        schema.insert("properties".to_owned(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_owned(), json!(required));
        }
        schema.insert("additionalProperties".to_owned(), json!(false));
        Value::Object(schema)
    }

    /// Validate raw call arguments against the declared fields, substituting
    /// defaults for absent optional fields. Unknown extra fields are ignored.
    pub fn validate(&self, raw: &Value) -> Result<ToolArgs, ToolError> {
        let empty = Map::new();
        let args = match raw {
            Value::Null => &empty,
            Value::Object(m) => m,
            _ => return Err(ToolError::invalid_params("arguments must be an object")),
        };
        let mut out = Map::new();
        for f in &self.fields {
            let Some(v) = args.get(f.name) else {
                if f.required {
                    return Err(ToolError::invalid_params(format!(
                        "missing required field `{}`",
                        f.name
                    )));
                }
                if let Some(d) = &f.default {
                    out.insert(f.name.to_owned(), d.clone());
                }
                continue;
            };
            let kind_ok = match f.kind {
                FieldKind::String => v.is_string(),
                FieldKind::Integer => v.is_i64() || v.is_u64(),
                FieldKind::Boolean => v.is_boolean(),
            };
            if !kind_ok {
                return Err(ToolError::invalid_params(format!(
                    "field `{}` must be a {}",
                    f.name,
                    f.kind.json_type()
                )));
            }
            if let Some((min, max)) = f.bounds {
                let n = v.as_i64().ok_or_else(|| {
                    ToolError::invalid_params(format!("field `{}` is out of range", f.name))
                })?;
                if n < min || n > max {
                    return Err(ToolError::invalid_params(format!(
                        "field `{}` must be between {min} and {max}",
                        f.name
                    )));
                }
            }
            out.insert(f.name.to_owned(), v.clone());
        }
        Ok(ToolArgs(out))
    }
}

/// Validated arguments handed to a handler, defaults already substituted.
///
/// Accessors only fail if a handler asks for a field its own contract never
/// guaranteed, which is a wiring bug surfaced as a validation error rather
/// than a crash.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    /// Build arguments directly, bypassing contract validation. Handler tests
    /// use this; production arguments always come out of `validate`.
    #[cfg(test)]
    pub fn from_value(v: Value) -> Self {
        match v {
            Value::Object(m) => Self(m),
            _ => Self(Map::new()),
        }
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_params(format!("missing required field `{name}`")))
    }

    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        self.0
            .get(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| ToolError::invalid_params(format!("missing required field `{name}`")))
    }
}

type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + 'a>>;

/// Tool entry point: validated arguments in, JSON payload (or uniform error)
/// out.
pub type ToolHandler = for<'a> fn(&'a SolanaChain, ToolArgs) -> HandlerFuture<'a>;

struct RegisteredTool {
    contract: ToolContract,
    handler: ToolHandler,
}

/// Name → contract/handler table. Registration order is the order served by
/// `tools/list`.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Duplicate names and malformed contracts are startup
    /// bugs, so they fail hard before the transport is opened.
    pub fn register(&mut self, contract: ToolContract, handler: ToolHandler) -> eyre::Result<()> {
        if self.tools.iter().any(|t| t.contract.name == contract.name) {
            eyre::bail!("tool registered twice: {}", contract.name);
        }
        for f in &contract.fields {
            if f.required && f.default.is_some() {
                eyre::bail!(
                    "tool {}: required field `{}` must not carry a default",
                    contract.name,
                    f.name
                );
            }
            if f.bounds.is_some() && f.kind != FieldKind::Integer {
                eyre::bail!(
                    "tool {}: bounds on non-integer field `{}`",
                    contract.name,
                    f.name
                );
            }
        }
        self.tools.push(RegisteredTool { contract, handler });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    #[cfg(test)]
    pub fn contract(&self, name: &str) -> Option<&ToolContract> {
        self.tools
            .iter()
            .find(|t| t.contract.name == name)
            .map(|t| &t.contract)
    }

    /// `tools/list` result.
    pub fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.contract.name,
                    "description": t.contract.description,
                    "inputSchema": t.contract.input_schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    /// Run one invocation end to end: look up the tool, validate arguments,
    /// invoke the handler, wrap the outcome. Failures of any kind come back
    /// as an error envelope; nothing escapes to the transport loop.
    pub async fn dispatch(&self, chain: &SolanaChain, name: &str, raw_args: &Value) -> Value {
        let Some(tool) = self.tools.iter().find(|t| t.contract.name == name) else {
            return tool_err(name, &ToolError::new("unknown_tool", "unknown tool"));
        };
        let args = match tool.contract.validate(raw_args) {
            Ok(args) => args,
            Err(e) => return tool_err(name, &e),
        };
        match (tool.handler)(chain, args).await {
            Ok(payload) => tool_ok(&payload),
            Err(e) => tool_err(name, &e),
        }
    }
}
