use thiserror::Error;

/// Uniform error value carried out of a tool handler.
///
/// Every failure path (validation, codec, remote query) funnels into one of
/// these; the dispatch layer renders it as an error envelope without ever
/// tearing down the host connection.
#[derive(Debug, Clone)]
pub struct ToolError {
    pub code: &'static str,
    pub message: String,
}

impl ToolError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new("invalid_params", message)
    }
}

/// Failures raised while resolving a query against the ledger node.
#[derive(Debug, Error, Clone)]
pub enum QueryError {
    #[error("account {0} not found")]
    AccountNotFound(String),

    #[error("token mint {0} not found")]
    MintNotFound(String),

    #[error("{0} is not a valid token mint")]
    NotAMint(String),
}

impl From<QueryError> for ToolError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::AccountNotFound(_) | QueryError::MintNotFound(_) => {
                Self::new("not_found", e.to_string())
            }
            QueryError::NotAMint(_) => Self::new("invalid_mint", e.to_string()),
        }
    }
}

impl From<eyre::Report> for ToolError {
    fn from(e: eyre::Report) -> Self {
        Self::new("query_failed", format!("{e:#}"))
    }
}
