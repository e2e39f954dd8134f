use serde_json::{json, Value};

use super::super::registry::ToolArgs;
use crate::chain::SolanaChain;
use crate::errors::{QueryError, ToolError};

pub async fn handle(chain: &SolanaChain, args: ToolArgs) -> Result<Value, ToolError> {
    let address = args.str("address")?.to_owned();
    let key = SolanaChain::parse_pubkey(&address)?;
    let account = chain
        .account(&key)
        .await?
        .ok_or_else(|| QueryError::AccountNotFound(address.clone()))?;
    Ok(json!({
        "address": address,
        "lamports": account.lamports,
        "owner": account.owner.to_string(),
        "executable": account.executable,
        "rentEpoch": account.rent_epoch,
        "dataLength": account.data.len(),
    }))
}
