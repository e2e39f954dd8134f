use serde_json::{json, Value};

use super::super::registry::ToolArgs;
use crate::chain::{decode_token_account, SolanaChain};
use crate::errors::ToolError;

pub async fn handle(chain: &SolanaChain, args: ToolArgs) -> Result<Value, ToolError> {
    let address = args.str("address")?.to_owned();
    let owner = SolanaChain::parse_pubkey(&address)?;
    let accounts = chain.token_accounts_by_owner(&owner).await?;

    let mut token_accounts = Vec::with_capacity(accounts.len());
    for (pubkey, account) in &accounts {
        let summary = decode_token_account(&account.data)?;
        token_accounts.push(json!({
            "pubkey": pubkey.to_string(),
            "mint": summary.mint,
            "amount": summary.amount,
        }));
    }

    Ok(json!({
        "owner": address,
        "count": token_accounts.len(),
        "tokenAccounts": token_accounts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use solana_client::rpc_request::RpcRequest;
    use std::collections::HashMap;

    const OWNER: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
    const TOKEN_ACCOUNT: &str = "7UX2i7SucgLMQcfZ75s3VXmZZY4YRUyJN9X1RgfMoDUi";

    fn chain_with_program_accounts(value: serde_json::Value) -> SolanaChain {
        let mut mocks = HashMap::new();
        mocks.insert(RpcRequest::GetProgramAccounts, value);
        SolanaChain::mocked("https://api.devnet.solana.com", mocks)
    }

    #[tokio::test]
    async fn empty_holdings_are_a_success_with_count_zero() -> eyre::Result<()> {
        let chain = chain_with_program_accounts(json!([]));
        let payload = handle(&chain, super::super::test_args(json!({ "address": OWNER })))
            .await
            .map_err(|e| eyre::eyre!(e.message))?;
        assert_eq!(payload["count"], 0);
        assert_eq!(payload["tokenAccounts"], json!([]));
        assert_eq!(payload["owner"], OWNER);

        let keys: Vec<&String> = payload
            .as_object()
            .map(|o| o.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["count", "owner", "tokenAccounts"]);
        Ok(())
    }

    #[tokio::test]
    async fn extracts_mint_and_amount_from_each_account() -> eyre::Result<()> {
        let mut data = vec![0_u8; 165];
        data[0..32].copy_from_slice(&[0x11_u8; 32]);
        data[64..72].copy_from_slice(&42_000_u64.to_le_bytes());
        let encoded = base64::engine::general_purpose::STANDARD.encode(&data);

        let chain = chain_with_program_accounts(json!([{
            "pubkey": TOKEN_ACCOUNT,
            "account": {
                "lamports": 2_039_280_u64,
                "data": [encoded, "base64"],
                "owner": spl_token::id().to_string(),
                "executable": false,
                "rentEpoch": 361_u64,
                "space": 165_u64,
            },
        }]));

        let payload = handle(&chain, super::super::test_args(json!({ "address": OWNER })))
            .await
            .map_err(|e| eyre::eyre!(e.message))?;
        assert_eq!(payload["count"], 1);
        assert_eq!(payload["tokenAccounts"][0]["pubkey"], TOKEN_ACCOUNT);
        assert_eq!(payload["tokenAccounts"][0]["mint"], "11".repeat(32));
        assert_eq!(payload["tokenAccounts"][0]["amount"], 42_000_u64);
        Ok(())
    }
}
