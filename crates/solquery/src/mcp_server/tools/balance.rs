use serde_json::{json, Value};

use super::super::registry::ToolArgs;
use crate::chain::{SolanaChain, LAMPORTS_PER_SOL};
use crate::errors::ToolError;

pub async fn handle(chain: &SolanaChain, args: ToolArgs) -> Result<Value, ToolError> {
    let address = args.str("address")?.to_owned();
    let owner = SolanaChain::parse_pubkey(&address)?;
    let lamports = chain.sol_balance(&owner).await?;
    let balance = lamports as f64 / LAMPORTS_PER_SOL as f64;
    Ok(json!({
        "address": address,
        "balance": balance,
        "lamports": lamports,
        "endpoint": chain.endpoint(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_request::RpcRequest;
    use std::collections::HashMap;

    const OWNER: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

    #[tokio::test]
    async fn converts_lamports_with_the_fixed_divisor() -> eyre::Result<()> {
        let mut mocks = HashMap::new();
        mocks.insert(
            RpcRequest::GetBalance,
            json!({ "context": { "slot": 1 }, "value": 2_500_000_000_u64 }),
        );
        let chain = SolanaChain::mocked("https://api.devnet.solana.com", mocks);

        let payload = handle(&chain, args_with_address(OWNER))
            .await
            .map_err(|e| eyre::eyre!(e.message))?;

        assert_eq!(payload["lamports"], 2_500_000_000_u64);
        let lamports = payload["lamports"]
            .as_u64()
            .ok_or_else(|| eyre::eyre!("lamports missing"))?;
        let balance = payload["balance"]
            .as_f64()
            .ok_or_else(|| eyre::eyre!("balance missing"))?;
        assert!(
            (balance - lamports as f64 / 1e9).abs() == 0.0_f64,
            "conversion must be exact for divisor 1e9"
        );
        assert_eq!(payload["endpoint"], "https://api.devnet.solana.com");

        let keys: Vec<&String> = payload
            .as_object()
            .map(|o| o.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["address", "balance", "endpoint", "lamports"]);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_addresses_are_caught_as_query_errors() -> eyre::Result<()> {
        let chain = SolanaChain::mocked("https://api.devnet.solana.com", HashMap::new());
        let e = handle(&chain, args_with_address("not-an-address"))
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("expected error"))?;
        assert_eq!(e.code, "query_failed");
        assert!(e.message.contains("invalid address"), "message: {}", e.message);
        Ok(())
    }

    fn args_with_address(address: &str) -> ToolArgs {
        super::super::test_args(json!({ "address": address }))
    }
}
