use serde_json::{json, Value};

use super::super::registry::ToolArgs;
use crate::chain::SolanaChain;
use crate::errors::ToolError;

pub async fn handle(chain: &SolanaChain, args: ToolArgs) -> Result<Value, ToolError> {
    let address = args.str("address")?.to_owned();
    let key = SolanaChain::parse_pubkey(&address)?;
    let limit = usize::try_from(args.integer("limit")?)
        .map_err(|_e| ToolError::invalid_params("field `limit` is out of range"))?;

    let signatures = chain.signatures_for_address(&key, limit).await?;
    let transactions: Vec<Value> = signatures
        .iter()
        .map(|s| {
            json!({
                "signature": s.signature,
                "slot": s.slot,
                "blockTime": s.block_time,
                "err": s.err.as_ref().map(ToString::to_string),
                "memo": s.memo,
            })
        })
        .collect();

    Ok(json!({
        "address": address,
        "count": transactions.len(),
        "transactions": transactions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_request::RpcRequest;
    use std::collections::HashMap;

    const ADDRESS: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

    #[tokio::test]
    async fn count_reflects_what_the_node_actually_returned() -> eyre::Result<()> {
        let mut mocks = HashMap::new();
        mocks.insert(
            RpcRequest::GetSignaturesForAddress,
            json!([
                {
                    "signature": "5j7s6NiJS3JAkvgkoc18WVAsiSaci2pxB2A6ueCJP4tprA2TFg9wSyTLeYouxPBJEMzJinENTkpA52YStRW5Dia7",
                    "slot": 114_u64,
                    "err": null,
                    "memo": null,
                    "blockTime": 1_700_000_000_i64,
                    "confirmationStatus": "finalized",
                },
                {
                    "signature": "4VAGET7z5g7ogVGmbmZ6KBtF6DS8ftLWzD65BXZWQJjwASUqLod7LhGB6mqThcqo97QcC7r7uNmBY8GwsnLAA52n",
                    "slot": 112_u64,
                    "err": null,
                    "memo": "hello",
                    "blockTime": 1_699_999_000_i64,
                    "confirmationStatus": "finalized",
                },
            ]),
        );
        let chain = SolanaChain::mocked("https://api.devnet.solana.com", mocks);

        let payload = handle(
            &chain,
            super::super::test_args(json!({ "address": ADDRESS, "limit": 10 })),
        )
        .await
        .map_err(|e| eyre::eyre!(e.message))?;

        // Two entries exist even though ten were allowed.
        assert_eq!(payload["count"], 2);
        assert_eq!(payload["transactions"][0]["slot"], 114_u64);
        assert_eq!(payload["transactions"][0]["err"], serde_json::Value::Null);
        assert_eq!(payload["transactions"][1]["memo"], "hello");
        assert_eq!(
            payload["transactions"][1]["blockTime"],
            1_699_999_000_i64
        );

        let keys: Vec<&String> = payload
            .as_object()
            .map(|o| o.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["address", "count", "transactions"]);
        Ok(())
    }
}
