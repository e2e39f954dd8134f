//! The six read-only query tools and their registry wiring.

mod account_info;
mod balance;
mod network_stats;
mod token_accounts;
mod token_info;
mod tx_history;

use serde_json::json;

use super::registry::{FieldKind, FieldSpec, ToolContract, ToolRegistry};

const HISTORY_LIMIT_DEFAULT: i64 = 10;
const HISTORY_LIMIT_MIN: i64 = 1;
const HISTORY_LIMIT_MAX: i64 = 100;

fn address_field(description: &'static str) -> FieldSpec {
    FieldSpec::required("address", FieldKind::String, description)
}

pub fn build_registry() -> eyre::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register(
        ToolContract::new(
            "get_balance",
            "Get the SOL balance of a wallet address.",
            vec![address_field("Base58-encoded wallet address.")],
        ),
        |chain, args| Box::pin(balance::handle(chain, args)),
    )?;

    registry.register(
        ToolContract::new(
            "get_account_info",
            "Get raw account details: owner program, executable flag, rent epoch, and data length.",
            vec![address_field("Base58-encoded account address.")],
        ),
        |chain, args| Box::pin(account_info::handle(chain, args)),
    )?;

    registry.register(
        ToolContract::new(
            "get_token_accounts",
            "List all SPL token accounts owned by a wallet, with mint and raw amount.",
            vec![address_field("Base58-encoded wallet address.")],
        ),
        |chain, args| Box::pin(token_accounts::handle(chain, args)),
    )?;

    registry.register(
        ToolContract::new(
            "get_transaction_history",
            "Fetch the most recent transaction signatures for an address, newest first.",
            vec![
                address_field("Base58-encoded account address."),
                FieldSpec::optional(
                    "limit",
                    FieldKind::Integer,
                    "Maximum number of signatures to return.",
                )
                .with_default(json!(HISTORY_LIMIT_DEFAULT))
                .bounded(HISTORY_LIMIT_MIN, HISTORY_LIMIT_MAX),
            ],
        ),
        |chain, args| Box::pin(tx_history::handle(chain, args)),
    )?;

    registry.register(
        ToolContract::new(
            "get_token_info",
            "Get SPL token mint details: supply, decimals, and authorities.",
            vec![FieldSpec::required(
                "mintAddress",
                FieldKind::String,
                "Base58-encoded token mint address.",
            )],
        ),
        |chain, args| Box::pin(token_info::handle(chain, args)),
    )?;

    registry.register(
        ToolContract::new(
            "get_network_stats",
            "Get current slot, block time, epoch progress, and the network label for the configured endpoint.",
            vec![],
        ),
        |chain, args| Box::pin(network_stats::handle(chain, args)),
    )?;

    Ok(registry)
}

#[cfg(test)]
pub(crate) fn test_args(v: serde_json::Value) -> super::registry::ToolArgs {
    super::registry::ToolArgs::from_value(v)
}
