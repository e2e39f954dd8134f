use serde_json::{json, Value};
use solana_sdk::{program_pack::Pack as _, pubkey::Pubkey};
use spl_token::state::Mint;

use super::super::registry::ToolArgs;
use crate::chain::SolanaChain;
use crate::errors::{QueryError, ToolError};

pub async fn handle(chain: &SolanaChain, args: ToolArgs) -> Result<Value, ToolError> {
    let mint_address = args.str("mintAddress")?.to_owned();
    let key = SolanaChain::parse_pubkey(&mint_address)?;
    let account = chain
        .account(&key)
        .await?
        .ok_or_else(|| QueryError::MintNotFound(mint_address.clone()))?;

    // Anything the typed decode rejects is not a mint in parsed form.
    if account.owner != spl_token::id() {
        return Err(QueryError::NotAMint(mint_address).into());
    }
    let mint =
        Mint::unpack(&account.data).map_err(|_e| QueryError::NotAMint(mint_address.clone()))?;

    let mint_authority: Option<Pubkey> = mint.mint_authority.into();
    let freeze_authority: Option<Pubkey> = mint.freeze_authority.into();
    Ok(json!({
        "mint": mint_address,
        "supply": mint.supply.to_string(),
        "decimals": mint.decimals,
        "isInitialized": mint.is_initialized,
        "mintAuthority": mint_authority.map(|k| k.to_string()),
        "freezeAuthority": freeze_authority.map(|k| k.to_string()),
    }))
}
