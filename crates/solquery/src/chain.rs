use eyre::Context as _;
use solana_client::client_error::ClientErrorKind;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::{
    RpcAccountInfoConfig, RpcProgramAccountsConfig, UiAccountEncoding,
};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_client::rpc_response::RpcConfirmedTransactionStatusWithSignature;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{account::Account, program_pack::Pack as _, pubkey::Pubkey};
use std::str::FromStr as _;

/// Lamports per SOL; the fixed divisor for display balances.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// Fixed byte layout of an SPL token account: mint pubkey at offset 0,
// little-endian u64 amount at offset 64.
const MINT_OFFSET: usize = 0;
const MINT_LEN: usize = 32;
const AMOUNT_OFFSET: usize = 64;
const AMOUNT_LEN: usize = 8;

/// Mint and raw amount pulled out of a token account's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountSummary {
    /// Hex-encoded 32-byte mint identifier.
    pub mint: String,
    pub amount: u64,
}

/// Decode the mint and amount from raw token-account data at their fixed
/// offsets. Kept as the single place that knows the layout, so a structured
/// unpack can replace it without touching handler logic. Buffers shorter than
/// the amount field are rejected rather than read out of range.
pub fn decode_token_account(data: &[u8]) -> eyre::Result<TokenAccountSummary> {
    let mint = data
        .get(MINT_OFFSET..MINT_OFFSET + MINT_LEN)
        .ok_or_else(|| eyre::eyre!("token account data too short: {} bytes", data.len()))?;
    let amount = data
        .get(AMOUNT_OFFSET..AMOUNT_OFFSET + AMOUNT_LEN)
        .and_then(|b| <[u8; AMOUNT_LEN]>::try_from(b).ok())
        .ok_or_else(|| eyre::eyre!("token account data too short: {} bytes", data.len()))?;
    Ok(TokenAccountSummary {
        mint: hex::encode(mint),
        amount: u64::from_le_bytes(amount),
    })
}

/// Where the ledger node thinks it is in the current epoch.
#[derive(Debug, Clone, Copy)]
pub struct EpochStatus {
    pub epoch: u64,
    pub slot_index: u64,
    pub slots_in_epoch: u64,
}

/// Process-wide read-only handle to one configured ledger endpoint.
///
/// Constructed once at startup and shared by every tool invocation; the
/// underlying client is safe for concurrent read calls and needs no teardown
/// beyond process exit.
pub struct SolanaChain {
    client: RpcClient,
    endpoint: String,
}

impl SolanaChain {
    pub fn connect(endpoint: &str) -> Self {
        Self {
            client: RpcClient::new_with_commitment(
                endpoint.to_owned(),
                CommitmentConfig::confirmed(),
            ),
            endpoint: endpoint.to_owned(),
        }
    }

    /// Client backed by canned responses, for handler tests.
    #[cfg(test)]
    pub fn mocked(
        endpoint: &str,
        mocks: std::collections::HashMap<
            solana_client::rpc_request::RpcRequest,
            serde_json::Value,
        >,
    ) -> Self {
        Self {
            client: RpcClient::new_mock_with_mocks(endpoint.to_owned(), mocks),
            endpoint: endpoint.to_owned(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn parse_pubkey(s: &str) -> eyre::Result<Pubkey> {
        Pubkey::from_str(s).wrap_err_with(|| format!("invalid address: {s}"))
    }

    pub async fn sol_balance(&self, owner: &Pubkey) -> eyre::Result<u64> {
        self.client.get_balance(owner).await.wrap_err("fetch balance")
    }

    pub async fn account(&self, address: &Pubkey) -> eyre::Result<Option<Account>> {
        let resp = self
            .client
            .get_account_with_commitment(address, CommitmentConfig::confirmed())
            .await
            .wrap_err("fetch account")?;
        Ok(resp.value)
    }

    /// All SPL token accounts owned by `owner`, with raw account data.
    ///
    /// Filters server-side on the token program: account length 165 and the
    /// owner key at offset 32.
    pub async fn token_accounts_by_owner(
        &self,
        owner: &Pubkey,
    ) -> eyre::Result<Vec<(Pubkey, Account)>> {
        let filters = vec![
            RpcFilterType::DataSize(spl_token::state::Account::LEN as u64),
            RpcFilterType::Memcmp(Memcmp::new_base58_encoded(32, owner.as_ref())),
        ];
        let config = RpcProgramAccountsConfig {
            filters: Some(filters),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(CommitmentConfig::confirmed()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        self.client
            .get_program_accounts_with_config(&spl_token::id(), config)
            .await
            .wrap_err("fetch token accounts")
    }

    /// Up to `limit` most recent signatures for `address`, newest first as
    /// returned by the node.
    pub async fn signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> eyre::Result<Vec<RpcConfirmedTransactionStatusWithSignature>> {
        let config = GetConfirmedSignaturesForAddress2Config {
            limit: Some(limit),
            ..GetConfirmedSignaturesForAddress2Config::default()
        };
        self.client
            .get_signatures_for_address_with_config(address, config)
            .await
            .wrap_err("fetch signatures")
    }

    pub async fn slot(&self) -> eyre::Result<u64> {
        self.client.get_slot().await.wrap_err("fetch slot")
    }

    /// Block time for a slot. The node reports "unavailable" as a
    /// request-level RPC error, which callers see as `None`; transport and
    /// decode failures propagate.
    pub async fn block_time(&self, slot: u64) -> eyre::Result<Option<i64>> {
        match self.client.get_block_time(slot).await {
            Ok(t) => Ok(Some(t)),
            Err(e) => match e.kind() {
                ClientErrorKind::RpcError(_) => Ok(None),
                _ => Err(e).wrap_err("fetch block time"),
            },
        }
    }

    pub async fn epoch_status(&self) -> eyre::Result<EpochStatus> {
        let info = self
            .client
            .get_epoch_info()
            .await
            .wrap_err("fetch epoch info")?;
        Ok(EpochStatus {
            epoch: info.epoch,
            slot_index: info.slot_index,
            slots_in_epoch: info.slots_in_epoch,
        })
    }
}
