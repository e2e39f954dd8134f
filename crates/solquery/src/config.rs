/// Default public endpoint, used when no override is present.
pub const SOLANA_MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Environment variable consulted once at startup for the RPC endpoint.
pub const RPC_URL_ENV: &str = "SOLANA_RPC_URL";

/// Resolve the RPC endpoint for this process. Read once at startup; the
/// resulting URL is immutable for the process lifetime.
pub fn rpc_endpoint() -> String {
    std::env::var(RPC_URL_ENV)
        .ok()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| SOLANA_MAINNET_RPC_URL.to_owned())
}

/// Coarse network label derived from the endpoint URL by substring match.
pub fn network_label(endpoint: &str) -> &'static str {
    if endpoint.contains("mainnet") {
        "mainnet"
    } else if endpoint.contains("devnet") {
        "devnet"
    } else {
        "testnet"
    }
}
