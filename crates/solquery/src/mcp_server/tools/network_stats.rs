use chrono::DateTime;
use serde_json::{json, Value};

use super::super::registry::ToolArgs;
use crate::chain::{EpochStatus, SolanaChain};
use crate::config::network_label;
use crate::errors::ToolError;

/// Fraction of the current epoch completed, rendered to two decimal places.
fn epoch_progress(status: &EpochStatus) -> String {
    if status.slots_in_epoch == 0 {
        return "0.00%".to_owned();
    }
    let pct = status.slot_index as f64 / status.slots_in_epoch as f64 * 100.0;
    format!("{pct:.2}%")
}

pub async fn handle(chain: &SolanaChain, _args: ToolArgs) -> Result<Value, ToolError> {
    let slot = chain.slot().await?;
    let block_time = chain.block_time(slot).await?;
    let epoch = chain.epoch_status().await?;

    let block_time_utc = block_time
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339());

    Ok(json!({
        "network": network_label(chain.endpoint()),
        "endpoint": chain.endpoint(),
        "currentSlot": slot,
        "blockTime": block_time,
        "blockTimeUtc": block_time_utc,
        "epoch": epoch.epoch,
        "epochProgress": epoch_progress(&epoch),
    }))
}
