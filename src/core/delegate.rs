//! Delegates and their forging performance.

use crate::core::amount::Amount;
use crate::core::api::{self, API_PREFIX, NodeApi};
use crate::core::error::ApiError;
use crate::core::wire;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateRemote {
    pub address: String,
    pub name: String,
    pub votes: String,
    pub blocks_forged: String,
    pub turns_hit: String,
    pub turns_missed: String,
    pub validator: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delegate {
    pub address: String,
    pub name: String,
    pub votes: Amount,
    pub blocks_forged: u64,
    pub turns_hit: u64,
    pub turns_missed: u64,
    /// Percentage of scheduled turns that produced a block, in `[0, 100]`.
    pub rate: f64,
    pub validator: bool,
}

/// Hit rate as a percentage. Zero when the delegate has had no turns yet.
pub fn hit_rate(turns_hit: u64, turns_missed: u64) -> f64 {
    let total = turns_hit.saturating_add(turns_missed);
    if total == 0 {
        0.0
    } else {
        turns_hit as f64 * 100.0 / total as f64
    }
}

pub fn decode_delegate(remote: DelegateRemote) -> Result<Delegate, ApiError> {
    let turns_hit = wire::integer("turnsHit", &remote.turns_hit)?;
    let turns_missed = wire::integer("turnsMissed", &remote.turns_missed)?;
    Ok(Delegate {
        votes: wire::amount("votes", &remote.votes)?,
        blocks_forged: wire::integer("blocksForged", &remote.blocks_forged)?,
        turns_hit,
        turns_missed,
        rate: hit_rate(turns_hit, turns_missed),
        validator: remote.validator,
        address: remote.address,
        name: remote.name,
    })
}

/// Decodes a delegate list. A single malformed record fails the whole list.
pub fn decode_delegates(remotes: Vec<DelegateRemote>) -> Result<Vec<Delegate>, ApiError> {
    remotes.into_iter().map(decode_delegate).collect()
}

pub async fn fetch_delegates(api: &dyn NodeApi) -> Result<Vec<Delegate>, ApiError> {
    let path = format!("{API_PREFIX}/delegates");
    let remotes: Vec<DelegateRemote> = api::get(api, &path).await?;
    debug!(count = remotes.len(), "Fetched delegates");
    decode_delegates(remotes)
}
