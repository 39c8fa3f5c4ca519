use crate::core::api::{self, API_PREFIX, NodeApi};
use crate::core::error::ApiError;
use crate::core::wire;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRemote {
    pub number: String,
    pub hash: String,
    pub coinbase: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub number: u64,
    pub hash: String,
    pub coinbase: String,
    pub timestamp: DateTime<Utc>,
}

pub fn decode_block(remote: BlockRemote) -> Result<Block, ApiError> {
    Ok(Block {
        number: wire::integer("number", &remote.number)?,
        timestamp: wire::millis("timestamp", &remote.timestamp)?,
        hash: remote.hash,
        coinbase: remote.coinbase,
    })
}

pub async fn fetch_latest_block(api: &dyn NodeApi) -> Result<Block, ApiError> {
    let path = format!("{API_PREFIX}/latest-block");
    let remote: BlockRemote = api::get(api, &path).await?;
    let block = decode_block(remote)?;
    debug!(number = block.number, "Fetched latest block");
    Ok(block)
}
