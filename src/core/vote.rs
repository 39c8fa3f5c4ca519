use crate::core::amount::Amount;
use crate::core::api::{self, API_PREFIX, NodeApi};
use crate::core::error::ApiError;
use crate::core::wire;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct DelegateRef {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountVoteRemote {
    pub delegate: DelegateRef,
    pub votes: String,
}

/// Stake an account has allocated to one delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountVote {
    pub delegate: String,
    pub votes: Amount,
}

pub fn decode_votes(remotes: Vec<AccountVoteRemote>) -> Result<Vec<AccountVote>, ApiError> {
    remotes
        .into_iter()
        .map(|r| -> Result<AccountVote, ApiError> {
            Ok(AccountVote {
                votes: wire::amount("votes", &r.votes)?,
                delegate: r.delegate.address,
            })
        })
        .collect()
}

pub async fn fetch_votes(api: &dyn NodeApi, address: &str) -> Result<Vec<AccountVote>, ApiError> {
    let path = format!("{API_PREFIX}/account/votes?address={address}");
    let remotes: Vec<AccountVoteRemote> = api::get(api, &path).await?;
    debug!(address, count = remotes.len(), "Fetched account votes");
    decode_votes(remotes)
}
