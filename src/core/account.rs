//! Accounts and the per-address account + history fan-out.

use crate::core::amount::Amount;
use crate::core::api::{self, API_PREFIX, NodeApi};
use crate::core::error::ApiError;
use crate::core::transaction::{self, MAX_TXS_SIZE, Page, Transaction};
use crate::core::wire::{self, WireInt};
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRemote {
    pub address: String,
    pub available: String,
    pub locked: String,
    pub nonce: WireInt,
    pub transaction_count: WireInt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: String,
    pub available: Amount,
    pub locked: Amount,
    pub nonce: u64,
    pub transaction_count: u64,
}

impl Account {
    pub fn total(&self) -> Amount {
        self.available + self.locked
    }
}

/// An account together with its most recent transactions.
pub type AccountAndTransactions = (Account, Vec<Transaction>);

pub fn decode_account(remote: AccountRemote) -> Result<Account, ApiError> {
    Ok(Account {
        available: wire::amount("available", &remote.available)?,
        locked: wire::amount("locked", &remote.locked)?,
        nonce: remote.nonce.decode("nonce")?,
        transaction_count: remote.transaction_count.decode("transactionCount")?,
        address: remote.address,
    })
}

pub async fn fetch_account(api: &dyn NodeApi, address: &str) -> Result<Account, ApiError> {
    let path = format!("{API_PREFIX}/account?address={address}");
    let remote: AccountRemote = api::get(api, &path).await?;
    decode_account(remote)
}

/// Fetches the account, then its newest page of history.
#[instrument(skip(api))]
pub async fn fetch_account_and_transactions(
    api: &dyn NodeApi,
    address: &str,
) -> Result<AccountAndTransactions, ApiError> {
    let account = fetch_account(api, address).await?;
    let page = Page {
        page: 0,
        size: MAX_TXS_SIZE as u64,
    };
    let transactions = transaction::fetch_last_transactions(api, &account, page).await?;
    Ok((account, transactions))
}

/// Runs [`fetch_account_and_transactions`] for every address concurrently.
///
/// Results keep the order of `addresses`. The first failure fails the batch;
/// there is no partial result.
pub async fn fetch_all_accounts(
    api: &dyn NodeApi,
    addresses: &[String],
) -> Result<Vec<AccountAndTransactions>, ApiError> {
    debug!(count = addresses.len(), "Fetching accounts");
    try_join_all(
        addresses
            .iter()
            .map(|address| fetch_account_and_transactions(api, address)),
    )
    .await
}
