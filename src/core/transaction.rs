//! Transactions and paged transaction history.

use crate::core::account::Account;
use crate::core::amount::Amount;
use crate::core::api::{self, API_PREFIX, NodeApi};
use crate::core::error::ApiError;
use crate::core::wire;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Most transactions shown on the home panel, also the page size for history fetches.
pub const MAX_TXS_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Vote,
    Unvote,
    Transfer,
    /// Any tag the explorer has no dedicated presentation for.
    Unknown,
}

impl From<&str> for TransactionKind {
    fn from(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "VOTE" => TransactionKind::Vote,
            "UNVOTE" => TransactionKind::Unvote,
            "TRANSFER" => TransactionKind::Transfer,
            _ => TransactionKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRemote {
    pub block_number: Option<String>,
    pub hash: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub fee: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: String,
    pub kind: TransactionKind,
    pub from: String,
    pub to: String,
    pub value: Amount,
    pub fee: Amount,
    pub timestamp: DateTime<Utc>,
    pub block_number: Option<u64>,
}

pub fn decode_transaction(remote: TransactionRemote) -> Result<Transaction, ApiError> {
    Ok(Transaction {
        kind: TransactionKind::from(remote.kind.as_str()),
        value: wire::amount("value", &remote.value)?,
        fee: wire::amount("fee", &remote.fee)?,
        timestamp: wire::millis("timestamp", &remote.timestamp)?,
        block_number: remote
            .block_number
            .as_deref()
            .map(|n| wire::integer("blockNumber", n))
            .transpose()?,
        hash: remote.hash,
        from: remote.from,
        to: remote.to,
    })
}

pub fn decode_transactions(remotes: Vec<TransactionRemote>) -> Result<Vec<Transaction>, ApiError> {
    remotes.into_iter().map(decode_transaction).collect()
}

/// A page of an account's history counted back from the newest transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub size: u64,
}

impl Page {
    /// Half-open `[from, to)` index range of this page within `count` transactions.
    pub fn window(&self, count: u64) -> (u64, u64) {
        let to = count.saturating_sub(self.page.saturating_mul(self.size));
        let from = to.saturating_sub(self.size);
        (from, to)
    }
}

/// Fetches one page of the account's most recent transactions.
pub async fn fetch_last_transactions(
    api: &dyn NodeApi,
    account: &Account,
    page: Page,
) -> Result<Vec<Transaction>, ApiError> {
    let (from, to) = page.window(account.transaction_count);
    if from == to {
        debug!(address = %account.address, "No transactions in requested window");
        return Ok(Vec::new());
    }

    let path = format!(
        "{API_PREFIX}/account/transactions?address={}&from={from}&to={to}",
        account.address
    );
    let remotes: Vec<TransactionRemote> = api::get(api, &path).await?;
    debug!(address = %account.address, count = remotes.len(), "Fetched transactions");
    decode_transactions(remotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::MockNodeApi;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn account(transaction_count: u64) -> Account {
        Account {
            address: "0xcafe".to_string(),
            available: Amount::ZERO,
            locked: Amount::ZERO,
            nonce: transaction_count,
            transaction_count,
        }
    }

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(TransactionKind::from("VOTE"), TransactionKind::Vote);
        assert_eq!(TransactionKind::from("UNVOTE"), TransactionKind::Unvote);
        assert_eq!(TransactionKind::from("transfer"), TransactionKind::Transfer);
        assert_eq!(TransactionKind::from("COINBASE"), TransactionKind::Unknown);
        assert_eq!(TransactionKind::from("CALL"), TransactionKind::Unknown);
    }

    #[test]
    fn test_page_window() {
        let first = Page { page: 0, size: 5 };
        assert_eq!(first.window(12), (7, 12));
        assert_eq!(first.window(3), (0, 3));
        assert_eq!(first.window(0), (0, 0));

        let second = Page { page: 1, size: 5 };
        assert_eq!(second.window(12), (2, 7));
        assert_eq!(second.window(4), (0, 0));
    }

    #[tokio::test]
    async fn test_fetch_last_transactions() {
        let api = MockNodeApi::new().respond(
            "/v2.0.0/account/transactions?address=0xcafe&from=7&to=12",
            json!([{
                "blockNumber": "88",
                "hash": "0xh1",
                "type": "TRANSFER",
                "from": "0xcafe",
                "to": "0xbeef",
                "value": "2500000000",
                "fee": "5000000",
                "nonce": "11",
                "timestamp": "1546300800000",
                "data": "0x"
            }]),
        );

        let txs = fetch_last_transactions(&api, &account(12), Page { page: 0, size: 5 })
            .await
            .unwrap();

        assert_eq!(txs.len(), 1);
        let tx = &txs[0];
        assert_eq!(tx.hash, "0xh1");
        assert_eq!(tx.kind, TransactionKind::Transfer);
        assert_eq!(tx.value, Amount::new(Decimal::new(25, 1)));
        assert_eq!(tx.fee, Amount::new(Decimal::new(5, 3)));
        assert_eq!(tx.block_number, Some(88));
        assert_eq!(
            tx.timestamp,
            Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_empty_history_skips_request() {
        let api = MockNodeApi::new();

        let txs = fetch_last_transactions(&api, &account(0), Page { page: 0, size: 5 })
            .await
            .unwrap();

        assert!(txs.is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_timestamp_fails() {
        let api = MockNodeApi::new().respond(
            "/v2.0.0/account/transactions?address=0xcafe&from=0&to=1",
            json!([{
                "hash": "0xh1",
                "type": "VOTE",
                "from": "0xcafe",
                "to": "0xaaaa",
                "value": "1",
                "fee": "0",
                "timestamp": "soon"
            }]),
        );

        let result = fetch_last_transactions(&api, &account(1), Page { page: 0, size: 5 }).await;

        assert_eq!(
            result,
            Err(ApiError::Decode {
                field: "timestamp",
                value: "soon".to_string()
            })
        );
    }
}
