//! Home panel state and the transitions that replace it.
//!
//! [`HomeState`] is an immutable snapshot. Every transition takes the current
//! snapshot plus a payload and returns a new one; nothing is updated in place.
//! [`HomeController`] owns the live snapshot, starts the node fetches and folds
//! their results back in as they arrive.

use crate::core::account::{self, Account, AccountAndTransactions};
use crate::core::aggregate;
use crate::core::api::NodeApi;
use crate::core::block::{self, Block};
use crate::core::error::ApiError;
use crate::core::transaction::Transaction;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    /// Empty when there is nothing to report.
    pub error_message: String,
    pub block: Option<Block>,
    pub accounts: Vec<Account>,
    /// Deduplicated, newest first, at most `MAX_TXS_SIZE` entries.
    pub transactions: Vec<Transaction>,
}

/// Events folded into a [`HomeState`].
#[derive(Debug, Clone)]
pub enum HomeAction {
    Fetch,
    BlockResponse(Block),
    AccountsResponse(Vec<AccountAndTransactions>),
    Error(ApiError),
}

impl HomeState {
    /// A new fetch cycle starts: the banner is cleared, data stays visible.
    pub fn fetch(&self) -> HomeState {
        HomeState {
            error_message: String::new(),
            ..self.clone()
        }
    }

    pub fn fetch_block_response(&self, block: Block) -> HomeState {
        HomeState {
            block: Some(block),
            ..self.clone()
        }
    }

    pub fn fetch_accounts_response(&self, pairs: Vec<AccountAndTransactions>) -> HomeState {
        let transactions = aggregate::merge_transactions(&pairs);
        HomeState {
            accounts: pairs.into_iter().map(|(account, _)| account).collect(),
            transactions,
            ..self.clone()
        }
    }

    /// Shows the error while leaving whatever was loaded before on screen.
    pub fn fetch_error(&self, error: &ApiError) -> HomeState {
        HomeState {
            error_message: error.to_string(),
            ..self.clone()
        }
    }

    pub fn reduce(&self, action: HomeAction) -> HomeState {
        match action {
            HomeAction::Fetch => self.fetch(),
            HomeAction::BlockResponse(block) => self.fetch_block_response(block),
            HomeAction::AccountsResponse(pairs) => self.fetch_accounts_response(pairs),
            HomeAction::Error(error) => self.fetch_error(&error),
        }
    }
}

/// Drives fetch cycles for the home panel.
///
/// Each call to [`fetch`](HomeController::fetch) spawns two independent flows,
/// the latest block and the account fan-out, each of which reports exactly one
/// action. Flows are never cancelled: if a new fetch starts while an older one
/// is still in flight, the older response is applied whenever it lands and may
/// overwrite newer data.
pub struct HomeController {
    api: Arc<dyn NodeApi>,
    state: HomeState,
    sender: UnboundedSender<HomeAction>,
    receiver: UnboundedReceiver<HomeAction>,
    pending: usize,
}

impl HomeController {
    pub fn new(api: Arc<dyn NodeApi>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            api,
            state: HomeState::default(),
            sender,
            receiver,
            pending: 0,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    /// Number of flows that have not reported back yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Starts a fetch cycle for `addresses`. Must be called inside a tokio runtime.
    pub fn fetch(&mut self, addresses: &[String]) {
        self.state = self.state.reduce(HomeAction::Fetch);

        let api = Arc::clone(&self.api);
        self.spawn_flow("block", async move {
            match block::fetch_latest_block(api.as_ref()).await {
                Ok(block) => HomeAction::BlockResponse(block),
                Err(e) => HomeAction::Error(e),
            }
        });

        let api = Arc::clone(&self.api);
        let addresses = addresses.to_vec();
        self.spawn_flow("accounts", async move {
            match account::fetch_all_accounts(api.as_ref(), &addresses).await {
                Ok(pairs) => HomeAction::AccountsResponse(pairs),
                Err(e) => HomeAction::Error(e),
            }
        });
    }

    /// Runs `flow` on its own task and reports exactly one action for it, an
    /// error if the task dies before producing one.
    fn spawn_flow<F>(&mut self, name: &'static str, flow: F)
    where
        F: Future<Output = HomeAction> + Send + 'static,
    {
        let handle = tokio::spawn(flow);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let action = handle.await.unwrap_or_else(|e| {
                error!(flow = name, error = %e, "Home fetch task failed");
                HomeAction::Error(ApiError::Transport(format!("Fetching {name} failed: {e}")))
            });
            if sender.send(action).is_err() {
                debug!(flow = name, "Home controller dropped before response");
            }
        });
        self.pending += 1;
    }

    /// Applies the next action to arrive. `None` once nothing is in flight.
    pub async fn next(&mut self) -> Option<&HomeState> {
        if self.pending == 0 {
            return None;
        }
        let action = self.receiver.recv().await?;
        self.pending -= 1;
        debug!(?action, "Applying home action");
        self.state = self.state.reduce(action);
        Some(&self.state)
    }

    /// Applies actions until every started flow has reported.
    pub async fn settle(&mut self) -> &HomeState {
        while self.next().await.is_some() {}
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::amount::Amount;
    use crate::core::testing::MockNodeApi;
    use crate::core::transaction::TransactionKind;
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};
    use std::time::Duration;

    fn block(number: u64) -> Block {
        Block {
            number,
            hash: format!("0xb{number}"),
            coinbase: "0xaaaa".to_string(),
            timestamp: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
        }
    }

    fn account(address: &str) -> Account {
        Account {
            address: address.to_string(),
            available: Amount::from_nano("1000000000").unwrap(),
            locked: Amount::ZERO,
            nonce: 0,
            transaction_count: 0,
        }
    }

    fn tx(hash: &str, secs: i64) -> Transaction {
        Transaction {
            hash: hash.to_string(),
            kind: TransactionKind::Transfer,
            from: "0xa".to_string(),
            to: "0xb".to_string(),
            value: Amount::ZERO,
            fee: Amount::ZERO,
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            block_number: None,
        }
    }

    fn account_json(address: &str) -> Value {
        json!({
            "address": address,
            "available": "1000000000",
            "locked": "0",
            "nonce": "0",
            "transactionCount": 0
        })
    }

    fn block_json(number: u64) -> Value {
        json!({
            "hash": "0xb10c",
            "number": number.to_string(),
            "coinbase": "0xaaaa",
            "timestamp": "1546300800000"
        })
    }

    #[test]
    fn test_fetch_clears_error_only() {
        let state = HomeState {
            error_message: "boom".to_string(),
            block: Some(block(1)),
            accounts: vec![account("0xa")],
            transactions: vec![tx("0x1", 1)],
        };

        let next = state.fetch();

        assert_eq!(next.error_message, "");
        assert_eq!(next.block, state.block);
        assert_eq!(next.accounts, state.accounts);
        assert_eq!(next.transactions, state.transactions);
    }

    #[test]
    fn test_block_response_touches_only_block() {
        let state = HomeState {
            error_message: "stale".to_string(),
            ..HomeState::default()
        };

        let next = state.fetch_block_response(block(7));

        assert_eq!(next.block, Some(block(7)));
        assert_eq!(next.error_message, "stale");
        assert!(state.block.is_none(), "previous snapshot is left alone");
    }

    #[test]
    fn test_accounts_response_merges_transactions() {
        let state = HomeState {
            block: Some(block(3)),
            error_message: "old".to_string(),
            ..HomeState::default()
        };
        let pairs = vec![
            (account("0xa"), vec![tx("0x1", 10), tx("0x2", 30)]),
            (account("0xb"), vec![tx("0x2", 30), tx("0x3", 20)]),
        ];

        let next = state.fetch_accounts_response(pairs);

        let addresses: Vec<&str> = next.accounts.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(addresses, vec!["0xa", "0xb"]);
        let hashes: Vec<&str> = next.transactions.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(hashes, vec!["0x2", "0x3", "0x1"]);
        assert_eq!(next.block, Some(block(3)));
        assert_eq!(next.error_message, "old");
    }

    #[test]
    fn test_error_keeps_stale_data() {
        let state = HomeState::default()
            .fetch_block_response(block(5))
            .fetch_accounts_response(vec![(account("0xa"), vec![tx("0x1", 1)])]);

        let next = state.fetch_error(&ApiError::Transport("Node unreachable".to_string()));

        assert_eq!(next.error_message, "Node unreachable");
        assert_eq!(next.block, Some(block(5)));
        assert_eq!(next.accounts.len(), 1);
        assert_eq!(next.transactions.len(), 1);
    }

    #[test]
    fn test_late_stale_response_overwrites_newer_one() {
        // Two fetch cycles overlap and the first one answers last
        let state = HomeState::default().reduce(HomeAction::Fetch);
        let state = state.reduce(HomeAction::Fetch);
        let newer = vec![(account("0xnew"), vec![])];
        let older = vec![(account("0xold"), vec![])];

        let state = state.reduce(HomeAction::AccountsResponse(newer));
        let state = state.reduce(HomeAction::AccountsResponse(older));

        assert_eq!(state.accounts[0].address, "0xold");
    }

    #[tokio::test]
    async fn test_controller_loads_block_and_accounts() {
        let api = MockNodeApi::new()
            .respond("/v2.0.0/latest-block", block_json(42))
            .respond("/v2.0.0/account?address=0xa", account_json("0xa"));
        let mut controller = HomeController::new(Arc::new(api));

        controller.fetch(&["0xa".to_string()]);
        assert_eq!(controller.pending(), 2);
        let state = controller.settle().await.clone();

        assert_eq!(controller.pending(), 0);
        assert_eq!(state.block.map(|b| b.number), Some(42));
        assert_eq!(state.accounts.len(), 1);
        assert!(state.transactions.is_empty());
        assert_eq!(state.error_message, "");
    }

    #[tokio::test]
    async fn test_controller_error_banner_keeps_block() {
        let api = MockNodeApi::new()
            .respond("/v2.0.0/latest-block", block_json(42))
            .fail("/v2.0.0/account?address=0xa", "Invalid account address");
        let mut controller = HomeController::new(Arc::new(api));

        controller.fetch(&["0xa".to_string()]);
        let state = controller.settle().await;

        assert_eq!(state.error_message, "Invalid account address");
        assert_eq!(state.block.as_ref().map(|b| b.number), Some(42));
        assert!(state.accounts.is_empty());
    }

    struct PanickingNodeApi;

    #[async_trait::async_trait]
    impl NodeApi for PanickingNodeApi {
        async fn exec(&self, _method: reqwest::Method, path: &str) -> Result<Value, ApiError> {
            panic!("node blew up on {path}");
        }
    }

    #[tokio::test]
    async fn test_controller_settles_when_a_flow_panics() {
        let mut controller = HomeController::new(Arc::new(PanickingNodeApi));

        controller.fetch(&["0xa".to_string()]);
        let state = controller.settle().await.clone();

        assert_eq!(controller.pending(), 0);
        assert!(state.error_message.starts_with("Fetching "));
        assert!(state.error_message.contains("panicked"));
        assert!(state.block.is_none());
        assert!(state.accounts.is_empty());
    }

    #[tokio::test]
    async fn test_controller_next_without_fetch_is_none() {
        let mut controller = HomeController::new(Arc::new(MockNodeApi::new()));
        assert!(controller.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_stale_fetch_overwrites_newer_data() {
        let api = MockNodeApi::new()
            .respond("/v2.0.0/latest-block", block_json(1))
            .respond("/v2.0.0/account?address=0xslow", account_json("0xslow"))
            .delay("/v2.0.0/account?address=0xslow", Duration::from_secs(5))
            .respond("/v2.0.0/account?address=0xfast", account_json("0xfast"));
        let mut controller = HomeController::new(Arc::new(api));

        controller.fetch(&["0xslow".to_string()]);
        controller.fetch(&["0xfast".to_string()]);
        let state = controller.settle().await;

        // The first cycle resolves last and wins
        assert_eq!(state.accounts.len(), 1);
        assert_eq!(state.accounts[0].address, "0xslow");
    }
}
