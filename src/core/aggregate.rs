//! Merging, summing and classifying what the home panel shows.

use crate::core::account::{Account, AccountAndTransactions};
use crate::core::amount::Amount;
use crate::core::home::HomeState;
use crate::core::transaction::{MAX_TXS_SIZE, Transaction, TransactionKind};
use std::collections::HashMap;
use std::fmt::Display;

/// Merges per-account histories into a single feed.
///
/// Transactions are keyed by hash; when two accounts report the same hash the
/// one seen last wins. The feed is sorted newest first and capped at
/// [`MAX_TXS_SIZE`].
pub fn merge_transactions(pairs: &[AccountAndTransactions]) -> Vec<Transaction> {
    let by_hash: HashMap<&str, &Transaction> = pairs
        .iter()
        .flat_map(|(_, txs)| txs)
        .map(|tx| (tx.hash.as_str(), tx))
        .collect();

    let mut merged: Vec<Transaction> = by_hash.into_values().cloned().collect();
    merged.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.hash.cmp(&b.hash))
    });
    merged.truncate(MAX_TXS_SIZE);
    merged
}

pub fn sum_available(accounts: &[Account]) -> Amount {
    accounts.iter().map(|a| a.available).sum()
}

pub fn sum_locked(accounts: &[Account]) -> Amount {
    accounts.iter().map(|a| a.locked).sum()
}

pub fn sum_total(accounts: &[Account]) -> Amount {
    accounts.iter().map(Account::total).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    None,
    Minus,
    Plus,
}

impl Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Sign::None => "",
            Sign::Minus => "-",
            Sign::Plus => "+",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Vote,
    Unvote,
    Cycle,
    Outbound,
    Inbound,
    Unknown,
}

impl Icon {
    pub fn key(&self) -> &'static str {
        match self {
            Icon::Vote => "vote",
            Icon::Unvote => "unvote",
            Icon::Cycle => "cycle",
            Icon::Outbound => "outbound",
            Icon::Inbound => "inbound",
            Icon::Unknown => "unknown",
        }
    }
}

/// Picks the sign and icon for a transaction row.
///
/// Transfers are classified only against the other transactions currently in
/// `state.transactions`, not the account's full ledger: a transfer counts as
/// outbound when its sender sends another visible transaction, inbound when
/// its receiver receives another one, and as a cycle when both hold. An
/// address that happens to be ours but appears nowhere else in the window is
/// reported as unknown.
pub fn classify_transaction(state: &HomeState, tx: &Transaction) -> (Sign, Icon) {
    match tx.kind {
        TransactionKind::Vote => (Sign::None, Icon::Vote),
        TransactionKind::Unvote => (Sign::None, Icon::Unvote),
        TransactionKind::Unknown => (Sign::None, Icon::Unknown),
        TransactionKind::Transfer => {
            let others: Vec<&Transaction> = state
                .transactions
                .iter()
                .filter(|t| t.hash != tx.hash)
                .collect();
            let our_from = others.iter().any(|t| t.from == tx.from);
            let our_to = others.iter().any(|t| t.to == tx.to);
            match (our_from, our_to) {
                (true, true) => (Sign::None, Icon::Cycle),
                (true, false) => (Sign::Minus, Icon::Outbound),
                (false, true) => (Sign::Plus, Icon::Inbound),
                (false, false) => (Sign::None, Icon::Unknown),
            }
        }
    }
}
