//! Node records, their decoding and the home panel state

pub mod account;
pub mod aggregate;
pub mod amount;
pub mod api;
pub mod block;
pub mod config;
pub mod delegate;
pub mod error;
pub mod home;
pub mod log;
pub mod transaction;
pub mod vote;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for cleaner imports
pub use account::{Account, AccountAndTransactions};
pub use amount::Amount;
pub use api::NodeApi;
pub use block::Block;
pub use delegate::Delegate;
pub use error::ApiError;
pub use home::{HomeAction, HomeController, HomeState};
pub use transaction::{Transaction, TransactionKind};
pub use vote::AccountVote;
