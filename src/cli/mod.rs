//! Terminal views and command runners

pub mod delegates;
pub mod home;
pub mod setup;
pub mod ui;
pub mod votes;
