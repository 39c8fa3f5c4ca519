pub mod cli;
pub mod core;
pub mod providers;

use crate::core::NodeApi;
use crate::core::config::AppConfig;
use crate::providers::HttpNodeApi;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Commands that talk to the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Overview and recent transactions. Falls back to configured addresses when empty.
    Home { addresses: Vec<String> },
    Delegates,
    Votes { address: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("semscope starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.node.base_url,
        addresses = config.addresses.len(),
        "Loaded config"
    );

    let api: Arc<dyn NodeApi> = Arc::new(HttpNodeApi::from_config(&config.node)?);

    match command {
        AppCommand::Home { addresses } => {
            let addresses = if addresses.is_empty() {
                config.addresses.clone()
            } else {
                addresses
            };
            cli::home::run(api, &addresses, &config.unit).await
        }
        AppCommand::Delegates => cli::delegates::run(api.as_ref(), &config.unit).await,
        AppCommand::Votes { address } => {
            cli::votes::run(api.as_ref(), &address, &config.unit).await
        }
    }
}
