use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use semscope::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for semscope::AppCommand {
    fn from(cmd: Commands) -> semscope::AppCommand {
        match cmd {
            Commands::Home { addresses } => semscope::AppCommand::Home { addresses },
            Commands::Delegates => semscope::AppCommand::Delegates,
            Commands::Votes { address } => semscope::AppCommand::Votes { address },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show balances and recent transactions
    Home {
        /// Addresses to summarize (defaults to the configured ones)
        addresses: Vec<String>,
    },
    /// List delegates with their forging performance
    Delegates,
    /// Show the votes cast by an address
    Votes {
        /// Voter address
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => semscope::cli::setup::setup(),
        Some(cmd) => semscope::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
