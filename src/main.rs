use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xrate::cli::currencies::{display_currencies, list_currencies};
use xrate::cli::setup::setup;
use xrate::core::log::init_logging;

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

impl From<Commands> for xrate::AppCommand {
    fn from(cmd: Commands) -> xrate::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                favorite,
                history,
            } => xrate::AppCommand::Convert {
                amount,
                from,
                to,
                favorite,
                show_history: history,
            },
            Commands::Sync { watch } => xrate::AppCommand::Sync { watch },
            Commands::Setup | Commands::Currencies { .. } => {
                unreachable!("Offline commands should be handled separately")
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount into one or more currencies
    Convert {
        /// Amount in the source currency
        amount: f64,
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency codes
        #[arg(required = true, num_args = 1..)]
        to: Vec<String>,
        /// Mark the conversions of this run as favorites
        #[arg(long)]
        favorite: bool,
        /// Show the conversions of this run as a history table
        #[arg(long)]
        history: bool,
    },
    /// List known currencies, optionally filtered by code or name
    Currencies {
        /// Text to search for, e.g. "peso" or "JP"
        query: Option<String>,
    },
    /// Refresh cached rates for the configured currencies
    Sync {
        /// Keep refreshing every update interval until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Currencies { query }) => {
            let found = list_currencies(query.as_deref());
            display_currencies(&found, query.as_deref());
            Ok(())
        }
        Some(cmd) => xrate::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
