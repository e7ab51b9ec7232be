use anyhow::Result;
use clap::{Parser, Subcommand};

use splitledger::cli::{handle_replay_command, handle_split_command, ReplayArgs, SplitArgs};
use splitledger::config::{paths::SplitLedgerPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "splitledger",
    version,
    about = "Split shared expenses and track who owes whom",
    long_about = "splitledger splits shared expenses equally, by exact amounts or by \
                  percentages, and keeps a pairwise ledger of who owes whom. Groups are \
                  described in JSON or YAML files and replayed in memory."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview how an amount would be split
    Split(SplitArgs),

    /// Replay a group file and show balances
    Replay(ReplayArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SplitLedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    splitledger::logging::init(&settings.log_filter, cli.verbose);

    match cli.command {
        Some(Commands::Split(args)) => {
            handle_split_command(&settings, args)?;
        }
        Some(Commands::Replay(args)) => {
            handle_replay_command(&settings, args)?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("splitledger Configuration");
            println!("=========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log filter:      {}", settings.log_filter);
            println!("  Default output:  {:?}", settings.default_output);
        }
        None => {
            println!("splitledger - shared expense splitting");
            println!();
            println!("Run 'splitledger --help' for usage information.");
        }
    }

    Ok(())
}
