//! Replay command
//!
//! Loads a group file, replays it through a fresh ledger and prints balances.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::{OutputFormat, Settings};
use crate::display::{format_expense_details, write_balances};
use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::ParticipantId;
use crate::replay::{replay, GroupFile};

/// Arguments for `replay`
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to a JSON or YAML group file
    pub file: PathBuf,
    /// Only show balances involving this participant
    #[arg(short, long)]
    pub user: Option<String>,
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Print each accepted expense before the balances
    #[arg(long)]
    pub show_expenses: bool,
    /// Fail if any expense in the file was rejected
    #[arg(long)]
    pub strict: bool,
}

/// Handle the replay command
pub fn handle_replay_command(settings: &Settings, args: ReplayArgs) -> SplitLedgerResult<()> {
    let file = GroupFile::load(&args.file)?;
    let report = replay(&file)?;

    for rejected in &report.rejected {
        eprintln!(
            "expense #{} rejected: {}: {}",
            rejected.index, rejected.kind, rejected.message
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.show_expenses {
        for expense in &report.accepted {
            write!(
                out,
                "{}",
                format_expense_details(expense, &settings.currency_symbol)
            )?;
            writeln!(out)?;
        }
    }

    let viewer = args.user.as_deref().map(ParticipantId::from);
    let balances = report.group.balance_entries(viewer.as_ref())?;
    let format = args.format.unwrap_or(settings.default_output);

    write_balances(
        &mut out,
        &balances,
        viewer.as_ref(),
        format,
        &settings.currency_symbol,
    )?;

    if args.strict && !report.rejected.is_empty() {
        return Err(SplitLedgerError::Parse(format!(
            "{} of {} expenses were rejected",
            report.rejected.len(),
            file.expenses.len()
        )));
    }

    Ok(())
}
