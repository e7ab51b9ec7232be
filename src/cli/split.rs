//! Split preview command
//!
//! Runs the split policy engine on command-line input without a ledger, so a
//! split can be checked before it is added to a group file.

use clap::Args;

use crate::config::Settings;
use crate::display::format_split_list;
use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::{Money, Percentage, SplitInput, SplitKind};
use crate::services::compute_splits;

/// Arguments for `split`
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Split kind (equal, exact, percent)
    pub kind: String,
    /// Expense amount (e.g., "100" or "100.00")
    pub amount: String,
    /// Shares: `ID` for equal, `ID=AMOUNT` for exact, `ID=PERCENT` for percent
    #[arg(required = true)]
    pub shares: Vec<String>,
}

/// Parse one share argument for the given kind
///
/// A bare id is an EQUAL share. With `=value` the value is read as an amount
/// for EXACT and as a percentage otherwise, so the engine can report a kind
/// mismatch for the wrong form.
pub fn parse_share(kind: SplitKind, share: &str) -> SplitLedgerResult<SplitInput> {
    match share.split_once('=') {
        None => Ok(SplitInput::equal(share.trim())),
        Some((id, value)) => {
            let id = id.trim();
            if kind == SplitKind::Exact {
                let amount = Money::parse(value).map_err(|e| {
                    SplitLedgerError::InvalidAmount(format!("share for '{}': {}", id, e))
                })?;
                Ok(SplitInput::exact(id, amount))
            } else {
                let percent = Percentage::parse(value).map_err(|e| {
                    SplitLedgerError::InvalidAmount(format!("share for '{}': {}", id, e))
                })?;
                Ok(SplitInput::percent(id, percent))
            }
        }
    }
}

/// Handle the split preview command
pub fn handle_split_command(settings: &Settings, args: SplitArgs) -> SplitLedgerResult<()> {
    let kind = SplitKind::parse(&args.kind).ok_or_else(|| {
        let valid: Vec<String> = SplitKind::all()
            .iter()
            .map(|k| k.to_string().to_lowercase())
            .collect();
        SplitLedgerError::Parse(format!(
            "Invalid split kind: '{}'. Valid kinds: {}",
            args.kind,
            valid.join(", ")
        ))
    })?;

    let amount = Money::parse(&args.amount).map_err(|e| {
        SplitLedgerError::InvalidAmount(format!(
            "'{}'. Use format like '100.00' or '100'. Error: {}",
            args.amount, e
        ))
    })?;

    let inputs = args
        .shares
        .iter()
        .map(|s| parse_share(kind, s))
        .collect::<SplitLedgerResult<Vec<_>>>()?;

    let splits = compute_splits(kind, amount, &inputs)?;
    print!(
        "{}",
        format_split_list(kind, amount, &splits, &settings.currency_symbol)
    );

    Ok(())
}
