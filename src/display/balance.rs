//! Balance display formatting
//!
//! Renders ledger query results as sentences, tables, JSON or CSV.

use std::io::Write;

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::OutputFormat;
use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::ledger::Balance;
use crate::models::ParticipantId;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Owes")]
    debtor: String,
    #[tabled(rename = "To")]
    creditor: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    debtor_id: &'a str,
    debtor: &'a str,
    creditor_id: &'a str,
    creditor: &'a str,
    amount: String,
}

#[derive(Serialize)]
struct BalanceReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a ParticipantId>,
    balances: &'a [Balance],
    lines: Vec<String>,
}

/// One sentence per balance, from `viewer`'s side when given
pub fn format_balance_lines(balances: &[Balance], viewer: Option<&ParticipantId>) -> Vec<String> {
    balances
        .iter()
        .map(|b| match viewer {
            Some(viewer) => b.describe_for(viewer),
            None => b.describe(),
        })
        .collect()
}

/// Format balances as an aligned table
pub fn format_balance_table(balances: &[Balance], currency_symbol: &str) -> String {
    if balances.is_empty() {
        return "No balances.".to_string();
    }

    let rows = balances.iter().map(|b| BalanceRow {
        debtor: b.debtor_name.clone(),
        creditor: b.creditor_name.clone(),
        amount: b.amount.format_with_symbol(currency_symbol),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Write balances in the requested format
pub fn write_balances<W: Write>(
    writer: &mut W,
    balances: &[Balance],
    viewer: Option<&ParticipantId>,
    format: OutputFormat,
    currency_symbol: &str,
) -> SplitLedgerResult<()> {
    match format {
        OutputFormat::Text => {
            let lines = format_balance_lines(balances, viewer);
            if lines.is_empty() {
                writeln!(writer, "No balances.")?;
            }
            for line in lines {
                writeln!(writer, "{}", line)?;
            }
        }
        OutputFormat::Table => {
            writeln!(writer, "{}", format_balance_table(balances, currency_symbol))?;
        }
        OutputFormat::Json => {
            let report = BalanceReport {
                user: viewer,
                balances,
                lines: format_balance_lines(balances, viewer),
            };
            serde_json::to_writer_pretty(&mut *writer, &report)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => write_balances_csv(writer, balances)?,
    }
    Ok(())
}

fn write_balances_csv<W: Write>(writer: &mut W, balances: &[Balance]) -> SplitLedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for b in balances {
        csv_writer
            .serialize(CsvRow {
                debtor_id: b.debtor.as_str(),
                debtor: &b.debtor_name,
                creditor_id: b.creditor.as_str(),
                creditor: &b.creditor_name,
                amount: b.amount.to_decimal_string(),
            })
            .map_err(|e| SplitLedgerError::Io(format!("Failed to write CSV: {}", e)))?;
    }
    csv_writer
        .flush()
        .map_err(|e| SplitLedgerError::Io(format!("Failed to flush CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn sample() -> Vec<Balance> {
        vec![Balance {
            debtor: ParticipantId::from("u2"),
            debtor_name: "Bob".into(),
            creditor: ParticipantId::from("u1"),
            creditor_name: "Alice".into(),
            amount: Money::from_cents(3333),
        }]
    }

    fn render(format: OutputFormat, viewer: Option<&ParticipantId>) -> String {
        let mut out = Vec::new();
        write_balances(&mut out, &sample(), viewer, format, "$").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output() {
        assert_eq!(render(OutputFormat::Text, None), "Bob owes Alice: 33.33\n");
        let viewer = ParticipantId::from("u1");
        assert_eq!(render(OutputFormat::Text, Some(&viewer)), "Bob owes 33.33\n");
    }

    #[test]
    fn test_empty_text_output() {
        let mut out = Vec::new();
        write_balances(&mut out, &[], None, OutputFormat::Text, "$").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No balances.\n");
    }

    #[test]
    fn test_table_output() {
        let table = render(OutputFormat::Table, None);
        assert!(table.contains("Owes"));
        assert!(table.contains("Bob"));
        assert!(table.contains("$33.33"));
    }

    #[test]
    fn test_json_output() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json, None)).unwrap();
        assert_eq!(json["balances"][0]["amount"], 3333);
        assert_eq!(json["lines"][0], "Bob owes Alice: 33.33");
        assert!(json.get("user").is_none());
    }

    #[test]
    fn test_csv_output() {
        let csv = render(OutputFormat::Csv, None);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("debtor_id,debtor,creditor_id,creditor,amount"));
        assert_eq!(lines.next(), Some("u2,Bob,u1,Alice,33.33"));
    }
}
