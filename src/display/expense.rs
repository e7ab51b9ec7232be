//! Expense and split display formatting

use crate::models::{Expense, Money, Split, SplitKind};

/// Format computed splits as a simple aligned list
pub fn format_split_list(kind: SplitKind, amount: Money, splits: &[Split], symbol: &str) -> String {
    let id_width = splits
        .iter()
        .map(|s| s.participant.as_str().len())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{} split of {}\n",
        kind,
        amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<id_width$}  {:>12}  {:>8}\n",
        "Participant",
        "Share",
        "Percent",
        id_width = id_width,
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:->12}  {:->8}\n",
        "",
        "",
        "",
        id_width = id_width,
    ));

    for split in splits {
        let percent = split.percent.map(|p| p.to_string()).unwrap_or_default();
        output.push_str(&format!(
            "{:<id_width$}  {:>12}  {:>8}\n",
            split.participant.as_str(),
            split.amount.format_with_symbol(symbol),
            percent,
            id_width = id_width,
        ));
    }

    output
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.label()));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!("  Paid by:  {}\n", expense.paid_by));
    output.push_str(&format!(
        "  Amount:   {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Kind:     {}\n", expense.kind));
    if let Some(notes) = expense.metadata.as_ref().and_then(|m| m.notes.as_deref()) {
        output.push_str(&format!("  Notes:    {}\n", notes));
    }
    output.push_str("  Splits:\n");
    for split in &expense.splits {
        output.push_str(&format!(
            "    {:<12} {}\n",
            split.participant.as_str(),
            split.amount.format_with_symbol(symbol)
        ));
    }

    output
}
