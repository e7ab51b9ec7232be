//! Group file format
//!
//! A group file lists participants and expenses with the field names used by
//! HTTP clients of the ledger (`user_id`, `expense_type`, `paid_by`, ...).
//! JSON and YAML are both accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::{ExpenseMetadata, Money, ParticipantId, Percentage, SplitInput, SplitKind};
use crate::services::RecordExpense;

/// A decimal given either as a JSON/YAML string or as a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecimalValue {
    Text(String),
    Number(serde_json::Number),
}

/// Significant decimal digits an `f64` is guaranteed to carry exactly
const F64_EXACT_DIGITS: usize = 15;

fn significant_digits(text: &str) -> usize {
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.trim_start_matches('0').trim_end_matches('0').len()
}

impl DecimalValue {
    fn as_text(&self) -> SplitLedgerResult<String> {
        match self {
            Self::Text(s) => Ok(s.clone()),
            Self::Number(n) => {
                let text = n.to_string();
                // Non-integer numbers arrive as f64; past 15 digits the value
                // read may differ from the one written
                if n.is_f64() && significant_digits(&text) > F64_EXACT_DIGITS {
                    return Err(SplitLedgerError::InvalidAmount(format!(
                        "{} has too many digits to read exactly as a number; quote it as a string",
                        text
                    )));
                }
                Ok(text)
            }
        }
    }

    pub fn to_money(&self) -> SplitLedgerResult<Money> {
        Money::parse(&self.as_text()?).map_err(|e| SplitLedgerError::InvalidAmount(e.to_string()))
    }

    pub fn to_percentage(&self) -> SplitLedgerResult<Percentage> {
        Percentage::parse(&self.as_text()?)
            .map_err(|e| SplitLedgerError::InvalidAmount(e.to_string()))
    }
}

impl From<&str> for DecimalValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A participant entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
}

/// One participant's raw share of an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitEntry {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<DecimalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<DecimalValue>,
}

impl SplitEntry {
    /// Convert to a split input; the fields present decide its kind
    ///
    /// `amount` means EXACT, `percent` means PERCENT, neither means EQUAL.
    pub fn to_input(&self) -> SplitLedgerResult<SplitInput> {
        let participant = ParticipantId::from(self.user_id.as_str());
        match (&self.amount, &self.percent) {
            (None, None) => Ok(SplitInput::equal(participant)),
            (Some(amount), None) => Ok(SplitInput::exact(participant, amount.to_money()?)),
            (None, Some(percent)) => Ok(SplitInput::percent(participant, percent.to_percentage()?)),
            (Some(_), Some(_)) => Err(SplitLedgerError::AmbiguousSplit {
                participant: self.user_id.clone(),
            }),
        }
    }
}

/// An expense entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub expense_type: String,
    pub amount: DecimalValue,
    pub paid_by: String,
    #[serde(default)]
    pub splits: Vec<SplitEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExpenseMetadata>,
}

impl ExpenseEntry {
    /// Decode into a service request
    pub fn to_request(&self) -> SplitLedgerResult<RecordExpense> {
        let kind = SplitKind::parse(&self.expense_type).ok_or_else(|| {
            let valid: Vec<String> = SplitKind::all().iter().map(|k| k.to_string()).collect();
            SplitLedgerError::Parse(format!(
                "Unknown expense type '{}'. Valid types: {}",
                self.expense_type,
                valid.join(", ")
            ))
        })?;

        let splits = self
            .splits
            .iter()
            .map(SplitEntry::to_input)
            .collect::<SplitLedgerResult<Vec<_>>>()?;

        Ok(RecordExpense {
            kind,
            amount: self.amount.to_money()?,
            paid_by: ParticipantId::from(self.paid_by.as_str()),
            splits,
            metadata: self.metadata.clone(),
        })
    }
}

/// A whole group: participants first, then expenses in the order they happened
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupFile {
    #[serde(default)]
    pub users: Vec<UserEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
}

impl GroupFile {
    pub fn from_json_str(s: &str) -> SplitLedgerResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> SplitLedgerResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Read a group file, choosing the decoder from the extension
    pub fn load<P: AsRef<Path>>(path: P) -> SplitLedgerResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SplitLedgerError::Io(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SplitLedgerError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let parsed = if is_yaml {
            Self::from_yaml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        };
        parsed.map_err(|e| {
            SplitLedgerError::Parse(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
