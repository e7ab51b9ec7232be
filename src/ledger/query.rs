//! Read-only projections over the balance ledger
//!
//! Balances are collected per participant pair first and only then formatted,
//! so each pair is reported once regardless of how the strings look.

use serde::{Deserialize, Serialize};

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::{Money, ParticipantId};
use crate::services::registry::ParticipantRegistry;

use super::balance::BalanceLedger;

/// One directed obligation: `debtor` owes `creditor` a positive `amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub debtor: ParticipantId,
    pub debtor_name: String,
    pub creditor: ParticipantId,
    pub creditor_name: String,
    pub amount: Money,
}

impl Balance {
    fn between(
        registry: &ParticipantRegistry,
        debtor: &ParticipantId,
        creditor: &ParticipantId,
        amount: Money,
    ) -> Self {
        Self {
            debtor: debtor.clone(),
            debtor_name: registry.name_of(debtor).to_string(),
            creditor: creditor.clone(),
            creditor_name: registry.name_of(creditor).to_string(),
            amount: amount.abs(),
        }
    }

    /// `"<debtor> owes <creditor>: <amount>"`
    pub fn describe(&self) -> String {
        format!(
            "{} owes {}: {}",
            self.debtor_name,
            self.creditor_name,
            self.amount.to_decimal_string()
        )
    }

    /// Render from `viewer`'s side of the pair
    ///
    /// When the viewer is owed the line reads `"<other> owes <amount>"`;
    /// when the viewer owes it reads `"<viewer> owes <other>: <amount>"`.
    pub fn describe_for(&self, viewer: &ParticipantId) -> String {
        if &self.creditor == viewer {
            format!(
                "{} owes {}",
                self.debtor_name,
                self.amount.to_decimal_string()
            )
        } else {
            self.describe()
        }
    }
}

/// Obligations involving `user`, one per nonzero counterpart
pub fn query_one(
    ledger: &BalanceLedger,
    registry: &ParticipantRegistry,
    user: &ParticipantId,
) -> SplitLedgerResult<Vec<Balance>> {
    if !registry.contains(user) {
        return Err(SplitLedgerError::participant_not_found(user.as_str()));
    }

    Ok(ledger
        .counterparts(user)
        .into_iter()
        .map(|(other, amount)| {
            if amount.is_positive() {
                Balance::between(registry, &other, user, amount)
            } else {
                Balance::between(registry, user, &other, amount)
            }
        })
        .collect())
}

/// Every nonzero pair once, smaller participant id first
pub fn query_all(ledger: &BalanceLedger, registry: &ParticipantRegistry) -> Vec<Balance> {
    ledger
        .pairs()
        .into_iter()
        .map(|(a, b, amount)| {
            if amount.is_positive() {
                Balance::between(registry, &b, &a, amount)
            } else {
                Balance::between(registry, &a, &b, amount)
            }
        })
        .collect()
}
