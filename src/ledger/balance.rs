//! Pairwise balance ledger
//!
//! `ledger[a][b]` is what `a` is owed by `b`; a negative value means `a` owes
//! `b`. Every write computes both directions of a pair with checked arithmetic
//! and stores them together, so `ledger[a][b] == -ledger[b][a]` always holds.

use std::collections::BTreeMap;

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::{Expense, Money, ParticipantId};

#[derive(Debug, Default, Clone)]
pub struct BalanceLedger {
    rows: BTreeMap<ParticipantId, BTreeMap<ParticipantId, Money>>,
}

/// Both directions of one pair, computed but not yet written
#[derive(Debug)]
struct PairUpdate {
    creditor: ParticipantId,
    debtor: ParticipantId,
    creditor_side: Money,
    debtor_side: Money,
}

fn overflow(creditor: &ParticipantId, debtor: &ParticipantId) -> SplitLedgerError {
    SplitLedgerError::InvalidAmount(format!(
        "balance between '{}' and '{}' exceeds the representable range",
        creditor, debtor
    ))
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every non-self split of `expense` as owed to the payer
    ///
    /// All new balances are computed before any is written, so an overflow
    /// anywhere leaves the ledger untouched.
    pub fn apply_expense(&mut self, expense: &Expense) -> SplitLedgerResult<()> {
        let payer = &expense.paid_by;

        // A participant may appear in more than one split
        let mut owed: BTreeMap<&ParticipantId, Money> = BTreeMap::new();
        for split in expense.splits.iter().filter(|s| &s.participant != payer) {
            let total = owed.entry(&split.participant).or_default();
            *total = total
                .checked_add(split.amount)
                .ok_or_else(|| overflow(payer, &split.participant))?;
        }

        let updates = owed
            .into_iter()
            .map(|(debtor, amount)| self.plan(payer, debtor, amount))
            .collect::<SplitLedgerResult<Vec<_>>>()?;

        for update in updates {
            self.commit(update);
        }
        Ok(())
    }

    /// `owed_by` now owes `creditor` an additional `amount`
    pub fn update_pair(
        &mut self,
        creditor: &ParticipantId,
        owed_by: &ParticipantId,
        amount: Money,
    ) -> SplitLedgerResult<()> {
        if creditor == owed_by {
            return Ok(());
        }
        let update = self.plan(creditor, owed_by, amount)?;
        self.commit(update);
        Ok(())
    }

    fn plan(
        &self,
        creditor: &ParticipantId,
        debtor: &ParticipantId,
        amount: Money,
    ) -> SplitLedgerResult<PairUpdate> {
        let creditor_side = self
            .balance(creditor, debtor)
            .checked_add(amount)
            .ok_or_else(|| overflow(creditor, debtor))?;
        let debtor_side = self
            .balance(debtor, creditor)
            .checked_sub(amount)
            .ok_or_else(|| overflow(creditor, debtor))?;

        Ok(PairUpdate {
            creditor: creditor.clone(),
            debtor: debtor.clone(),
            creditor_side,
            debtor_side,
        })
    }

    fn commit(&mut self, update: PairUpdate) {
        tracing::debug!(
            creditor = %update.creditor,
            debtor = %update.debtor,
            balance = %update.creditor_side,
            "updated pair balance"
        );

        self.rows
            .entry(update.debtor.clone())
            .or_default()
            .insert(update.creditor.clone(), update.debtor_side);
        self.rows
            .entry(update.creditor)
            .or_default()
            .insert(update.debtor, update.creditor_side);
    }

    /// What `a` is owed by `b` (zero if they never shared an expense)
    pub fn balance(&self, a: &ParticipantId, b: &ParticipantId) -> Money {
        self.rows
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or_default()
    }

    /// Nonzero counterparts of `id`, ordered by counterpart id
    pub fn counterparts(&self, id: &ParticipantId) -> Vec<(ParticipantId, Money)> {
        self.rows
            .get(id)
            .map(|row| {
                row.iter()
                    .filter(|(_, amount)| !amount.is_zero())
                    .map(|(other, amount)| (other.clone(), *amount))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every nonzero unordered pair once, as `(a, b, ledger[a][b])` with `a < b`
    pub fn pairs(&self) -> Vec<(ParticipantId, ParticipantId, Money)> {
        self.rows
            .iter()
            .flat_map(|(a, row)| {
                row.iter()
                    .filter(move |(b, amount)| a < *b && !amount.is_zero())
                    .map(move |(b, amount)| (a.clone(), b.clone(), *amount))
            })
            .collect()
    }

    /// Net position of `id` across all counterparts (positive: owed overall)
    ///
    /// `None` if the total leaves the `i64` cent range.
    pub fn net(&self, id: &ParticipantId) -> Option<Money> {
        match self.rows.get(id) {
            Some(row) => Money::checked_sum(row.values().copied()),
            None => Some(Money::zero()),
        }
    }

    /// Check anti-symmetry for every stored entry
    pub fn is_balanced(&self) -> bool {
        self.rows
            .iter()
            .all(|(a, row)| row.iter().all(|(b, amount)| self.balance(b, a) == -*amount))
    }

    /// Number of stored directed entries, including zeros
    pub fn entry_count(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }
}
