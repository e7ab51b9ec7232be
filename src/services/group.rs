//! Expense group service
//!
//! The explicitly constructed context that owns the participant registry, the
//! expense log and the balance ledger. All state sits behind one `RwLock`:
//! every write holds the write lock for the whole operation, so an expense is
//! validated, logged and applied in a single epoch, and readers always see a
//! consistent snapshot of both directions of every pair.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::ledger::{query_all, query_one, Balance, BalanceLedger};
use crate::models::{
    Expense, ExpenseId, ExpenseMetadata, Money, Participant, ParticipantId, SplitInput, SplitKind,
};

use super::expense::create_expense;
use super::registry::ParticipantRegistry;

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct RecordExpense {
    pub kind: SplitKind,
    pub amount: Money,
    pub paid_by: ParticipantId,
    pub splits: Vec<SplitInput>,
    pub metadata: Option<ExpenseMetadata>,
}

impl RecordExpense {
    pub fn new(
        kind: SplitKind,
        amount: Money,
        paid_by: impl Into<ParticipantId>,
        splits: Vec<SplitInput>,
    ) -> Self {
        Self {
            kind,
            amount,
            paid_by: paid_by.into(),
            splits,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ExpenseMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[derive(Debug, Default)]
struct GroupState {
    registry: ParticipantRegistry,
    expenses: Vec<Expense>,
    ledger: BalanceLedger,
}

/// A group of participants sharing expenses
#[derive(Debug, Default)]
pub struct ExpenseGroup {
    state: RwLock<GroupState>,
}

impl ExpenseGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> SplitLedgerResult<RwLockReadGuard<'_, GroupState>> {
        self.state
            .read()
            .map_err(|e| SplitLedgerError::Lock(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> SplitLedgerResult<RwLockWriteGuard<'_, GroupState>> {
        self.state
            .write()
            .map_err(|e| SplitLedgerError::Lock(format!("Failed to acquire write lock: {}", e)))
    }

    /// Register or re-register a participant
    ///
    /// Re-registering an id replaces the profile and keeps every balance.
    pub fn register_participant(
        &self,
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
    ) -> SplitLedgerResult<Participant> {
        let participant = Participant::new(id, name, email, mobile);
        let mut state = self.write()?;
        let is_new = state.registry.register(participant.clone());

        tracing::debug!(
            participant = %participant.id,
            name = %participant.name,
            is_new,
            "registered participant"
        );

        Ok(participant)
    }

    /// Validate an expense and apply it to the ledger
    ///
    /// On any error the ledger and expense log are left exactly as they were.
    pub fn record_expense(&self, input: RecordExpense) -> SplitLedgerResult<Expense> {
        let mut state = self.write()?;

        let result = Self::validate_and_build(&state.registry, input).and_then(|expense| {
            state.ledger.apply_expense(&expense)?;
            Ok(expense)
        });
        let expense = match result {
            Ok(expense) => expense,
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "rejected expense");
                return Err(e);
            }
        };

        state.expenses.push(expense.clone());

        tracing::info!(
            expense = %expense.id,
            kind = %expense.kind,
            amount = %expense.amount,
            paid_by = %expense.paid_by,
            splits = expense.splits.len(),
            "recorded expense"
        );

        Ok(expense)
    }

    fn validate_and_build(
        registry: &ParticipantRegistry,
        input: RecordExpense,
    ) -> SplitLedgerResult<Expense> {
        registry.require(&input.paid_by)?;
        for split in &input.splits {
            registry.require(split.participant())?;
        }

        create_expense(
            input.kind,
            input.amount,
            input.paid_by,
            &input.splits,
            input.metadata,
        )
    }

    /// Structured balances for one participant, or for every pair
    pub fn balance_entries(&self, user: Option<&ParticipantId>) -> SplitLedgerResult<Vec<Balance>> {
        let state = self.read()?;
        match user {
            Some(user) => query_one(&state.ledger, &state.registry, user),
            None => Ok(query_all(&state.ledger, &state.registry)),
        }
    }

    /// Human-readable balance lines
    ///
    /// With a user, lines are written from that user's side; without one,
    /// every nonzero pair is listed once.
    pub fn balances(&self, user: Option<&ParticipantId>) -> SplitLedgerResult<Vec<String>> {
        let entries = self.balance_entries(user)?;
        Ok(entries
            .iter()
            .map(|b| match user {
                Some(viewer) => b.describe_for(viewer),
                None => b.describe(),
            })
            .collect())
    }

    /// What `a` is owed by `b`
    pub fn pair_balance(&self, a: &ParticipantId, b: &ParticipantId) -> SplitLedgerResult<Money> {
        Ok(self.read()?.ledger.balance(a, b))
    }

    /// Net position of a participant across the whole group
    pub fn net_balance(&self, id: &ParticipantId) -> SplitLedgerResult<Money> {
        let state = self.read()?;
        if !state.registry.contains(id) {
            return Err(SplitLedgerError::participant_not_found(id.as_str()));
        }
        state.ledger.net(id).ok_or_else(|| {
            SplitLedgerError::InvalidAmount(format!(
                "net balance of '{}' exceeds the representable range",
                id
            ))
        })
    }

    pub fn participant(&self, id: &ParticipantId) -> SplitLedgerResult<Option<Participant>> {
        Ok(self.read()?.registry.get(id).cloned())
    }

    pub fn participants(&self) -> SplitLedgerResult<Vec<Participant>> {
        Ok(self.read()?.registry.all())
    }

    /// The expense log, in the order expenses were accepted
    pub fn expenses(&self) -> SplitLedgerResult<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    pub fn expense(&self, id: ExpenseId) -> SplitLedgerResult<Expense> {
        self.read()?
            .expenses
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| SplitLedgerError::expense_not_found(id.to_string()))
    }

    /// Check the ledger's anti-symmetry invariant
    pub fn is_consistent(&self) -> SplitLedgerResult<bool> {
        Ok(self.read()?.ledger.is_balanced())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Percentage;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    fn id(s: &str) -> ParticipantId {
        ParticipantId::from(s)
    }

    fn group() -> ExpenseGroup {
        let group = ExpenseGroup::new();
        group.register_participant("p1", "Alice", "alice@example.com", "1").unwrap();
        group.register_participant("p2", "Bob", "bob@example.com", "2").unwrap();
        group.register_participant("p3", "Cara", "cara@example.com", "3").unwrap();
        group
    }

    fn equal_dinner() -> RecordExpense {
        RecordExpense::new(
            SplitKind::Equal,
            Money::from_cents(10000),
            "p1",
            vec![
                SplitInput::equal("p1"),
                SplitInput::equal("p2"),
                SplitInput::equal("p3"),
            ],
        )
    }

    #[test]
    fn test_equal_expense_updates_balances() {
        let group = group();
        let expense = group.record_expense(equal_dinner()).unwrap();

        let cents: Vec<i64> = expense.splits.iter().map(|s| s.amount.cents()).collect();
        assert_eq!(cents, vec![3334, 3333, 3333]);

        assert_eq!(group.pair_balance(&id("p1"), &id("p2")).unwrap(), Money::from_cents(3333));
        assert_eq!(group.pair_balance(&id("p3"), &id("p1")).unwrap(), Money::from_cents(-3333));
        assert_eq!(
            group.balances(Some(&id("p1"))).unwrap(),
            vec!["Bob owes 33.33", "Cara owes 33.33"]
        );
        assert_eq!(
            group.balances(Some(&id("p2"))).unwrap(),
            vec!["Bob owes Alice: 33.33"]
        );
    }

    #[test]
    fn test_rejected_expense_leaves_ledger_untouched() {
        let group = group();
        group.record_expense(equal_dinner()).unwrap();
        let before = group.balances(None).unwrap();

        let err = group
            .record_expense(RecordExpense::new(
                SplitKind::Exact,
                Money::from_cents(10000),
                "p1",
                vec![
                    SplitInput::exact("p2", Money::from_cents(4000)),
                    SplitInput::exact("p3", Money::from_cents(4000)),
                ],
            ))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SumMismatch);
        assert_eq!(group.balances(None).unwrap(), before);
        assert_eq!(group.expenses().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_participants_rejected() {
        let group = group();

        let err = group
            .record_expense(RecordExpense::new(
                SplitKind::Equal,
                Money::from_cents(1000),
                "ghost",
                vec![SplitInput::equal("p1")],
            ))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownUser);

        let err = group
            .record_expense(RecordExpense::new(
                SplitKind::Equal,
                Money::from_cents(1000),
                "p1",
                vec![SplitInput::equal("p2"), SplitInput::equal("ghost")],
            ))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownUser);
        assert!(group.balances(None).unwrap().is_empty());
    }

    #[test]
    fn test_percent_boundary() {
        let group = group();
        for total in ["99.999", "100.001"] {
            let rest = Percentage::parse(total).unwrap().thousandths() - 50_000;
            let err = group
                .record_expense(RecordExpense::new(
                    SplitKind::Percent,
                    Money::from_cents(10000),
                    "p1",
                    vec![
                        SplitInput::percent("p2", Percentage::from_whole(50)),
                        SplitInput::percent("p3", Percentage::from_thousandths(rest)),
                    ],
                ))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::PercentMismatch);
        }

        group
            .record_expense(RecordExpense::new(
                SplitKind::Percent,
                Money::from_cents(10000),
                "p1",
                vec![
                    SplitInput::percent("p2", Percentage::from_whole(50)),
                    SplitInput::percent("p3", Percentage::from_whole(50)),
                ],
            ))
            .unwrap();
        assert_eq!(group.net_balance(&id("p1")).unwrap(), Money::from_cents(10000));
    }

    #[test]
    fn test_reregistration_keeps_balances_and_renames() {
        let group = group();
        group.record_expense(equal_dinner()).unwrap();

        group.register_participant("p2", "Robert", "", "").unwrap();
        group.register_participant("p2", "Bobby", "", "").unwrap();

        assert_eq!(
            group.balances(Some(&id("p2"))).unwrap(),
            vec!["Bobby owes Alice: 33.33"]
        );
        assert_eq!(group.participants().unwrap().len(), 3);
    }

    #[test]
    fn test_self_payment_leaves_ledger_unchanged() {
        let group = group();
        group
            .record_expense(RecordExpense::new(
                SplitKind::Exact,
                Money::from_cents(1500),
                "p2",
                vec![SplitInput::exact("p2", Money::from_cents(1500))],
            ))
            .unwrap();

        assert!(group.balances(None).unwrap().is_empty());
        assert_eq!(group.expenses().unwrap().len(), 1);
    }

    #[test]
    fn test_debts_net_out() {
        let group = group();
        group.record_expense(equal_dinner()).unwrap();
        group
            .record_expense(RecordExpense::new(
                SplitKind::Exact,
                Money::from_cents(3333),
                "p2",
                vec![SplitInput::exact("p1", Money::from_cents(3333))],
            ))
            .unwrap();

        assert_eq!(group.balances(None).unwrap(), vec!["Cara owes Alice: 33.33"]);
        assert!(group.balances(Some(&id("p2"))).unwrap().is_empty());
    }

    #[test]
    fn test_query_unknown_user_is_not_found() {
        let group = group();
        let err = group.balances(Some(&id("zed"))).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_expense_lookup() {
        let group = group();
        let expense = group
            .record_expense(equal_dinner().with_metadata(ExpenseMetadata::named("Dinner")))
            .unwrap();
        assert_eq!(group.expense(expense.id).unwrap().label(), "Dinner");
        assert!(group.expense(ExpenseId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_concurrent_writers_keep_ledger_consistent() {
        let group = Arc::new(group());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let group = Arc::clone(&group);
                thread::spawn(move || {
                    let payer = if i % 2 == 0 { "p1" } else { "p2" };
                    for _ in 0..25 {
                        group.record_expense(equal_dinner_paid_by(payer)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(group.is_consistent().unwrap());
        assert_eq!(group.expenses().unwrap().len(), 200);
        // p1 is listed first, so it carries the residual cent on p2's dinners
        assert_eq!(
            group.pair_balance(&id("p1"), &id("p2")).unwrap(),
            Money::from_cents((3333 - 3334) * 100)
        );
    }

    fn equal_dinner_paid_by(payer: &str) -> RecordExpense {
        RecordExpense {
            paid_by: id(payer),
            ..equal_dinner()
        }
    }

    #[test]
    fn test_participant_lookup() {
        let group = group();
        let bob = group.participant(&id("p2")).unwrap().unwrap();
        assert_eq!(bob.name, "Bob");
        assert_eq!(bob.email, "bob@example.com");
        assert!(group.participant(&id("zed")).unwrap().is_none());
    }

    fn exact_max(payer: &str, debtor: &str) -> RecordExpense {
        RecordExpense::new(
            SplitKind::Exact,
            Money::from_cents(i64::MAX),
            payer,
            vec![SplitInput::exact(debtor, Money::from_cents(i64::MAX))],
        )
    }

    #[test]
    fn test_overflowing_balance_is_rejected_atomically() {
        let group = group();
        group.record_expense(exact_max("p1", "p2")).unwrap();

        let err = group.record_expense(exact_max("p1", "p2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
        assert_eq!(
            group.pair_balance(&id("p1"), &id("p2")).unwrap(),
            Money::from_cents(i64::MAX)
        );
        assert_eq!(group.expenses().unwrap().len(), 1);
        assert!(group.is_consistent().unwrap());
    }

    #[test]
    fn test_net_balance_overflow_is_an_error() {
        let group = group();
        group.record_expense(exact_max("p1", "p2")).unwrap();
        group.record_expense(exact_max("p1", "p3")).unwrap();

        let err = group.net_balance(&id("p1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
        assert_eq!(
            group.net_balance(&id("p2")).unwrap(),
            Money::from_cents(-i64::MAX)
        );
    }

    const PEOPLE: [&str; 4] = ["p1", "p2", "p3", "p4"];

    /// Build a request from generated parts; `kind` 3 is a deliberately short EXACT
    fn generated_request(payer: usize, kind: u8, cents: i64, mask: u8) -> RecordExpense {
        let members: Vec<&str> = PEOPLE
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, p)| *p)
            .collect();
        let n = members.len() as i64;

        let splits = match kind {
            0 => members.iter().map(|m| SplitInput::equal(*m)).collect(),
            1 | 3 => {
                let total = if kind == 3 { cents - 1 } else { cents };
                members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        let share = total / n + if i == 0 { total % n } else { 0 };
                        SplitInput::exact(*m, Money::from_cents(share))
                    })
                    .collect()
            }
            _ => {
                let hundred = Percentage::HUNDRED.thousandths();
                members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        let share = hundred / n + if i == 0 { hundred % n } else { 0 };
                        SplitInput::percent(*m, Percentage::from_thousandths(share))
                    })
                    .collect()
            }
        };
        let kind = match kind {
            0 => SplitKind::Equal,
            1 | 3 => SplitKind::Exact,
            _ => SplitKind::Percent,
        };

        RecordExpense::new(kind, Money::from_cents(cents), PEOPLE[payer], splits)
    }

    fn sorted(mut balances: Vec<Balance>) -> Vec<Balance> {
        balances.sort_by(|a, b| (&a.debtor, &a.creditor).cmp(&(&b.debtor, &b.creditor)));
        balances
    }

    proptest! {
        #[test]
        fn prop_random_expenses_keep_ledger_consistent(
            expenses in prop::collection::vec(
                (0usize..4, 0u8..4, 1i64..10_000_000, 1u8..16),
                0..30,
            )
        ) {
            let group = ExpenseGroup::new();
            for (i, p) in PEOPLE.iter().enumerate() {
                group.register_participant(*p, format!("Person {}", i), "", "").unwrap();
            }

            let mut accepted = 0;
            for (payer, kind, cents, mask) in expenses {
                match group.record_expense(generated_request(payer, kind, cents, mask)) {
                    Ok(expense) => {
                        prop_assert_eq!(expense.splits_total(), Some(expense.amount));
                        accepted += 1;
                    }
                    Err(e) => {
                        prop_assert_eq!(e.kind(), ErrorKind::SumMismatch);
                    }
                }
            }
            prop_assert_eq!(group.expenses().unwrap().len(), accepted);
            prop_assert!(group.is_consistent().unwrap());

            // Conservation: the group as a whole owes nothing to itself
            let nets: Vec<Money> = PEOPLE
                .iter()
                .map(|p| group.net_balance(&id(p)).unwrap())
                .collect();
            prop_assert_eq!(Money::checked_sum(nets), Some(Money::zero()));

            // Per-user views agree with the all-pairs view and with the ledger
            let all = group.balance_entries(None).unwrap();
            for entry in &all {
                prop_assert!(entry.amount.is_positive());
                prop_assert_eq!(
                    group.pair_balance(&entry.creditor, &entry.debtor).unwrap(),
                    entry.amount
                );
            }
            for p in PEOPLE {
                let user = id(p);
                let mine = sorted(group.balance_entries(Some(&user)).unwrap());
                let from_all = sorted(
                    all.iter()
                        .filter(|b| b.debtor == user || b.creditor == user)
                        .cloned()
                        .collect(),
                );
                prop_assert_eq!(mine, from_all);
            }
        }
    }
}
