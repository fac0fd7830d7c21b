//! Balance engine: who owes whom, derived from a household's expenses.
//!
//! Pure and stateless. A [`BalanceSheet`] is recomputed from scratch on every call and
//! owned by the caller; nothing is cached between calls.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use homeshare_core::{MemberId, Money, ValueObject};

use crate::error::ExpenseError;
use crate::expense::Expense;

/// One member's position within a single computation.
///
/// `owes`/`owed` are kept per direction: if B owes A 30 and A owes B 10, both entries
/// stay as recorded and only `net_balance` reflects the difference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Counterparty -> positive amount this member owes them.
    pub owes: BTreeMap<MemberId, Money>,
    /// Counterparty -> positive amount they owe this member.
    pub owed: BTreeMap<MemberId, Money>,
    /// `sum(owed) - sum(owes)`; positive means net creditor.
    pub net_balance: Money,
}

impl ValueObject for Balance {}

impl Balance {
    pub fn total_owes(&self) -> Money {
        self.owes.values().sum()
    }

    pub fn total_owed(&self) -> Money {
        self.owed.values().sum()
    }

    /// Amount this member owes `creditor` (zero when there is no entry).
    pub fn owes_to(&self, creditor: &MemberId) -> Money {
        self.owes.get(creditor).copied().unwrap_or(Money::ZERO)
    }

    /// Amount `debtor` owes this member (zero when there is no entry).
    pub fn owed_by(&self, debtor: &MemberId) -> Money {
        self.owed.get(debtor).copied().unwrap_or(Money::ZERO)
    }

    pub fn is_settled(&self) -> bool {
        self.owes.is_empty() && self.owed.is_empty()
    }
}

/// Member -> balance for every member of the household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet {
    balances: BTreeMap<MemberId, Balance>,
}

impl BalanceSheet {
    pub fn get(&self, member: &MemberId) -> Option<&Balance> {
        self.balances.get(member)
    }

    pub fn net_balance(&self, member: &MemberId) -> Option<Money> {
        self.balances.get(member).map(|b| b.net_balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &Balance)> {
        self.balances.iter()
    }

    pub fn members(&self) -> impl Iterator<Item = &MemberId> {
        self.balances.keys()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Sum of every member's net balance. Always zero for a sheet produced by
    /// [`BalanceEngine`].
    pub fn total_net(&self) -> Money {
        self.balances.values().map(|b| b.net_balance).sum()
    }

    pub fn into_inner(self) -> BTreeMap<MemberId, Balance> {
        self.balances
    }
}

/// Computes [`BalanceSheet`]s.
///
/// Equal splits are divided in integer cents with leftover cents assigned in
/// member-id order (see [`Expense::shares`]); every other value is an exact sum of
/// those shares, so per-pair amounts and net balances can never drift apart.
#[derive(Debug, Default, Clone, Copy)]
pub struct BalanceEngine;

impl BalanceEngine {
    /// Fold `expenses` into a balance sheet covering `member_ids`.
    ///
    /// Fails on the first expense that violates its contract (bad split, unknown
    /// member); no partial sheet is returned. The result does not depend on the order
    /// of `expenses`.
    pub fn compute<'a, E, M>(expenses: E, member_ids: M) -> Result<BalanceSheet, ExpenseError>
    where
        E: IntoIterator<Item = &'a Expense>,
        M: IntoIterator<Item = &'a MemberId>,
    {
        let members: BTreeSet<&MemberId> = member_ids.into_iter().collect();

        let mut balances: BTreeMap<MemberId, Balance> = members
            .iter()
            .map(|m| ((*m).clone(), Balance::default()))
            .collect();

        for expense in expenses {
            fold_expense(&mut balances, &members, expense)?;
        }

        for balance in balances.values_mut() {
            balance.net_balance = balance.total_owed() - balance.total_owes();
        }

        Ok(BalanceSheet { balances })
    }
}

/// Convenience wrapper around [`BalanceEngine::compute`].
pub fn compute_balances<'a, E, M>(expenses: E, member_ids: M) -> Result<BalanceSheet, ExpenseError>
where
    E: IntoIterator<Item = &'a Expense>,
    M: IntoIterator<Item = &'a MemberId>,
{
    BalanceEngine::compute(expenses, member_ids)
}

fn fold_expense(
    balances: &mut BTreeMap<MemberId, Balance>,
    members: &BTreeSet<&MemberId>,
    expense: &Expense,
) -> Result<(), ExpenseError> {
    let shares = expense.shares()?;

    if let Some(unknown) = expense.referenced_members().find(|m| !members.contains(m)) {
        return Err(ExpenseError::UnknownMember {
            expense_id: expense.id,
            member_id: unknown.clone(),
        });
    }

    let creditor = &expense.paid_by;
    let overflow = || ExpenseError::AmountOverflow { expense_id: expense.id };
    for (debtor, share) in shares {
        if debtor == creditor || share.is_zero() {
            continue;
        }

        let debtor_balance = balances.entry(debtor.clone()).or_default();
        accumulate(&mut debtor_balance.owes, creditor, share).ok_or_else(overflow)?;

        let creditor_balance = balances.entry(creditor.clone()).or_default();
        accumulate(&mut creditor_balance.owed, debtor, share).ok_or_else(overflow)?;
    }

    Ok(())
}

/// Add `share` to the `counterparty` entry of one side of a balance.
///
/// Fails when either the entry or the side's total would overflow. With both totals
/// in range, `owed - owes` is in range too.
fn accumulate(side: &mut BTreeMap<MemberId, Money>, counterparty: &MemberId, share: Money) -> Option<()> {
    let entry = side.entry(counterparty.clone()).or_default();
    *entry = entry.checked_add(share)?;
    Money::checked_sum(side.values().copied()).map(|_| ())
}
