use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use homeshare_core::{Entity, ExpenseId, HouseholdId, MemberId, Money};

use crate::error::ExpenseError;

/// How an expense is divided among its participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "shares", rename_all = "lowercase")]
pub enum Split {
    /// Everyone in `split_between` pays the same share.
    Equal,
    /// Explicit amount per participant.
    Custom(BTreeMap<MemberId, Money>),
}

impl Split {
    pub fn kind(&self) -> &'static str {
        match self {
            Split::Equal => "equal",
            Split::Custom(_) => "custom",
        }
    }
}

/// A shared cost paid by one member and shared among a subset of members.
///
/// Immutable once recorded: an edit produces a new snapshot and balances are simply
/// recomputed from whatever the store holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub household_id: HouseholdId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Positive, in the household's single implicit currency.
    pub amount: Money,
    pub paid_by: MemberId,
    /// May or may not include `paid_by`.
    pub split_between: BTreeSet<MemberId>,
    pub split: Split,
    /// When the cost was incurred (drives display order).
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of an expense; ids and timestamps are assigned on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub amount: Money,
    pub paid_by: MemberId,
    pub split_between: BTreeSet<MemberId>,
    pub split: Split,
    pub date: DateTime<Utc>,
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Expense {
    /// Build and validate a new expense at the store boundary.
    pub fn record(
        id: ExpenseId,
        household_id: HouseholdId,
        new: NewExpense,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ExpenseError> {
        let expense = Self {
            id,
            household_id,
            title: new.title.trim().to_string(),
            description: new.description,
            category: new.category,
            amount: new.amount,
            paid_by: new.paid_by,
            split_between: new.split_between,
            split: new.split,
            date: new.date,
            created_at,
        };

        if expense.title.is_empty() {
            return Err(ExpenseError::MissingTitle { expense_id: id });
        }

        expense.validate()?;
        Ok(expense)
    }

    /// Check the shape of the expense (amount and split), independent of membership.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if !self.amount.is_positive() {
            return Err(ExpenseError::InvalidAmount {
                expense_id: self.id,
                amount: self.amount,
            });
        }

        match &self.split {
            Split::Equal => {
                if self.split_between.is_empty() {
                    return Err(ExpenseError::DivisionDegenerate { expense_id: self.id });
                }
            }
            Split::Custom(shares) => self.validate_custom(shares)?,
        }

        Ok(())
    }

    fn validate_custom(&self, shares: &BTreeMap<MemberId, Money>) -> Result<(), ExpenseError> {
        if shares.is_empty() {
            return Err(ExpenseError::invalid_split(self.id, "custom split has no shares"));
        }

        if let Some((member, share)) = shares.iter().find(|(_, share)| share.is_negative()) {
            return Err(ExpenseError::invalid_split(
                self.id,
                format!("share for {member} is negative ({share})"),
            ));
        }

        if !shares.keys().eq(self.split_between.iter()) {
            return Err(ExpenseError::invalid_split(
                self.id,
                "custom shares must cover exactly the split participants",
            ));
        }

        let total = Money::checked_sum(shares.values().copied())
            .ok_or_else(|| ExpenseError::invalid_split(self.id, "custom shares overflow the amount range"))?;
        if total != self.amount {
            return Err(ExpenseError::invalid_split(
                self.id,
                format!("custom shares sum to {total}, expected {}", self.amount),
            ));
        }

        Ok(())
    }

    /// Every member the expense touches (payer first, then participants).
    pub fn referenced_members(&self) -> impl Iterator<Item = &MemberId> + '_ {
        std::iter::once(&self.paid_by).chain(self.split_between.iter())
    }

    /// Each participant's share of the amount, payer included.
    ///
    /// Equal splits hand leftover cents to participants in member-id order, so the
    /// result never depends on how the expense was built or stored.
    pub fn shares(&self) -> Result<Vec<(&MemberId, Money)>, ExpenseError> {
        self.validate()?;

        match &self.split {
            Split::Equal => {
                let parts = self
                    .amount
                    .split_evenly(self.split_between.len())
                    .ok_or(ExpenseError::DivisionDegenerate { expense_id: self.id })?;
                Ok(self.split_between.iter().zip(parts).collect())
            }
            Split::Custom(shares) => Ok(shares.iter().map(|(m, s)| (m, *s)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> MemberId {
        MemberId::parse(id).unwrap()
    }

    fn members(ids: &[&str]) -> BTreeSet<MemberId> {
        ids.iter().map(|id| member(id)).collect()
    }

    fn new_expense(amount: i64, split: Split, between: &[&str]) -> NewExpense {
        NewExpense {
            title: "Groceries".to_string(),
            description: String::new(),
            category: "food".to_string(),
            amount: Money::from_major(amount),
            paid_by: member("a"),
            split_between: members(between),
            split,
            date: Utc::now(),
        }
    }

    fn record(new: NewExpense) -> Result<Expense, ExpenseError> {
        Expense::record(ExpenseId::new(), HouseholdId::new(), new, Utc::now())
    }

    #[test]
    fn equal_split_shares_follow_member_order() {
        let expense = record(new_expense(100, Split::Equal, &["c", "a", "b"])).unwrap();
        let shares = expense.shares().unwrap();

        let names: Vec<_> = shares.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(shares[0].1, Money::from_minor(3_334));
        assert_eq!(shares[2].1, Money::from_minor(3_333));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let err = record(new_expense(0, Split::Equal, &["a"])).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidAmount { .. }));
    }

    #[test]
    fn equal_split_without_participants_is_degenerate() {
        let err = record(new_expense(10, Split::Equal, &[])).unwrap_err();
        assert!(matches!(err, ExpenseError::DivisionDegenerate { .. }));
    }

    #[test]
    fn custom_split_must_cover_participants() {
        let shares = BTreeMap::from([(member("a"), Money::from_major(10))]);
        let err = record(new_expense(10, Split::Custom(shares), &["a", "b"])).unwrap_err();
        match err {
            ExpenseError::InvalidSplit { reason, .. } => assert!(reason.contains("cover")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn custom_split_must_sum_to_amount() {
        let shares = BTreeMap::from([
            (member("a"), Money::from_major(10)),
            (member("b"), Money::from_major(5)),
        ]);
        let err = record(new_expense(20, Split::Custom(shares), &["a", "b"])).unwrap_err();
        match err {
            ExpenseError::InvalidSplit { reason, .. } => assert!(reason.contains("sum")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_custom_share_is_rejected() {
        let shares = BTreeMap::from([
            (member("a"), Money::from_major(30)),
            (member("b"), Money::from_major(-10)),
        ]);
        let err = record(new_expense(20, Split::Custom(shares), &["a", "b"])).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidSplit { .. }));
    }

    #[test]
    fn custom_shares_overflowing_the_amount_range_are_rejected() {
        let shares = BTreeMap::from([
            (member("a"), Money::from_minor(i64::MAX)),
            (member("b"), Money::from_minor(i64::MAX)),
            (member("c"), Money::from_minor(10_002)),
        ]);
        let mut new = new_expense(0, Split::Custom(shares), &["a", "b", "c"]);
        new.amount = Money::from_minor(10_000);

        match record(new).unwrap_err() {
            ExpenseError::InvalidSplit { reason, .. } => assert!(reason.contains("overflow")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut new = new_expense(10, Split::Equal, &["a"]);
        new.title = "   ".to_string();
        assert!(matches!(record(new), Err(ExpenseError::MissingTitle { .. })));
    }

    #[test]
    fn split_serializes_with_type_tag() {
        let shares = BTreeMap::from([(member("a"), Money::from_major(20))]);
        let json = serde_json::to_value(Split::Custom(shares)).unwrap();
        assert_eq!(json["type"], "custom");
        assert_eq!(json["shares"]["a"], "20.00");

        let equal = serde_json::to_value(Split::Equal).unwrap();
        assert_eq!(equal["type"], "equal");
    }
}
