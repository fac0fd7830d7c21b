use thiserror::Error;

use homeshare_core::{DomainError, ExpenseId, MemberId, Money};

/// Contract violations found while validating or folding an expense.
///
/// Every variant names the offending expense so the caller can point at it; none of
/// them are retryable since the same input fails the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpenseError {
    /// Custom shares are missing, empty, negative, do not cover the participants, or
    /// do not add up to the expense amount.
    #[error("expense {expense_id}: invalid split: {reason}")]
    InvalidSplit { expense_id: ExpenseId, reason: String },

    /// Payer or participant is not part of the supplied member set.
    #[error("expense {expense_id}: member {member_id} is not part of the household")]
    UnknownMember {
        expense_id: ExpenseId,
        member_id: MemberId,
    },

    /// Equal split with nobody to split between.
    #[error("expense {expense_id}: equal split has no participants")]
    DivisionDegenerate { expense_id: ExpenseId },

    #[error("expense {expense_id}: amount must be positive (got {amount})")]
    InvalidAmount { expense_id: ExpenseId, amount: Money },

    #[error("expense {expense_id}: title must not be empty")]
    MissingTitle { expense_id: ExpenseId },

    /// Folding this expense would push a balance past the representable range.
    #[error("expense {expense_id}: balances exceed the representable amount")]
    AmountOverflow { expense_id: ExpenseId },
}

impl ExpenseError {
    pub fn invalid_split(expense_id: ExpenseId, reason: impl Into<String>) -> Self {
        Self::InvalidSplit {
            expense_id,
            reason: reason.into(),
        }
    }

    pub fn expense_id(&self) -> ExpenseId {
        match self {
            Self::InvalidSplit { expense_id, .. }
            | Self::UnknownMember { expense_id, .. }
            | Self::DivisionDegenerate { expense_id }
            | Self::InvalidAmount { expense_id, .. }
            | Self::MissingTitle { expense_id }
            | Self::AmountOverflow { expense_id } => *expense_id,
        }
    }
}

impl From<ExpenseError> for DomainError {
    fn from(err: ExpenseError) -> Self {
        DomainError::validation(err.to_string())
    }
}
