//! Shared expenses and balance settlement.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod balance;
pub mod error;
pub mod expense;
pub mod summary;

pub use balance::{compute_balances, Balance, BalanceEngine, BalanceSheet};
pub use error::ExpenseError;
pub use expense::{Expense, NewExpense, Split};
pub use summary::{format_signed, BalanceStanding, Counterparty, MemberBalanceSummary};
