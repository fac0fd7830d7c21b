//! Storage abstractions for expenses, households and chores.
//!
//! Handles are created by the caller and injected into the services (see
//! [`crate::services::Stores`]); nothing in here is process-global.

pub mod household_store;
pub mod in_memory;

use async_trait::async_trait;

use homeshare_chores::Chore;
use homeshare_core::{ChoreId, HouseholdId, MemberId};
use homeshare_expenses::Expense;
use homeshare_households::{Household, InviteCode};

pub use household_store::{HouseholdStore, InMemoryHouseholdStore};
pub use in_memory::{InMemoryChoreStore, InMemoryExpenseStore, InMemoryHouseholdDirectory};

/// Storage-level failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub(crate) fn poisoned() -> Self {
        Self::Storage("lock poisoned".to_string())
    }
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn insert(&self, expense: Expense) -> Result<(), StoreError>;

    /// Expenses of one household, newest `date` first (ties: newest `created_at` first).
    async fn list_for_household(&self, household_id: HouseholdId) -> Result<Vec<Expense>, StoreError>;
}

#[async_trait]
pub trait HouseholdDirectory: Send + Sync {
    /// Fails with `Conflict` if the id or the invite code is already taken.
    async fn insert(&self, household: Household) -> Result<(), StoreError>;

    async fn get(&self, id: HouseholdId) -> Result<Option<Household>, StoreError>;

    async fn find_by_invite_code(&self, code: &InviteCode) -> Result<Option<Household>, StoreError>;

    /// Add `member` to the household in one step and return the updated record.
    ///
    /// `NotFound` for an unknown household, `Conflict` if the member already belongs
    /// to it. Concurrent joins never drop each other's members.
    async fn add_member(&self, id: HouseholdId, member: MemberId) -> Result<Household, StoreError>;

    /// Member ids in join order; `NotFound` for an unknown household.
    async fn member_ids(&self, id: HouseholdId) -> Result<Vec<MemberId>, StoreError>;
}

#[async_trait]
pub trait ChoreStore: Send + Sync {
    async fn insert(&self, chore: Chore) -> Result<(), StoreError>;

    async fn get(&self, household_id: HouseholdId, chore_id: ChoreId) -> Result<Option<Chore>, StoreError>;

    /// Store `next` in place of `current`.
    ///
    /// `Conflict` if the stored chore no longer equals `current` (someone else changed
    /// it in between), `NotFound` if it was never inserted.
    async fn replace(&self, current: &Chore, next: Chore) -> Result<(), StoreError>;

    /// Chores of one household, earliest due date first.
    async fn list_for_household(&self, household_id: HouseholdId) -> Result<Vec<Chore>, StoreError>;
}
