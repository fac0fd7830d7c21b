//! Application services: the use cases behind the HTTP routes.
//!
//! Every service is a thin, stateless wrapper around a [`Stores`] bundle. Each call
//! loads what it needs, checks that the acting member belongs to the household, runs
//! the domain logic and persists the result.

pub mod calendar;
pub mod chores;
pub mod dashboard;
pub mod expenses;
pub mod households;

use std::sync::Arc;

use homeshare_core::{DomainError, HouseholdId, MemberId};
use homeshare_expenses::ExpenseError;
use homeshare_households::Household;

use crate::store::{
    ChoreStore, ExpenseStore, HouseholdDirectory, InMemoryChoreStore, InMemoryExpenseStore,
    InMemoryHouseholdDirectory, StoreError,
};

pub use calendar::CalendarService;
pub use chores::{ChoreService, CompletedChore};
pub use dashboard::{Dashboard, DashboardService};
pub use expenses::ExpenseService;
pub use households::HouseholdService;

/// Store handles shared by all services.
#[derive(Clone)]
pub struct Stores {
    pub households: Arc<dyn HouseholdDirectory>,
    pub expenses: Arc<dyn ExpenseStore>,
    pub chores: Arc<dyn ChoreStore>,
}

impl Stores {
    /// Fresh, empty in-memory stores (dev server and tests).
    pub fn in_memory() -> Self {
        Self {
            households: Arc::new(InMemoryHouseholdDirectory::new()),
            expenses: Arc::new(InMemoryExpenseStore::new()),
            chores: Arc::new(InMemoryChoreStore::new()),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The submitted expense was rejected before it reached the store.
    #[error(transparent)]
    InvalidExpense(#[from] ExpenseError),

    /// Stored expenses could not be folded into balances.
    #[error("balances unavailable: {0}")]
    Balance(ExpenseError),

    #[error("household {0} not found")]
    HouseholdNotFound(HouseholdId),

    #[error("chore not found")]
    ChoreNotFound,

    #[error("Invalid invite code")]
    InvalidInviteCode,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Load a household and make sure `member` belongs to it.
pub(crate) async fn household_for_member(
    stores: &Stores,
    household_id: HouseholdId,
    member: &MemberId,
) -> Result<Household, ServiceError> {
    let household = stores
        .households
        .get(household_id)
        .await?
        .ok_or(ServiceError::HouseholdNotFound(household_id))?;
    household.ensure_member(member)?;
    Ok(household)
}

/// Membership check against an already fetched member list.
pub(crate) fn ensure_listed(members: &[MemberId], member: &MemberId) -> Result<(), ServiceError> {
    if members.contains(member) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized.into())
    }
}

/// `StoreError::NotFound` for a household read becomes the service-level variant.
pub(crate) fn household_missing(household_id: HouseholdId) -> impl FnOnce(StoreError) -> ServiceError {
    move |err| match err {
        StoreError::NotFound(_) => ServiceError::HouseholdNotFound(household_id),
        other => ServiceError::Store(other),
    }
}
