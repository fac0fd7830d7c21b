use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use homeshare_chores::Chore;
use homeshare_core::{ChoreId, ExpenseId, HouseholdId, MemberId};
use homeshare_expenses::Expense;
use homeshare_households::{Household, InviteCode};

use super::{ChoreStore, ExpenseStore, HouseholdDirectory, HouseholdStore, InMemoryHouseholdStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    inner: InMemoryHouseholdStore<ExpenseId, Expense>,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for InMemoryExpenseStore {
    async fn insert(&self, expense: Expense) -> Result<(), StoreError> {
        self.inner.insert_new(expense.household_id, expense.id, expense)
    }

    async fn list_for_household(&self, household_id: HouseholdId) -> Result<Vec<Expense>, StoreError> {
        let mut expenses = self.inner.list(household_id)?;
        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(expenses)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryChoreStore {
    inner: InMemoryHouseholdStore<ChoreId, Chore>,
}

impl InMemoryChoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChoreStore for InMemoryChoreStore {
    async fn insert(&self, chore: Chore) -> Result<(), StoreError> {
        self.inner.insert_new(chore.household_id(), chore.id_typed(), chore)
    }

    async fn get(&self, household_id: HouseholdId, chore_id: ChoreId) -> Result<Option<Chore>, StoreError> {
        self.inner.get(household_id, &chore_id)
    }

    async fn replace(&self, current: &Chore, next: Chore) -> Result<(), StoreError> {
        self.inner
            .replace_if(current.household_id(), current.id_typed(), current, next)
    }

    async fn list_for_household(&self, household_id: HouseholdId) -> Result<Vec<Chore>, StoreError> {
        let mut chores = self.inner.list(household_id)?;
        chores.sort_by(|a, b| {
            a.due_date()
                .cmp(&b.due_date())
                .then_with(|| a.id_typed().cmp(&b.id_typed()))
        });
        Ok(chores)
    }
}

/// Households keyed by id, with the invite code kept unique across the directory.
#[derive(Debug, Default)]
pub struct InMemoryHouseholdDirectory {
    inner: RwLock<HashMap<HouseholdId, Household>>,
}

impl InMemoryHouseholdDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&HashMap<HouseholdId, Household>) -> T) -> Result<T, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::poisoned())?;
        Ok(f(&map))
    }
}

#[async_trait]
impl HouseholdDirectory for InMemoryHouseholdDirectory {
    async fn insert(&self, household: Household) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::poisoned())?;
        let id = household.id_typed();
        if map.contains_key(&id) {
            return Err(StoreError::Conflict(format!("household {id} already exists")));
        }
        if map.values().any(|h| h.invite_code() == household.invite_code()) {
            return Err(StoreError::Conflict(format!(
                "invite code {} already in use",
                household.invite_code()
            )));
        }
        map.insert(id, household);
        Ok(())
    }

    async fn get(&self, id: HouseholdId) -> Result<Option<Household>, StoreError> {
        self.read(|map| map.get(&id).cloned())
    }

    async fn find_by_invite_code(&self, code: &InviteCode) -> Result<Option<Household>, StoreError> {
        self.read(|map| map.values().find(|h| h.invite_code() == code).cloned())
    }

    async fn add_member(&self, id: HouseholdId, member: MemberId) -> Result<Household, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::poisoned())?;
        let household = map
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("household {id}")))?;
        household
            .join(member)
            .map_err(|err| StoreError::Conflict(err.to_string()))?;
        Ok(household.clone())
    }

    async fn member_ids(&self, id: HouseholdId) -> Result<Vec<MemberId>, StoreError> {
        self.read(|map| map.get(&id).map(|h| h.member_ids().to_vec()))?
            .ok_or_else(|| StoreError::NotFound(format!("household {id}")))
    }
}
