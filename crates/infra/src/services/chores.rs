use chrono::Utc;
use tracing::instrument;

use homeshare_chores::{Chore, ChoreStats, ChoreUpdate, NewChore};
use homeshare_core::{ChoreId, DomainError, HouseholdId, MemberId};
use homeshare_households::Household;

use super::{household_for_member, ServiceError, Stores};

/// Result of completing a chore.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedChore {
    pub chore: Chore,
    /// The follow-up instance created for a recurring chore.
    pub next: Option<Chore>,
}

#[derive(Debug, Clone)]
pub struct ChoreService {
    stores: Stores,
}

fn ensure_assignable(household: &Household, assignee: &MemberId) -> Result<(), ServiceError> {
    if household.is_member(assignee) {
        Ok(())
    } else {
        Err(DomainError::validation(format!("{assignee} is not a member of this household")).into())
    }
}

impl ChoreService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    #[instrument(skip(self, new), fields(assigned_to = %new.assigned_to))]
    pub async fn create(
        &self,
        household_id: HouseholdId,
        member: &MemberId,
        new: NewChore,
    ) -> Result<Chore, ServiceError> {
        let household = household_for_member(&self.stores, household_id, member).await?;
        ensure_assignable(&household, &new.assigned_to)?;

        let chore = Chore::new(ChoreId::new(), household_id, member.clone(), new, Utc::now())?;
        self.stores.chores.insert(chore.clone()).await?;

        tracing::info!(chore_id = %chore.id_typed(), "chore created");
        Ok(chore)
    }

    /// Chores of the household, earliest due first.
    #[instrument(skip(self))]
    pub async fn list(&self, household_id: HouseholdId, member: &MemberId) -> Result<Vec<Chore>, ServiceError> {
        household_for_member(&self.stores, household_id, member).await?;
        Ok(self.stores.chores.list_for_household(household_id).await?)
    }

    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        household_id: HouseholdId,
        chore_id: ChoreId,
        member: &MemberId,
        update: ChoreUpdate,
    ) -> Result<Chore, ServiceError> {
        let household = household_for_member(&self.stores, household_id, member).await?;
        if let Some(assignee) = &update.assigned_to {
            ensure_assignable(&household, assignee)?;
        }

        let current = self.load(household_id, chore_id).await?;
        let mut chore = current.clone();
        chore.apply_update(update)?;
        self.stores.chores.replace(&current, chore.clone()).await?;

        tracing::info!("chore updated");
        Ok(chore)
    }

    /// Mark a chore done. A recurring chore gets its next occurrence scheduled.
    #[instrument(skip(self))]
    pub async fn complete(
        &self,
        household_id: HouseholdId,
        chore_id: ChoreId,
        member: &MemberId,
    ) -> Result<CompletedChore, ServiceError> {
        household_for_member(&self.stores, household_id, member).await?;

        let now = Utc::now();
        let current = self.load(household_id, chore_id).await?;
        let mut chore = current.clone();
        chore.complete(member.clone(), now)?;
        // Of two racing completions only one swap lands, so only one follow-up exists.
        self.stores.chores.replace(&current, chore.clone()).await?;

        let next = chore.next_occurrence(ChoreId::new(), now);
        match &next {
            Some(next) => {
                self.stores.chores.insert(next.clone()).await?;
                tracing::info!(next_chore_id = %next.id_typed(), due = %next.due_date(), "next occurrence scheduled");
            }
            None if chore.recurrence().is_some() => {
                tracing::warn!(due = %chore.due_date(), "recurrence ran past the last representable date");
            }
            None => {}
        }

        tracing::info!("chore completed");
        Ok(CompletedChore { chore, next })
    }

    /// Counters for the acting member.
    #[instrument(skip(self))]
    pub async fn stats(&self, household_id: HouseholdId, member: &MemberId) -> Result<ChoreStats, ServiceError> {
        let chores = self.list(household_id, member).await?;
        Ok(ChoreStats::compute(&chores, member, Utc::now()))
    }

    async fn load(&self, household_id: HouseholdId, chore_id: ChoreId) -> Result<Chore, ServiceError> {
        self.stores
            .chores
            .get(household_id, chore_id)
            .await?
            .ok_or(ServiceError::ChoreNotFound)
    }
}
