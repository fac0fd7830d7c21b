use chrono::Utc;
use tracing::instrument;

use homeshare_chores::{build_calendar, group_by_day, CalendarDay};
use homeshare_core::{HouseholdId, MemberId};

use super::{household_for_member, ServiceError, Stores};

#[derive(Debug, Clone)]
pub struct CalendarService {
    stores: Stores,
    recent_expenses: usize,
}

impl CalendarService {
    pub fn new(stores: Stores, recent_expenses: usize) -> Self {
        Self { stores, recent_expenses }
    }

    /// Pending chores and the most recent expenses, grouped per day.
    #[instrument(skip(self))]
    pub async fn days(&self, household_id: HouseholdId, member: &MemberId) -> Result<Vec<CalendarDay>, ServiceError> {
        household_for_member(&self.stores, household_id, member).await?;

        let (chores, expenses) = tokio::try_join!(
            self.stores.chores.list_for_household(household_id),
            self.stores.expenses.list_for_household(household_id),
        )?;

        let events = build_calendar(&chores, &expenses, self.recent_expenses);
        Ok(group_by_day(events, Utc::now().date_naive()))
    }
}
