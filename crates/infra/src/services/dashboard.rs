use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use homeshare_chores::ChoreStats;
use homeshare_core::{HouseholdId, MemberId};
use homeshare_expenses::MemberBalanceSummary;

use super::{household_for_member, ExpenseService, ServiceError, Stores};

/// Everything the home screen shows for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub household_id: HouseholdId,
    pub household_name: String,
    pub member_count: usize,
    /// `None` when the stored expenses cannot be folded into balances; the rest of
    /// the view is still served.
    pub balance: Option<MemberBalanceSummary>,
    pub chores: ChoreStats,
    /// Banner text when something is overdue.
    pub overdue_alert: Option<String>,
}

fn overdue_alert(overdue: usize) -> Option<String> {
    match overdue {
        0 => None,
        1 => Some("1 chore is overdue and needs attention!".to_string()),
        n => Some(format!("{n} chores are overdue and need attention!")),
    }
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    stores: Stores,
    expenses: ExpenseService,
}

impl DashboardService {
    pub fn new(stores: Stores, currency_symbol: impl Into<String>) -> Self {
        Self {
            expenses: ExpenseService::new(stores.clone(), currency_symbol),
            stores,
        }
    }

    /// Household, chores and expenses are fetched together and folded into one view.
    #[instrument(skip(self))]
    pub async fn load(&self, household_id: HouseholdId, member: &MemberId) -> Result<Dashboard, ServiceError> {
        let household = household_for_member(&self.stores, household_id, member);
        let chores = async {
            self.stores
                .chores
                .list_for_household(household_id)
                .await
                .map_err(ServiceError::from)
        };
        let expenses = async {
            self.stores
                .expenses
                .list_for_household(household_id)
                .await
                .map_err(ServiceError::from)
        };

        let (household, chores, expenses) = tokio::try_join!(household, chores, expenses)?;

        let balance = match self.expenses.compute(&expenses, household.member_ids()) {
            Ok(sheet) => Some(self.expenses.summarize(&sheet, member, &expenses)?),
            Err(ServiceError::Balance(err)) => {
                tracing::warn!(%household_id, error = %err, "dashboard served without balances");
                None
            }
            Err(other) => return Err(other),
        };
        let stats = ChoreStats::compute(&chores, member, Utc::now());

        Ok(Dashboard {
            household_id,
            household_name: household.name().to_string(),
            member_count: household.member_ids().len(),
            balance,
            overdue_alert: overdue_alert(stats.overdue),
            chores: stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ChoreService, HouseholdService};
    use chrono::Duration;
    use homeshare_chores::{NewChore, Priority};
    use homeshare_core::{ExpenseId, Money};
    use homeshare_expenses::{BalanceStanding, Expense, NewExpense, Split};

    fn m(id: &str) -> MemberId {
        MemberId::parse(id).unwrap()
    }

    #[test]
    fn alert_wording() {
        assert_eq!(overdue_alert(0), None);
        assert_eq!(overdue_alert(1).unwrap(), "1 chore is overdue and needs attention!");
        assert_eq!(overdue_alert(4).unwrap(), "4 chores are overdue and need attention!");
    }

    #[tokio::test]
    async fn dashboard_combines_balance_and_chores() {
        let stores = Stores::in_memory();
        let households = HouseholdService::new(stores.clone());
        let h = households.create("Maple Street", m("alice")).await.unwrap();
        households.join(h.invite_code().as_str(), m("bob")).await.unwrap();
        let h = h.id_typed();

        ExpenseService::new(stores.clone(), "$")
            .record(
                h,
                &m("bob"),
                NewExpense {
                    title: "Internet".to_string(),
                    description: String::new(),
                    category: "utilities".to_string(),
                    amount: Money::from_major(60),
                    paid_by: m("bob"),
                    split_between: [m("alice"), m("bob")].into_iter().collect(),
                    split: Split::Equal,
                    date: Utc::now(),
                },
            )
            .await
            .unwrap();

        ChoreService::new(stores.clone())
            .create(
                h,
                &m("bob"),
                NewChore {
                    title: "Vacuum".to_string(),
                    description: String::new(),
                    assigned_to: m("alice"),
                    due_date: Utc::now() - Duration::hours(3),
                    priority: Priority::Medium,
                    recurrence: None,
                },
            )
            .await
            .unwrap();

        let dashboard = DashboardService::new(stores, "$").load(h, &m("alice")).await.unwrap();
        assert_eq!(dashboard.household_name, "Maple Street");
        assert_eq!(dashboard.member_count, 2);
        let balance = dashboard.balance.unwrap();
        assert_eq!(balance.standing, BalanceStanding::Owes);
        assert_eq!(balance.display, "-$30.00");
        assert_eq!(dashboard.chores.mine_pending, 1);
        assert_eq!(dashboard.chores.overdue_preview[0].title, "Vacuum");
        assert!(dashboard.overdue_alert.is_some());
    }

    #[tokio::test]
    async fn dashboard_survives_unfoldable_expenses() {
        let stores = Stores::in_memory();
        let households = HouseholdService::new(stores.clone());
        let h = households.create("Maple Street", m("alice")).await.unwrap().id_typed();

        ChoreService::new(stores.clone())
            .create(
                h,
                &m("alice"),
                NewChore {
                    title: "Bins".to_string(),
                    description: String::new(),
                    assigned_to: m("alice"),
                    due_date: Utc::now() - Duration::hours(1),
                    priority: Priority::High,
                    recurrence: None,
                },
            )
            .await
            .unwrap();

        // Paid by someone who is not (or no longer) in the household.
        let ghost = Expense::record(
            ExpenseId::new(),
            h,
            NewExpense {
                title: "Old rent".to_string(),
                description: String::new(),
                category: "rent".to_string(),
                amount: Money::from_major(500),
                paid_by: m("ghost"),
                split_between: [m("alice"), m("ghost")].into_iter().collect(),
                split: Split::Equal,
                date: Utc::now() - Duration::days(2),
            },
            Utc::now(),
        )
        .unwrap();
        stores.expenses.insert(ghost).await.unwrap();

        let dashboard = DashboardService::new(stores, "$").load(h, &m("alice")).await.unwrap();
        assert!(dashboard.balance.is_none());
        assert_eq!(dashboard.chores.mine_pending, 1);
        assert_eq!(dashboard.chores.overdue, 1);
        assert_eq!(dashboard.overdue_alert.as_deref(), Some("1 chore is overdue and needs attention!"));
    }
}
