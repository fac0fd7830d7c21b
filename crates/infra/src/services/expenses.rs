use chrono::Utc;
use tracing::instrument;

use homeshare_core::{DomainError, ExpenseId, HouseholdId, MemberId};
use homeshare_expenses::{
    compute_balances, BalanceSheet, Expense, ExpenseError, MemberBalanceSummary, NewExpense,
};

use super::{ensure_listed, household_for_member, household_missing, ServiceError, Stores};

#[derive(Debug, Clone)]
pub struct ExpenseService {
    stores: Stores,
    currency_symbol: String,
}

impl ExpenseService {
    pub fn new(stores: Stores, currency_symbol: impl Into<String>) -> Self {
        Self {
            stores,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Validate and persist a new expense.
    ///
    /// The shape checks of the balance engine run here as well, plus membership of the
    /// payer and every participant, so nothing unfoldable reaches the store.
    #[instrument(skip(self, new), fields(amount = %new.amount, split = new.split.kind()))]
    pub async fn record(
        &self,
        household_id: HouseholdId,
        member: &MemberId,
        new: NewExpense,
    ) -> Result<Expense, ServiceError> {
        let household = household_for_member(&self.stores, household_id, member).await?;
        let expense = Expense::record(ExpenseId::new(), household_id, new, Utc::now())?;

        if let Some(stranger) = expense.referenced_members().find(|m| !household.is_member(m)) {
            return Err(ExpenseError::UnknownMember {
                expense_id: expense.id,
                member_id: stranger.clone(),
            }
            .into());
        }

        self.stores.expenses.insert(expense.clone()).await?;
        tracing::info!(expense_id = %expense.id, "expense recorded");
        Ok(expense)
    }

    /// Expenses of the household, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, household_id: HouseholdId, member: &MemberId) -> Result<Vec<Expense>, ServiceError> {
        household_for_member(&self.stores, household_id, member).await?;
        Ok(self.stores.expenses.list_for_household(household_id).await?)
    }

    /// Current balance sheet of the household.
    ///
    /// The expense list and the member list are read concurrently; the engine only
    /// runs once both are in.
    #[instrument(skip(self))]
    pub async fn balances(&self, household_id: HouseholdId, member: &MemberId) -> Result<BalanceSheet, ServiceError> {
        let (expenses, members) = self.load(household_id, member).await?;
        self.compute(&expenses, &members)
    }

    /// The acting member's own balance card.
    #[instrument(skip(self))]
    pub async fn summary_for(
        &self,
        household_id: HouseholdId,
        member: &MemberId,
    ) -> Result<MemberBalanceSummary, ServiceError> {
        let (expenses, members) = self.load(household_id, member).await?;
        let sheet = self.compute(&expenses, &members)?;
        self.summarize(&sheet, member, &expenses)
    }

    pub(crate) fn compute(&self, expenses: &[Expense], members: &[MemberId]) -> Result<BalanceSheet, ServiceError> {
        compute_balances(expenses, members).map_err(|err| {
            tracing::warn!(expense_id = %err.expense_id(), error = %err, "balance computation failed");
            ServiceError::Balance(err)
        })
    }

    pub(crate) fn summarize(
        &self,
        sheet: &BalanceSheet,
        member: &MemberId,
        expenses: &[Expense],
    ) -> Result<MemberBalanceSummary, ServiceError> {
        MemberBalanceSummary::from_sheet(sheet, member, expenses, &self.currency_symbol)
            .ok_or(ServiceError::Domain(DomainError::Unauthorized))
    }

    async fn load(
        &self,
        household_id: HouseholdId,
        member: &MemberId,
    ) -> Result<(Vec<Expense>, Vec<MemberId>), ServiceError> {
        let expenses = async {
            self.stores
                .expenses
                .list_for_household(household_id)
                .await
                .map_err(ServiceError::from)
        };
        let members = async {
            self.stores
                .households
                .member_ids(household_id)
                .await
                .map_err(household_missing(household_id))
        };

        let (expenses, members) = tokio::try_join!(expenses, members)?;
        ensure_listed(&members, member)?;
        Ok((expenses, members))
    }
}
