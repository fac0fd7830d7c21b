use homeshare_infra::{
    AppConfig, CalendarService, ChoreService, DashboardService, ExpenseService, HouseholdService, Stores,
};

/// Services shared by every handler, built once at startup.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub households: HouseholdService,
    pub expenses: ExpenseService,
    pub chores: ChoreService,
    pub calendar: CalendarService,
    pub dashboard: DashboardService,
}

impl AppServices {
    pub fn new(config: &AppConfig, stores: Stores) -> Self {
        Self {
            households: HouseholdService::new(stores.clone()),
            expenses: ExpenseService::new(stores.clone(), config.currency_symbol.clone()),
            chores: ChoreService::new(stores.clone()),
            calendar: CalendarService::new(stores.clone(), config.calendar_recent_expenses),
            dashboard: DashboardService::new(stores, config.currency_symbol.clone()),
        }
    }
}
