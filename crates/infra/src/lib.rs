//! Infrastructure layer: configuration, stores and the application services.

pub mod config;
pub mod services;
pub mod store;


pub use config::AppConfig;
pub use services::{
    CalendarService, ChoreService, Dashboard, DashboardService, ExpenseService, HouseholdService,
    ServiceError, Stores,
};
pub use store::StoreError;
