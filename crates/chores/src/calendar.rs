//! Calendar view: pending chores and recent expenses on one timeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use homeshare_core::Money;
use homeshare_expenses::Expense;

use crate::chore::{Chore, Priority};

/// How many of the most recent expenses the calendar shows by default.
pub const DEFAULT_RECENT_EXPENSES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalendarEventKind {
    Chore { priority: Priority },
    Expense { amount: Money },
}

impl CalendarEventKind {
    fn rank(&self) -> u8 {
        match self {
            CalendarEventKind::Chore { .. } => 0,
            CalendarEventKind::Expense { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Id of the underlying chore or expense.
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: CalendarEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub overdue: bool,
    pub events: Vec<CalendarEvent>,
}

/// Merge pending chores with the first `recent_expense_limit` expenses.
///
/// `expenses` is expected newest-first (the store's order), so the first entries are
/// the most recent ones. The result is sorted by date; on equal dates chores come
/// before expenses, then titles break the tie.
pub fn build_calendar(
    chores: &[Chore],
    expenses: &[Expense],
    recent_expense_limit: usize,
) -> Vec<CalendarEvent> {
    let chore_events = chores
        .iter()
        .filter(|c| !c.is_completed())
        .map(|c| CalendarEvent {
            id: c.id_typed().to_string(),
            title: c.title().to_string(),
            date: c.due_date(),
            kind: CalendarEventKind::Chore {
                priority: c.priority(),
            },
        });

    let expense_events = expenses
        .iter()
        .take(recent_expense_limit)
        .map(|e| CalendarEvent {
            id: e.id.to_string(),
            title: e.title.clone(),
            date: e.date,
            kind: CalendarEventKind::Expense { amount: e.amount },
        });

    let mut events: Vec<CalendarEvent> = chore_events.chain(expense_events).collect();
    events.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.kind.rank().cmp(&b.kind.rank()))
            .then_with(|| a.title.cmp(&b.title))
    });
    events
}

/// Bucket date-sorted events by calendar day (UTC).
pub fn group_by_day(events: Vec<CalendarEvent>, today: NaiveDate) -> Vec<CalendarDay> {
    let mut days: Vec<CalendarDay> = Vec::new();

    for event in events {
        let date = event.date.date_naive();
        match days.last_mut() {
            Some(day) if day.date == date => day.events.push(event),
            _ => days.push(CalendarDay {
                date,
                overdue: is_overdue_day(date, today),
                events: vec![event],
            }),
        }
    }

    days
}

pub fn is_overdue_day(day: NaiveDate, today: NaiveDate) -> bool {
    day < today
}
