//! Chores: assignment, completion, recurrence, and the household calendar.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod calendar;
pub mod chore;
pub mod stats;

pub use calendar::{build_calendar, group_by_day, CalendarDay, CalendarEvent, CalendarEventKind};
pub use chore::{Chore, ChoreUpdate, Completion, NewChore, Priority, Recurrence};
pub use stats::{ChoreStats, OverdueChore};
