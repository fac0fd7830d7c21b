use chrono::{DateTime, Utc};
use serde::Serialize;

use homeshare_core::{ChoreId, MemberId};

use crate::chore::Chore;

/// How many overdue chores the dashboard alert lists by name.
pub const OVERDUE_PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueChore {
    pub id: ChoreId,
    pub title: String,
    pub due_date: DateTime<Utc>,
}

/// Chore counters shown on the household dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreStats {
    pub total: usize,
    pub pending: usize,
    /// Pending chores assigned to the viewing member.
    pub mine_pending: usize,
    pub overdue: usize,
    /// First few overdue chores, in the order given.
    pub overdue_preview: Vec<OverdueChore>,
    /// Completed share of all chores, whole percent (0 when there are none).
    pub completion_rate: u8,
}

impl ChoreStats {
    pub fn compute<'a>(
        chores: impl IntoIterator<Item = &'a Chore>,
        member: &MemberId,
        now: DateTime<Utc>,
    ) -> Self {
        let mut total = 0usize;
        let mut completed = 0usize;
        let mut mine_pending = 0usize;
        let mut overdue = Vec::new();

        for chore in chores {
            total += 1;
            if chore.is_completed() {
                completed += 1;
                continue;
            }
            if chore.assigned_to() == member {
                mine_pending += 1;
            }
            if chore.is_overdue(now) {
                overdue.push(chore);
            }
        }

        let completion_rate = if total == 0 {
            0
        } else {
            ((completed * 100 + total / 2) / total) as u8
        };

        Self {
            total,
            pending: total - completed,
            mine_pending,
            overdue: overdue.len(),
            overdue_preview: overdue
                .iter()
                .take(OVERDUE_PREVIEW_LEN)
                .map(|c| OverdueChore {
                    id: c.id_typed(),
                    title: c.title().to_string(),
                    due_date: c.due_date(),
                })
                .collect(),
            completion_rate,
        }
    }
}
