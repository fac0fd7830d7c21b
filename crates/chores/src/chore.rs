use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use homeshare_core::{ChoreId, DomainError, DomainResult, Entity, HouseholdId, MemberId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// How often a recurring chore comes back once completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Next due date after `from`. Monthly recurrence clamps to the end of shorter
    /// months (Jan 31 -> Feb 28/29). `None` past the last representable date.
    pub fn advance(self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Recurrence::Daily => from.checked_add_signed(Duration::days(1)),
            Recurrence::Weekly => from.checked_add_signed(Duration::weeks(1)),
            Recurrence::Monthly => from.checked_add_months(Months::new(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub completed_at: DateTime<Utc>,
    pub completed_by: MemberId,
}

/// Caller-supplied fields of a chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChore {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: MemberId,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<MemberId>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    /// Turn a recurring chore into a one-off. Wins over `recurrence`.
    #[serde(default)]
    pub stop_recurring: bool,
}

/// A household task assigned to one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    id: ChoreId,
    household_id: HouseholdId,
    title: String,
    description: String,
    assigned_to: MemberId,
    assigned_by: MemberId,
    due_date: DateTime<Utc>,
    priority: Priority,
    recurrence: Option<Recurrence>,
    completion: Option<Completion>,
    created_at: DateTime<Utc>,
}

impl Entity for Chore {
    type Id = ChoreId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn normalize_title(title: &str) -> DomainResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("chore title must not be empty"));
    }
    Ok(title.to_string())
}

impl Chore {
    pub fn new(
        id: ChoreId,
        household_id: HouseholdId,
        assigned_by: MemberId,
        new: NewChore,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            household_id,
            title: normalize_title(&new.title)?,
            description: new.description,
            assigned_to: new.assigned_to,
            assigned_by,
            due_date: new.due_date,
            priority: new.priority,
            recurrence: new.recurrence,
            completion: None,
            created_at: now,
        })
    }

    pub fn id_typed(&self) -> ChoreId {
        self.id
    }

    pub fn household_id(&self) -> HouseholdId {
        self.household_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn assigned_to(&self) -> &MemberId {
        &self.assigned_to
    }

    pub fn assigned_by(&self) -> &MemberId {
        &self.assigned_by
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    /// Pending and past its due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due_date < now
    }

    pub fn complete(&mut self, by: MemberId, at: DateTime<Utc>) -> DomainResult<()> {
        if self.is_completed() {
            return Err(DomainError::conflict("chore is already completed"));
        }
        self.completion = Some(Completion {
            completed_at: at,
            completed_by: by,
        });
        Ok(())
    }

    pub fn apply_update(&mut self, update: ChoreUpdate) -> DomainResult<()> {
        // Validate before touching anything so a bad update leaves the chore intact.
        let title = update.title.as_deref().map(normalize_title).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(assigned_to) = update.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if update.stop_recurring {
            self.recurrence = None;
        } else if let Some(recurrence) = update.recurrence {
            self.recurrence = Some(recurrence);
        }
        Ok(())
    }

    /// The follow-up instance of a recurring chore, due one interval later.
    pub fn next_occurrence(&self, id: ChoreId, now: DateTime<Utc>) -> Option<Self> {
        let recurrence = self.recurrence?;
        let due_date = recurrence.advance(self.due_date)?;
        Some(Self {
            id,
            household_id: self.household_id,
            title: self.title.clone(),
            description: self.description.clone(),
            assigned_to: self.assigned_to.clone(),
            assigned_by: self.assigned_by.clone(),
            due_date,
            priority: self.priority,
            recurrence: Some(recurrence),
            completion: None,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn m(id: &str) -> MemberId {
        MemberId::parse(id).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 9, 0, 0).unwrap()
    }

    fn chore(recurrence: Option<Recurrence>) -> Chore {
        Chore::new(
            ChoreId::new(),
            HouseholdId::new(),
            m("alice"),
            NewChore {
                title: " Take out trash ".to_string(),
                description: String::new(),
                assigned_to: m("bob"),
                due_date: at(2024, 1, 31),
                priority: Priority::High,
                recurrence,
            },
            at(2024, 1, 1),
        )
        .unwrap()
    }

    #[test]
    fn new_chore_is_pending_with_trimmed_title() {
        let c = chore(None);
        assert_eq!(c.title(), "Take out trash");
        assert!(!c.is_completed());
        assert_eq!(c.assigned_by(), &m("alice"));
    }

    #[test]
    fn completing_twice_is_a_conflict() {
        let mut c = chore(None);
        c.complete(m("bob"), at(2024, 1, 30)).unwrap();
        assert_eq!(c.completion().unwrap().completed_by, m("bob"));

        let err = c.complete(m("bob"), at(2024, 1, 31)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn overdue_only_while_pending() {
        let mut c = chore(None);
        assert!(!c.is_overdue(at(2024, 1, 30)));
        assert!(c.is_overdue(at(2024, 2, 1)));

        c.complete(m("bob"), at(2024, 2, 1)).unwrap();
        assert!(!c.is_overdue(at(2024, 2, 2)));
    }

    #[test]
    fn monthly_recurrence_clamps_to_month_end() {
        let c = chore(Some(Recurrence::Monthly));
        let next = c.next_occurrence(ChoreId::new(), at(2024, 1, 31)).unwrap();
        assert_eq!(next.due_date(), at(2024, 2, 29));
        assert!(!next.is_completed());
        assert_eq!(next.recurrence(), Some(Recurrence::Monthly));
    }

    #[test]
    fn weekly_and_daily_recurrence() {
        assert_eq!(Recurrence::Weekly.advance(at(2024, 1, 1)), Some(at(2024, 1, 8)));
        assert_eq!(Recurrence::Daily.advance(at(2024, 2, 28)), Some(at(2024, 2, 29)));
    }

    #[test]
    fn recurrence_stops_at_the_last_representable_date() {
        let last = DateTime::<Utc>::MAX_UTC;
        for recurrence in [Recurrence::Daily, Recurrence::Weekly, Recurrence::Monthly] {
            assert_eq!(recurrence.advance(last), None, "{recurrence:?}");
        }

        let mut c = chore(Some(Recurrence::Daily));
        c.due_date = last;
        assert!(c.next_occurrence(ChoreId::new(), at(2024, 1, 1)).is_none());
    }

    #[test]
    fn one_off_chore_has_no_next_occurrence() {
        assert!(chore(None).next_occurrence(ChoreId::new(), Utc::now()).is_none());
    }

    #[test]
    fn update_rejects_blank_title_without_side_effects() {
        let mut c = chore(Some(Recurrence::Daily));
        let err = c
            .apply_update(ChoreUpdate {
                title: Some("  ".to_string()),
                priority: Some(Priority::Low),
                ..ChoreUpdate::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(c.priority(), Priority::High);
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let mut c = chore(Some(Recurrence::Daily));
        c.apply_update(ChoreUpdate {
            assigned_to: Some(m("carol")),
            stop_recurring: true,
            ..ChoreUpdate::default()
        })
        .unwrap();

        assert_eq!(c.assigned_to(), &m("carol"));
        assert_eq!(c.recurrence(), None);
        assert_eq!(c.title(), "Take out trash");
    }

    #[test]
    fn new_chore_request_defaults() {
        let new: NewChore = serde_json::from_value(serde_json::json!({
            "title": "Dishes",
            "assignedTo": "bob",
            "dueDate": "2024-03-01T18:00:00Z",
        }))
        .unwrap();
        assert_eq!(new.priority, Priority::Medium);
        assert_eq!(new.recurrence, None);
    }
}
