use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use homeshare_core::{DomainError, DomainResult, Entity, HouseholdId, MemberId};

use crate::invite::InviteCode;

/// A group of members sharing chores and expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    id: HouseholdId,
    name: String,
    invite_code: InviteCode,
    /// Join order; the creator is always first.
    member_ids: Vec<MemberId>,
    created_at: DateTime<Utc>,
    created_by: MemberId,
}

impl Entity for Household {
    type Id = HouseholdId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Household {
    /// New household with `creator` as its only member.
    pub fn create(
        id: HouseholdId,
        name: &str,
        creator: MemberId,
        invite_code: InviteCode,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("household name must not be empty"));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            invite_code,
            member_ids: vec![creator.clone()],
            created_at: now,
            created_by: creator,
        })
    }

    pub fn id_typed(&self) -> HouseholdId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    pub fn member_ids(&self) -> &[MemberId] {
        &self.member_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn created_by(&self) -> &MemberId {
        &self.created_by
    }

    pub fn is_member(&self, member: &MemberId) -> bool {
        self.member_ids.contains(member)
    }

    /// Add `member`; joining twice is a conflict.
    pub fn join(&mut self, member: MemberId) -> DomainResult<()> {
        self.ensure_not_member(&member)?;
        self.member_ids.push(member);
        Ok(())
    }

    /// Fail with `Conflict` if `member` already belongs to the household.
    pub fn ensure_not_member(&self, member: &MemberId) -> DomainResult<()> {
        if self.is_member(member) {
            return Err(DomainError::conflict(
                "already a member of this household",
            ));
        }
        Ok(())
    }

    /// Fail with `Unauthorized` unless `member` belongs to the household.
    pub fn ensure_member(&self, member: &MemberId) -> DomainResult<()> {
        if self.is_member(member) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}
