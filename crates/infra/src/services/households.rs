use chrono::Utc;
use tracing::instrument;

use homeshare_core::{HouseholdId, MemberId};
use homeshare_households::{Household, InviteCode};

use super::{household_for_member, household_missing, ServiceError, Stores};
use crate::store::StoreError;

/// Invite codes are random; a clash with an existing household is retried this often.
const INVITE_CODE_ATTEMPTS: usize = 8;

#[derive(Debug, Clone)]
pub struct HouseholdService {
    stores: Stores,
}

impl HouseholdService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, creator: MemberId) -> Result<Household, ServiceError> {
        let now = Utc::now();
        let mut last_err = None;

        for attempt in 1..=INVITE_CODE_ATTEMPTS {
            let code = InviteCode::generate(&mut rand::thread_rng());
            let household = Household::create(HouseholdId::new(), name, creator.clone(), code, now)?;

            match self.stores.households.insert(household.clone()).await {
                Ok(()) => {
                    tracing::info!(household_id = %household.id_typed(), "household created");
                    return Ok(household);
                }
                Err(StoreError::Conflict(reason)) => {
                    tracing::debug!(attempt, %reason, "invite code clash; retrying");
                    last_err = Some(StoreError::Conflict(reason));
                }
                Err(other) => return Err(other.into()),
            }
        }

        tracing::warn!("could not allocate a unique invite code");
        Err(last_err
            .unwrap_or_else(|| StoreError::Conflict("invite code exhausted".to_string()))
            .into())
    }

    #[instrument(skip(self))]
    pub async fn join(&self, invite_code: &str, member: MemberId) -> Result<Household, ServiceError> {
        let code = InviteCode::parse(invite_code).map_err(|_| ServiceError::InvalidInviteCode)?;

        let found = self
            .stores
            .households
            .find_by_invite_code(&code)
            .await?
            .ok_or(ServiceError::InvalidInviteCode)?;
        found.ensure_not_member(&member)?;

        let household = self
            .stores
            .households
            .add_member(found.id_typed(), member)
            .await
            .map_err(household_missing(found.id_typed()))?;

        tracing::info!(household_id = %household.id_typed(), "member joined household");
        Ok(household)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, household_id: HouseholdId, member: &MemberId) -> Result<Household, ServiceError> {
        household_for_member(&self.stores, household_id, member).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeshare_core::DomainError;

    fn m(id: &str) -> MemberId {
        MemberId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn create_then_join_by_code() {
        let service = HouseholdService::new(Stores::in_memory());
        let created = service.create("Maple Street", m("alice")).await.unwrap();
        assert_eq!(created.member_ids(), &[m("alice")]);

        let code = created.invite_code().as_str().to_lowercase();
        let joined = service.join(&code, m("bob")).await.unwrap();
        assert_eq!(joined.member_ids(), &[m("alice"), m("bob")]);

        let seen_by_bob = service.get(created.id_typed(), &m("bob")).await.unwrap();
        assert_eq!(seen_by_bob.member_ids().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_joins_keep_every_member() {
        let service = HouseholdService::new(Stores::in_memory());
        let created = service.create("Flat", m("alice")).await.unwrap();
        let code = created.invite_code().as_str().to_string();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                let code = code.clone();
                tokio::spawn(async move { service.join(&code, m(&format!("member-{i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let household = service.get(created.id_typed(), &m("alice")).await.unwrap();
        assert_eq!(household.member_ids().len(), 17);
    }

    #[tokio::test]
    async fn joining_twice_is_a_conflict() {
        let service = HouseholdService::new(Stores::in_memory());
        let created = service.create("Flat", m("alice")).await.unwrap();

        let err = service
            .join(created.invite_code().as_str(), m("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn unknown_or_malformed_codes_are_invalid() {
        let service = HouseholdService::new(Stores::in_memory());
        service.create("Flat", m("alice")).await.unwrap();

        for code in ["??", "NOPE00"] {
            let err = service.join(code, m("bob")).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInviteCode), "{code}: {err:?}");
        }
    }

    #[tokio::test]
    async fn outsiders_cannot_read_a_household() {
        let service = HouseholdService::new(Stores::in_memory());
        let created = service.create("Flat", m("alice")).await.unwrap();

        let err = service.get(created.id_typed(), &m("mallory")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Unauthorized)));

        let err = service.get(HouseholdId::new(), &m("alice")).await.unwrap_err();
        assert!(matches!(err, ServiceError::HouseholdNotFound(_)));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = HouseholdService::new(Stores::in_memory());
        let err = service.create("   ", m("alice")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Validation(_))));
    }
}
