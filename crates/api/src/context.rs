use homeshare_core::MemberId;

/// The member acting on a request.
///
/// Inserted by [`crate::middleware::member_middleware`]; present on every household route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberContext {
    member_id: MemberId,
}

impl MemberContext {
    pub fn new(member_id: MemberId) -> Self {
        Self { member_id }
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }
}
