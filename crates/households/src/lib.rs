//! Households: membership and invite codes.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod household;
pub mod invite;

pub use household::Household;
pub use invite::InviteCode;
