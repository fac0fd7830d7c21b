use core::fmt;
use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use homeshare_core::{DomainError, ValueObject};

/// Length of every invite code.
pub const INVITE_CODE_LEN: usize = 6;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Short code a member shares so others can join their household.
///
/// Codes are case-insensitive on input and always stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl ValueObject for InviteCode {}

impl InviteCode {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let code = (0..INVITE_CODE_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let code = input.trim().to_ascii_uppercase();

        if code.len() != INVITE_CODE_LEN {
            return Err(DomainError::validation(format!(
                "invite code must be {INVITE_CODE_LEN} characters"
            )));
        }
        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(DomainError::validation(
                "invite code may only contain letters and digits",
            ));
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InviteCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InviteCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<InviteCode> for String {
    fn from(value: InviteCode) -> Self {
        value.0
    }
}
