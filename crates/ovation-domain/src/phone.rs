//! Phone number normalization.
//!
//! Voters and OTP requests are keyed by phone. Every representation a user may
//! type ("+91 99999-99999", "(999) 999 9999") collapses to the trailing ten
//! digits so that uniqueness checks compare like with like.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of trailing digits kept after normalization.
pub const PHONE_DIGITS: usize = 10;

/// A normalized ten-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("phone number must contain at least 10 digits")]
pub struct InvalidPhone;

impl PhoneNumber {
    /// Strip every non-digit and keep the trailing ten digits.
    pub fn parse(raw: &str) -> Result<Self, InvalidPhone> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < PHONE_DIGITS {
            return Err(InvalidPhone);
        }
        Ok(Self(digits[digits.len() - PHONE_DIGITS..].to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = InvalidPhone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = InvalidPhone;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}
