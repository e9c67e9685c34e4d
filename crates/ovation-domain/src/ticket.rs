//! Recipient ticket tiers and redemption token format.
//!
//! Tokens look like `VIP-7KQ2ZD` or `GST-A1B2C3`: a tier prefix chosen from the
//! recipient's follower count, a hyphen, and six upper-case alphanumerics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Follower count at or above which a recipient is issued a VIP ticket.
pub const VIP_FOLLOWER_THRESHOLD: i64 = 1_000_000;

/// Length of the random part of a token.
pub const TOKEN_SUFFIX_LEN: usize = 6;

/// Alphabet of the random part of a token.
pub const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketTier {
    Vip,
    Guest,
}

impl TicketTier {
    pub fn classify(follower_count: i64) -> Self {
        if follower_count >= VIP_FOLLOWER_THRESHOLD {
            Self::Vip
        } else {
            Self::Guest
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Vip => "VIP",
            Self::Guest => "GST",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "VIP" => Some(Self::Vip),
            "GST" => Some(Self::Guest),
            _ => None,
        }
    }
}

/// A well-formed redemption token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipientToken {
    tier: TicketTier,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("token must look like VIP-XXXXXX or GST-XXXXXX")]
pub struct InvalidToken;

impl RecipientToken {
    /// Assemble a token from a tier and a random suffix.
    ///
    /// The suffix is upper-cased; it must be [`TOKEN_SUFFIX_LEN`] characters
    /// from [`TOKEN_CHARSET`].
    pub fn new(tier: TicketTier, suffix: &str) -> Result<Self, InvalidToken> {
        let suffix = suffix.to_ascii_uppercase();
        if suffix.len() != TOKEN_SUFFIX_LEN || !suffix.bytes().all(|b| TOKEN_CHARSET.contains(&b)) {
            return Err(InvalidToken);
        }
        Ok(Self {
            tier,
            value: format!("{}-{}", tier.prefix(), suffix),
        })
    }

    /// Parse user input (e.g. a scanned or typed token). Case-insensitive, trims whitespace.
    pub fn parse(raw: &str) -> Result<Self, InvalidToken> {
        let upper = raw.trim().to_ascii_uppercase();
        let (prefix, suffix) = upper.split_once('-').ok_or(InvalidToken)?;
        let tier = TicketTier::from_prefix(prefix).ok_or(InvalidToken)?;
        Self::new(tier, suffix)
    }

    pub fn tier(&self) -> TicketTier {
        self.tier
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl fmt::Display for RecipientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
