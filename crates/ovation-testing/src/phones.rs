//! Phone fixtures.

/// The voter used throughout the end-to-end scenarios.
pub const VOTER_PHONE: &str = "9999999999";

/// Configured admin phone in test state.
pub const ADMIN_PHONE: &str = "1234567890";

/// `count` distinct, valid phone numbers.
pub fn distinct_phones(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("70000{i:05}")).collect()
}
