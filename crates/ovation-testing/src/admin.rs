//! Admin header helpers for router-level tests.
//!
//! Management endpoints require `x-ovation-admin-key` to match the configured
//! `ADMIN_KEY`. `MockAdmin` produces that header (or a wrong one) so tests do
//! not hand-assemble header maps.

use axum::http::{HeaderName, HeaderValue};

pub const ADMIN_KEY_HEADER: &str = "x-ovation-admin-key";

/// Key shared by test state builders and `MockAdmin::valid()`.
pub const TEST_ADMIN_KEY: &str = "test-admin-key";

pub struct MockAdmin {
    pub key: String,
}

impl MockAdmin {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn valid() -> Self {
        Self::new(TEST_ADMIN_KEY)
    }

    pub fn header_name() -> HeaderName {
        HeaderName::from_static(ADMIN_KEY_HEADER)
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.key).expect("admin key must be a valid header value")
    }
}
