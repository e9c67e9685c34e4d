//! Organizer identification.
//!
//! Management endpoints are guarded by a shared key sent in
//! `x-ovation-admin-key`. Everything else is public.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use subtle::ConstantTimeEq;

use crate::error::EventsServiceError;

pub const ADMIN_KEY_HEADER: &str = "x-ovation-admin-key";

/// Configured admin key, shared through router state.
#[derive(Clone)]
pub struct AdminKey(pub Arc<str>);

impl AdminKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Constant-time in the key contents.
    fn matches(&self, presented: &str) -> bool {
        !self.0.is_empty() && bool::from(self.0.as_bytes().ct_eq(presented.as_bytes()))
    }
}

/// Who is calling. Never rejects; handlers decide what the caller may do.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub is_admin: bool,
}

impl Viewer {
    pub fn require_admin(self) -> Result<(), EventsServiceError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(EventsServiceError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    AdminKey: FromRef<S>,
{
    type Rejection = Infallible;

    // Resolve synchronously and return a 'static future (see axum-core's
    // `fn -> impl Future + Send` signature).
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let key = AdminKey::from_ref(state);
        let is_admin = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|presented| key.matches(presented));
        async move { Ok(Self { is_admin }) }
    }
}
