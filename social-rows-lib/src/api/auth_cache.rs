use chrono::{DateTime, Utc};
use core::time::Duration;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};

/// Token validation outcome reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AuthStatus {
    pub valid: bool,
    pub error: Option<String>,
    pub email: Option<String>,
    pub plan_type: Option<String>,
}

impl AuthStatus {
    #[must_use]
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Short-lived memory of the last token validation
#[derive(Debug)]
pub struct AuthCache {
    ttl: Duration,
    entry: Mutex<Option<(AuthStatus, DateTime<Utc>)>>,
}

impl AuthCache {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, entry: Mutex::new(None) }
    }

    /// The cached status, if it was stored less than the TTL before `now`
    #[must_use]
    pub fn get(&self, now: DateTime<Utc>) -> Option<AuthStatus> {
        let entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        let (status, stored_at) = entry.as_ref()?;

        let age = now.signed_duration_since(*stored_at).to_std().ok()?;
        (age < self.ttl).then(|| status.clone())
    }

    pub fn put(&self, status: AuthStatus, now: DateTime<Utc>) {
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = Some((status, now));
    }

    pub fn clear(&self) {
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
