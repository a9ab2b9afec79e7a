//! Auth Session Entity
//!
//! Server-side session referenced by the signed token in the session cookie.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{AuthSessionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub session_id: AuthSessionId,
    pub user_id: UserId,
    /// Unix timestamp, milliseconds.
    pub expires_at_ms: i64,
    pub remember_me: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// TTL comes from configuration, see `AuthConfig::session_ttl`.
    pub fn new(user_id: UserId, remember_me: bool, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: AuthSessionId::new(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            remember_me,
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    pub fn remaining_ms(&self) -> i64 {
        (self.expires_at_ms - Utc::now().timestamp_millis()).max(0)
    }

    /// Slides a remember-me session forward to `now + ttl_long` once less
    /// than half of `ttl_long` remains. Returns whether it moved.
    pub fn extend_if_needed(&mut self, ttl_long: Duration) -> bool {
        if !self.remember_me {
            return false;
        }

        let now = Utc::now();
        if self.expires_at_ms < (now + ttl_long / 2).timestamp_millis() {
            self.expires_at_ms = (now + ttl_long).timestamp_millis();
            return true;
        }
        false
    }
}
