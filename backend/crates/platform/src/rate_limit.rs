//! Fixed-window rate limiting.
//!
//! [`FixedWindowRateLimiter`] keeps one counter per client key in process
//! memory. It is constructed once at startup, shared behind an `Arc`, and
//! cleaned up by a background task started with
//! [`FixedWindowRateLimiter::spawn_sweeper`].
//!
//! The whole read-modify-write of an entry happens under a single lock, so
//! concurrent requests from the same client can never push the counter past
//! the quota.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default sweep period for expired entries.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Quota for one class of requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitConfigError {
    #[error("rate limit must look like \"<max_requests>/<window_secs>\", got {0:?}")]
    Format(String),

    #[error("rate limit quota and window must both be greater than zero")]
    Zero,
}

/// Parses `"<max_requests>/<window_secs>"`, e.g. `"10/60"`.
impl FromStr for RateLimitConfig {
    type Err = RateLimitConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || RateLimitConfigError::Format(s.to_string());
        let (max, window) = s.trim().split_once('/').ok_or_else(format_err)?;
        let max: u32 = max.trim().parse().map_err(|_| format_err())?;
        let window: u64 = window.trim().parse().map_err(|_| format_err())?;
        if max == 0 || window == 0 {
            return Err(RateLimitConfigError::Zero);
        }
        Ok(Self::new(max, window))
    }
}

/// Outcome of one [`FixedWindowRateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Epoch milliseconds at which the current window ends.
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, rounded up.
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let wait_ms = (self.reset_at_ms - now_ms).max(0);
        u64::try_from(wait_ms).unwrap_or(0).div_ceil(1000)
    }
}

#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    reset_at_ms: i64,
}

impl RateLimitEntry {
    fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.reset_at_ms
    }
}

#[derive(Debug, Default)]
pub struct FixedWindowRateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl FixedWindowRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one request for `key` against `config`. Never fails.
    pub fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(key, config, now_ms())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let mut entries = self.lock();
        let limit = config.max_requests;

        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now_ms) => {
                if entry.count >= limit {
                    return RateLimitResult {
                        allowed: false,
                        limit,
                        remaining: 0,
                        reset_at_ms: entry.reset_at_ms,
                    };
                }
                entry.count += 1;
                RateLimitResult {
                    allowed: true,
                    limit,
                    remaining: limit - entry.count,
                    reset_at_ms: entry.reset_at_ms,
                }
            }
            _ => {
                let reset_at_ms = now_ms.saturating_add(config.window_ms());
                if limit == 0 {
                    return RateLimitResult {
                        allowed: false,
                        limit,
                        remaining: 0,
                        reset_at_ms,
                    };
                }
                entries.insert(
                    key.to_owned(),
                    RateLimitEntry {
                        count: 1,
                        reset_at_ms,
                    },
                );
                RateLimitResult {
                    allowed: true,
                    limit,
                    remaining: limit - 1,
                    reset_at_ms,
                }
            }
        }
    }

    /// Drops every entry whose window has ended. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(now_ms())
    }

    pub fn sweep_expired_at(&self, now_ms: i64) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now_ms));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts the periodic cleanup task. The task stops on its own once the
    /// last strong reference to the limiter is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let limiter = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick resolves immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };
                let removed = limiter.sweep_expired();
                if removed > 0 {
                    tracing::debug!(
                        removed,
                        tracked = limiter.len(),
                        "Swept expired rate limit entries"
                    );
                }
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RateLimitEntry>> {
        // A panic while holding the lock leaves the counters consistent
        // (every mutation is a single insert or increment).
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
