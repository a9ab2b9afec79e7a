//! Application Configuration

use std::time::Duration;

pub use platform::rate_limit::RateLimitConfig;

#[derive(Debug, Clone)]
pub struct LearnPathConfig {
    /// Quota for new path generation, per client.
    pub generate_rate_limit: RateLimitConfig,
    /// Quota for refinement, per client. Stricter than generation.
    pub refine_rate_limit: RateLimitConfig,
    /// Upper bound for one content-source call.
    pub generation_timeout: Duration,
    /// Upper bound for one repository call.
    pub store_timeout: Duration,
}

impl Default for LearnPathConfig {
    fn default() -> Self {
        Self {
            generate_rate_limit: RateLimitConfig::new(10, 60),
            refine_rate_limit: RateLimitConfig::new(5, 60),
            generation_timeout: Duration::from_secs(90),
            store_timeout: Duration::from_secs(10),
        }
    }
}
