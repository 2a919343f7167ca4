use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    #[default]
    Exponential,
    Fixed,
}

/// Bounded retry schedule for one request-send operation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    #[validate(range(min = 1, max = 10))]
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    #[serde(default)]
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            backoff: Backoff::Exponential,
        }
    }
}

impl RetryPolicy {
    /// Policy that never sleeps; handy for tests and offline runs
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_ms: 0,
            backoff: Backoff::Fixed,
        }
    }

    /// Wait before the next attempt after `attempt` (0-based) failed.
    /// `None` once the attempt budget is spent.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        let base = Duration::from_millis(self.base_delay_ms);
        let delay = match self.backoff {
            Backoff::Fixed => base,
            Backoff::Exponential => base.saturating_mul(2u32.saturating_pow(attempt)),
        };
        Some(delay)
    }
}
