//! Minimum-interval limiter for outbound LLM calls.
//!
//! Owned by `LlmClient` behind an `Arc`, so every clone of the client shares the same
//! "time of last call". The lock is held across the wait, which makes waiting callers
//! dispatch in FIFO order (`tokio::sync::Mutex` is fair). Limits are in-process only.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until at least `min_interval` has passed since the previous dispatch,
    /// then records "now" as the new dispatch time. Returns how long the caller was held.
    pub async fn acquire(&self) -> Duration {
        let mut last_call = self.last_call.lock().await;

        let mut waited = Duration::ZERO;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                waited = self.min_interval - elapsed;
                debug!("Rate limiting LLM call: waiting {}ms", waited.as_millis());
                sleep(waited).await;
            }
        }

        *last_call = Some(Instant::now());
        waited
    }
}
