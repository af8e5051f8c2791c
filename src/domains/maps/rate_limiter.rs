//! Per-endpoint sliding-window rate limiter.
//!
//! Purely in-process: each running server enforces its own budget.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

pub const DEFAULT_WINDOW_MS: u64 = 60_000;
pub const DEFAULT_MAX_REQUESTS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Length of the trailing window in milliseconds.
    pub window_ms: u64,
    /// Admissions allowed per endpoint inside one window.
    pub max_requests: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_ms: DEFAULT_WINDOW_MS,
            max_requests: DEFAULT_MAX_REQUESTS,
        }
    }
}

impl RateLimitConfig {
    /// Replace non-positive limits with the defaults, warning when it does.
    pub fn validated(mut self) -> Self {
        if self.window_ms == 0 {
            warn!(
                fallback = DEFAULT_WINDOW_MS,
                "Invalid rate limit window, using default"
            );
            self.window_ms = DEFAULT_WINDOW_MS;
        }
        if self.max_requests == 0 {
            warn!(
                fallback = DEFAULT_MAX_REQUESTS,
                "Invalid rate limit max requests, using default"
            );
            self.max_requests = DEFAULT_MAX_REQUESTS;
        }
        self
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Sliding-window admission control keyed by endpoint.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let config = config.clone().validated();
        Self {
            window: config.window(),
            max_requests: usize::try_from(config.max_requests).unwrap_or(usize::MAX),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Wait until `endpoint` is under budget, then record the call.
    ///
    /// After every sleep the window is trimmed and checked again, so a call
    /// is never recorded while the endpoint is over budget.
    pub async fn admit(&self, endpoint: &str) {
        loop {
            let wait = {
                let mut windows = self.windows.lock().await;
                let now = Instant::now();
                let stamps = windows.entry(endpoint.to_string()).or_default();

                while let Some(oldest) = stamps.front() {
                    if now.duration_since(*oldest) >= self.window {
                        stamps.pop_front();
                    } else {
                        break;
                    }
                }

                if stamps.len() < self.max_requests {
                    stamps.push_back(now);
                    return;
                }

                match stamps.front() {
                    Some(oldest) => self.window.saturating_sub(now.duration_since(*oldest)),
                    None => Duration::ZERO,
                }
            };

            debug!(
                endpoint = %endpoint,
                wait_ms = wait.as_millis() as u64,
                "Rate limit reached, waiting"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Calls currently recorded for `endpoint`, stale ones included.
    pub async fn recorded(&self, endpoint: &str) -> usize {
        self.windows
            .lock()
            .await
            .get(endpoint)
            .map_or(0, VecDeque::len)
    }
}
