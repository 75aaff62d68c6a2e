use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::{config::RateLimitConfig, security::log_security_event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Minute,
    Hour,
    Day,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::Minute, Window::Hour, Window::Day];

    pub fn duration(self) -> Duration {
        match self {
            Window::Minute => Duration::minutes(1),
            Window::Hour => Duration::hours(1),
            Window::Day => Duration::days(1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Window::Minute => "requests_per_minute",
            Window::Hour => "requests_per_hour",
            Window::Day => "requests_per_day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: usize,
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
    /// Window that rejected the request.
    pub exhausted: Option<Window>,
}

impl RateLimitDecision {
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        (self.reset_at - now).num_seconds().max(1) as u64
    }
}

/// Sliding-log limiter with per-minute, per-hour and per-day windows.
/// Rejected requests are not counted.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    requests: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            requests: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn limit(&self, window: Window) -> usize {
        match window {
            Window::Minute => self.config.per_minute,
            Window::Hour => self.config.per_hour,
            Window::Day => self.config.per_day,
        }
    }

    pub async fn check(&self, identifier: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let mut lock = self.requests.lock().await;
        let log = lock.entry(identifier.to_string()).or_default();

        let horizon = now - Window::Day.duration();
        while log.front().is_some_and(|at| *at <= horizon) {
            log.pop_front();
        }

        for window in Window::ALL {
            let limit = self.limit(window);
            if recent(log, now, window) >= limit {
                log_security_event(
                    "rate_limit_exceeded",
                    identifier,
                    serde_json::json!({ "period": window.as_str(), "limit": limit }),
                );
                return RateLimitDecision {
                    allowed: false,
                    limit,
                    remaining: 0,
                    reset_at: now + window.duration(),
                    exhausted: Some(window),
                };
            }
        }

        log.push_back(now);
        let limit = self.config.per_minute;
        RateLimitDecision {
            allowed: true,
            limit,
            remaining: limit.saturating_sub(recent(log, now, Window::Minute)),
            reset_at: now + Window::Minute.duration(),
            exhausted: None,
        }
    }

    /// Forgets identifiers with no request inside the day window.
    pub async fn cleanup(&self, now: DateTime<Utc>) -> usize {
        let horizon = now - Window::Day.duration();
        let mut lock = self.requests.lock().await;
        let before = lock.len();
        lock.retain(|_, log| log.back().is_some_and(|at| *at > horizon));
        before - lock.len()
    }
}

fn recent(log: &VecDeque<DateTime<Utc>>, now: DateTime<Utc>, window: Window) -> usize {
    let cutoff = now - window.duration();
    log.len() - log.partition_point(|at| *at <= cutoff)
}
