//! Brute-force protection for a credential endpoint that lives outside this
//! crate; callers record each attempt and check before verifying.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::security::log_security_event;

const HISTORY: i64 = 24;
const MAX_RECORDED: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGuardConfig {
    pub max_attempts: usize,
    pub window: Duration,
    pub block_duration: Duration,
}

impl Default for LoginGuardConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::minutes(15),
            block_duration: Duration::hours(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStatus {
    Allowed {
        failed_attempts: usize,
        remaining_attempts: usize,
    },
    Blocked {
        failed_attempts: usize,
        unblock_at: DateTime<Utc>,
    },
}

impl LoginStatus {
    pub fn is_blocked(&self) -> bool {
        matches!(self, LoginStatus::Blocked { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct Attempt {
    at: DateTime<Utc>,
    success: bool,
}

/// Brute-force protection for credential checks, keyed by identifier
/// (address, e-mail) and attempt kind.
#[derive(Debug, Default)]
pub struct LoginGuard {
    config: LoginGuardConfig,
    attempts: Mutex<HashMap<(String, String), VecDeque<Attempt>>>,
}

impl LoginGuard {
    pub fn new(config: LoginGuardConfig) -> Self {
        Self {
            config,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    pub async fn record_attempt(&self, identifier: &str, kind: &str, success: bool, now: DateTime<Utc>) {
        let mut lock = self.attempts.lock().await;
        let history = lock
            .entry((identifier.to_string(), kind.to_string()))
            .or_default();

        let horizon = now - Duration::hours(HISTORY);
        history.retain(|attempt| attempt.at > horizon);
        history.push_back(Attempt { at: now, success });
        while history.len() > MAX_RECORDED {
            history.pop_front();
        }
        drop(lock);

        log_security_event(
            "login_attempt",
            identifier,
            serde_json::json!({ "success": success, "type": kind }),
        );
    }

    /// Blocked once `max_attempts` failures landed within `window` of the
    /// latest failure, until `block_duration` after that failure.
    ///
    /// The burst is measured from the latest failure, not from `now`, so a
    /// block holds for the whole `block_duration` rather than lifting as soon
    /// as the failures age out of `window`.
    pub async fn check(&self, identifier: &str, kind: &str, now: DateTime<Utc>) -> LoginStatus {
        let lock = self.attempts.lock().await;
        let Some(history) = lock.get(&(identifier.to_string(), kind.to_string())) else {
            return LoginStatus::Allowed {
                failed_attempts: 0,
                remaining_attempts: self.config.max_attempts,
            };
        };

        let failures: Vec<DateTime<Utc>> = history
            .iter()
            .filter(|attempt| !attempt.success)
            .map(|attempt| attempt.at)
            .collect();

        if let Some(last_failure) = failures.iter().max().copied() {
            let burst = failures
                .iter()
                .filter(|at| last_failure - **at < self.config.window)
                .count();
            let unblock_at = last_failure + self.config.block_duration;
            if burst >= self.config.max_attempts && now < unblock_at {
                drop(lock);
                log_security_event(
                    "login_blocked",
                    identifier,
                    serde_json::json!({ "type": kind, "attempts": burst, "unblock_at": unblock_at }),
                );
                return LoginStatus::Blocked {
                    failed_attempts: burst,
                    unblock_at,
                };
            }
        }

        let recent = failures
            .iter()
            .filter(|at| now - **at < self.config.window)
            .count();
        LoginStatus::Allowed {
            failed_attempts: recent,
            remaining_attempts: self.config.max_attempts.saturating_sub(recent),
        }
    }
}
