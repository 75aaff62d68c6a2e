pub mod login_guard;
pub mod rate_limit;

pub use login_guard::{LoginGuard, LoginGuardConfig, LoginStatus};
pub use rate_limit::{RateLimitDecision, RateLimiter, Window};

use serde_json::Value;

/// Events worth an operator's attention are logged at `warn`.
const CRITICAL_EVENTS: [&str; 2] = ["login_blocked", "rate_limit_exceeded"];

pub fn log_security_event(event: &str, identifier: &str, data: Value) {
    if CRITICAL_EVENTS.contains(&event) {
        tracing::warn!(target: "security", event, identifier, data = %data, "security event");
    } else {
        tracing::info!(target: "security", event, identifier, data = %data, "security event");
    }
}
