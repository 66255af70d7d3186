//! Row-level log redaction.
//!
//! Voter rows carry names, addresses and birth dates. They only reach the
//! log when the operator opts in.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

pub fn set_log_data_enabled(enabled: bool) {
    LOG_DATA_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when row logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_until_enabled() {
        set_log_data_enabled(false);
        assert_eq!(redact_value("DOE|JOHN"), REDACTED_VALUE);
        set_log_data_enabled(true);
        assert!(log_data_enabled());
        assert_eq!(redact_value("DOE|JOHN"), "DOE|JOHN");
        set_log_data_enabled(false);
    }
}
