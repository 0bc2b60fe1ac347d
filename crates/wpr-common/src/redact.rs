//! Row-level value redaction for log output.
//!
//! Collaborator names and demand text are personal data. Library crates log
//! them only through [`redact_value`]; the binary flips the switch when the
//! user passes `--log-data`.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Enables or disables logging of row-level values.
pub fn set_log_data(enabled: bool) {
    LOG_DATA_ENABLED.store(enabled, Ordering::Release);
}

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when row-level logging is enabled, otherwise a
/// redacted token.
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
    fn redacts_by_default() {
        assert_eq!(redact_value("ANA"), REDACTED_VALUE);
    }
}
