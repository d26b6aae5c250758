//! Default configuration values
//!
//! Single source of truth for defaults used by the config types, the CLI
//! and the tests.

/// Default listen host
pub const LISTEN_HOST_STR: &str = "0.0.0.0";

/// Default listening port
pub const PORT: u16 = 8080;

/// Default bound on connect plus handshake, in seconds
pub const DIAL_TIMEOUT_SECS: u64 = 5;

/// Default log level as string
pub const LOG_LEVEL_STR: &str = "info";

/// Accepted log levels
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Default listen host
pub fn listen_host() -> String {
    LISTEN_HOST_STR.to_string()
}

/// Default log level
pub fn log_level() -> String {
    LOG_LEVEL_STR.to_string()
}
