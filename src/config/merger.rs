//! Configuration merging
//!
//! Sources are layered lowest priority first: defaults, then the config
//! file, then command line and environment.

use crate::config::ConfigValues;

impl ConfigValues {
    /// Merge `other` over `self`
    ///
    /// Values set in `other` win; unset values fall back to `self`.
    pub fn merge(self, other: ConfigValues) -> ConfigValues {
        ConfigValues {
            listen_host: other.listen_host.or(self.listen_host),
            port: other.port.or(self.port),
            dial_timeout_secs: other.dial_timeout_secs.or(self.dial_timeout_secs),
            log_level: other.log_level.or(self.log_level),
            use_system_roots: other.use_system_roots.or(self.use_system_roots),
            extra_ca_files: other.extra_ca_files.or(self.extra_ca_files),
        }
    }
}
