//! Common module
//!
//! This module contains shared errors and utility functions used throughout the application.

pub mod error;
pub mod fs;
pub mod log;
pub mod net;

// Re-export commonly used types and functions
pub use error::{InspectorError, Result};
pub use fs::{check_file_exists, read_file};
pub use log::init_logger;
pub use net::{parse_loose_authority, parse_url_authority, strip_brackets, UrlAuthority, DEFAULT_TLS_PORT};
