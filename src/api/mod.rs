//! HTTP API
//!
//! * `GET /check-ssl?ip=&url=` - JSON chain inspection
//! * `GET /?url=&debug=` - plain text expiry of the leaf certificate
//! * `GET /health` - liveness

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse, TextError};
pub use server::{build_router, serve, start_server};
