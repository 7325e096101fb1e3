//! Common utilities shared across database drivers.
//!
//! - [`tls`]: TLS setup for PostgreSQL connections
//! - [`placeholders`]: `%s` → native bind marker translation

pub mod placeholders;
pub mod tls;

pub use placeholders::{to_numbered, to_qmark};
pub use tls::{SslMode, TlsBuilder};
