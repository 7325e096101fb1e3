//! SQLite database driver.
//!
//! - [`SqliteDialect`]: catalog queries via `sqlite_master` and `PRAGMA table_info`
//! - [`SqliteExecutor`]: single `sqlx` connection to a local file
//!
//! Selected for every descriptor that is neither `postgresql://` nor
//! `mysql://`, including the empty string.

mod dialect;
mod executor;

pub use dialect::SqliteDialect;
pub use executor::SqliteExecutor;
