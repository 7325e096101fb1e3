//! Core abstractions for dialect-agnostic console operations.
//!
//! - [`descriptor`]: connection descriptor parsing and dialect selection
//! - [`catalog`]: table and column introspection
//! - [`statement`]: statements, placeholder styles and INSERT templates
//! - [`value`]: query results and acknowledgments
//! - [`traits`]: the `Dialect` strategy and the `QueryExecutor` seam
//!
//! Driver modules (`drivers/sqlite`, `drivers/postgres`, `drivers/mysql`)
//! implement the traits; nothing in here knows which engine is connected.

pub mod catalog;
pub mod descriptor;
pub mod identifier;
pub mod statement;
pub mod traits;
pub mod value;

pub use descriptor::{ConnectionDescriptor, MysqlTarget};
pub use statement::{build_insert, PlaceholderStyle, Statement, StatementTemplate};
pub use traits::{Dialect, DialectKind, QueryExecutor};
pub use value::{Ack, ExecOutcome, QueryResult};
