//! SQLite storage for event templates and practice history.
//!
//! `Database` owns the connection; services borrow it through
//! [`Database::connection`].

mod columns;
mod connection;
pub mod migrations;
mod schema;

pub(crate) use columns::utc_from_column;
pub use connection::Database;
