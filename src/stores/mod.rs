//! Contains traits and implementations for objects that store the domain
//! types.
//!
//! The traits are the storage ports of the library; the statistics functions
//! take them as explicit dependencies rather than reaching for a global
//! connection. [sqlite] implements them over a SQLite database.

mod category;
mod transaction;

pub mod sqlite;

pub use category::CategoryStore;
pub use transaction::{SortOrder, TransactionQuery, TransactionStore};
