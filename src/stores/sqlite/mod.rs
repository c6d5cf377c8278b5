//! SQLite backed implementations of the store traits.

mod category;
mod transaction;

pub use category::SQLiteCategoryStore;
pub use transaction::SQLiteTransactionStore;
