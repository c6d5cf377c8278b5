//! Moneybook is the core library of a personal finance tracker: it records
//! income and expense transactions, organizes them into user-defined
//! categories, and computes aggregate statistics.
//!
//! The library has no HTTP surface of its own; it is consumed by a web layer
//! through three entry points:
//!
//! - [classify]: guesses whether a category name denotes income or an
//!   expense, with a confidence score and a recommended display color.
//! - [stats]: income/expense/balance summaries, per-category breakdowns and
//!   time series, all derived from one consistent snapshot.
//! - [stores]: storage ports for categories and transactions with a SQLite
//!   implementation that enforces ownership scoping, the uniqueness of
//!   `(owner, name, type)` and the rule that a category with transactions
//!   attached cannot be deleted.

#![warn(missing_docs)]

mod category;
mod database_id;
mod db;
mod error;
mod money;
mod pagination;
mod transaction;

pub mod classify;
pub mod stats;
pub mod stores;

pub use category::{
    Category, CategoryColor, CategoryName, CategoryType, CategoryUpdate, CategoryWithUsage,
};
pub use database_id::{DatabaseID, UserID};
pub use db::initialize;
pub use error::Error;
pub use money::{Amount, MAX_AMOUNT};
pub use pagination::{PageInfo, PageQuery, PaginationConfig};
pub use transaction::{
    MAX_DESCRIPTION_LENGTH, Transaction, TransactionBuilder, TransactionUpdate,
    TransactionWithCategory,
};
