//! Defines the transaction store trait.

use time::Date;

use crate::{
    Error,
    database_id::{DatabaseID, UserID},
    pagination::PageQuery,
    transaction::{Transaction, TransactionBuilder, TransactionUpdate, TransactionWithCategory},
};

/// Handles the creation and retrieval of transactions.
///
/// Every operation is scoped to the owning user: rows owned by other users
/// behave as if they did not exist.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// The category named by the builder must belong to the same user. The
    /// check and the insert happen atomically so a concurrent category
    /// delete cannot leave an orphaned reference.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCategory] if the category
    /// does not exist or belongs to another user.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::NotFound] if the transaction
    /// does not exist or belongs to another user.
    fn get(&self, id: DatabaseID, user_id: UserID) -> Result<Transaction, Error>;

    /// Retrieve the user's transactions in the way defined by `query`.
    fn get_query(
        &self,
        user_id: UserID,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the user's transactions within the date window, joined with
    /// their categories, in one query.
    ///
    /// This is the snapshot the statistics functions aggregate over; using a
    /// single query keeps the derived results mutually consistent.
    fn get_with_categories(
        &self,
        user_id: UserID,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<Vec<TransactionWithCategory>, Error>;

    /// Change a subset of a transaction's fields.
    ///
    /// When the update moves the transaction to another category, that
    /// category must belong to the same user.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::UpdateMissingTransaction] if the
    /// transaction does not exist or belongs to another user.
    fn update(
        &mut self,
        id: DatabaseID,
        user_id: UserID,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error>;

    /// Delete a transaction.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::DeleteMissingTransaction] if the
    /// transaction does not exist or belongs to another user.
    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error>;

    /// Count the user's transactions within the date window.
    fn count(
        &self,
        user_id: UserID,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<u64, Error>;
}

/// Defines how transactions should be fetched from
/// [TransactionStore::get_query].
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionQuery {
    /// Include transactions on or after this date.
    pub start_date: Option<Date>,
    /// Include transactions on or before this date.
    pub end_date: Option<Date>,
    /// Orders transactions by date in the order `sort_date`. None returns
    /// transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
    /// Selects one page of transactions. None returns all of them.
    pub page: Option<PageQuery>,
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}
