//! Defines the crate level error type and conversions from SQL errors.

use time::Date;

/// The errors that may occur in the library.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A string other than "income" or "expense" was used to create a
    /// category type.
    #[error("\"{0}\" is not a valid category type, expected \"income\" or \"expense\"")]
    InvalidCategoryType(String),

    /// A string that is not a hex color of the form `#rrggbb` was used to
    /// create a category color.
    #[error("\"{0}\" is not a valid hex color, expected the form #rrggbb")]
    InvalidColor(String),

    /// An amount outside the accepted range, or with more than two decimal
    /// places, was used to create a transaction.
    #[error(
        "{0} is not a valid amount, amounts must be greater than 0.00 and \
        less than 10,000,000.00 with at most two decimal places"
    )]
    InvalidAmount(String),

    /// A description longer than the accepted length was used to create or
    /// update a transaction.
    #[error("descriptions must be at most {0} characters")]
    DescriptionTooLong(usize),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore
    /// future dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A date more than one year in the past was used to create a
    /// transaction.
    #[error("{0} is more than one year in the past, which is not allowed")]
    DateTooOld(Date),

    /// A statistics query was given an end date earlier than its start date.
    #[error("invalid date range: the end date {end} is before the start date {start}")]
    EndBeforeStart {
        /// The start of the rejected range.
        start: Date,
        /// The end of the rejected range.
        end: Date,
    },

    /// A statistics query was given a date range spanning more than two
    /// years.
    #[error("invalid date range: {start} to {end} spans more than two years")]
    DateRangeTooWide {
        /// The start of the rejected range.
        start: Date,
        /// The end of the rejected range.
        end: Date,
    },

    /// The category ID used to create or update a transaction did not refer
    /// to a category owned by the acting user.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// A category with the same name and type already exists for this user.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// Tried to delete a category that still has transactions attached.
    #[error("cannot delete the category, {transaction_count} transaction(s) are attached to it")]
    CategoryInUse {
        /// How many transactions reference the category.
        transaction_count: u64,
    },

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows. Rows
    /// owned by another user are also reported as not found so that nothing
    /// is leaked about other users' data.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidCategory
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
