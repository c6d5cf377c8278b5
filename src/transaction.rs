//! This file defines the type `Transaction`, the core record of the
//! application: a single dated monetary event referencing one category and
//! one owning user.

use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::{
    Error,
    category::Category,
    database_id::{DatabaseID, UserID},
    money::Amount,
};

/// The maximum number of characters allowed in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and pass the
/// builder to
/// [TransactionStore::create](crate::stores::TransactionStore::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// The ID of the user that owns the transaction.
    pub user_id: UserID,
    /// The category the transaction belongs to. Always owned by the same
    /// user.
    pub category_id: DatabaseID,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// A text description of what the transaction was for. Empty means no
    /// description was given.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// When the record was created, assigned by the store.
    pub created_at: OffsetDateTime,
    /// When the record was last changed, assigned by the store.
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(amount: Amount, user_id: UserID, category_id: DatabaseID) -> TransactionBuilder {
        TransactionBuilder::new(amount, user_id, category_id)
    }
}

/// A transaction joined with the category it belongs to.
///
/// This is the row shape of the statistics snapshot query, see
/// [TransactionStore::get_with_categories](crate::stores::TransactionStore::get_with_categories).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithCategory {
    /// The transaction itself.
    pub transaction: Transaction,
    /// The category the transaction references.
    pub category: Category,
}

/// Check that a transaction date is no later than today and no more than one
/// year in the past.
pub(crate) fn validate_date(date: Date) -> Result<(), Error> {
    let today = OffsetDateTime::now_utc().date();

    if date > today {
        return Err(Error::FutureDate(date));
    }

    if date < one_year_before(today) {
        return Err(Error::DateTooOld(date));
    }

    Ok(())
}

/// Check that a description fits in [MAX_DESCRIPTION_LENGTH] characters.
pub(crate) fn validate_description(description: &str) -> Result<(), Error> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(Error::DescriptionTooLong(MAX_DESCRIPTION_LENGTH));
    }

    Ok(())
}

// Feb 29 anchors clamp to Feb 28 of the previous year.
fn one_year_before(date: Date) -> Date {
    date.replace_year(date.year() - 1)
        .unwrap_or_else(|_| Date::from_calendar_date(date.year() - 1, Month::February, 28).unwrap())
}

/// Builder for creating a new [Transaction].
///
/// The date defaults to today and the description to the empty string.
/// Finalize the builder by passing it to
/// [TransactionStore::create](crate::stores::TransactionStore::create).
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub(crate) amount: Amount,
    pub(crate) user_id: UserID,
    pub(crate) category_id: DatabaseID,
    pub(crate) date: Date,
    pub(crate) description: String,
}

impl TransactionBuilder {
    /// Create a builder for a new transaction.
    pub fn new(amount: Amount, user_id: UserID, category_id: DatabaseID) -> Self {
        Self {
            amount,
            user_id,
            category_id,
            date: OffsetDateTime::now_utc().date(),
            description: String::new(),
        }
    }

    /// Set the date for the transaction.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::FutureDate] if `date` is a date
    /// in the future, or an [Error::DateTooOld] if `date` is more than one
    /// year in the past.
    pub fn date(mut self, date: Date) -> Result<Self, Error> {
        validate_date(date)?;

        self.date = date;
        Ok(self)
    }

    /// Set the description for the transaction.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::DescriptionTooLong] if
    /// `description` is longer than [MAX_DESCRIPTION_LENGTH] characters.
    pub fn description(mut self, description: &str) -> Result<Self, Error> {
        validate_description(description)?;

        self.description = description.to_string();
        Ok(self)
    }
}

/// The fields of a transaction that may be changed by its owner.
///
/// Fields set to `None` are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionUpdate {
    /// The new amount, if it should change.
    pub amount: Option<Amount>,
    /// The new description, if it should change.
    pub description: Option<String>,
    /// The new date, if it should change.
    pub date: Option<Date>,
    /// The new category, if it should change. Must refer to a category owned
    /// by the same user.
    pub category_id: Option<DatabaseID>,
}

#[cfg(test)]
mod transaction_builder_tests {
    use rust_decimal::dec;
    use time::{Duration, OffsetDateTime};

    use crate::{Error, database_id::UserID, money::Amount, transaction::Transaction};

    fn test_amount() -> Amount {
        Amount::new(dec!(123.45)).unwrap()
    }

    #[test]
    fn date_fails_on_future_date() {
        let tomorrow = OffsetDateTime::now_utc()
            .date()
            .checked_add(Duration::days(1))
            .unwrap();

        let result = Transaction::build(test_amount(), UserID::new(1), 1).date(tomorrow);

        assert_eq!(result, Err(Error::FutureDate(tomorrow)));
    }

    #[test]
    fn date_succeeds_on_today() {
        let today = OffsetDateTime::now_utc().date();

        let result = Transaction::build(test_amount(), UserID::new(1), 1).date(today);

        assert!(result.is_ok());
    }

    #[test]
    fn date_fails_on_date_more_than_one_year_ago() {
        let too_old = OffsetDateTime::now_utc()
            .date()
            .checked_sub(Duration::days(366 + 31))
            .unwrap();

        let result = Transaction::build(test_amount(), UserID::new(1), 1).date(too_old);

        assert_eq!(result, Err(Error::DateTooOld(too_old)));
    }

    #[test]
    fn date_succeeds_on_recent_past_date() {
        let last_week = OffsetDateTime::now_utc()
            .date()
            .checked_sub(Duration::days(7))
            .unwrap();

        let result = Transaction::build(test_amount(), UserID::new(1), 1).date(last_week);

        assert!(result.is_ok());
        assert_eq!(result.unwrap().date, last_week);
    }

    #[test]
    fn description_fails_when_too_long() {
        let long_description = "a".repeat(256);

        let result =
            Transaction::build(test_amount(), UserID::new(1), 1).description(&long_description);

        assert_eq!(result, Err(Error::DescriptionTooLong(255)));
    }

    #[test]
    fn description_accepts_maximum_length() {
        let description = "字".repeat(255);

        let result =
            Transaction::build(test_amount(), UserID::new(1), 1).description(&description);

        assert!(result.is_ok());
    }
}
