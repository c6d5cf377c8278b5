//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::{DatabaseID, UserID},
    db::{CreateTable, MapRow},
    money::Amount,
    stores::{
        TransactionStore,
        sqlite::SQLiteCategoryStore,
        transaction::{SortOrder, TransactionQuery},
    },
    transaction::{
        Transaction, TransactionBuilder, TransactionUpdate, TransactionWithCategory,
        validate_date, validate_description,
    },
};

/// Stores transactions in a SQLite database.
///
/// Transactions reference the category tables, so the category schema must be
/// set up in the database, see [initialize](crate::initialize).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

const TRANSACTION_COLUMNS: &str =
    "id, user_id, category_id, amount, description, date, created_at, updated_at";

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn verify_category_ownership(
        connection: &Connection,
        category_id: DatabaseID,
        user_id: UserID,
    ) -> Result<(), Error> {
        let owner_id: i64 = connection
            .prepare("SELECT user_id FROM category WHERE id = ?1")?
            .query_row([category_id], |row| row.get(0))
            .map_err(|error| match error {
                // A 'not found' error does not make sense on a write, so we
                // instead indicate that the category id is invalid.
                rusqlite::Error::QueryReturnedNoRows => Error::InvalidCategory,
                error => error.into(),
            })?;

        if owner_id != user_id.as_i64() {
            // The caller should not be able to tell that the category exists
            // and belongs to another user, so this is the same error as for a
            // nonexistent category.
            return Err(Error::InvalidCategory);
        }

        Ok(())
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// The ownership check on the referenced category and the insert happen
    /// under one connection lock, with the foreign key constraint as the
    /// storage level backstop.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCategory] if the category
    /// does not exist or belongs to another user, or an [Error::SqlError] if
    /// there is some other SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        Self::verify_category_ownership(&connection, builder.category_id, builder.user_id)?;

        let now = OffsetDateTime::now_utc();

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\"
                     (user_id, category_id, amount, description, date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING id, user_id, category_id, amount, description, date, created_at, updated_at",
            )?
            .query_row(
                (
                    builder.user_id.as_i64(),
                    builder.category_id,
                    builder.amount.to_string(),
                    &builder.description,
                    builder.date,
                    now,
                    now,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::NotFound] if the transaction
    /// does not exist or belongs to another user, or an [Error::SqlError] if
    /// there is some other SQL error.
    fn get(&self, id: DatabaseID, user_id: UserID) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
                 WHERE id = :id AND user_id = :user_id"
            ))?
            .query_row(
                &[(":id", &id), (":user_id", &user_id.as_i64())],
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Query for the user's transactions in the database.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_query(
        &self,
        user_id: UserID,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts =
            vec![format!("SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"")];
        let mut where_clause_parts = vec!["user_id = ?1".to_string()];
        let mut query_parameters = vec![Value::Integer(user_id.as_i64())];

        if let Some(start_date) = query.start_date {
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(start_date.to_string()));
        }

        if let Some(end_date) = query.end_date {
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(end_date.to_string()));
        }

        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));

        // Sort by date, and then ID to keep transaction order stable after
        // updates.
        match query.sort_date {
            Some(SortOrder::Ascending) => {
                query_string_parts.push("ORDER BY date ASC, id ASC".to_string())
            }
            Some(SortOrder::Descending) => {
                query_string_parts.push("ORDER BY date DESC, id ASC".to_string())
            }
            None => {}
        }

        if let Some(page) = query.page {
            query_string_parts.push(format!("LIMIT {} OFFSET {}", page.page_size, page.offset()));
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Retrieve the user's transactions in the date window joined with their
    /// categories, in one query.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_with_categories(
        &self,
        user_id: UserID,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<Vec<TransactionWithCategory>, Error> {
        let mut query_string_parts = vec![
            "SELECT \"transaction\".id, \"transaction\".user_id, \"transaction\".category_id, \
             amount, description, date, created_at, updated_at, \
             category.id, category.user_id, category.name, category.category_type, category.color \
             FROM \"transaction\" \
             INNER JOIN category ON \"transaction\".category_id = category.id"
                .to_string(),
        ];
        let mut where_clause_parts = vec!["\"transaction\".user_id = ?1".to_string()];
        let mut query_parameters = vec![Value::Integer(user_id.as_i64())];

        if let Some(start_date) = start_date {
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(start_date.to_string()));
        }

        if let Some(end_date) = end_date {
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(end_date.to_string()));
        }

        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        query_string_parts.push("ORDER BY date ASC, \"transaction\".id ASC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, |row| {
                let transaction = Self::map_row(row)?;
                let category = SQLiteCategoryStore::map_row_with_offset(row, 8)?;

                Ok(TransactionWithCategory {
                    transaction,
                    category,
                })
            })?
            .map(|maybe_row| maybe_row.map_err(Error::SqlError))
            .collect()
    }

    /// Change a subset of a transaction's fields.
    ///
    /// # Errors
    ///
    /// This function will return an:
    /// - [Error::UpdateMissingTransaction] if the transaction does not exist
    ///   or belongs to another user,
    /// - [Error::InvalidCategory] if the update moves the transaction to a
    ///   category that does not exist or belongs to another user,
    /// - [Error::FutureDate], [Error::DateTooOld] or
    ///   [Error::DescriptionTooLong] if a new field value is invalid,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        id: DatabaseID,
        user_id: UserID,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        if let Some(date) = update.date {
            validate_date(date)?;
        }

        if let Some(description) = &update.description {
            validate_description(description)?;
        }

        let connection = self.connection.lock().unwrap();

        if let Some(category_id) = update.category_id {
            Self::verify_category_ownership(&connection, category_id, user_id)?;
        }

        let transaction = connection
            .prepare(
                "UPDATE \"transaction\" SET
                     amount = COALESCE(?3, amount),
                     description = COALESCE(?4, description),
                     date = COALESCE(?5, date),
                     category_id = COALESCE(?6, category_id),
                     updated_at = ?7
                 WHERE id = ?1 AND user_id = ?2
                 RETURNING id, user_id, category_id, amount, description, date, created_at, updated_at",
            )?
            .query_row(
                (
                    id,
                    user_id.as_i64(),
                    update.amount.map(|amount| amount.to_string()),
                    update.description,
                    update.date,
                    update.category_id,
                    OffsetDateTime::now_utc(),
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
                error => error.into(),
            })?;

        Ok(transaction)
    }

    /// Delete a transaction by ID.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::DeleteMissingTransaction] if the
    /// transaction does not exist or belongs to another user, or an
    /// [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingTransaction);
        }

        Ok(())
    }

    /// Count the user's transactions in the date window.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn count(
        &self,
        user_id: UserID,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<u64, Error> {
        let mut query_string_parts =
            vec!["SELECT COUNT(id) FROM \"transaction\"".to_string()];
        let mut where_clause_parts = vec!["user_id = ?1".to_string()];
        let mut query_parameters = vec![Value::Integer(user_id.as_i64())];

        if let Some(start_date) = start_date {
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(start_date.to_string()));
        }

        if let Some(end_date) = end_date {
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(end_date.to_string()));
        }

        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        let count: i64 = self
            .connection
            .lock()
            .unwrap()
            .query_row(&query_string, params, |row| row.get(0))?;

        Ok(count as u64)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id)
                    ON UPDATE CASCADE ON DELETE RESTRICT
            );

            CREATE INDEX IF NOT EXISTS idx_transaction_user_date
                ON \"transaction\"(user_id, date);
            CREATE INDEX IF NOT EXISTS idx_transaction_category
                ON \"transaction\"(category_id);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_amount: String = row.get(offset + 3)?;
        let amount = raw_amount.parse::<Decimal>().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 3,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        Ok(Transaction {
            id: row.get(offset)?,
            user_id: UserID::new(row.get(offset + 1)?),
            category_id: row.get(offset + 2)?,
            amount: Amount::new_unchecked(amount),
            description: row.get(offset + 4)?,
            date: row.get(offset + 5)?,
            created_at: row.get(offset + 6)?,
            updated_at: row.get(offset + 7)?,
        })
    }
}
