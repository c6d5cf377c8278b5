//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{
        Category, CategoryColor, CategoryName, CategoryType, CategoryUpdate, CategoryWithUsage,
    },
    classify::recommended_color,
    database_id::{DatabaseID, UserID},
    db::{CreateTable, MapRow},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn insert(
        connection: &Connection,
        user_id: UserID,
        name: CategoryName,
        category_type: CategoryType,
        color: Option<CategoryColor>,
    ) -> Result<Category, Error> {
        let color =
            color.unwrap_or_else(|| recommended_color(category_type, name.as_ref()));

        connection
            .prepare(
                "INSERT INTO category (user_id, name, category_type, color)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, user_id, name, category_type, color",
            )?
            .query_row(
                (
                    user_id.as_i64(),
                    name.as_ref(),
                    category_type.as_str(),
                    color.as_ref(),
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                // Code 2067 occurs when a UNIQUE constraint failed.
                // The user already has a category with this name and type.
                rusqlite::Error::SqliteFailure(sql_error, Some(_))
                    if sql_error.extended_code == 2067 =>
                {
                    Error::DuplicateCategoryName(name.to_string())
                }
                error => error.into(),
            })
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// When `color` is `None`, the color is picked from the name with
    /// [recommended_color].
    ///
    /// # Errors
    ///
    /// This function will return an [Error::DuplicateCategoryName] if the
    /// user already has a category with this name and type, or an
    /// [Error::SqlError] if there is some other SQL error.
    fn create(
        &mut self,
        user_id: UserID,
        name: CategoryName,
        category_type: CategoryType,
        color: Option<CategoryColor>,
    ) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();

        Self::insert(&connection, user_id, name, category_type, color)
    }

    /// Retrieve the category with `category_id`.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::NotFound] if the category does
    /// not exist or belongs to another user, or an [Error::SqlError] if
    /// there is some other SQL error.
    fn get(&self, category_id: DatabaseID, user_id: UserID) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, user_id, name, category_type, color FROM category
                 WHERE id = :id AND user_id = :user_id",
            )?
            .query_row(
                &[(":id", &category_id), (":user_id", &user_id.as_i64())],
                Self::map_row,
            )
            .map_err(|error| error.into())
    }

    /// Retrieve the user's categories with their usage counts, ordered
    /// alphabetically by name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<CategoryWithUsage>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT category.id, category.user_id, category.name, category.category_type, \
                 category.color, COUNT(\"transaction\".id) \
                 FROM category \
                 LEFT JOIN \"transaction\" ON \"transaction\".category_id = category.id \
                 WHERE category.user_id = :user_id \
                 GROUP BY category.id \
                 ORDER BY category.name ASC",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], |row| {
                let category = Self::map_row(row)?;
                let usage_count: i64 = row.get(5)?;

                Ok(CategoryWithUsage {
                    category,
                    usage_count: usage_count as u64,
                })
            })?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Get the user's category with the given name and type, creating it
    /// with a recommended color if it does not exist yet.
    ///
    /// The lookup and the insert happen under one connection lock.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn find_or_create(
        &mut self,
        user_id: UserID,
        name: CategoryName,
        category_type: CategoryType,
    ) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();

        let existing = connection
            .prepare(
                "SELECT id, user_id, name, category_type, color FROM category
                 WHERE user_id = ?1 AND name = ?2 AND category_type = ?3",
            )?
            .query_row(
                (user_id.as_i64(), name.as_ref(), category_type.as_str()),
                Self::map_row,
            );

        match existing {
            Ok(category) => Ok(category),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Self::insert(&connection, user_id, name, category_type, None)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Change the name and/or color of a category. The type cannot change.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::UpdateMissingCategory] if the
    /// category does not exist or belongs to another user, an
    /// [Error::DuplicateCategoryName] if the new name collides with another
    /// category of the same type, or an [Error::SqlError] if there is some
    /// other SQL error.
    fn update(
        &mut self,
        category_id: DatabaseID,
        user_id: UserID,
        update: CategoryUpdate,
    ) -> Result<Category, Error> {
        let new_name = update.name.as_ref().map(|name| name.as_ref().to_string());

        self.connection
            .lock()
            .unwrap()
            .prepare(
                "UPDATE category SET
                     name = COALESCE(?3, name),
                     color = COALESCE(?4, color)
                 WHERE id = ?1 AND user_id = ?2
                 RETURNING id, user_id, name, category_type, color",
            )?
            .query_row(
                (
                    category_id,
                    user_id.as_i64(),
                    new_name.as_deref(),
                    update.color.as_ref().map(|color| color.as_ref()),
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingCategory,
                // Code 2067 occurs when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(sql_error, Some(_))
                    if sql_error.extended_code == 2067 =>
                {
                    Error::DuplicateCategoryName(new_name.unwrap_or_default())
                }
                error => error.into(),
            })
    }

    /// Delete a category that no transactions reference.
    ///
    /// The usage check and the delete run inside one SQL transaction; the
    /// foreign key's `ON DELETE RESTRICT` backs the check at the storage
    /// level.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::DeleteMissingCategory] if the
    /// category does not exist or belongs to another user, an
    /// [Error::CategoryInUse] if transactions still reference it, or an
    /// [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, category_id: DatabaseID, user_id: UserID) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();
        let sql_transaction = connection.unchecked_transaction()?;

        sql_transaction
            .prepare("SELECT id FROM category WHERE id = ?1 AND user_id = ?2")?
            .query_row((category_id, user_id.as_i64()), |row| {
                row.get::<usize, DatabaseID>(0)
            })
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::DeleteMissingCategory,
                error => error.into(),
            })?;

        let transaction_count: i64 = sql_transaction.query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE category_id = ?1",
            [category_id],
            |row| row.get(0),
        )?;

        if transaction_count > 0 {
            return Err(Error::CategoryInUse {
                transaction_count: transaction_count as u64,
            });
        }

        sql_transaction.execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
            (category_id, user_id.as_i64()),
        )?;

        sql_transaction.commit()?;

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                category_type TEXT NOT NULL CHECK(category_type IN ('income', 'expense')),
                color TEXT NOT NULL,
                UNIQUE(user_id, name, category_type)
            );

            CREATE INDEX IF NOT EXISTS idx_category_user ON category(user_id);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let user_id = UserID::new(row.get(offset + 1)?);

        let raw_name: String = row.get(offset + 2)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let raw_type: String = row.get(offset + 3)?;
        let category_type = raw_type.parse::<CategoryType>().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 3,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        let raw_color: String = row.get(offset + 4)?;
        let color = CategoryColor::new_unchecked(&raw_color);

        Ok(Category {
            id,
            user_id,
            name,
            category_type,
            color,
        })
    }
}
