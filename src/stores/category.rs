//! Defines the category store trait.

use crate::{
    Error,
    category::{Category, CategoryColor, CategoryName, CategoryType, CategoryUpdate, CategoryWithUsage},
    database_id::{DatabaseID, UserID},
};

/// Creates and retrieves transaction categories.
///
/// Every operation is scoped to the owning user: rows owned by other users
/// behave as if they did not exist.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    ///
    /// When `color` is `None` the store picks a color with
    /// [recommended_color](crate::classify::recommended_color).
    ///
    /// # Errors
    ///
    /// This function will return an [Error::DuplicateCategoryName] if the
    /// user already has a category with the same name and type.
    fn create(
        &mut self,
        user_id: UserID,
        name: CategoryName,
        category_type: CategoryType,
        color: Option<CategoryColor>,
    ) -> Result<Category, Error>;

    /// Get a category by its ID.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::NotFound] if the category does
    /// not exist or belongs to another user.
    fn get(&self, category_id: DatabaseID, user_id: UserID) -> Result<Category, Error>;

    /// Get all categories for a given user along with their usage counts.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<CategoryWithUsage>, Error>;

    /// Get the user's category with the given name and type, creating it if
    /// it does not exist yet.
    ///
    /// This is the auto-classification path: when a transaction arrives with
    /// a category name but no explicit category, the caller classifies the
    /// name and resolves it to a category here.
    fn find_or_create(
        &mut self,
        user_id: UserID,
        name: CategoryName,
        category_type: CategoryType,
    ) -> Result<Category, Error>;

    /// Change the name and/or color of a category.
    ///
    /// The category type is immutable, so [CategoryUpdate] has no field for
    /// it.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::UpdateMissingCategory] if the
    /// category does not exist or belongs to another user.
    fn update(
        &mut self,
        category_id: DatabaseID,
        user_id: UserID,
        update: CategoryUpdate,
    ) -> Result<Category, Error>;

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::CategoryInUse] if any
    /// transactions still reference the category, or an
    /// [Error::DeleteMissingCategory] if the category does not exist or
    /// belongs to another user.
    fn delete(&mut self, category_id: DatabaseID, user_id: UserID) -> Result<(), Error>;
}
