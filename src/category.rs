//! Core category domain types.
//!
//! A category is a user-defined label for transactions (e.g., "餐飲",
//! "Salary") with a fixed type of either income or expense.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{DatabaseID, UserID},
};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a category counts money coming in or going out.
///
/// The type is fixed when the category is created; only the name and color
/// of a category can change afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Money earned, e.g. salary or interest.
    Income,
    /// Money spent, e.g. meals or rent.
    Expense,
}

impl CategoryType {
    /// The canonical lowercase string for this type, as stored in the
    /// database.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }
}

impl FromStr for CategoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryType::Income),
            "expense" => Ok(CategoryType::Expense),
            other => Err(Error::InvalidCategoryType(other.to_string())),
        }
    }
}

impl Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated display color of the form `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryColor(String);

impl CategoryColor {
    /// Create a category color from a hex string.
    ///
    /// Uppercase hex digits are accepted and normalized to lowercase.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidColor] if `color` is not
    /// a `#` followed by six hex digits.
    pub fn new(color: &str) -> Result<Self, Error> {
        let is_hex_color = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());

        if is_hex_color {
            Ok(Self(color.to_lowercase()))
        } else {
            Err(Error::InvalidColor(color.to_string()))
        }
    }

    /// Create a category color without validation.
    ///
    /// The caller should ensure that the string is a valid `#rrggbb` color.
    pub fn new_unchecked(color: &str) -> Self {
        Self(color.to_string())
    }
}

impl AsRef<str> for CategoryColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses and income, e.g., '餐飲', '薪資', 'Groceries'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseID,
    /// The ID of the user that owns the category.
    pub user_id: UserID,
    /// The display name of the category.
    pub name: CategoryName,
    /// Whether the category is for income or expenses.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// The display color of the category.
    pub color: CategoryColor,
}

/// A category along with the number of transactions that reference it.
///
/// The count is derived at read time, it is not stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithUsage {
    /// The category itself.
    #[serde(flatten)]
    pub category: Category,
    /// How many transactions reference the category.
    pub usage_count: u64,
}

/// The fields of a category that may be changed after creation.
///
/// The category type is immutable, so it has no entry here. Fields set to
/// `None` are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    /// The new display name, if it should change.
    pub name: Option<CategoryName>,
    /// The new display color, if it should change.
    pub color: Option<CategoryColor>,
}


#[cfg(test)]
mod category_type_tests {
    use std::str::FromStr;

    use crate::category::CategoryType;

    #[test]
    fn round_trips_through_strings() {
        for category_type in [CategoryType::Income, CategoryType::Expense] {
            let parsed = CategoryType::from_str(category_type.as_str());

            assert_eq!(parsed, Ok(category_type));
        }
    }

    #[test]
    fn from_str_fails_on_unknown_type() {
        let parsed = CategoryType::from_str("transfer");

        assert!(parsed.is_err());
    }
}

#[cfg(test)]
mod category_color_tests {
    use crate::{Error, category::CategoryColor};

    #[test]
    fn new_succeeds_on_hex_color() {
        let color = CategoryColor::new("#3b82f6");

        assert!(color.is_ok());
    }

    #[test]
    fn new_normalizes_to_lowercase() {
        let color = CategoryColor::new("#3B82F6").unwrap();

        assert_eq!(color.as_ref(), "#3b82f6");
    }

    #[test]
    fn new_fails_without_leading_hash() {
        let color = CategoryColor::new("3b82f6");

        assert_eq!(color, Err(Error::InvalidColor("3b82f6".to_string())));
    }

    #[test]
    fn new_fails_on_short_form() {
        let color = CategoryColor::new("#fff");

        assert!(color.is_err());
    }

    #[test]
    fn new_fails_on_non_hex_digits() {
        let color = CategoryColor::new("#zzzzzz");

        assert!(color.is_err());
    }
}
