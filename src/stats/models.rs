//! Result and query types for the statistics module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::category::{Category, CategoryType};

/// The total and transaction count for one category type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTotals {
    /// The sum of the transaction amounts.
    pub total: Decimal,
    /// The number of transactions.
    pub count: u64,
}

/// Income and expense totals over a date window.
///
/// Both type entries are always present; a type with no transactions in the
/// window reads as zero, not absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Totals over the income transactions.
    pub income: TypeTotals,
    /// Totals over the expense transactions.
    pub expense: TypeTotals,
    /// `income.total - expense.total`, decimal-exact.
    pub balance: Decimal,
}

/// The aggregate for one category within a date window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category the transactions belong to.
    pub category: Category,
    /// The sum of the transaction amounts in the category.
    pub total: Decimal,
    /// The number of transactions in the category.
    pub count: u64,
}

/// How to bucket the time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One bucket per calendar date.
    Day,
    /// One bucket per calendar month.
    #[default]
    Month,
}

/// The total for one (date, type) pair in a daily time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    /// The calendar date of the bucket.
    pub date: Date,
    /// Whether the bucket sums income or expense transactions.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// The sum of the amounts in the bucket.
    pub total: Decimal,
}

/// The total for one (year, month, type) triple in a monthly time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// The calendar year of the bucket.
    pub year: i32,
    /// The calendar month of the bucket, 1 through 12.
    pub month: u8,
    /// Whether the bucket sums income or expense transactions.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// The sum of the amounts in the bucket.
    pub total: Decimal,
}

/// A time-bucketed series of totals split by category type.
///
/// Entries are ordered most-recent-first. The series is sparse: periods with
/// no transactions produce no entry, so callers must not assume contiguous
/// coverage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimeSeries {
    /// One entry per (date, type) pair present in the window.
    Daily(Vec<DailyTotal>),
    /// One entry per (year, month, type) triple present in the window.
    Monthly(Vec<MonthlyTotal>),
}

/// The options for a statistics request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StatisticsQuery {
    /// Include transactions on or after this date. `None` leaves the window
    /// unbounded on that side.
    pub start_date: Option<Date>,
    /// Include transactions on or before this date. `None` leaves the window
    /// unbounded on that side.
    pub end_date: Option<Date>,
    /// How to bucket the time series. Defaults to monthly.
    #[serde(default)]
    pub group_by: GroupBy,
}

/// The combined result of a statistics request.
///
/// All three parts are derived from the same snapshot of the user's
/// transactions, so they never disagree with each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Income, expense and balance totals.
    pub summary: Summary,
    /// Per-category totals, largest first.
    pub by_category: Vec<CategoryTotal>,
    /// Time-bucketed totals split by type.
    pub over_time: TimeSeries,
}
