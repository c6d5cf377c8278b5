//! Read-only financial summaries for one user over an optional date window.
//!
//! A statistics request produces three views of the same transactions: an
//! income/expense/balance summary, a per-category breakdown and a time
//! series. [get_statistics] fetches the filtered transactions once and
//! derives all three from that single snapshot, so the sub-results cannot
//! disagree when other requests write concurrently.

mod aggregation;
mod models;

pub use aggregation::{category_breakdown, summarize, time_series};
pub use models::{
    CategoryTotal, DailyTotal, GroupBy, MonthlyTotal, Statistics, StatisticsQuery, Summary,
    TimeSeries, TypeTotals,
};

use time::{Date, Month};

use crate::{Error, database_id::UserID, stores::TransactionStore};

/// Compute the summary, category breakdown and time series for one user.
///
/// The date window is validated defensively even though callers are expected
/// to validate it first. All three results are derived from one snapshot
/// read.
///
/// # Errors
///
/// This function will return an [Error::EndBeforeStart] or an
/// [Error::DateRangeTooWide] if the date window is invalid, or any error the
/// store returns for the snapshot query.
pub fn get_statistics(
    store: &impl TransactionStore,
    user_id: UserID,
    query: &StatisticsQuery,
) -> Result<Statistics, Error> {
    validate_date_range(query.start_date, query.end_date)?;

    let snapshot = store.get_with_categories(user_id, query.start_date, query.end_date)?;

    Ok(Statistics {
        summary: summarize(&snapshot),
        by_category: category_breakdown(&snapshot),
        over_time: time_series(&snapshot, query.group_by),
    })
}

/// Check that a date window is well formed: the end must not precede the
/// start, and the window must not span more than two years.
///
/// Windows with one or both bounds missing are always well formed.
pub fn validate_date_range(start: Option<Date>, end: Option<Date>) -> Result<(), Error> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(());
    };

    if end < start {
        return Err(Error::EndBeforeStart { start, end });
    }

    if end > two_years_after(start) {
        return Err(Error::DateRangeTooWide { start, end });
    }

    Ok(())
}

// Feb 29 anchors clamp to Feb 28 of the later year.
fn two_years_after(date: Date) -> Date {
    date.replace_year(date.year() + 2)
        .unwrap_or_else(|_| Date::from_calendar_date(date.year() + 2, Month::February, 28).unwrap())
}

#[cfg(test)]
mod validate_date_range_tests {
    use time::macros::date;

    use crate::Error;

    use super::validate_date_range;

    #[test]
    fn accepts_open_windows() {
        assert!(validate_date_range(None, None).is_ok());
        assert!(validate_date_range(Some(date!(2025 - 01 - 01)), None).is_ok());
        assert!(validate_date_range(None, Some(date!(2025 - 01 - 01))).is_ok());
    }

    #[test]
    fn accepts_a_single_day_window() {
        let day = date!(2025 - 06 - 05);

        assert!(validate_date_range(Some(day), Some(day)).is_ok());
    }

    #[test]
    fn rejects_end_before_start() {
        let start = date!(2025 - 06 - 05);
        let end = date!(2025 - 06 - 04);

        let result = validate_date_range(Some(start), Some(end));

        assert_eq!(result, Err(Error::EndBeforeStart { start, end }));
    }

    #[test]
    fn accepts_exactly_two_years() {
        let start = date!(2023 - 06 - 05);
        let end = date!(2025 - 06 - 05);

        assert!(validate_date_range(Some(start), Some(end)).is_ok());
    }

    #[test]
    fn rejects_more_than_two_years() {
        let start = date!(2023 - 06 - 05);
        let end = date!(2025 - 06 - 06);

        let result = validate_date_range(Some(start), Some(end));

        assert_eq!(result, Err(Error::DateRangeTooWide { start, end }));
    }

    #[test]
    fn leap_day_start_clamps_to_february_28() {
        let start = date!(2024 - 02 - 29);

        assert!(validate_date_range(Some(start), Some(date!(2026 - 02 - 28))).is_ok());
        assert!(validate_date_range(Some(start), Some(date!(2026 - 03 - 01))).is_err());
    }
}

#[cfg(test)]
mod get_statistics_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal::dec;
    use time::{Duration, OffsetDateTime};

    use crate::{
        category::{CategoryName, CategoryType},
        database_id::UserID,
        db::initialize,
        money::Amount,
        stats::models::{GroupBy, StatisticsQuery, TimeSeries},
        stores::{
            CategoryStore, TransactionStore,
            sqlite::{SQLiteCategoryStore, SQLiteTransactionStore},
        },
        transaction::Transaction,
    };

    use super::get_statistics;

    fn get_test_stores() -> (SQLiteCategoryStore, SQLiteTransactionStore) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (
            SQLiteCategoryStore::new(connection.clone()),
            SQLiteTransactionStore::new(connection),
        )
    }

    #[test]
    fn statistics_are_consistent_across_sub_results() {
        let (mut categories, mut transactions) = get_test_stores();
        let user_id = UserID::new(1);

        let salary = categories
            .create(user_id, CategoryName::new_unchecked("薪資"), CategoryType::Income, None)
            .unwrap();
        let dining = categories
            .create(user_id, CategoryName::new_unchecked("餐飲"), CategoryType::Expense, None)
            .unwrap();

        let today = OffsetDateTime::now_utc().date();
        for (amount, category_id) in [
            (dec!(50000), salary.id),
            (dec!(12000), dining.id),
            (dec!(3000), dining.id),
        ] {
            let builder = Transaction::build(Amount::new(amount).unwrap(), user_id, category_id)
                .date(today - Duration::days(3))
                .unwrap();
            transactions.create(builder).unwrap();
        }

        let statistics =
            get_statistics(&transactions, user_id, &StatisticsQuery::default()).unwrap();

        assert_eq!(statistics.summary.income.total, dec!(50000));
        assert_eq!(statistics.summary.expense.total, dec!(15000));
        assert_eq!(statistics.summary.balance, dec!(35000));

        let breakdown_total: rust_decimal::Decimal =
            statistics.by_category.iter().map(|entry| entry.total).sum();
        assert_eq!(
            breakdown_total,
            statistics.summary.income.total + statistics.summary.expense.total
        );

        let TimeSeries::Monthly(series) = statistics.over_time else {
            panic!("want a monthly series by default");
        };
        let series_total: rust_decimal::Decimal = series.iter().map(|entry| entry.total).sum();
        assert_eq!(
            series_total,
            statistics.summary.income.total + statistics.summary.expense.total
        );
    }

    #[test]
    fn date_window_excludes_transactions_outside_it() {
        let (mut categories, mut transactions) = get_test_stores();
        let user_id = UserID::new(1);

        let dining = categories
            .create(user_id, CategoryName::new_unchecked("餐飲"), CategoryType::Expense, None)
            .unwrap();

        let today = OffsetDateTime::now_utc().date();
        for days_ago in [1, 10, 40] {
            let builder = Transaction::build(Amount::new(dec!(100)).unwrap(), user_id, dining.id)
                .date(today - Duration::days(days_ago))
                .unwrap();
            transactions.create(builder).unwrap();
        }

        let query = StatisticsQuery {
            start_date: Some(today - Duration::days(14)),
            end_date: Some(today),
            group_by: GroupBy::Day,
        };
        let statistics = get_statistics(&transactions, user_id, &query).unwrap();

        assert_eq!(statistics.summary.expense.count, 2);
        assert_eq!(statistics.summary.expense.total, dec!(200));
    }

    #[test]
    fn other_users_transactions_are_not_counted() {
        let (mut categories, mut transactions) = get_test_stores();
        let owner = UserID::new(1);
        let other = UserID::new(2);

        let dining = categories
            .create(owner, CategoryName::new_unchecked("餐飲"), CategoryType::Expense, None)
            .unwrap();
        let builder = Transaction::build(Amount::new(dec!(100)).unwrap(), owner, dining.id);
        transactions.create(builder).unwrap();

        let statistics =
            get_statistics(&transactions, other, &StatisticsQuery::default()).unwrap();

        assert_eq!(statistics.summary.expense.count, 0);
        assert!(statistics.by_category.is_empty());
    }
}
