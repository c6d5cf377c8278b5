//! Pure aggregation over a snapshot of transactions.
//!
//! Every function here works on one in-memory slice of joined
//! transaction/category rows, so the summary, breakdown and time series of a
//! single statistics request can never disagree with each other.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::{
    category::{Category, CategoryType},
    database_id::DatabaseID,
    transaction::TransactionWithCategory,
};

use super::models::{
    CategoryTotal, DailyTotal, GroupBy, MonthlyTotal, Summary, TimeSeries, TypeTotals,
};

/// Sum the snapshot into income/expense totals and a balance.
///
/// Both type entries are always present in the output; a type with no
/// transactions reads as zero.
pub fn summarize(rows: &[TransactionWithCategory]) -> Summary {
    let mut income = TypeTotals::default();
    let mut expense = TypeTotals::default();

    for row in rows {
        let totals = match row.category.category_type {
            CategoryType::Income => &mut income,
            CategoryType::Expense => &mut expense,
        };

        totals.total += row.transaction.amount.value();
        totals.count += 1;
    }

    Summary {
        income,
        expense,
        balance: income.total - expense.total,
    }
}

/// Group the snapshot by category and sum each group.
///
/// The output is sorted by total descending; equal totals fall back to
/// ascending category ID so the order is deterministic.
pub fn category_breakdown(rows: &[TransactionWithCategory]) -> Vec<CategoryTotal> {
    let mut totals_by_category: HashMap<DatabaseID, (Category, Decimal, u64)> = HashMap::new();

    for row in rows {
        let entry = totals_by_category
            .entry(row.category.id)
            .or_insert_with(|| (row.category.clone(), Decimal::ZERO, 0));

        entry.1 += row.transaction.amount.value();
        entry.2 += 1;
    }

    let mut breakdown: Vec<CategoryTotal> = totals_by_category
        .into_values()
        .map(|(category, total, count)| CategoryTotal {
            category,
            total,
            count,
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(a.category.id.cmp(&b.category.id))
    });

    breakdown
}

/// Bucket the snapshot by calendar period and category type.
///
/// Entries are ordered most-recent-first. Periods with no transactions
/// produce no entry.
pub fn time_series(rows: &[TransactionWithCategory], group_by: GroupBy) -> TimeSeries {
    match group_by {
        GroupBy::Day => TimeSeries::Daily(daily_totals(rows)),
        GroupBy::Month => TimeSeries::Monthly(monthly_totals(rows)),
    }
}

fn daily_totals(rows: &[TransactionWithCategory]) -> Vec<DailyTotal> {
    let mut totals = BTreeMap::new();

    for row in rows {
        let key = (row.transaction.date, row.category.category_type);
        *totals.entry(key).or_insert(Decimal::ZERO) += row.transaction.amount.value();
    }

    totals
        .into_iter()
        .rev()
        .map(|((date, category_type), total)| DailyTotal {
            date,
            category_type,
            total,
        })
        .collect()
}

fn monthly_totals(rows: &[TransactionWithCategory]) -> Vec<MonthlyTotal> {
    let mut totals = BTreeMap::new();

    for row in rows {
        let date = row.transaction.date;
        let key = (date.year(), u8::from(date.month()), row.category.category_type);
        *totals.entry(key).or_insert(Decimal::ZERO) += row.transaction.amount.value();
    }

    totals
        .into_iter()
        .rev()
        .map(|((year, month, category_type), total)| MonthlyTotal {
            year,
            month,
            category_type,
            total,
        })
        .collect()
}
