//! Derived aggregate views over expense records
//!
//! Pure functions: every view is recomputed from the record set it is
//! handed. Nothing here touches the store, so aggregation can run
//! synchronously on delivery of a fresh query result.

use std::collections::BTreeMap;

use crate::models::{DayTotal, Expense};
use crate::window::{day_start, last7_window, DAY_MS};

/// Sum of `amount` over the records; 0 for an empty slice.
pub fn day_total(records: &[Expense]) -> f64 {
    records.iter().map(|e| e.amount).sum()
}

/// Per-category sums, keyed by the exact (case-sensitive) category string.
///
/// Display ordering is the consumer's concern; the map iterates in key
/// order, and the report renderer re-sorts case-insensitively.
pub fn category_totals(records: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for e in records {
        *totals.entry(e.category.clone()).or_insert(0.0) += e.amount;
    }
    totals
}

/// Totals for the 7 day buckets ending at `anchor`'s day, oldest first.
///
/// Always emits exactly 7 entries: days with no records get an explicit
/// zero so chart and report output stays contiguous. Records outside
/// `last7_window(anchor)` are ignored rather than mis-bucketed.
pub fn rolling_series(records: &[Expense], anchor: i64) -> Vec<DayTotal> {
    let window = last7_window(anchor);
    let mut by_day: BTreeMap<i64, f64> = BTreeMap::new();
    for e in records.iter().filter(|e| window.contains(e.date)) {
        *by_day.entry(day_start(e.date)).or_insert(0.0) += e.amount;
    }

    let end_day = day_start(anchor);
    (0..7)
        .map(|i| {
            let day = end_day - (6 - i) * DAY_MS;
            DayTotal {
                day,
                total: by_day.get(&day).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, amount: f64, category: &str, date: i64) -> Expense {
        Expense {
            id,
            title: format!("expense {id}"),
            amount,
            category: category.to_string(),
            notes: None,
            date,
            attachment_ref: None,
        }
    }

    fn day0() -> i64 {
        day_start(1_726_000_000_000)
    }

    #[test]
    fn test_day_total_empty_is_zero() {
        assert_eq!(day_total(&[]), 0.0);
    }

    #[test]
    fn test_category_totals_partition_day_total() {
        let records = vec![
            expense(1, 12.50, "Food", day0()),
            expense(2, 20.00, "Travel", day0() + 1),
            expense(3, 3.25, "Food", day0() + 2),
        ];

        let totals = category_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Food"], 15.75);
        assert_eq!(totals["Travel"], 20.00);

        let partition_sum: f64 = totals.values().sum();
        assert_eq!(partition_sum, day_total(&records));
    }

    #[test]
    fn test_category_totals_are_case_sensitive() {
        let records = vec![
            expense(1, 1.00, "food", day0()),
            expense(2, 2.00, "Food", day0()),
        ];
        let totals = category_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["food"], 1.00);
        assert_eq!(totals["Food"], 2.00);
    }

    #[test]
    fn test_rolling_series_fills_gaps_with_zeros() {
        // records on the anchor day and 3 days back only
        let records = vec![
            expense(1, 10.0, "Food", day0()),
            expense(2, 5.0, "Food", day0() - 3 * DAY_MS + 123),
        ];

        let series = rolling_series(&records, day0() + 4 * 3_600_000);
        assert_eq!(series.len(), 7);

        for (i, point) in series.iter().enumerate() {
            assert_eq!(point.day, day0() - (6 - i as i64) * DAY_MS);
        }
        assert_eq!(series[6].total, 10.0);
        assert_eq!(series[3].total, 5.0);
        let zeros = series.iter().filter(|p| p.total == 0.0).count();
        assert_eq!(zeros, 5);
    }

    #[test]
    fn test_rolling_series_empty_input() {
        let series = rolling_series(&[], day0());
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|p| p.total == 0.0));
        assert!(series.windows(2).all(|w| w[1].day - w[0].day == DAY_MS));
    }

    #[test]
    fn test_rolling_series_sums_to_window_total() {
        let mut records = Vec::new();
        for i in 0..7 {
            records.push(expense(i, (i + 1) as f64, "Misc", day0() - i * DAY_MS));
        }
        let series = rolling_series(&records, day0());
        let series_sum: f64 = series.iter().map(|p| p.total).sum();
        assert_eq!(series_sum, day_total(&records));
    }

    #[test]
    fn test_rolling_series_ignores_out_of_window_records() {
        let records = vec![
            expense(1, 10.0, "Food", day0()),
            expense(2, 99.0, "Food", day0() - 7 * DAY_MS),
            expense(3, 99.0, "Food", day0() + DAY_MS),
        ];
        let series = rolling_series(&records, day0());
        let series_sum: f64 = series.iter().map(|p| p.total).sum();
        assert_eq!(series_sum, 10.0);
    }
}
