//! Date-window walk from a start date up to today.

use chrono::{Duration, NaiveDate};

use crate::data::assemble::{Assembled, assemble};
use crate::data::coops::ProductSource;
use crate::data::error::AcquireError;
use crate::data::sanitize::sanitize;
use crate::domain::{COLUMN_COUNT, Dataset, DateWindow, MAX_WINDOW_DAYS, StationConfig};

/// Partition `[start, today]` into consecutive windows of at most
/// `MAX_WINDOW_DAYS` days.
///
/// Each window starts the day after the previous one ends; the last one ends on
/// `today`.
pub fn plan_windows(start: NaiveDate, today: NaiveDate) -> Result<Vec<DateWindow>, AcquireError> {
    if start > today {
        return Err(AcquireError::StartInFuture { start, today });
    }

    let mut windows = Vec::new();
    let mut begin = start;
    loop {
        let end = (begin + Duration::days(MAX_WINDOW_DAYS)).min(today);
        windows.push(DateWindow { begin, end });
        if end == today {
            break;
        }
        begin = end + Duration::days(1);
    }
    Ok(windows)
}

/// Assemble every window from `start` to `today` and stack the successful ones.
///
/// Skipped windows contribute no rows. Rows with a missing value are dropped
/// from the final result.
pub fn collect<S: ProductSource + ?Sized>(
    source: &S,
    station: &StationConfig,
    start: NaiveDate,
    today: NaiveDate,
) -> Result<Dataset, AcquireError> {
    let windows = plan_windows(start, today)?;
    let mut acc = Dataset::empty(COLUMN_COUNT);

    for window in windows {
        tracing::info!("Now gathering data from {window}...");
        match assemble(source, station, window)? {
            Assembled::Complete(rows) => {
                tracing::debug!(rows = rows.nrows(), "window assembled");
                // Assembled windows always carry COLUMN_COUNT columns.
                if let Err(e) = acc.append(&rows) {
                    tracing::warn!(%window, "dropping window: {e}");
                }
            }
            Assembled::Skipped(reason) => {
                tracing::warn!(%window, "skipping window: {reason}");
            }
        }
        tracing::info!("Done, {} total data rows", acc.nrows());
    }

    let clean = sanitize(&acc);
    let dropped = acc.nrows() - clean.nrows();
    if dropped > 0 {
        tracing::info!(dropped, "removed rows with missing values");
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{CannedSource, date, midnight};
    use crate::domain::Product;

    #[test]
    fn windows_are_bounded_contiguous_and_cover_the_range() {
        let start = date(2012, 1, 1);
        let today = date(2012, 12, 31);
        let windows = plan_windows(start, today).unwrap();

        assert_eq!(windows.first().unwrap().begin, start);
        assert_eq!(windows.last().unwrap().end, today);
        for w in &windows {
            assert!(w.begin <= w.end);
            assert!(w.span_days() <= MAX_WINDOW_DAYS);
        }
        for pair in windows.windows(2) {
            assert_eq!(pair[1].begin, pair[0].next_begin());
        }

        let covered: i64 = windows.iter().map(|w| w.span_days() + 1).sum();
        assert_eq!(covered, (today - start).num_days() + 1);
    }

    #[test]
    fn first_window_spans_thirty_days() {
        let windows = plan_windows(date(2012, 1, 1), date(2012, 3, 1)).unwrap();
        assert_eq!(
            windows,
            vec![
                DateWindow { begin: date(2012, 1, 1), end: date(2012, 1, 31) },
                DateWindow { begin: date(2012, 2, 1), end: date(2012, 3, 1) },
            ]
        );
    }

    #[test]
    fn start_equal_to_today_is_a_single_day() {
        let d = date(2020, 6, 15);
        assert_eq!(plan_windows(d, d).unwrap(), vec![DateWindow { begin: d, end: d }]);
    }

    #[test]
    fn start_after_today_is_rejected() {
        let err = plan_windows(date(2030, 1, 1), date(2020, 1, 1)).unwrap_err();
        assert!(matches!(err, AcquireError::StartInFuture { .. }));
    }

    #[test]
    fn collect_sums_aligned_rows_of_every_window() {
        let today = date(2012, 3, 1);
        let w1 = midnight(date(2012, 1, 1));
        let w2 = midnight(date(2012, 2, 1));
        let source = CannedSource::new()
            .with_full_window(date(2012, 1, 1), &[w1, w1 + 120, w1 + 360, w1 + 720])
            .with_full_window(date(2012, 2, 1), &[w2, w2 + 360]);

        let data = collect(&source, &StationConfig::default(), date(2012, 1, 1), today).unwrap();
        assert_eq!(data.ncols(), COLUMN_COUNT);
        assert_eq!(data.nrows(), 3 + 2);
        // Chronological order: the first row of the second window follows the first window.
        assert_eq!(data.row(3)[0], 3.0);
    }

    #[test]
    fn window_without_water_level_contributes_nothing() {
        let today = date(2012, 3, 1);
        let w1 = midnight(date(2012, 1, 1));
        let w2 = midnight(date(2012, 2, 1));
        let source = CannedSource::new()
            .with_full_window(date(2012, 1, 1), &[w1, w1 + 360])
            .with(
                Product::WaterLevel,
                date(2012, 1, 1),
                "Error: No data was found. This product may not be offered at this station at the requested time.".to_string(),
            )
            .with_full_window(date(2012, 2, 1), &[w2, w2 + 360, w2 + 720]);

        let data = collect(&source, &StationConfig::default(), date(2012, 1, 1), today).unwrap();
        assert_eq!(data.nrows(), 3);
    }

    #[test]
    fn first_window_without_data_starts_from_empty() {
        let today = date(2012, 3, 1);
        let w2 = midnight(date(2012, 2, 1));
        let source = CannedSource::new().with_full_window(date(2012, 2, 1), &[w2]);

        let data = collect(&source, &StationConfig::default(), date(2012, 1, 1), today).unwrap();
        assert_eq!(data.nrows(), 1);
        assert_eq!(data.ncols(), COLUMN_COUNT);
    }

    #[test]
    fn no_data_anywhere_yields_empty_dataset() {
        let data = collect(
            &CannedSource::new(),
            &StationConfig::default(),
            date(2012, 1, 1),
            date(2012, 1, 10),
        )
        .unwrap();
        assert!(data.is_empty());
        assert_eq!(data.ncols(), COLUMN_COUNT);
    }

    #[test]
    fn rows_with_missing_values_are_removed() {
        let begin = date(2012, 1, 1);
        let t0 = midnight(begin);
        let epochs = [t0, t0 + 360];
        let body = "Date Time, Air Pressure, X, N, R\n2012-01-01 00:00,,0,0,0\n2012-01-01 00:06,1012.5,0,0,0\n";
        let source = CannedSource::new()
            .with_full_window(begin, &epochs)
            .with(Product::AirPressure, begin, body.to_string());

        let data = collect(&source, &StationConfig::default(), begin, date(2012, 1, 5)).unwrap();
        assert_eq!(data.nrows(), 1);
        assert_eq!(data.row(0)[6], 1012.5);
    }
}
