//! Day-bucket window math
//!
//! All per-day grouping treats a timestamp as belonging to the bucket
//! `day_start(t)`, computed by flooring to a multiple of `DAY_MS`. Days are
//! fixed-length UTC days; no timezone or DST normalization is applied, so
//! two records on the same UTC calendar day always land in the same bucket
//! regardless of time-of-day.

/// Milliseconds in one day bucket.
pub const DAY_MS: i64 = 86_400_000;

/// An inclusive `[start, end]` timestamp range aligned to day boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: i64,
    pub end: i64,
}

impl DayWindow {
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// Floor a timestamp to the start of its UTC day bucket.
///
/// Uses the euclidean remainder so the floor stays monotonic for pre-epoch
/// timestamps. Idempotent: `day_start(day_start(t)) == day_start(t)`.
pub fn day_start(ts: i64) -> i64 {
    ts - ts.rem_euclid(DAY_MS)
}

/// The single-day window containing `ts`.
pub fn day_window(ts: i64) -> DayWindow {
    let start = day_start(ts);
    DayWindow {
        start,
        end: start + DAY_MS - 1,
    }
}

/// The 7 contiguous day buckets ending at `anchor`'s day, inclusive.
pub fn last7_window(anchor: i64) -> DayWindow {
    let anchor_day = day_start(anchor);
    DayWindow {
        start: anchor_day - 6 * DAY_MS,
        end: anchor_day + DAY_MS - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_start_idempotent() {
        let ts = 1_726_000_000_000;
        assert_eq!(day_start(day_start(ts)), day_start(ts));
        assert_eq!(day_start(ts) % DAY_MS, 0);
    }

    #[test]
    fn test_day_start_monotonic() {
        let samples = [-2 * DAY_MS - 17, -1, 0, 1, DAY_MS - 1, DAY_MS, 1_726_000_000_000];
        for pair in samples.windows(2) {
            assert!(
                day_start(pair[0]) <= day_start(pair[1]),
                "day_start not monotonic between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_day_start_pre_epoch() {
        // -1ms is the last instant of the day before the epoch
        assert_eq!(day_start(-1), -DAY_MS);
        assert_eq!(day_start(-DAY_MS), -DAY_MS);
    }

    #[test]
    fn test_same_day_times_share_bucket() {
        let midnight = day_start(1_726_000_000_000);
        let morning = midnight + 9 * 3_600_000;
        let night = midnight + DAY_MS - 1;
        assert_eq!(day_start(morning), midnight);
        assert_eq!(day_start(night), midnight);
        assert_eq!(day_start(night + 1), midnight + DAY_MS);
    }

    #[test]
    fn test_day_window_bounds() {
        let w = day_window(1_726_000_000_000);
        assert_eq!(w.start % DAY_MS, 0);
        assert_eq!(w.end - w.start, DAY_MS - 1);
        assert!(w.contains(w.start));
        assert!(w.contains(w.end));
        assert!(!w.contains(w.end + 1));
        assert!(!w.contains(w.start - 1));
    }

    #[test]
    fn test_last7_window_spans_seven_buckets() {
        let anchor = 1_726_000_000_000;
        let w = last7_window(anchor);
        assert_eq!(w.end - w.start + 1, 7 * DAY_MS);
        assert_eq!(w.start, day_start(anchor) - 6 * DAY_MS);
        assert_eq!(w.end, day_start(anchor) + DAY_MS - 1);
        // anchored mid-day: same window as anchored at midnight
        assert_eq!(last7_window(day_start(anchor)), w);
    }
}
