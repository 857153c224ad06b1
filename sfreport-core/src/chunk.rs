use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Closed date interval `[start, end]` fetched with one execution request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateChunk {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateChunk {
    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn days(&self) -> u64 {
        u64::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }
}

/// Split `[start, end]` into ascending, gap-free, non-overlapping chunks.
///
/// Each chunk ends `increment_days` after it starts (so it spans
/// `increment_days + 1` days), clamped to `end`; the next one starts the day
/// after. Returns an empty plan when `start > end`.
#[must_use]
pub fn chunk_date_range(start: NaiveDate, end: NaiveDate, increment_days: u32) -> Vec<DateChunk> {
    let mut out = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let chunk_end = cursor
            .checked_add_days(Days::new(u64::from(increment_days)))
            .map_or(end, |d| d.min(end));
        out.push(DateChunk {
            start: cursor,
            end: chunk_end,
        });
        match chunk_end.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_day_range_is_one_chunk() {
        let plan = chunk_date_range(d(2024, 1, 1), d(2024, 1, 1), 7);
        assert_eq!(
            plan,
            vec![DateChunk {
                start: d(2024, 1, 1),
                end: d(2024, 1, 1)
            }]
        );
        assert_eq!(plan[0].days(), 1);
    }

    #[test]
    fn twenty_days_by_nine() {
        let plan = chunk_date_range(d(2024, 1, 1), d(2024, 1, 20), 9);
        assert_eq!(
            plan,
            vec![
                DateChunk {
                    start: d(2024, 1, 1),
                    end: d(2024, 1, 10)
                },
                DateChunk {
                    start: d(2024, 1, 11),
                    end: d(2024, 1, 20)
                },
            ]
        );
    }

    #[test]
    fn last_chunk_is_clamped() {
        let plan = chunk_date_range(d(2024, 2, 25), d(2024, 3, 2), 3);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].end, d(2024, 2, 28));
        assert_eq!(plan[1].start, d(2024, 2, 29));
        assert_eq!(plan[1].end, d(2024, 3, 2));
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(chunk_date_range(d(2024, 1, 2), d(2024, 1, 1), 1).is_empty());
    }

    #[test]
    fn range_ending_at_max_date_terminates() {
        let plan = chunk_date_range(NaiveDate::MAX, NaiveDate::MAX, 30);
        assert_eq!(plan.len(), 1);
    }
}
