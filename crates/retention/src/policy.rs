//! Retention policy configuration and calendar bucketing

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Retention policy configuration
///
/// Every rule is optional; `None` means the rule does not apply. Values are
/// parsed and validated once at construction time, so the evaluator never
/// sees a half-formed policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Always keep the most recent N revisions of each parent
    pub keep_last: Option<usize>,
    /// Fully preserve parents having no more than this many revisions
    pub min_revisions: Option<usize>,
    /// Keep revisions dated on or before this instant
    pub keep_before: Option<NaiveDateTime>,
    /// Keep revisions dated on or after this instant, and everything newer
    pub keep_after: Option<NaiveDateTime>,
    /// Revisions to keep per calendar hour
    pub hourly: Option<usize>,
    /// Revisions to keep per calendar day
    pub daily: Option<usize>,
    /// Revisions to keep per ISO week
    pub weekly: Option<usize>,
    /// Revisions to keep per calendar month
    pub monthly: Option<usize>,
    /// Revisions to keep per calendar year
    pub yearly: Option<usize>,
}

impl RetentionPolicy {
    /// True when no rule is configured at all; evaluation of such a policy
    /// removes nothing
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Bucketing granularity, narrowest first
///
/// The evaluation order matters: a removal decision at a narrow granularity
/// stops wider granularities from seeing the revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Calendar bucket identity for one granularity
///
/// Keys are only ever compared within a single granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketKey(i32, u32, u32, u32);

impl Granularity {
    /// All granularities in evaluation order
    pub const ALL: [Granularity; 5] = [
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    /// The policy cap for this granularity
    pub fn cap(self, policy: &RetentionPolicy) -> Option<usize> {
        match self {
            Granularity::Hour => policy.hourly,
            Granularity::Day => policy.daily,
            Granularity::Week => policy.weekly,
            Granularity::Month => policy.monthly,
            Granularity::Year => policy.yearly,
        }
    }

    /// Calendar bucket for a timestamp, in the input's effective time zone
    ///
    /// Weeks use the ISO week-year pair, so the days around New Year land
    /// in the week they actually belong to.
    pub fn bucket_key(self, ts: NaiveDateTime) -> BucketKey {
        match self {
            Granularity::Hour => BucketKey(ts.year(), ts.month(), ts.day(), ts.hour()),
            Granularity::Day => BucketKey(ts.year(), ts.month(), ts.day(), 0),
            Granularity::Week => {
                let week = ts.iso_week();
                BucketKey(week.year(), week.week(), 0, 0)
            }
            Granularity::Month => BucketKey(ts.year(), ts.month(), 0, 0),
            Granularity::Year => BucketKey(ts.year(), 0, 0, 0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_hour_and_day_buckets() {
        let a = ts(2015, 11, 1, 10);
        let b = ts(2015, 11, 1, 11);
        assert_ne!(Granularity::Hour.bucket_key(a), Granularity::Hour.bucket_key(b));
        assert_eq!(Granularity::Day.bucket_key(a), Granularity::Day.bucket_key(b));
    }

    #[test]
    fn test_iso_week_spans_new_year() {
        // Thu 2020-12-31 and Fri 2021-01-01 share ISO week 53 of 2020.
        let old_year = ts(2020, 12, 31, 12);
        let new_year = ts(2021, 1, 1, 12);
        assert_eq!(
            Granularity::Week.bucket_key(old_year),
            Granularity::Week.bucket_key(new_year)
        );
        assert_ne!(
            Granularity::Year.bucket_key(old_year),
            Granularity::Year.bucket_key(new_year)
        );
    }

    #[test]
    fn test_caps_map_to_fields() {
        let policy = RetentionPolicy {
            hourly: Some(1),
            yearly: Some(9),
            ..Default::default()
        };
        assert_eq!(Granularity::Hour.cap(&policy), Some(1));
        assert_eq!(Granularity::Day.cap(&policy), None);
        assert_eq!(Granularity::Year.cap(&policy), Some(9));
    }

    #[test]
    fn test_is_noop() {
        assert!(RetentionPolicy::default().is_noop());
        let policy = RetentionPolicy {
            daily: Some(0),
            ..Default::default()
        };
        assert!(!policy.is_noop());
    }
}
