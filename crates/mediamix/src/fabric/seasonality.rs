//! Seasonality model and the shared season classifier.
//!
//! [`SeasonBucket::for_date`] is the single source of month boundaries. The
//! generator uses it to scale revenue and the analytics layer uses it to
//! slice records, so the two can never disagree.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar season bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonBucket {
    /// May - September.
    #[serde(rename = "In-Season")]
    InSeason,
    /// March - April.
    #[serde(rename = "Pre-Season")]
    PreSeason,
    /// October.
    #[serde(rename = "Post-Season")]
    PostSeason,
    /// November - February.
    #[serde(rename = "Off-Season")]
    OffSeason,
}

impl SeasonBucket {
    /// All buckets in reporting order.
    pub const ALL: [SeasonBucket; 4] = [
        SeasonBucket::InSeason,
        SeasonBucket::PreSeason,
        SeasonBucket::PostSeason,
        SeasonBucket::OffSeason,
    ];

    /// Classify a calendar month (1-12).
    pub fn for_month(month: u32) -> Self {
        match month {
            5..=9 => SeasonBucket::InSeason,
            3 | 4 => SeasonBucket::PreSeason,
            10 => SeasonBucket::PostSeason,
            _ => SeasonBucket::OffSeason,
        }
    }

    /// Classify a date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_month(date.month())
    }

    /// Revenue multiplier for seasonal brands.
    pub fn multiplier(&self) -> f64 {
        match self {
            SeasonBucket::InSeason => 1.3,
            SeasonBucket::PreSeason => 1.1,
            SeasonBucket::PostSeason => 1.05,
            SeasonBucket::OffSeason => 0.85,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            SeasonBucket::InSeason => "In-Season",
            SeasonBucket::PreSeason => "Pre-Season",
            SeasonBucket::PostSeason => "Post-Season",
            SeasonBucket::OffSeason => "Off-Season",
        }
    }
}

impl std::fmt::Display for SeasonBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Month-to-month variation for non-seasonal brands, January first.
pub const NON_SEASONAL_MONTHLY: [f64; 12] = [
    0.97, 0.98, 1.00, 1.01, 1.02, 1.03, 1.02, 1.01, 1.00, 1.02, 1.04, 1.05,
];

/// Revenue multiplier for a brand on a date.
pub fn seasonal_multiplier(date: NaiveDate, seasonal: bool) -> f64 {
    if seasonal {
        SeasonBucket::for_date(date).multiplier()
    } else {
        NON_SEASONAL_MONTHLY[date.month0() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(SeasonBucket::for_date(date(2, 29)), SeasonBucket::OffSeason);
        assert_eq!(SeasonBucket::for_date(date(3, 1)), SeasonBucket::PreSeason);
        assert_eq!(SeasonBucket::for_date(date(4, 30)), SeasonBucket::PreSeason);
        assert_eq!(SeasonBucket::for_date(date(5, 1)), SeasonBucket::InSeason);
        assert_eq!(SeasonBucket::for_date(date(9, 30)), SeasonBucket::InSeason);
        assert_eq!(SeasonBucket::for_date(date(10, 15)), SeasonBucket::PostSeason);
        assert_eq!(SeasonBucket::for_date(date(11, 1)), SeasonBucket::OffSeason);
        assert_eq!(SeasonBucket::for_date(date(1, 1)), SeasonBucket::OffSeason);
    }

    #[test]
    fn test_seasonal_multipliers() {
        assert_eq!(seasonal_multiplier(date(7, 4), true), 1.3);
        assert_eq!(seasonal_multiplier(date(3, 10), true), 1.1);
        assert_eq!(seasonal_multiplier(date(10, 10), true), 1.05);
        assert_eq!(seasonal_multiplier(date(12, 25), true), 0.85);
    }

    #[test]
    fn test_non_seasonal_range() {
        for m in 1..=12 {
            let v = seasonal_multiplier(date(m, 1), false);
            assert!((0.97..=1.05).contains(&v));
        }
    }
}
