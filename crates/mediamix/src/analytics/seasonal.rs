//! Season-bucket views, using the same classifier as the generator.

use super::{group_by, Totals};
use crate::fabric::SeasonBucket;
use crate::metrics;
use crate::models::DailyRecord;
use serde::Serialize;
use std::collections::HashSet;

/// Performance within one season bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRow {
    /// Bucket.
    pub season: SeasonBucket,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
    /// ROI.
    pub roi: f64,
    /// Distinct days in the bucket.
    pub days: usize,
    /// Revenue per distinct day.
    pub avg_daily_revenue: f64,
}

/// Performance by season bucket, in reporting order.
pub fn season_performance(records: &[DailyRecord]) -> Vec<SeasonRow> {
    let groups = group_by(records, |r| Some(SeasonBucket::for_date(r.date)));

    SeasonBucket::ALL
        .iter()
        .filter_map(|bucket| {
            let (_, t) = groups.iter().find(|(b, _)| b == bucket)?;
            let days: HashSet<_> = records
                .iter()
                .filter(|r| SeasonBucket::for_date(r.date) == *bucket)
                .map(|r| r.date)
                .collect();
            Some(SeasonRow {
                season: *bucket,
                spend: t.spend,
                net_revenue: t.net_revenue,
                roi: t.roi(),
                days: days.len(),
                avg_daily_revenue: metrics::ratio(t.net_revenue, days.len() as f64),
            })
        })
        .collect()
}

/// Seasonal vs non-seasonal brands within one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalComparisonRow {
    /// Bucket.
    pub season: SeasonBucket,
    /// Revenue of seasonal brands.
    pub seasonal_revenue: f64,
    /// ROI of seasonal brands.
    pub seasonal_roi: f64,
    /// Revenue of non-seasonal brands.
    pub non_seasonal_revenue: f64,
    /// ROI of non-seasonal brands.
    pub non_seasonal_roi: f64,
}

/// Seasonal and non-seasonal brand performance per bucket, in reporting order.
pub fn seasonal_comparison(records: &[DailyRecord], seasonal_brands: &[String]) -> Vec<SeasonalComparisonRow> {
    let groups = group_by(records, |r| {
        let seasonal = seasonal_brands.iter().any(|b| *b == r.brand);
        Some((SeasonBucket::for_date(r.date), seasonal))
    });
    let totals_for = |bucket: SeasonBucket, seasonal: bool| -> Totals {
        groups
            .iter()
            .find(|((b, s), _)| *b == bucket && *s == seasonal)
            .map(|(_, t)| *t)
            .unwrap_or_default()
    };

    SeasonBucket::ALL
        .iter()
        .filter(|bucket| groups.iter().any(|((b, _), _)| b == *bucket))
        .map(|&bucket| {
            let seasonal = totals_for(bucket, true);
            let other = totals_for(bucket, false);
            SeasonalComparisonRow {
                season: bucket,
                seasonal_revenue: seasonal.net_revenue,
                seasonal_roi: seasonal.roi(),
                non_seasonal_revenue: other.net_revenue,
                non_seasonal_roi: other.roi(),
            }
        })
        .collect()
}
