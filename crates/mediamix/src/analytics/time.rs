//! Time-bucketed series.

use super::{group_by, sort_asc_by, Totals};
use crate::metrics;
use crate::models::{week_start, Channel, DailyRecord};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Spend and revenue for one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePoint {
    /// First day of the bucket.
    pub period: NaiveDate,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
    /// Revenue over spend.
    pub roi: f64,
    /// Summed impressions.
    pub impressions: u64,
}

impl TimePoint {
    fn from_totals(period: NaiveDate, t: &Totals) -> Self {
        Self {
            period,
            spend: t.spend,
            net_revenue: t.net_revenue,
            roi: t.roi(),
            impressions: t.impressions,
        }
    }
}

fn bucketed<F>(records: &[DailyRecord], bucket: F) -> Vec<TimePoint>
where
    F: Fn(NaiveDate) -> NaiveDate,
{
    let mut points: Vec<TimePoint> = group_by(records, |r| Some(bucket(r.date)))
        .iter()
        .map(|(period, t)| TimePoint::from_totals(*period, t))
        .collect();
    sort_asc_by(&mut points, |p| p.period);
    points
}

/// One point per calendar day, ascending.
pub fn daily_series(records: &[DailyRecord]) -> Vec<TimePoint> {
    bucketed(records, |d| d)
}

/// One point per ISO week (Monday start), ascending.
pub fn weekly_series(records: &[DailyRecord]) -> Vec<TimePoint> {
    bucketed(records, week_start)
}

/// One point per calendar month, ascending.
pub fn monthly_series(records: &[DailyRecord]) -> Vec<TimePoint> {
    bucketed(records, |d| d.with_day(1).unwrap_or(d))
}

/// Weekly spend for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelWeekPoint {
    /// Monday of the week.
    pub week: NaiveDate,
    /// Channel.
    pub channel: Channel,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
}

/// Weekly spend by channel, ordered by week then channel table order.
pub fn weekly_channel_spend(records: &[DailyRecord]) -> Vec<ChannelWeekPoint> {
    let mut points: Vec<ChannelWeekPoint> =
        group_by(records, |r| Some((r.week_start(), r.channel)))
            .into_iter()
            .map(|((week, channel), t)| ChannelWeekPoint {
                week,
                channel,
                spend: t.spend,
                net_revenue: t.net_revenue,
            })
            .collect();
    sort_asc_by(&mut points, |p| (p.week, p.channel));
    points
}

/// Daily point with a trailing-window ROI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingRoiPoint {
    /// Day.
    pub date: NaiveDate,
    /// Spend on the day.
    pub spend: f64,
    /// Revenue on the day.
    pub net_revenue: f64,
    /// ROI on the day.
    pub roi: f64,
    /// Summed revenue over summed spend for the trailing `window` days present.
    pub rolling_roi: f64,
}

/// Daily series with a trailing rolling ROI over `window` observed days.
pub fn rolling_roi(records: &[DailyRecord], window: usize) -> Vec<RollingRoiPoint> {
    let daily = daily_series(records);
    let window = window.max(1);

    daily
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let from = (i + 1).saturating_sub(window);
            let (spend, revenue) = daily[from..=i]
                .iter()
                .fold((0.0, 0.0), |(s, r), p| (s + p.spend, r + p.net_revenue));
            RollingRoiPoint {
                date: point.period,
                spend: point.spend,
                net_revenue: point.net_revenue,
                roi: point.roi,
                rolling_roi: metrics::roi(revenue, spend),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{date, rec};
    use super::*;

    fn sample() -> Vec<DailyRecord> {
        vec![
            rec(1, 9, "A", Channel::Meta, 100.0, 300.0),
            rec(1, 1, "A", Channel::Tv, 100.0, 100.0),
            rec(1, 7, "B", Channel::Meta, 50.0, 0.0),
            rec(2, 3, "B", Channel::Tv, 0.0, 20.0),
        ]
    }

    #[test]
    fn test_daily_sorted_and_guarded() {
        let daily = daily_series(&sample());
        assert_eq!(daily.len(), 4);
        assert_eq!(daily[0].period, date(1, 1));
        assert_eq!(daily[3].period, date(2, 3));
        assert_eq!(daily[3].roi, 0.0);
    }

    #[test]
    fn test_weekly_monday_buckets() {
        // Jan 1 and Jan 7 share the week of Monday Jan 1; Jan 9 starts Jan 8
        let weekly = weekly_series(&sample());
        assert_eq!(weekly.len(), 3);
        assert_eq!(weekly[0].period, date(1, 1));
        assert_eq!(weekly[0].spend, 150.0);
        assert_eq!(weekly[1].period, date(1, 8));
    }

    #[test]
    fn test_monthly() {
        let monthly = monthly_series(&sample());
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].period, date(1, 1));
        assert_eq!(monthly[0].net_revenue, 400.0);
        assert_eq!(monthly[1].period, date(2, 1));
    }

    #[test]
    fn test_weekly_channel_spend() {
        let points = weekly_channel_spend(&sample());
        assert_eq!(points.len(), 4);
        assert_eq!((points[0].week, points[0].channel), (date(1, 1), Channel::Tv));
        assert_eq!((points[1].week, points[1].channel), (date(1, 1), Channel::Meta));
    }

    #[test]
    fn test_rolling_roi() {
        let points = rolling_roi(&sample(), 2);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].rolling_roi, 1.0);
        // Jan 1 + Jan 7: 100 / 150
        assert!((points[1].rolling_roi - 100.0 / 150.0).abs() < 1e-12);
        // Jan 7 + Jan 9: 300 / 150
        assert!((points[2].rolling_roi - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        assert!(daily_series(&[]).is_empty());
        assert!(weekly_channel_spend(&[]).is_empty());
        assert!(rolling_roi(&[], 7).is_empty());
    }
}
