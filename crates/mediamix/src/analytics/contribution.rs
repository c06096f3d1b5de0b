//! Dimension contribution views: spend, revenue and ROI per dimension value.

use super::{group_by, sort_asc_by, sort_desc_by, top_n, Totals};
use crate::metrics;
use crate::models::{Channel, CopyLength, DailyRecord, Daypart, MediaType};
use serde::Serialize;

/// Contribution of one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContribution {
    /// Channel.
    pub channel: Channel,
    /// Media type of the channel.
    pub media_type: MediaType,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub nr: f64,
    /// Revenue over spend.
    pub roi: f64,
    /// Summed impressions.
    pub impressions: u64,
    /// Cost per thousand impressions.
    pub cpm: f64,
    /// Share of total spend, percent.
    pub spend_share_pct: f64,
    /// Share of total revenue, percent.
    pub revenue_share_pct: f64,
}

/// Contribution of one value of a string-keyed dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRow {
    /// Dimension value.
    pub name: String,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub nr: f64,
    /// Revenue over spend.
    pub roi: f64,
    /// Summed impressions.
    pub impressions: u64,
    /// Cost per thousand impressions.
    pub cpm: f64,
    /// Share of total spend, percent.
    pub spend_share_pct: f64,
    /// Share of total revenue, percent.
    pub revenue_share_pct: f64,
}

impl ContributionRow {
    fn new(name: String, t: &Totals, total: &Totals) -> Self {
        Self {
            name,
            spend: t.spend,
            nr: t.net_revenue,
            roi: t.roi(),
            impressions: t.impressions,
            cpm: t.cpm(),
            spend_share_pct: metrics::percent(t.spend, total.spend),
            revenue_share_pct: metrics::percent(t.net_revenue, total.net_revenue),
        }
    }
}

/// Group by a string key, rows sorted by spend descending.
fn by_spend<F>(records: &[DailyRecord], key: F) -> Vec<ContributionRow>
where
    F: Fn(&DailyRecord) -> Option<String>,
{
    let total = Totals::of(records);
    let mut rows: Vec<ContributionRow> = group_by(records, key)
        .into_iter()
        .map(|(name, t)| ContributionRow::new(name, &t, &total))
        .collect();
    sort_desc_by(&mut rows, |r| r.spend);
    rows
}

/// Group by an ordered key, rows in key order.
fn by_order<K, F>(records: &[DailyRecord], key: F, label: impl Fn(&K) -> String) -> Vec<ContributionRow>
where
    K: Ord + std::hash::Hash + Clone,
    F: Fn(&DailyRecord) -> Option<K>,
{
    let total = Totals::of(records);
    let mut groups = group_by(records, key);
    sort_asc_by(&mut groups, |(k, _)| k.clone());
    groups
        .iter()
        .map(|(k, t)| ContributionRow::new(label(k), t, &total))
        .collect()
}

/// Per-channel contribution, by spend descending.
///
/// Summed row spend always equals the slice's total spend.
pub fn channel_contribution(records: &[DailyRecord]) -> Vec<ChannelContribution> {
    let total = Totals::of(records);
    let mut rows: Vec<ChannelContribution> = group_by(records, |r| Some(r.channel))
        .into_iter()
        .map(|(channel, t)| ChannelContribution {
            channel,
            media_type: channel.media_type(),
            spend: t.spend,
            nr: t.net_revenue,
            roi: t.roi(),
            impressions: t.impressions,
            cpm: t.cpm(),
            spend_share_pct: metrics::percent(t.spend, total.spend),
            revenue_share_pct: metrics::percent(t.net_revenue, total.net_revenue),
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.spend);
    rows
}

/// Per-brand contribution, by spend descending.
pub fn brand_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_spend(records, |r| Some(r.brand.clone()))
}

/// Per-market contribution, by spend descending.
pub fn market_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_spend(records, |r| Some(r.market.clone()))
}

/// Per-market-group contribution, by spend descending.
pub fn market_group_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_spend(records, |r| Some(r.market_group.name().to_string()))
}

/// Per-publisher contribution, by spend descending.
pub fn publisher_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_spend(records, |r| r.publisher.clone())
}

/// Per-format contribution, by spend descending.
pub fn format_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_spend(records, |r| r.format.clone())
}

/// Per-buying-type contribution, by spend descending.
pub fn buying_type_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_spend(records, |r| r.buying_type.map(|b| b.name().to_string()))
}

/// Per-copy-length contribution, short to long.
pub fn copy_length_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    let rank = |c: CopyLength| CopyLength::ALL.iter().position(|x| *x == c).unwrap_or(0);
    by_order(
        records,
        |r| r.copy_length.map(rank),
        |i| CopyLength::ALL[*i].name().to_string(),
    )
}

/// Per-daypart contribution, in broadcast-day order.
pub fn daypart_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    let rank = |d: Daypart| Daypart::ALL.iter().position(|x| *x == d).unwrap_or(0);
    by_order(
        records,
        |r| r.daypart.map(rank),
        |i| Daypart::ALL[*i].name().to_string(),
    )
}

/// Per-hour-bucket contribution, labelled `"HH:00"`, in hour order.
pub fn hour_bucket_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_order(records, |r| r.hour_bucket, |h| format!("{:02}:00", h))
}

/// Day-of-week names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Per-day-of-week contribution, Monday first.
pub fn day_of_week_contribution(records: &[DailyRecord]) -> Vec<ContributionRow> {
    by_order(
        records,
        |r| Some(r.day_of_week.min(6)),
        |d| WEEKDAY_NAMES[*d as usize].to_string(),
    )
}

/// Top campaigns by net revenue.
pub fn campaign_contribution(records: &[DailyRecord], n: usize) -> Vec<ContributionRow> {
    let mut rows = by_spend(records, |r| r.campaign.clone());
    sort_desc_by(&mut rows, |r| r.nr);
    top_n(rows, n)
}
