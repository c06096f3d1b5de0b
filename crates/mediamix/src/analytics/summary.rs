//! Portfolio summaries.

use super::{group_by, Totals};
use crate::metrics;
use crate::models::{Channel, DailyRecord, MediaType};
use serde::Serialize;
use std::collections::HashSet;

/// Headline KPIs over the filtered slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Total spend.
    pub spend: f64,
    /// Total net revenue.
    pub net_revenue: f64,
    /// Portfolio ROI.
    pub roi: f64,
    /// Total impressions.
    pub impressions: u64,
    /// Total reach.
    pub reach: u64,
    /// Portfolio CPM.
    pub cpm: f64,
    /// Impressions per person reached.
    pub frequency: f64,
    /// Distinct days with at least one record.
    pub active_days: usize,
    /// Record count.
    pub records: usize,
}

/// Headline KPIs, `None` for an empty slice.
pub fn kpi_summary(records: &[DailyRecord]) -> Option<KpiSummary> {
    if records.is_empty() {
        return None;
    }
    let t = Totals::of(records);
    let days: HashSet<_> = records.iter().map(|r| r.date).collect();

    Some(KpiSummary {
        spend: t.spend,
        net_revenue: t.net_revenue,
        roi: t.roi(),
        impressions: t.impressions,
        reach: t.reach,
        cpm: t.cpm(),
        frequency: t.frequency(),
        active_days: days.len(),
        records: t.records,
    })
}

/// One cell of the brand x channel grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandChannelCell {
    /// Brand.
    pub brand: String,
    /// Channel.
    pub channel: Channel,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
    /// ROI of the cell.
    pub roi: f64,
}

/// ROI grid over every (brand, channel) pair present, brand first-seen order
/// then channel table order.
pub fn brand_channel_grid(records: &[DailyRecord]) -> Vec<BrandChannelCell> {
    let mut brands: Vec<&str> = Vec::new();
    for r in records {
        if !brands.contains(&r.brand.as_str()) {
            brands.push(&r.brand);
        }
    }

    let groups = group_by(records, |r| Some((r.brand.clone(), r.channel)));
    let mut cells: Vec<BrandChannelCell> = groups
        .into_iter()
        .map(|((brand, channel), t)| BrandChannelCell {
            brand,
            channel,
            spend: t.spend,
            net_revenue: t.net_revenue,
            roi: t.roi(),
        })
        .collect();

    cells.sort_by_key(|c| {
        let brand_rank = brands.iter().position(|b| *b == c.brand).unwrap_or(usize::MAX);
        (brand_rank, c.channel)
    });
    cells
}

/// Spend and revenue for one media type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeRow {
    /// Media type.
    pub media_type: MediaType,
    /// Display label.
    pub label: &'static str,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
    /// ROI.
    pub roi: f64,
    /// Share of total spend, percent.
    pub spend_share_pct: f64,
}

/// Retail / consumer / promo split in [`MediaType::ALL`] order.
pub fn media_type_split(records: &[DailyRecord]) -> Vec<MediaTypeRow> {
    let total = Totals::of(records);
    let groups = group_by(records, |r| Some(r.media_type()));

    MediaType::ALL
        .iter()
        .filter_map(|mt| groups.iter().find(|(k, _)| k == mt))
        .map(|(mt, t)| MediaTypeRow {
            media_type: *mt,
            label: mt.name(),
            spend: t.spend,
            net_revenue: t.net_revenue,
            roi: t.roi(),
            spend_share_pct: metrics::percent(t.spend, total.spend),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::rec;
    use super::*;

    fn sample() -> Vec<DailyRecord> {
        vec![
            rec(1, 1, "B", Channel::Meta, 100.0, 300.0).with_delivery(20_000, 10_000),
            rec(1, 2, "A", Channel::AmazonAds, 100.0, 400.0).with_delivery(30_000, 10_000),
            rec(1, 2, "B", Channel::Tv, 200.0, 300.0),
            rec(1, 2, "B", Channel::Meta, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_kpi_summary() {
        let kpi = kpi_summary(&sample()).unwrap();
        assert_eq!(kpi.spend, 400.0);
        assert_eq!(kpi.roi, 2.5);
        assert_eq!(kpi.cpm, 8.0);
        assert_eq!(kpi.frequency, 2.5);
        assert_eq!(kpi.active_days, 2);
        assert_eq!(kpi.records, 4);
        assert!(kpi_summary(&[]).is_none());
    }

    #[test]
    fn test_grid_order() {
        let grid = brand_channel_grid(&sample());
        assert_eq!(grid.len(), 3);
        assert_eq!((grid[0].brand.as_str(), grid[0].channel), ("B", Channel::Tv));
        assert_eq!((grid[1].brand.as_str(), grid[1].channel), ("B", Channel::Meta));
        assert_eq!(grid[1].roi, 3.0);
        assert_eq!(grid[2].brand, "A");
    }

    #[test]
    fn test_media_type_split() {
        let split = media_type_split(&sample());
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].media_type, MediaType::Consumer);
        assert_eq!(split[0].spend_share_pct, 75.0);
        assert_eq!(split[1].media_type, MediaType::Retail);
        assert_eq!(split[1].roi, 4.0);
        assert!(media_type_split(&[]).is_empty());
    }
}
