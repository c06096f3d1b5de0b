//! Delivery quality and reach views.

use super::{group_by, sort_desc_by};
use crate::metrics;
use crate::models::{Channel, DailyRecord};
use serde::Serialize;

/// Impression-weighted viewability and completion for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryQualityRow {
    /// Channel.
    pub channel: Channel,
    /// Impressions on records carrying a quality metric.
    pub impressions: u64,
    /// Weighted viewability, if the channel measures it.
    pub viewability: Option<f64>,
    /// Weighted video completion, if the channel measures it.
    pub video_completion: Option<f64>,
    /// Estimated viewable impressions.
    pub viewable_impressions: u64,
}

#[derive(Default)]
struct QualitySums {
    impressions: u64,
    view_weight: f64,
    view_impressions: f64,
    completion_weight: f64,
    completion_impressions: f64,
}

/// Viewability and video completion by channel, by viewability descending.
///
/// Only channels with at least one quality-carrying record appear.
pub fn delivery_quality(records: &[DailyRecord]) -> Vec<DeliveryQualityRow> {
    let mut sums: Vec<(Channel, QualitySums)> = Vec::new();

    for r in records {
        if r.viewability.is_none() && r.video_completion.is_none() {
            continue;
        }
        let slot = match sums.iter().position(|(c, _)| *c == r.channel) {
            Some(i) => i,
            None => {
                sums.push((r.channel, QualitySums::default()));
                sums.len() - 1
            }
        };
        let s = &mut sums[slot].1;
        let imps = r.impressions as f64;
        s.impressions += r.impressions;
        if let Some(v) = r.viewability {
            s.view_weight += v * imps;
            s.view_impressions += imps;
        }
        if let Some(c) = r.video_completion {
            s.completion_weight += c * imps;
            s.completion_impressions += imps;
        }
    }

    let mut rows: Vec<DeliveryQualityRow> = sums
        .into_iter()
        .map(|(channel, s)| {
            let profile = channel.profile();
            let viewability = profile
                .supports_viewability
                .then(|| metrics::ratio(s.view_weight, s.view_impressions));
            let video_completion = profile
                .supports_video_completion
                .then(|| metrics::ratio(s.completion_weight, s.completion_impressions));
            DeliveryQualityRow {
                channel,
                impressions: s.impressions,
                viewability,
                video_completion,
                viewable_impressions: s.view_weight.round() as u64,
            }
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.viewability.unwrap_or(0.0));
    rows
}

/// Reach and frequency for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachFrequencyRow {
    /// Channel.
    pub channel: Channel,
    /// Summed spend.
    pub spend: f64,
    /// Summed impressions.
    pub impressions: u64,
    /// Summed reach.
    pub reach: u64,
    /// Impressions per person reached.
    pub frequency: f64,
    /// Cost per thousand impressions.
    pub cpm: f64,
    /// Cost per thousand people reached.
    pub cost_per_thousand_reached: f64,
}

/// Reach, frequency and cost metrics by channel, by reach descending.
pub fn reach_frequency(records: &[DailyRecord]) -> Vec<ReachFrequencyRow> {
    let mut rows: Vec<ReachFrequencyRow> = group_by(records, |r| Some(r.channel))
        .into_iter()
        .map(|(channel, t)| ReachFrequencyRow {
            channel,
            spend: t.spend,
            impressions: t.impressions,
            reach: t.reach,
            frequency: t.frequency(),
            cpm: t.cpm(),
            cost_per_thousand_reached: metrics::ratio(t.spend, t.reach as f64) * 1000.0,
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.reach as f64);
    rows
}

#[cfg(test)]
mod tests {
    use super::super::test_support::rec;
    use super::*;

    #[test]
    fn test_quality_is_impression_weighted() {
        let mut a = rec(1, 1, "A", Channel::YouTube, 10.0, 0.0).with_delivery(1000, 500);
        a.viewability = Some(0.8);
        a.video_completion = Some(0.5);
        let mut b = rec(1, 2, "A", Channel::YouTube, 10.0, 0.0).with_delivery(3000, 500);
        b.viewability = Some(0.4);
        b.video_completion = Some(0.9);
        let c = rec(1, 2, "A", Channel::Tv, 10.0, 0.0).with_delivery(3000, 500);

        let rows = delivery_quality(&[a, b, c]);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].viewability.unwrap() - 0.5).abs() < 1e-12);
        assert!((rows[0].video_completion.unwrap() - 0.8).abs() < 1e-12);
        assert_eq!(rows[0].viewable_impressions, 2000);
    }

    #[test]
    fn test_reach_frequency() {
        let records = vec![
            rec(1, 1, "A", Channel::Meta, 50.0, 0.0).with_delivery(10_000, 4000),
            rec(1, 1, "A", Channel::Search, 0.0, 0.0),
        ];
        let rows = reach_frequency(&records);
        assert_eq!(rows[0].channel, Channel::Meta);
        assert_eq!(rows[0].frequency, 2.5);
        assert_eq!(rows[0].cpm, 5.0);
        assert_eq!(rows[0].cost_per_thousand_reached, 12.5);
        assert_eq!(rows[1].cpm, 0.0);
        assert_eq!(rows[1].frequency, 0.0);
    }
}
