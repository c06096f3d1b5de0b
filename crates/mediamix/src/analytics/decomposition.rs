//! Revenue decomposition and attribution simulations.
//!
//! These are fixed-proportion simulations over observed revenue, not fitted
//! models. Every proportion lives in a named table below.

use super::{group_by, sort_desc_by, Totals};
use crate::metrics;
use crate::models::{Channel, DailyRecord, FunnelStage, MediaType};
use serde::Serialize;

/// Media-contribution components and their share of observed revenue.
pub const MEDIA_CONTRIBUTION_SHARES: [(&str, f64); 4] = [
    ("Base", 0.55),
    ("Media", 0.25),
    ("Promo", 0.12),
    ("Other", 0.08),
];

/// One component of the revenue decomposition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionComponent {
    /// Component name.
    pub component: &'static str,
    /// Revenue attributed to the component.
    pub value: f64,
    /// Share of total revenue, percent.
    pub share_pct: f64,
}

/// Base / media / promo / other split of observed revenue.
pub fn media_contribution(records: &[DailyRecord]) -> Vec<ContributionComponent> {
    if records.is_empty() {
        return Vec::new();
    }
    let revenue = Totals::of(records).net_revenue;
    MEDIA_CONTRIBUTION_SHARES
        .iter()
        .map(|&(component, share)| ContributionComponent {
            component,
            value: revenue * share,
            share_pct: share * 100.0,
        })
        .collect()
}

/// Short- vs long-term revenue for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLongTermRow {
    /// Channel.
    pub channel: Channel,
    /// Revenue realized short term.
    pub short_term: f64,
    /// Revenue realized long term.
    pub long_term: f64,
    /// Total revenue.
    pub total: f64,
    /// Short-term share, percent.
    pub short_term_pct: f64,
    /// Spend.
    pub spend: f64,
    /// Short-term revenue over spend.
    pub short_term_roi: f64,
    /// Total revenue over spend.
    pub total_roi: f64,
}

/// Short/long-term split per channel using each channel's short-term rate,
/// by total revenue descending.
pub fn short_long_term(records: &[DailyRecord]) -> Vec<ShortLongTermRow> {
    let mut rows: Vec<ShortLongTermRow> = group_by(records, |r| Some(r.channel))
        .into_iter()
        .map(|(channel, t)| {
            let rate = channel.profile().short_term_rate;
            let short_term = t.net_revenue * rate;
            ShortLongTermRow {
                channel,
                short_term,
                long_term: t.net_revenue - short_term,
                total: t.net_revenue,
                short_term_pct: rate * 100.0,
                spend: t.spend,
                short_term_roi: metrics::roi(short_term, t.spend),
                total_roi: t.roi(),
            }
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.total);
    rows
}

/// Standard attribution weighting schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributionModel {
    /// All credit skewed to the first touch (awareness).
    #[serde(rename = "First Touch")]
    FirstTouch,
    /// All credit skewed to the last touch (conversion).
    #[serde(rename = "Last Touch")]
    LastTouch,
    /// Equal credit.
    #[serde(rename = "Linear")]
    Linear,
    /// Credit growing towards conversion.
    #[serde(rename = "Time Decay")]
    TimeDecay,
    /// U-shaped: first and last touches weighted up.
    #[serde(rename = "Position Based")]
    PositionBased,
}

impl AttributionModel {
    /// All models.
    pub const ALL: [AttributionModel; 5] = [
        AttributionModel::FirstTouch,
        AttributionModel::LastTouch,
        AttributionModel::Linear,
        AttributionModel::TimeDecay,
        AttributionModel::PositionBased,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            AttributionModel::FirstTouch => "First Touch",
            AttributionModel::LastTouch => "Last Touch",
            AttributionModel::Linear => "Linear",
            AttributionModel::TimeDecay => "Time Decay",
            AttributionModel::PositionBased => "Position Based",
        }
    }

    /// Credit weight per funnel stage: awareness, consideration, conversion.
    pub fn stage_weights(&self) -> [f64; 3] {
        match self {
            AttributionModel::FirstTouch => [1.6, 0.9, 0.5],
            AttributionModel::LastTouch => [0.5, 0.9, 1.6],
            AttributionModel::Linear => [1.0, 1.0, 1.0],
            AttributionModel::TimeDecay => [0.7, 1.0, 1.3],
            AttributionModel::PositionBased => [1.2, 0.6, 1.2],
        }
    }

    /// Weight for a record's stage; unstaged records get neutral weight.
    pub fn weight(&self, stage: Option<FunnelStage>) -> f64 {
        match stage {
            Some(s) => self.stage_weights()[s as usize],
            None => 1.0,
        }
    }
}

/// Credited revenue for one channel under one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionRow {
    /// Model.
    pub model: AttributionModel,
    /// Channel.
    pub channel: Channel,
    /// Credited revenue.
    pub attributed_revenue: f64,
    /// Share of the model's credited revenue, percent.
    pub share_pct: f64,
    /// Credited revenue over spend.
    pub attributed_roi: f64,
}

/// Revenue credited to each channel under every attribution model.
///
/// Weights are applied per record by funnel stage and renormalized so that
/// each model credits exactly the observed total revenue. Rows are grouped
/// by model, channels by first-seen order within each model.
pub fn attribution_models(records: &[DailyRecord]) -> Vec<AttributionRow> {
    let total = Totals::of(records);
    let channels = group_by(records, |r| Some(r.channel));
    let mut rows = Vec::with_capacity(AttributionModel::ALL.len() * channels.len());

    for model in AttributionModel::ALL {
        let mut weighted: Vec<f64> = vec![0.0; channels.len()];
        for r in records {
            if let Some(i) = channels.iter().position(|(c, _)| *c == r.channel) {
                weighted[i] += r.net_revenue * model.weight(r.funnel_stage);
            }
        }
        let weighted_total: f64 = weighted.iter().sum();

        for ((channel, t), w) in channels.iter().zip(&weighted) {
            let credited = metrics::ratio(*w, weighted_total) * total.net_revenue;
            rows.push(AttributionRow {
                model,
                channel: *channel,
                attributed_revenue: credited,
                share_pct: metrics::percent(credited, total.net_revenue),
                attributed_roi: metrics::roi(credited, t.spend),
            });
        }
    }

    rows
}

/// A channel's share of media (non-promo) revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelShareRow {
    /// Channel.
    pub channel: Channel,
    /// Channel revenue.
    pub revenue: f64,
    /// Share of media revenue, percent.
    pub share_pct: f64,
    /// ROI.
    pub roi: f64,
}

/// Per-channel share of media revenue, promotions excluded, by share
/// descending.
pub fn channel_revenue_share(records: &[DailyRecord]) -> Vec<ChannelShareRow> {
    let groups = group_by(records, |r| {
        (r.media_type() != MediaType::Promo).then_some(r.channel)
    });
    let media_revenue: f64 = groups.iter().map(|(_, t)| t.net_revenue).sum();

    let mut rows: Vec<ChannelShareRow> = groups
        .into_iter()
        .map(|(channel, t)| ChannelShareRow {
            channel,
            revenue: t.net_revenue,
            share_pct: metrics::percent(t.net_revenue, media_revenue),
            roi: t.roi(),
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.share_pct);
    rows
}
