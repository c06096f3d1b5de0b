//! Response-curve projections.

use super::{group_by, sort_desc_by, Totals};
use crate::fabric::{marginal_roi, response_revenue, response_roi, saturation_ratio};
use crate::metrics;
use crate::models::{Channel, ChannelParams, DailyRecord};
use serde::Serialize;

/// Number of simulated steps on the portfolio curve.
pub const SATURATION_STEPS: usize = 30;
/// Curve extends to this multiple of current spend.
pub const SATURATION_SPEND_MULTIPLE: f64 = 3.0;

/// One simulated point on the portfolio saturation curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturationPoint {
    /// Step index, 1-based.
    pub step: usize,
    /// Simulated spend.
    pub spend: f64,
    /// Projected revenue.
    pub revenue: f64,
    /// Projected ROI.
    pub roi: f64,
    /// Percent of the revenue ceiling reached.
    pub saturation_pct: f64,
    /// Revenue gained per unit of spend since the previous step.
    pub marginal_roi: f64,
    /// This step matches current spend.
    pub is_current: bool,
}

/// Portfolio saturation curve over `SATURATION_STEPS` spend levels up to
/// three times current spend.
///
/// Revenue follows `max_rev * (1 - e^(-spend / k))` with `k` equal to
/// current spend and `max_rev` chosen so the curve passes through current
/// revenue at current spend. Saturation is non-decreasing in spend.
pub fn portfolio_saturation_curve(records: &[DailyRecord]) -> Vec<SaturationPoint> {
    let totals = Totals::of(records);
    let k = totals.spend;
    if records.is_empty() || k <= 0.0 {
        return Vec::new();
    }

    let ceiling = totals.net_revenue / (1.0 - (-1.0f64).exp());
    let current_step = (SATURATION_STEPS as f64 / SATURATION_SPEND_MULTIPLE).round() as usize;

    let mut points = Vec::with_capacity(SATURATION_STEPS);
    let (mut prev_spend, mut prev_revenue) = (0.0, 0.0);

    for step in 1..=SATURATION_STEPS {
        let spend = k * SATURATION_SPEND_MULTIPLE * step as f64 / SATURATION_STEPS as f64;
        let saturation = 1.0 - (-spend / k).exp();
        let revenue = ceiling * saturation;
        points.push(SaturationPoint {
            step,
            spend,
            revenue,
            roi: metrics::roi(revenue, spend),
            saturation_pct: saturation * 100.0,
            marginal_roi: metrics::ratio(revenue - prev_revenue, spend - prev_spend),
            is_current: step == current_step,
        });
        prev_spend = spend;
        prev_revenue = revenue;
    }

    points
}

/// Number of points on each channel response curve.
pub const RESPONSE_CURVE_POINTS: usize = 25;

/// One point on a channel's modeled response curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCurvePoint {
    /// Channel.
    pub channel: Channel,
    /// Spend level.
    pub spend: f64,
    /// Modeled ROI.
    pub roi: f64,
    /// Modeled revenue.
    pub revenue: f64,
    /// Marginal ROI at this spend.
    pub marginal_roi: f64,
}

/// Modeled response curves for every parameter row, from zero spend to
/// twice the saturation point past the threshold.
pub fn channel_response_curves(params: &[ChannelParams]) -> Vec<ResponseCurvePoint> {
    let mut points = Vec::with_capacity(params.len() * RESPONSE_CURVE_POINTS);
    for p in params {
        let max_spend = p.min_threshold_spend + 2.0 * p.saturation_point_spend;
        let step = max_spend / (RESPONSE_CURVE_POINTS - 1) as f64;
        for i in 0..RESPONSE_CURVE_POINTS {
            let spend = step * i as f64;
            points.push(ResponseCurvePoint {
                channel: p.channel,
                spend,
                roi: response_roi(spend, p),
                revenue: response_revenue(spend, p),
                marginal_roi: marginal_roi(spend, p, step.max(1.0)),
            });
        }
    }
    points
}

/// Where a channel sits on its curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SaturationLevel {
    /// Well below saturation: room to scale.
    #[serde(rename = "Under-invested")]
    UnderInvested,
    /// Productive part of the curve.
    #[serde(rename = "Efficient")]
    Efficient,
    /// Close to the ROI cap.
    #[serde(rename = "Saturated")]
    Saturated,
}

impl SaturationLevel {
    /// Classify a saturation percentage.
    pub fn for_pct(pct: f64) -> Self {
        if pct < 40.0 {
            SaturationLevel::UnderInvested
        } else if pct < 85.0 {
            SaturationLevel::Efficient
        } else {
            SaturationLevel::Saturated
        }
    }
}

/// Current position of one channel on its response curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturationStatusRow {
    /// Channel.
    pub channel: Channel,
    /// Average spend per record.
    pub avg_spend: f64,
    /// Saturation point from the parameter table.
    pub saturation_point_spend: f64,
    /// Percent of the saturation range used.
    pub saturation_pct: f64,
    /// Remaining range, percent.
    pub headroom_pct: f64,
    /// Modeled ROI at average spend.
    pub modeled_roi: f64,
    /// Observed ROI.
    pub observed_roi: f64,
    /// Marginal ROI at average spend.
    pub marginal_roi: f64,
    /// Classification.
    pub level: SaturationLevel,
}

/// Step used when differentiating the response curve.
const MARGINAL_STEP: f64 = 1.0;

/// Saturation status per channel, by saturation descending.
///
/// Channels with no parameter row are skipped.
pub fn saturation_status(records: &[DailyRecord], params: &[ChannelParams]) -> Vec<SaturationStatusRow> {
    let mut rows: Vec<SaturationStatusRow> = group_by(records, |r| Some(r.channel))
        .into_iter()
        .filter_map(|(channel, t)| {
            let p = params.iter().find(|p| p.channel == channel)?;
            let avg_spend = metrics::ratio(t.spend, t.records as f64);
            let saturation_pct = saturation_ratio(avg_spend, p) * 100.0;
            Some(SaturationStatusRow {
                channel,
                avg_spend,
                saturation_point_spend: p.saturation_point_spend,
                saturation_pct,
                headroom_pct: 100.0 - saturation_pct,
                modeled_roi: response_roi(avg_spend, p),
                observed_roi: t.roi(),
                marginal_roi: marginal_roi(avg_spend, p, MARGINAL_STEP),
                level: SaturationLevel::for_pct(saturation_pct),
            })
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.saturation_pct);
    rows
}
