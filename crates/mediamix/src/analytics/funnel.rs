//! Funnel and targeting views.

use super::{group_by, sort_asc_by, sort_desc_by, Totals};
use crate::metrics;
use crate::models::{DailyRecord, FunnelStage, TargetingType};
use chrono::NaiveDate;
use serde::Serialize;

/// Weekly totals for one funnel stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelWeekPoint {
    /// Monday of the week.
    pub week: NaiveDate,
    /// Stage.
    pub stage: FunnelStage,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
    /// ROI.
    pub roi: f64,
}

/// Weekly series per funnel stage, ordered by week then funnel order.
pub fn funnel_weekly(records: &[DailyRecord]) -> Vec<FunnelWeekPoint> {
    let mut points: Vec<FunnelWeekPoint> =
        group_by(records, |r| r.funnel_stage.map(|s| (r.week_start(), s)))
            .into_iter()
            .map(|((week, stage), t)| FunnelWeekPoint {
                week,
                stage,
                spend: t.spend,
                net_revenue: t.net_revenue,
                roi: t.roi(),
            })
            .collect();
    sort_asc_by(&mut points, |p| (p.week, p.stage));
    points
}

/// Budget share of one funnel stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelShareRow {
    /// Stage.
    pub stage: FunnelStage,
    /// Summed spend.
    pub spend: f64,
    /// Share of staged spend, percent.
    pub share_pct: f64,
    /// ROI.
    pub roi: f64,
}

/// Spend share by funnel stage, in funnel order.
pub fn funnel_budget_share(records: &[DailyRecord]) -> Vec<FunnelShareRow> {
    let mut groups = group_by(records, |r| r.funnel_stage);
    let staged: f64 = groups.iter().map(|(_, t)| t.spend).sum();
    sort_asc_by(&mut groups, |(s, _)| *s);

    groups
        .into_iter()
        .map(|(stage, t)| FunnelShareRow {
            stage,
            spend: t.spend,
            share_pct: metrics::percent(t.spend, staged),
            roi: t.roi(),
        })
        .collect()
}

/// Base conversion rate per stage before efficiency scaling.
pub const BASE_STAGE_RATES: [f64; 3] = [0.35, 0.20, 0.08];

/// One step of the conversion flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStage {
    /// Stage.
    pub stage: FunnelStage,
    /// People entering the stage.
    pub entering: f64,
    /// People passing the stage.
    pub converted: f64,
    /// Stage conversion rate, percent.
    pub conversion_rate_pct: f64,
    /// People lost at the stage.
    pub drop_off: f64,
}

/// Sequential three-stage conversion flow.
///
/// The pool starts at the slice's total reach. Each stage's rate is its base
/// rate scaled by the stage's ROI relative to portfolio ROI (a stage without
/// records keeps its base rate), capped at 1. Each stage's converted count is
/// the next stage's entering pool.
pub fn conversion_flow(records: &[DailyRecord]) -> Vec<ConversionStage> {
    if records.is_empty() {
        return Vec::new();
    }
    let portfolio_roi = Totals::of(records).roi();
    let stages = group_by(records, |r| r.funnel_stage);

    let mut pool = Totals::of(records).reach as f64;
    let mut flow = Vec::with_capacity(FunnelStage::ALL.len());

    for (i, stage) in FunnelStage::ALL.iter().enumerate() {
        let efficiency = match stages.iter().find(|(s, _)| s == stage) {
            Some((_, t)) => metrics::ratio(t.roi(), portfolio_roi),
            None => 1.0,
        };
        let rate = (BASE_STAGE_RATES[i] * efficiency).clamp(0.0, 1.0);
        let converted = pool * rate;
        flow.push(ConversionStage {
            stage: *stage,
            entering: pool,
            converted,
            conversion_rate_pct: rate * 100.0,
            drop_off: pool - converted,
        });
        pool = converted;
    }

    flow
}

/// Performance of one targeting type against the Broad baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingRow {
    /// Targeting type.
    pub targeting: TargetingType,
    /// Whether the audience is first-party.
    pub first_party: bool,
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
    /// ROI.
    pub roi: f64,
    /// `(roi / broad_roi - 1) * 100`; 0 without a Broad baseline.
    pub lift_pct: f64,
}

/// Targeting performance with lift over Broad, by ROI descending.
pub fn targeting_lift(records: &[DailyRecord]) -> Vec<TargetingRow> {
    let groups = group_by(records, |r| r.targeting_type);
    let broad_roi = groups
        .iter()
        .find(|(t, _)| *t == TargetingType::Broad)
        .map(|(_, t)| t.roi())
        .unwrap_or(0.0);

    let mut rows: Vec<TargetingRow> = groups
        .into_iter()
        .map(|(targeting, t)| {
            let lift_pct = if broad_roi > 0.0 {
                (metrics::ratio(t.roi(), broad_roi) - 1.0) * 100.0
            } else {
                0.0
            };
            TargetingRow {
                targeting,
                first_party: targeting.is_first_party(),
                spend: t.spend,
                net_revenue: t.net_revenue,
                roi: t.roi(),
                lift_pct,
            }
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.roi);
    rows
}
