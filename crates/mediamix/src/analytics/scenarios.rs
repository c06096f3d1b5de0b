//! Scenario simulations: flighting, budget changes, share of voice and
//! reallocation.

use super::{group_by, sort_desc_by, weekly_series, Totals};
use crate::metrics;
use crate::models::{Channel, DailyRecord};
use crate::rng::PanelRng;
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

/// Spend-timing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FlightingPattern {
    /// Even spend every week.
    #[serde(rename = "Always On")]
    AlwaysOn,
    /// On one week, off the next.
    #[serde(rename = "Alternating")]
    Alternating,
    /// Short heavy bursts.
    #[serde(rename = "Burst")]
    Burst,
    /// Spend tapering down over the period.
    #[serde(rename = "Front Loaded")]
    FrontLoaded,
    /// Spend ramping up over the period.
    #[serde(rename = "Back Loaded")]
    BackLoaded,
}

impl FlightingPattern {
    /// All patterns.
    pub const ALL: [FlightingPattern; 5] = [
        FlightingPattern::AlwaysOn,
        FlightingPattern::Alternating,
        FlightingPattern::Burst,
        FlightingPattern::FrontLoaded,
        FlightingPattern::BackLoaded,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            FlightingPattern::AlwaysOn => "Always On",
            FlightingPattern::Alternating => "Alternating",
            FlightingPattern::Burst => "Burst",
            FlightingPattern::FrontLoaded => "Front Loaded",
            FlightingPattern::BackLoaded => "Back Loaded",
        }
    }

    /// Efficiency multiplier applied to portfolio ROI.
    pub fn efficiency(&self) -> f64 {
        match self {
            FlightingPattern::AlwaysOn => 1.0,
            FlightingPattern::Alternating => 0.92,
            FlightingPattern::Burst => 0.85,
            FlightingPattern::FrontLoaded => 0.95,
            FlightingPattern::BackLoaded => 0.9,
        }
    }

    /// Relative weight of week `i` out of `n`.
    fn week_weight(&self, i: usize, n: usize) -> f64 {
        match self {
            FlightingPattern::AlwaysOn => 1.0,
            FlightingPattern::Alternating => {
                if i % 2 == 0 {
                    1.0
                } else {
                    0.0
                }
            }
            FlightingPattern::Burst => {
                if i % 4 == 0 {
                    1.0
                } else {
                    0.0
                }
            }
            FlightingPattern::FrontLoaded => (n - i) as f64,
            FlightingPattern::BackLoaded => (i + 1) as f64,
        }
    }
}

/// Projected outcome of a flighting pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightingScenario {
    /// Pattern.
    pub pattern: FlightingPattern,
    /// Efficiency multiplier.
    pub efficiency: f64,
    /// Spend (unchanged across patterns).
    pub spend: f64,
    /// Projected ROI.
    pub projected_roi: f64,
    /// Projected revenue.
    pub projected_revenue: f64,
    /// Revenue change against observed, percent.
    pub revenue_delta_pct: f64,
}

/// Every flighting pattern applied to the slice's portfolio ROI.
pub fn flighting_scenarios(records: &[DailyRecord]) -> Vec<FlightingScenario> {
    if records.is_empty() {
        return Vec::new();
    }
    let t = Totals::of(records);
    let base_roi = t.roi();

    FlightingPattern::ALL
        .iter()
        .map(|&pattern| {
            let projected_roi = base_roi * pattern.efficiency();
            let projected_revenue = t.spend * projected_roi;
            FlightingScenario {
                pattern,
                efficiency: pattern.efficiency(),
                spend: t.spend,
                projected_roi,
                projected_revenue,
                revenue_delta_pct: metrics::percent(projected_revenue - t.net_revenue, t.net_revenue),
            }
        })
        .collect()
}

/// Weekly spend under a flighting pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightingWeek {
    /// Pattern.
    pub pattern: FlightingPattern,
    /// Monday of the week.
    pub week: NaiveDate,
    /// Spend placed in the week.
    pub spend: f64,
}

/// Redistribute the slice's total spend over its weeks under each pattern.
///
/// Every pattern places the same total spend.
pub fn flighting_profiles(records: &[DailyRecord]) -> Vec<FlightingWeek> {
    let weeks = weekly_series(records);
    let n = weeks.len();
    let total: f64 = weeks.iter().map(|w| w.spend).sum();
    let mut rows = Vec::with_capacity(n * FlightingPattern::ALL.len());

    for pattern in FlightingPattern::ALL {
        let weights: Vec<f64> = (0..n).map(|i| pattern.week_weight(i, n)).collect();
        let weight_sum: f64 = weights.iter().sum();
        for (week, w) in weeks.iter().zip(&weights) {
            rows.push(FlightingWeek {
                pattern,
                week: week.period,
                spend: total * metrics::ratio(*w, weight_sum),
            });
        }
    }

    rows
}

/// Allocation philosophy for a budget change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BudgetStrategy {
    /// Shift budget to the most efficient channels.
    #[serde(rename = "ROI Maximizing")]
    RoiMaximizing,
    /// Spread budget for reach and volume.
    #[serde(rename = "Volume Maximizing")]
    VolumeMaximizing,
}

impl BudgetStrategy {
    /// All strategies.
    pub const ALL: [BudgetStrategy; 2] = [BudgetStrategy::RoiMaximizing, BudgetStrategy::VolumeMaximizing];

    /// ROI multiplier from allocation at unchanged budget.
    pub fn allocation_bonus(&self) -> f64 {
        match self {
            BudgetStrategy::RoiMaximizing => 1.1,
            BudgetStrategy::VolumeMaximizing => 0.95,
        }
    }

    /// Diminishing-returns exponent applied to the budget ratio.
    pub fn decay(&self) -> f64 {
        match self {
            BudgetStrategy::RoiMaximizing => 0.45,
            BudgetStrategy::VolumeMaximizing => 0.25,
        }
    }
}

/// Budget changes simulated, as fractions of current spend.
pub const BUDGET_CHANGES: [f64; 7] = [-0.30, -0.20, -0.10, 0.0, 0.10, 0.20, 0.30];

/// Projected outcome of a budget change under a strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetScenario {
    /// Strategy.
    pub strategy: BudgetStrategy,
    /// Budget change, percent.
    pub change_pct: f64,
    /// Projected spend.
    pub spend: f64,
    /// Projected ROI.
    pub roi: f64,
    /// Projected revenue.
    pub revenue: f64,
    /// Revenue change against observed.
    pub revenue_delta: f64,
}

/// Budget scenarios for every change and strategy.
///
/// `roi = base_roi * bonus * (1 + change)^(-decay)`.
pub fn budget_scenarios(records: &[DailyRecord]) -> Vec<BudgetScenario> {
    if records.is_empty() {
        return Vec::new();
    }
    let t = Totals::of(records);
    let base_roi = t.roi();
    let mut rows = Vec::with_capacity(BUDGET_CHANGES.len() * BudgetStrategy::ALL.len());

    for strategy in BudgetStrategy::ALL {
        for change in BUDGET_CHANGES {
            let spend = t.spend * (1.0 + change);
            let roi = base_roi * strategy.allocation_bonus() * (1.0 + change).powf(-strategy.decay());
            let revenue = spend * roi;
            rows.push(BudgetScenario {
                strategy,
                change_pct: change * 100.0,
                spend,
                roi,
                revenue,
                revenue_delta: revenue - t.net_revenue,
            });
        }
    }

    rows
}

/// Range of competitor spend relative to the brand's own spend.
const COMPETITOR_SPEND_RANGE: (f64, f64) = (0.6, 1.8);
/// Range of competitor ROI relative to the brand's own ROI.
const COMPETITOR_ROI_RANGE: (f64, f64) = (0.8, 1.2);

/// Share of voice against a synthetic competitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOfVoiceRow {
    /// Brand.
    pub brand: String,
    /// Brand spend.
    pub spend: f64,
    /// Synthetic competitor spend.
    pub competitor_spend: f64,
    /// Brand spend share, percent.
    pub share_of_voice_pct: f64,
    /// Brand revenue share, percent.
    pub market_share_pct: f64,
    /// Share of voice minus market share.
    pub excess_share_of_voice: f64,
}

/// Share of voice vs market share per brand, by spend descending.
///
/// Competitor figures come from a generator keyed by `seed` and brand name,
/// so they do not depend on which other brands are in the slice.
pub fn share_of_voice(records: &[DailyRecord], seed: u64) -> Vec<ShareOfVoiceRow> {
    let mut rows: Vec<ShareOfVoiceRow> = group_by(records, |r| Some(r.brand.clone()))
        .into_iter()
        .map(|(brand, t)| {
            let mut rng = PanelRng::keyed(seed, &brand);
            let competitor_spend = t.spend * rng.gen_range(COMPETITOR_SPEND_RANGE.0..COMPETITOR_SPEND_RANGE.1);
            let competitor_revenue =
                competitor_spend * t.roi() * rng.gen_range(COMPETITOR_ROI_RANGE.0..COMPETITOR_ROI_RANGE.1);
            let sov = metrics::percent(t.spend, t.spend + competitor_spend);
            let som = metrics::percent(t.net_revenue, t.net_revenue + competitor_revenue);
            ShareOfVoiceRow {
                brand,
                spend: t.spend,
                competitor_spend,
                share_of_voice_pct: sov,
                market_share_pct: som,
                excess_share_of_voice: sov - som,
            }
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.spend);
    rows
}

/// Change below which a channel is left as is, percent.
const MAINTAIN_BAND_PCT: f64 = 5.0;
/// Weight of the ROI-proportional target against current allocation.
const REALLOCATION_BLEND: f64 = 0.5;

/// Recommended action for a channel's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReallocationAction {
    /// Add budget.
    Increase,
    /// Keep budget.
    Maintain,
    /// Remove budget.
    Decrease,
}

/// Budget recommendation for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReallocationRow {
    /// Channel.
    pub channel: Channel,
    /// Current spend.
    pub current_spend: f64,
    /// Recommended spend.
    pub recommended_spend: f64,
    /// Change, percent.
    pub change_pct: f64,
    /// Observed ROI.
    pub roi: f64,
    /// Action.
    pub action: ReallocationAction,
}

/// ROI-weighted reallocation at unchanged total budget, by change
/// descending.
///
/// Each channel's target is half its current spend plus half its share of
/// revenue applied to total spend.
pub fn reallocation(records: &[DailyRecord]) -> Vec<ReallocationRow> {
    let total = Totals::of(records);
    let mut rows: Vec<ReallocationRow> = group_by(records, |r| Some(r.channel))
        .into_iter()
        .map(|(channel, t)| {
            let target = total.spend * metrics::ratio(t.net_revenue, total.net_revenue);
            let recommended = (1.0 - REALLOCATION_BLEND) * t.spend + REALLOCATION_BLEND * target;
            let change_pct = metrics::percent(recommended - t.spend, t.spend);
            let action = if change_pct > MAINTAIN_BAND_PCT {
                ReallocationAction::Increase
            } else if change_pct < -MAINTAIN_BAND_PCT {
                ReallocationAction::Decrease
            } else {
                ReallocationAction::Maintain
            };
            ReallocationRow {
                channel,
                current_spend: t.spend,
                recommended_spend: recommended,
                change_pct,
                roi: t.roi(),
                action,
            }
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.change_pct);
    rows
}

#[cfg(test)]
mod tests {
    use super::super::test_support::rec;
    use super::*;

    fn sample() -> Vec<DailyRecord> {
        vec![
            rec(1, 1, "A", Channel::Search, 100.0, 500.0),
            rec(1, 8, "A", Channel::Display, 100.0, 100.0),
            rec(1, 15, "B", Channel::Tv, 200.0, 400.0),
            rec(1, 22, "B", Channel::Meta, 100.0, 200.0),
        ]
    }

    #[test]
    fn test_flighting_scenarios() {
        let rows = flighting_scenarios(&sample());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].pattern, FlightingPattern::AlwaysOn);
        assert_eq!(rows[0].projected_roi, 2.4);
        assert!(rows[1..].iter().all(|r| r.projected_revenue < rows[0].projected_revenue));
        assert!(flighting_scenarios(&[]).is_empty());
    }

    #[test]
    fn test_flighting_profiles_preserve_spend() {
        let rows = flighting_profiles(&sample());
        assert_eq!(rows.len(), 4 * 5);
        for pattern in FlightingPattern::ALL {
            let placed: f64 = rows.iter().filter(|r| r.pattern == pattern).map(|r| r.spend).sum();
            assert!((placed - 500.0).abs() < 1e-9, "{}", pattern.name());
        }
        let burst: Vec<f64> = rows
            .iter()
            .filter(|r| r.pattern == FlightingPattern::Burst)
            .map(|r| r.spend)
            .collect();
        assert_eq!(burst, vec![500.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_budget_scenarios() {
        let rows = budget_scenarios(&sample());
        assert_eq!(rows.len(), 14);
        let roi_max: Vec<&BudgetScenario> = rows
            .iter()
            .filter(|r| r.strategy == BudgetStrategy::RoiMaximizing)
            .collect();
        // ROI falls as budget rises
        assert!(roi_max.windows(2).all(|w| w[0].roi > w[1].roi));
        let flat = roi_max.iter().find(|r| r.change_pct == 0.0).unwrap();
        assert!((flat.roi - 2.4 * 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_share_of_voice_is_stable_per_brand() {
        let full = share_of_voice(&sample(), 42);
        let only_b: Vec<DailyRecord> = sample().into_iter().filter(|r| r.brand == "B").collect();
        let partial = share_of_voice(&only_b, 42);
        let b_full = full.iter().find(|r| r.brand == "B").unwrap();
        assert_eq!(b_full, &partial[0]);
        for row in &full {
            assert!(row.share_of_voice_pct > 0.0 && row.share_of_voice_pct < 100.0);
        }
    }

    #[test]
    fn test_reallocation_preserves_budget() {
        let rows = reallocation(&sample());
        let current: f64 = rows.iter().map(|r| r.current_spend).sum();
        let recommended: f64 = rows.iter().map(|r| r.recommended_spend).sum();
        assert!((current - recommended).abs() < 1e-9);
        assert_eq!(rows[0].channel, Channel::Search);
        assert_eq!(rows[0].action, ReallocationAction::Increase);
        assert_eq!(rows.last().unwrap().channel, Channel::Display);
        assert_eq!(rows.last().unwrap().action, ReallocationAction::Decrease);
    }
}
