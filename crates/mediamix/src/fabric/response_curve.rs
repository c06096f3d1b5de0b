//! Diminishing-returns response curve.
//!
//! ROI rises from `max_marginal_roi` at the spend threshold towards the
//! `max_roi` cap, closing ~95% of the gap once effective spend reaches the
//! saturation point:
//!
//! ```text
//! effective = max(0, spend - min_threshold_spend)
//! x         = min(1, effective / saturation_point_spend)
//! roi       = max_roi - (max_roi - max_marginal_roi) * e^(-3x)
//! ```

use crate::metrics;
use crate::models::ChannelParams;

/// Exponent scale controlling how fast the curve approaches saturation.
pub const SATURATION_STEEPNESS: f64 = 3.0;

/// Position on the curve in [0, 1]: effective spend over the saturation point.
pub fn saturation_ratio(spend: f64, params: &ChannelParams) -> f64 {
    let effective = (spend - params.min_threshold_spend).max(0.0);
    metrics::ratio(effective, params.saturation_point_spend).clamp(0.0, 1.0)
}

/// Modeled ROI at a spend level, floored at 0.
pub fn response_roi(spend: f64, params: &ChannelParams) -> f64 {
    let x = saturation_ratio(spend, params);
    let gap = params.max_roi - params.max_marginal_roi;
    (params.max_roi - gap * (-SATURATION_STEEPNESS * x).exp()).max(0.0)
}

/// Modeled revenue at a spend level.
pub fn response_revenue(spend: f64, params: &ChannelParams) -> f64 {
    spend.max(0.0) * response_roi(spend, params)
}

/// Incremental revenue per unit of extra spend, from a forward difference.
pub fn marginal_roi(spend: f64, params: &ChannelParams, step: f64) -> f64 {
    if step <= 0.0 {
        return 0.0;
    }
    let before = response_revenue(spend, params);
    let after = response_revenue(spend + step, params);
    metrics::ratio(after - before, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;

    fn params() -> ChannelParams {
        ChannelParams::new(Channel::Meta, Some(3.0), 100.0, 1.5, 3.5, 1000.0).unwrap()
    }

    #[test]
    fn test_threshold_gives_marginal_roi() {
        let p = params();
        assert!((response_roi(0.0, &p) - 1.5).abs() < 1e-12);
        assert!((response_roi(100.0, &p) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_saturation_closes_95_percent() {
        let p = params();
        let roi = response_roi(1100.0, &p);
        let closed = (roi - 1.5) / (3.5 - 1.5);
        assert!((closed - (1.0 - (-3.0f64).exp())).abs() < 1e-12);
        assert!(closed > 0.95);
    }

    #[test]
    fn test_capped_beyond_saturation() {
        let p = params();
        assert_eq!(response_roi(1100.0, &p), response_roi(50_000.0, &p));
        assert_eq!(saturation_ratio(50_000.0, &p), 1.0);
    }

    #[test]
    fn test_monotone_in_spend() {
        let p = params();
        let mut prev = response_roi(0.0, &p);
        for i in 1..200 {
            let roi = response_roi(i as f64 * 10.0, &p);
            assert!(roi >= prev);
            prev = roi;
        }
    }

    #[test]
    fn test_floor_at_zero() {
        let p = ChannelParams {
            channel: Channel::Display,
            half_life: None,
            min_threshold_spend: 0.0,
            max_marginal_roi: -2.0,
            max_roi: -1.0,
            saturation_point_spend: 10.0,
        };
        assert_eq!(response_roi(5.0, &p), 0.0);
    }

    #[test]
    fn test_marginal_roi_positive_below_saturation() {
        let p = params();
        assert!(marginal_roi(500.0, &p, 1.0) > 0.0);
        assert_eq!(marginal_roi(500.0, &p, 0.0), 0.0);
    }
}
