//! Guarded ratio metrics shared by the generator and every transform.
//!
//! A ratio with a zero (or non-finite) denominator resolves to `0.0`.

/// `numerator / denominator`, or `0.0` when the result would not be finite.
#[inline]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Return on investment: revenue per unit of spend.
#[inline]
pub fn roi(net_revenue: f64, spend: f64) -> f64 {
    ratio(net_revenue, spend)
}

/// Cost per thousand impressions.
#[inline]
pub fn cpm(spend: f64, impressions: u64) -> f64 {
    ratio(spend, impressions as f64) * 1000.0
}

/// Average impressions per person reached.
#[inline]
pub fn frequency(impressions: u64, reach: u64) -> f64 {
    ratio(impressions as f64, reach as f64)
}

/// Share of a total as a percentage.
#[inline]
pub fn percent(part: f64, total: f64) -> f64 {
    ratio(part, total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominators() {
        assert_eq!(roi(500.0, 0.0), 0.0);
        assert_eq!(cpm(100.0, 0), 0.0);
        assert_eq!(frequency(1000, 0), 0.0);
        assert_eq!(percent(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_regular_values() {
        assert_eq!(roi(500.0, 100.0), 5.0);
        assert_eq!(cpm(20.0, 4000), 5.0);
        assert_eq!(frequency(900, 300), 3.0);
        assert_eq!(percent(25.0, 200.0), 12.5);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert_eq!(ratio(f64::INFINITY, 1.0), 0.0);
        assert_eq!(ratio(f64::NAN, 2.0), 0.0);
    }
}
