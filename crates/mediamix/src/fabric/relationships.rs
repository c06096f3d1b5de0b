//! Relationship matrix builders.
//!
//! Both matrices are exhaustive (every pair present), drawn from dedicated
//! random streams and independent of any filtering state.

use super::panel_gen::{HALO_STREAM, SYNERGY_STREAM};
use crate::models::{Channel, ChannelSynergyEntry, HaloMatrixEntry, BRANDS};
use crate::rng::PanelRng;
use rand::Rng;

/// Halo strength range for brands in the same category.
const RELATED_HALO: (f64, f64) = (0.08, 0.30);
/// Halo strength range for unrelated brands (may be negative).
const UNRELATED_HALO: (f64, f64) = (-0.10, 0.08);

/// Base synergy lift for a channel pair.
const SYNERGY_BASE: f64 = 1.05;
/// Extra lift when either channel is television-like.
const TV_SYNERGY_BONUS: f64 = 0.15;
/// Jitter range added to the base lift.
const SYNERGY_JITTER: (f64, f64) = (-0.08, 0.20);

/// Build the directed brand-pair halo matrix (self-pairs excluded).
pub fn build_halo_matrix(seed: u64) -> Vec<HaloMatrixEntry> {
    let mut rng = PanelRng::with_stream(seed, HALO_STREAM);
    let mut entries = Vec::with_capacity(BRANDS.len() * BRANDS.len().saturating_sub(1));

    for source in BRANDS.iter() {
        for target in BRANDS.iter() {
            if source.name == target.name {
                continue;
            }
            let (lo, hi) = if source.is_related(target) {
                RELATED_HALO
            } else {
                UNRELATED_HALO
            };
            entries.push(HaloMatrixEntry {
                source_brand: source.name.to_string(),
                target_brand: target.name.to_string(),
                strength: round3(rng.gen_range(lo..hi)),
            });
        }
    }

    entries
}

/// Build the unordered channel-pair synergy matrix.
pub fn build_synergy_matrix(seed: u64) -> Vec<ChannelSynergyEntry> {
    let mut rng = PanelRng::with_stream(seed, SYNERGY_STREAM);
    let n = Channel::ALL.len();
    let mut entries = Vec::with_capacity(n * (n - 1) / 2);

    for (i, &a) in Channel::ALL.iter().enumerate() {
        for &b in &Channel::ALL[i + 1..] {
            let mut base = SYNERGY_BASE;
            if a.is_tv_like() || b.is_tv_like() {
                base += TV_SYNERGY_BONUS;
            }
            let (lo, hi) = SYNERGY_JITTER;
            entries.push(ChannelSynergyEntry {
                channel_a: a,
                channel_b: b,
                strength: round3(base + rng.gen_range(lo..hi)),
            });
        }
    }

    entries
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BrandProfile;
    use std::collections::HashSet;

    #[test]
    fn test_halo_exhaustive_without_self_pairs() {
        let halo = build_halo_matrix(42);
        assert_eq!(halo.len(), 8 * 7);
        assert!(halo.iter().all(|e| e.source_brand != e.target_brand));

        let pairs: HashSet<(&str, &str)> = halo
            .iter()
            .map(|e| (e.source_brand.as_str(), e.target_brand.as_str()))
            .collect();
        assert_eq!(pairs.len(), halo.len());
    }

    #[test]
    fn test_halo_ranges() {
        for e in build_halo_matrix(42) {
            let source = BrandProfile::find(&e.source_brand).unwrap();
            let target = BrandProfile::find(&e.target_brand).unwrap();
            if source.is_related(target) {
                assert!(e.strength >= 0.08 && e.strength <= 0.30);
            } else {
                assert!(e.strength >= -0.10 && e.strength <= 0.08);
            }
        }
    }

    #[test]
    fn test_synergy_unordered_and_exhaustive() {
        let synergy = build_synergy_matrix(42);
        assert_eq!(synergy.len(), 66);
        for &a in Channel::ALL.iter() {
            for &b in Channel::ALL.iter() {
                if a != b {
                    let count = synergy.iter().filter(|e| e.matches(a, b)).count();
                    assert_eq!(count, 1, "{} / {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_tv_pairs_lift_more_on_average() {
        let synergy = build_synergy_matrix(42);
        let mean = |tv: bool| {
            let values: Vec<f64> = synergy
                .iter()
                .filter(|e| (e.channel_a.is_tv_like() || e.channel_b.is_tv_like()) == tv)
                .map(|e| e.strength)
                .collect();
            values.iter().sum::<f64>() / values.len() as f64
        };
        assert!(mean(true) > mean(false));
        assert!(synergy.iter().all(|e| e.strength > 0.9 && e.strength < 1.45));
    }

    #[test]
    fn test_matrices_deterministic() {
        assert_eq!(build_halo_matrix(3), build_halo_matrix(3));
        assert_eq!(build_synergy_matrix(3), build_synergy_matrix(3));
    }
}
