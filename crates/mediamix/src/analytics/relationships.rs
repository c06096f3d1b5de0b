//! Views over the halo and synergy matrices.

use super::{group_by, sort_desc_by};
use crate::models::{Channel, ChannelSynergyEntry, DailyRecord, HaloMatrixEntry};
use serde::Serialize;

/// Synergy entry with its lift.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyRow {
    /// First channel.
    pub channel_a: Channel,
    /// Second channel.
    pub channel_b: Channel,
    /// Lift factor.
    pub strength: f64,
    /// `(strength - 1) * 100`; negative when the factor is below 1.
    pub lift_pct: f64,
}

/// Synergy matrix sorted by strength descending.
pub fn synergy_view(matrix: &[ChannelSynergyEntry]) -> Vec<SynergyRow> {
    let mut rows: Vec<SynergyRow> = matrix
        .iter()
        .map(|e| SynergyRow {
            channel_a: e.channel_a,
            channel_b: e.channel_b,
            strength: e.strength,
            lift_pct: e.lift_pct(),
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.strength);
    rows
}

/// Halo entry with its effect as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HaloRow {
    /// Brand creating the effect.
    pub source_brand: String,
    /// Brand receiving the effect.
    pub target_brand: String,
    /// Signed strength.
    pub strength: f64,
    /// `strength * 100`.
    pub effect_pct: f64,
}

/// Halo matrix sorted by strength descending, optionally restricted to one
/// target brand.
pub fn halo_view(matrix: &[HaloMatrixEntry], target: Option<&str>) -> Vec<HaloRow> {
    let mut rows: Vec<HaloRow> = matrix
        .iter()
        .filter(|e| target.map_or(true, |t| e.target_brand == t))
        .map(|e| HaloRow {
            source_brand: e.source_brand.clone(),
            target_brand: e.target_brand.clone(),
            strength: e.strength,
            effect_pct: e.strength * 100.0,
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.strength);
    rows
}

/// Revenue one brand's activity spills onto another.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HaloImpactRow {
    /// Brand creating the effect.
    pub source_brand: String,
    /// Brand receiving the effect.
    pub target_brand: String,
    /// Signed strength.
    pub strength: f64,
    /// Source brand's revenue in the slice.
    pub source_revenue: f64,
    /// `source_revenue * strength`.
    pub halo_revenue: f64,
}

/// Halo revenue for every source brand present in the slice, by halo
/// revenue descending.
pub fn halo_revenue_impact(records: &[DailyRecord], matrix: &[HaloMatrixEntry]) -> Vec<HaloImpactRow> {
    let brands = group_by(records, |r| Some(r.brand.clone()));

    let mut rows: Vec<HaloImpactRow> = brands
        .iter()
        .flat_map(|(brand, t)| {
            matrix
                .iter()
                .filter(move |e| &e.source_brand == brand)
                .map(move |e| HaloImpactRow {
                    source_brand: e.source_brand.clone(),
                    target_brand: e.target_brand.clone(),
                    strength: e.strength,
                    source_revenue: t.net_revenue,
                    halo_revenue: t.net_revenue * e.strength,
                })
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.halo_revenue);
    rows
}

/// Incremental revenue attributed to running two channels together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyImpactRow {
    /// First channel.
    pub channel_a: Channel,
    /// Second channel.
    pub channel_b: Channel,
    /// Lift factor.
    pub strength: f64,
    /// Lift percentage.
    pub lift_pct: f64,
    /// Revenue of both channels combined.
    pub combined_revenue: f64,
    /// `combined_revenue * (strength - 1)`.
    pub incremental_revenue: f64,
}

/// Synergy impact for every pair of channels with spend in the slice, by
/// incremental revenue descending.
pub fn synergy_impact(records: &[DailyRecord], matrix: &[ChannelSynergyEntry]) -> Vec<SynergyImpactRow> {
    let active: Vec<(Channel, f64)> = group_by(records, |r| Some(r.channel))
        .into_iter()
        .filter(|(_, t)| t.spend > 0.0)
        .map(|(c, t)| (c, t.net_revenue))
        .collect();
    let revenue_of = |c: Channel| {
        active
            .iter()
            .find(|(a, _)| *a == c)
            .map(|(_, rev)| *rev)
    };

    let mut rows: Vec<SynergyImpactRow> = matrix
        .iter()
        .filter_map(|e| {
            let combined = revenue_of(e.channel_a)? + revenue_of(e.channel_b)?;
            Some(SynergyImpactRow {
                channel_a: e.channel_a,
                channel_b: e.channel_b,
                strength: e.strength,
                lift_pct: e.lift_pct(),
                combined_revenue: combined,
                incremental_revenue: combined * (e.strength - 1.0),
            })
        })
        .collect();
    sort_desc_by(&mut rows, |r| r.incremental_revenue);
    rows
}

#[cfg(test)]
mod tests {
    use super::super::test_support::rec;
    use super::*;

    fn synergy() -> Vec<ChannelSynergyEntry> {
        vec![
            ChannelSynergyEntry { channel_a: Channel::Tv, channel_b: Channel::Meta, strength: 1.2 },
            ChannelSynergyEntry { channel_a: Channel::Meta, channel_b: Channel::Search, strength: 0.98 },
            ChannelSynergyEntry { channel_a: Channel::Tv, channel_b: Channel::Search, strength: 1.3 },
        ]
    }

    fn halo() -> Vec<HaloMatrixEntry> {
        let entry = |s: &str, t: &str, strength| HaloMatrixEntry {
            source_brand: s.into(),
            target_brand: t.into(),
            strength,
        };
        vec![entry("A", "B", 0.2), entry("B", "A", -0.05), entry("C", "A", 0.1)]
    }

    #[test]
    fn test_synergy_view_sorted_with_negative_lift() {
        let rows = synergy_view(&synergy());
        assert_eq!(rows[0].strength, 1.3);
        assert!((rows[2].lift_pct + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_halo_view_target_filter() {
        let rows = halo_view(&halo(), Some("A"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_brand, "C");
        assert_eq!(halo_view(&halo(), None).len(), 3);
        assert!(halo_view(&halo(), Some("Z")).is_empty());
    }

    #[test]
    fn test_halo_revenue_impact() {
        let records = vec![
            rec(1, 1, "A", Channel::Meta, 10.0, 1000.0),
            rec(1, 1, "B", Channel::Meta, 10.0, 400.0),
        ];
        let rows = halo_revenue_impact(&records, &halo());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_brand, "A");
        assert!((rows[0].halo_revenue - 200.0).abs() < 1e-9);
        assert!((rows[1].halo_revenue + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_synergy_impact_active_pairs_only() {
        let records = vec![
            rec(1, 1, "A", Channel::Tv, 10.0, 100.0),
            rec(1, 1, "A", Channel::Meta, 10.0, 300.0),
            rec(1, 1, "A", Channel::Search, 0.0, 50.0),
        ];
        let rows = synergy_impact(&records, &synergy());
        assert_eq!(rows.len(), 1);
        assert!((rows[0].incremental_revenue - 80.0).abs() < 1e-9);
    }
}
