//! Cross-entity relationship entries: brand halo and channel synergy.

use super::Channel;
use serde::{Deserialize, Serialize};

/// Directed halo effect of one brand's activity on another brand's revenue.
///
/// Strength is signed, roughly within [-0.1, 0.3]. A -> B need not equal
/// B -> A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HaloMatrixEntry {
    /// Brand whose activity creates the effect.
    pub source_brand: String,
    /// Brand receiving the effect.
    pub target_brand: String,
    /// Signed effect strength.
    pub strength: f64,
}

/// Multiplicative lift when two channels run together.
///
/// The pair is unordered; builders emit each pair once with `channel_a`
/// earlier than `channel_b` in channel table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSynergyEntry {
    /// First channel of the pair.
    pub channel_a: Channel,
    /// Second channel of the pair.
    pub channel_b: Channel,
    /// Lift factor, nominally around 1.0 - 1.5.
    pub strength: f64,
}

impl ChannelSynergyEntry {
    /// Whether this entry describes the (unordered) pair `a`, `b`.
    pub fn matches(&self, a: Channel, b: Channel) -> bool {
        (self.channel_a == a && self.channel_b == b) || (self.channel_a == b && self.channel_b == a)
    }

    /// Lift over running independently, as a percentage.
    pub fn lift_pct(&self) -> f64 {
        (self.strength - 1.0) * 100.0
    }
}
