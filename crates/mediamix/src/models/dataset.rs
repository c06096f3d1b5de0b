//! Aggregate root bundling the generated panel and its reference tables.

use super::{Channel, ChannelParams, ChannelSynergyEntry, DailyRecord, HaloMatrixEntry};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Complete generated dataset: the unit that is cached and served.
///
/// Immutable once built; every transform works on filtered copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDataResponse {
    /// One record per (day, brand, channel).
    pub records: Vec<DailyRecord>,
    /// Response-curve parameters, one row per channel.
    pub channel_params: Vec<ChannelParams>,
    /// Directed brand-pair halo strengths.
    pub halo_matrix: Vec<HaloMatrixEntry>,
    /// Unordered channel-pair synergy strengths.
    pub synergy_matrix: Vec<ChannelSynergyEntry>,
    /// Brands following the seasonal revenue pattern.
    pub seasonal_brands: Vec<String>,
    /// All brands in the portfolio.
    pub brands: Vec<String>,
    /// All markets.
    pub markets: Vec<String>,
    /// All channels.
    pub channels: Vec<Channel>,
}

impl ApiDataResponse {
    /// Whether a brand is flagged seasonal.
    pub fn is_seasonal(&self, brand: &str) -> bool {
        self.seasonal_brands.iter().any(|b| b == brand)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
