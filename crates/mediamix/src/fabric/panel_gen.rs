//! Panel generator for the synthetic daily advertising dataset.
//!
//! For every day in the window, every brand and every channel the generator
//! emits one [`DailyRecord`]: a random market, a channel spend carved out of
//! a seasonal daily budget, ROI from the channel's response curve, delivery
//! metrics derived from spend, and channel-conditioned categorical attributes.
//! Output is a pure function of the configuration and parameter table.

use super::relationships::{build_halo_matrix, build_synergy_matrix};
use super::response_curve::response_roi;
use super::seasonality::seasonal_multiplier;
use crate::error::{MediaMixError, Result};
use crate::metrics;
use crate::models::{
    market_names, seasonal_brand_names, ApiDataResponse, BrandProfile, BuyingType, Channel,
    ChannelParams, CopyLength, DailyRecord, Daypart, FunnelStage, MediaType, TargetingType,
    BRANDS, MARKETS,
};
use crate::rng::PanelRng;
use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Stream id for record generation.
pub(crate) const RECORD_STREAM: u64 = 1;
/// Stream id for the halo matrix.
pub(crate) const HALO_STREAM: u64 = 2;
/// Stream id for the synergy matrix.
pub(crate) const SYNERGY_STREAM: u64 = 3;

/// Audience universe used to express TV impressions as rating points.
const TV_UNIVERSE: f64 = 10_000_000.0;

/// Targeting mix for consumer channels: broad, 1st party, lookalike, contextual, retargeting.
const CONSUMER_TARGETING_MIX: [f64; 5] = [0.35, 0.20, 0.20, 0.15, 0.10];
/// Targeting mix for retail media, skewed to retailer first-party audiences.
const RETAIL_TARGETING_MIX: [f64; 5] = [0.15, 0.45, 0.10, 0.10, 0.20];

/// Share of Meta delivery bought at auction.
const META_AUCTION_SHARE: f64 = 0.7;

/// Configuration for the panel generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Random seed; the whole dataset is a function of it.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// First day of the window (inclusive).
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive).
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
    /// Daily media budget as a fraction of the brand's revenue baseline.
    #[serde(default = "default_media_budget_fraction")]
    pub media_budget_fraction: f64,
    /// Relative perturbation of the daily budget.
    #[serde(default = "default_budget_jitter")]
    pub budget_jitter: f64,
    /// Relative perturbation of each channel's share.
    #[serde(default = "default_channel_jitter")]
    pub channel_jitter: f64,
    /// Relative perturbation of realized revenue.
    #[serde(default = "default_revenue_jitter")]
    pub revenue_jitter: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN)
}

fn default_media_budget_fraction() -> f64 {
    0.12
}

fn default_budget_jitter() -> f64 {
    0.25
}

fn default_channel_jitter() -> f64 {
    0.30
}

fn default_revenue_jitter() -> f64 {
    0.05
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            media_budget_fraction: default_media_budget_fraction(),
            budget_jitter: default_budget_jitter(),
            channel_jitter: default_channel_jitter(),
            revenue_jitter: default_revenue_jitter(),
        }
    }
}

impl GeneratorConfig {
    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the date window.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Number of days in the window.
    pub fn days(&self) -> usize {
        let span = (self.end_date - self.start_date).num_days();
        if span < 0 {
            0
        } else {
            span as usize + 1
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(MediaMixError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        let fraction = self.media_budget_fraction;
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(MediaMixError::Config(format!(
                "media_budget_fraction must be in (0, 1], got {}",
                self.media_budget_fraction
            )));
        }
        for (name, value) in [
            ("budget_jitter", self.budget_jitter),
            ("channel_jitter", self.channel_jitter),
            ("revenue_jitter", self.revenue_jitter),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(MediaMixError::Config(format!(
                    "{} must be in [0, 1), got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Generator producing the full panel from a seed and a parameter table.
pub struct PanelGenerator {
    /// Configuration.
    config: GeneratorConfig,
    /// Parameter rows in `Channel::ALL` order.
    params: Vec<ChannelParams>,
}

impl PanelGenerator {
    /// Create a generator.
    ///
    /// Fails if the configuration is invalid, any row is invalid, or any
    /// channel has no parameter row.
    pub fn new(config: GeneratorConfig, params: &[ChannelParams]) -> Result<Self> {
        config.validate()?;

        let mut resolved = Vec::with_capacity(Channel::ALL.len());
        for channel in Channel::ALL {
            let row = params
                .iter()
                .find(|p| p.channel == channel)
                .ok_or_else(|| MediaMixError::MissingChannelParams(channel.name().to_string()))?;
            row.validate()?;
            resolved.push(row.clone());
        }

        Ok(Self {
            config,
            params: resolved,
        })
    }

    /// Create a generator with the default parameter table.
    pub fn with_defaults(config: GeneratorConfig) -> Result<Self> {
        Self::new(config, &ChannelParams::defaults())
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parameter table in channel order.
    pub fn params(&self) -> &[ChannelParams] {
        &self.params
    }

    /// Generate all records, ordered by date, then brand, then channel.
    pub fn generate(&self) -> Vec<DailyRecord> {
        let mut rng = PanelRng::with_stream(self.config.seed, RECORD_STREAM);
        // Constant parameters: construction cannot fail
        let cpm_noise = Normal::new(1.0, 0.12).ok();

        let capacity = self.config.days() * BRANDS.len() * Channel::ALL.len();
        let mut records = Vec::with_capacity(capacity);

        let days = self
            .config
            .start_date
            .iter_days()
            .take_while(|d| *d <= self.config.end_date);

        for date in days {
            for brand in BRANDS.iter() {
                let baseline = brand.base_daily_revenue * seasonal_multiplier(date, brand.seasonal);
                let budget = baseline
                    * self.config.media_budget_fraction
                    * jitter(&mut rng, self.config.budget_jitter);

                for (channel, params) in Channel::ALL.iter().zip(&self.params) {
                    let record = self.generate_record(
                        date,
                        brand,
                        *channel,
                        params,
                        budget,
                        cpm_noise.as_ref(),
                        &mut rng,
                    );
                    records.push(record);
                }
            }
        }

        info!(
            records = records.len(),
            seed = self.config.seed,
            start = %self.config.start_date,
            end = %self.config.end_date,
            "generated panel"
        );

        records
    }

    /// Generate the records plus every reference table.
    pub fn generate_dataset(&self) -> ApiDataResponse {
        let records = self.generate();
        let halo_matrix = build_halo_matrix(self.config.seed);
        let synergy_matrix = build_synergy_matrix(self.config.seed);
        debug!(
            halo_entries = halo_matrix.len(),
            synergy_entries = synergy_matrix.len(),
            "built relationship matrices"
        );

        ApiDataResponse {
            records,
            channel_params: self.params.clone(),
            halo_matrix,
            synergy_matrix,
            seasonal_brands: seasonal_brand_names(),
            brands: BRANDS.iter().map(|b| b.name.to_string()).collect(),
            markets: market_names(),
            channels: Channel::ALL.to_vec(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn generate_record(
        &self,
        date: NaiveDate,
        brand: &BrandProfile,
        channel: Channel,
        params: &ChannelParams,
        budget: f64,
        cpm_noise: Option<&Normal<f64>>,
        rng: &mut PanelRng,
    ) -> DailyRecord {
        let profile = channel.profile();

        let market_idx = rng.gen_range(0..MARKETS.len());
        let market = MARKETS[market_idx].0;

        let spend = round2(budget * profile.budget_weight * jitter(rng, self.config.channel_jitter));
        let roi = response_roi(spend, params);

        // Delivery
        let noise = match cpm_noise {
            Some(normal) => normal.sample(&mut *rng),
            None => 1.0,
        }
        .clamp(0.6, 1.4);
        let cpm = profile.base_cpm * noise;
        let impressions = (metrics::ratio(spend, cpm) * 1000.0).round() as u64;
        let (freq_lo, freq_hi) = profile.frequency_range;
        let target_frequency = rng.gen_range(freq_lo..=freq_hi);
        let reach = (impressions as f64 / target_frequency).round() as u64;

        let net_revenue = round2(spend * roi * jitter(rng, self.config.revenue_jitter));

        let mut record = DailyRecord::new(date, brand.name, market, channel, spend, net_revenue)
            .with_delivery(impressions, reach);

        if profile.tv_like {
            record.grps = Some(round2(impressions as f64 / TV_UNIVERSE * 100.0));
        }
        if profile.supports_viewability {
            record.viewability = Some(round4(rng.gen_range(0.55..0.85)));
        }
        if profile.supports_video_completion {
            record.video_completion = Some(round4(rng.gen_range(0.45..0.90)));
        }

        // Categorical attributes
        record.format = profile.formats.choose(rng).map(|f| f.to_string());
        if profile.supports_daypart {
            record.daypart = Some(Daypart::ALL[rng.weighted_index(&Daypart::WEIGHTS)]);
        }
        if profile.supports_hour_bucket {
            record.hour_bucket = Some(rng.gen_range(0..8u8) * 3);
        }

        let stage = FunnelStage::ALL[rng.weighted_index(&profile.funnel_mix)];
        record.funnel_stage = Some(stage);

        if profile.supports_buying_type {
            record.buying_type = Some(if rng.gen_bool(META_AUCTION_SHARE) {
                BuyingType::Auction
            } else {
                BuyingType::ReachAndFrequency
            });
        }
        if profile.supports_targeting {
            let mix = match profile.media_type {
                MediaType::Retail => &RETAIL_TARGETING_MIX,
                _ => &CONSUMER_TARGETING_MIX,
            };
            record.targeting_type = Some(TargetingType::ALL[rng.weighted_index(mix)]);
        }
        record.publisher = profile.publishers.choose(rng).map(|p| p.to_string());

        let quarter = date.month0() / 3 + 1;
        record.campaign = Some(format!(
            "{} | {} | Q{} {}",
            brand.name,
            channel.name(),
            quarter,
            stage.name()
        ));

        if profile.supports_copy {
            let length = CopyLength::ALL[rng.gen_range(0..CopyLength::ALL.len())];
            let variant = rng.gen_range(1..=3);
            record.copy_name = Some(format!("{}-{}-v{}", initials(brand.name), length.name(), variant));
            record.copy_length = Some(length);
        }

        record
    }
}

/// Multiplicative jitter in [1 - spread, 1 + spread].
fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    rng.gen_range(1.0 - spread..=1.0 + spread)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_config() -> GeneratorConfig {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        GeneratorConfig::default().with_window(start, end)
    }

    #[test]
    fn test_record_count() {
        let gen = PanelGenerator::with_defaults(short_config()).unwrap();
        let records = gen.generate();
        assert_eq!(records.len(), 14 * BRANDS.len() * Channel::ALL.len());
    }

    #[test]
    fn test_full_year_window() {
        assert_eq!(GeneratorConfig::default().days(), 366);
    }

    #[test]
    fn test_deterministic() {
        let a = PanelGenerator::with_defaults(short_config()).unwrap().generate();
        let b = PanelGenerator::with_defaults(short_config()).unwrap().generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_output() {
        let a = PanelGenerator::with_defaults(short_config()).unwrap().generate();
        let b = PanelGenerator::with_defaults(short_config().with_seed(7))
            .unwrap()
            .generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_invariants() {
        let records = PanelGenerator::with_defaults(short_config()).unwrap().generate();
        for r in &records {
            let profile = r.channel.profile();
            assert!(r.spend >= 0.0);
            assert!(r.roi >= 0.0);
            assert!(r.net_revenue >= 0.0);
            if r.reach > 0 {
                assert!((r.frequency - r.impressions as f64 / r.reach as f64).abs() < 1e-12);
            } else {
                assert_eq!(r.frequency, 0.0);
            }
            let flags = [r.is_retail_media, r.is_consumer_media, r.is_promo];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1);
            assert_eq!(r.media_type(), profile.media_type);
            assert_eq!(r.daypart.is_some(), profile.supports_daypart);
            assert_eq!(r.grps.is_some(), profile.tv_like);
            assert_eq!(r.buying_type.is_some(), r.channel == Channel::Meta);
            assert_eq!(r.viewability.is_some(), profile.supports_viewability);
            assert_eq!(r.video_completion.is_some(), profile.supports_video_completion);
            if let Some(v) = r.viewability {
                assert!((0.0..=1.0).contains(&v));
            }
            assert_eq!(r.market_group, crate::models::market_group(&r.market).unwrap());
        }
    }

    #[test]
    fn test_missing_params_is_fatal() {
        let params: Vec<ChannelParams> = ChannelParams::defaults()
            .into_iter()
            .filter(|p| p.channel != Channel::TikTok)
            .collect();
        let err = PanelGenerator::new(short_config(), &params).err().unwrap();
        assert_eq!(err, MediaMixError::MissingChannelParams("TikTok".into()));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params = ChannelParams::defaults();
        params[0].max_marginal_roi = 10.0;
        assert!(matches!(
            PanelGenerator::new(short_config(), &params),
            Err(MediaMixError::InvalidChannelParams { .. })
        ));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let config = GeneratorConfig::default().with_window(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(matches!(
            PanelGenerator::with_defaults(config),
            Err(MediaMixError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_seasonal_brand_spends_more_in_season() {
        let gen = PanelGenerator::with_defaults(GeneratorConfig::default()).unwrap();
        let records = gen.generate();
        let spend_in = |month: u32| -> f64 {
            records
                .iter()
                .filter(|r| r.brand == "Summit Grill" && r.date.month() == month)
                .map(|r| r.spend)
                .sum::<f64>()
        };
        // July (in-season) vs January (off-season), both 31 days
        assert!(spend_in(7) > spend_in(1) * 1.3);
    }

    #[test]
    fn test_dataset_tables() {
        let dataset = PanelGenerator::with_defaults(short_config())
            .unwrap()
            .generate_dataset();
        assert_eq!(dataset.channel_params.len(), Channel::ALL.len());
        assert_eq!(dataset.halo_matrix.len(), BRANDS.len() * (BRANDS.len() - 1));
        assert_eq!(dataset.synergy_matrix.len(), 12 * 11 / 2);
        assert_eq!(dataset.seasonal_brands.len(), 3);
        assert_eq!(dataset.markets.len(), MARKETS.len());
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Golden Grove Chips"), "GGC");
    }
}
