//! Media channels, their capability descriptors and response-curve parameters.

use crate::error::{MediaMixError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Media channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    /// Linear television.
    #[serde(rename = "TV")]
    Tv,
    /// Connected TV / streaming.
    #[serde(rename = "CTV")]
    Ctv,
    /// YouTube video.
    #[serde(rename = "YouTube")]
    YouTube,
    /// Facebook and Instagram.
    #[serde(rename = "Meta")]
    Meta,
    /// TikTok.
    #[serde(rename = "TikTok")]
    TikTok,
    /// Paid search.
    #[serde(rename = "Search")]
    Search,
    /// Programmatic display.
    #[serde(rename = "Display")]
    Display,
    /// Streaming audio and radio.
    #[serde(rename = "Audio")]
    Audio,
    /// Out-of-home.
    #[serde(rename = "OOH")]
    Ooh,
    /// Amazon retail media.
    #[serde(rename = "Amazon Ads")]
    AmazonAds,
    /// Walmart retail media.
    #[serde(rename = "Walmart Connect")]
    WalmartConnect,
    /// Trade promotions and coupons.
    #[serde(rename = "Trade Promo")]
    TradePromo,
}

impl Channel {
    /// All channels in table order.
    pub const ALL: [Channel; 12] = [
        Channel::Tv,
        Channel::Ctv,
        Channel::YouTube,
        Channel::Meta,
        Channel::TikTok,
        Channel::Search,
        Channel::Display,
        Channel::Audio,
        Channel::Ooh,
        Channel::AmazonAds,
        Channel::WalmartConnect,
        Channel::TradePromo,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Tv => "TV",
            Channel::Ctv => "CTV",
            Channel::YouTube => "YouTube",
            Channel::Meta => "Meta",
            Channel::TikTok => "TikTok",
            Channel::Search => "Search",
            Channel::Display => "Display",
            Channel::Audio => "Audio",
            Channel::Ooh => "OOH",
            Channel::AmazonAds => "Amazon Ads",
            Channel::WalmartConnect => "Walmart Connect",
            Channel::TradePromo => "Trade Promo",
        }
    }

    /// Capability descriptor for this channel.
    #[inline]
    pub fn profile(self) -> &'static ChannelProfile {
        &CHANNEL_PROFILES[self as usize]
    }

    /// Media classification of this channel.
    pub fn media_type(self) -> MediaType {
        self.profile().media_type
    }

    /// Whether this is a television-like channel.
    pub fn is_tv_like(self) -> bool {
        self.profile().tv_like
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Channel {
    type Err = MediaMixError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Channel::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MediaMixError::UnknownChannel(s.to_string()))
    }
}

/// Media classification. Exactly one applies to every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaType {
    /// Consumer-facing media.
    Consumer,
    /// Retailer-owned media networks.
    Retail,
    /// Price promotions.
    Promo,
}

impl MediaType {
    /// All media types.
    pub const ALL: [MediaType; 3] = [MediaType::Consumer, MediaType::Retail, MediaType::Promo];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            MediaType::Consumer => "Consumer Media",
            MediaType::Retail => "Retail Media",
            MediaType::Promo => "Promo",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static capability descriptor for a channel.
///
/// Drives every channel-conditioned branch of the generator: which optional
/// attributes a record receives, how its budget share is set, and how its
/// revenue splits between short and long term.
#[derive(Debug, Clone, Copy)]
pub struct ChannelProfile {
    /// Channel this descriptor belongs to.
    pub channel: Channel,
    /// Media classification.
    pub media_type: MediaType,
    /// Television-like (receives GRPs and dayparts).
    pub tv_like: bool,
    /// Records carry a daypart.
    pub supports_daypart: bool,
    /// Records carry a viewability rate.
    pub supports_viewability: bool,
    /// Records carry a video completion rate.
    pub supports_video_completion: bool,
    /// Records carry a buying type.
    pub supports_buying_type: bool,
    /// Records carry a targeting type.
    pub supports_targeting: bool,
    /// Records carry copy naming and copy length.
    pub supports_copy: bool,
    /// Records carry an hour bucket.
    pub supports_hour_bucket: bool,
    /// Share of the daily media budget (sums to 1 across channels).
    pub budget_weight: f64,
    /// Base cost per thousand impressions.
    pub base_cpm: f64,
    /// Frequency range (impressions per person reached).
    pub frequency_range: (f64, f64),
    /// Creative formats.
    pub formats: &'static [&'static str],
    /// Publishers / sellers.
    pub publishers: &'static [&'static str],
    /// Funnel stage mix: awareness, consideration, conversion.
    pub funnel_mix: [f64; 3],
    /// Share of revenue realized short term.
    pub short_term_rate: f64,
}

/// Capability table, indexed by `Channel as usize`.
pub static CHANNEL_PROFILES: [ChannelProfile; 12] = [
    ChannelProfile {
        channel: Channel::Tv,
        media_type: MediaType::Consumer,
        tv_like: true,
        supports_daypart: true,
        supports_viewability: false,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: false,
        supports_copy: false,
        supports_hour_bucket: false,
        budget_weight: 0.18,
        base_cpm: 28.0,
        frequency_range: (3.0, 6.0),
        formats: &["15s Spot", "30s Spot", "60s Spot"],
        publishers: &["NBC", "CBS", "ABC", "FOX"],
        funnel_mix: [0.70, 0.25, 0.05],
        short_term_rate: 0.40,
    },
    ChannelProfile {
        channel: Channel::Ctv,
        media_type: MediaType::Consumer,
        tv_like: true,
        supports_daypart: true,
        supports_viewability: true,
        supports_video_completion: true,
        supports_buying_type: false,
        supports_targeting: true,
        supports_copy: false,
        supports_hour_bucket: false,
        budget_weight: 0.08,
        base_cpm: 35.0,
        frequency_range: (2.0, 4.0),
        formats: &["15s Non-Skip", "30s Non-Skip", "Pause Ad"],
        publishers: &["Hulu", "Roku", "Peacock", "Paramount+"],
        funnel_mix: [0.60, 0.30, 0.10],
        short_term_rate: 0.50,
    },
    ChannelProfile {
        channel: Channel::YouTube,
        media_type: MediaType::Consumer,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: true,
        supports_video_completion: true,
        supports_buying_type: false,
        supports_targeting: true,
        supports_copy: false,
        supports_hour_bucket: true,
        budget_weight: 0.08,
        base_cpm: 12.0,
        frequency_range: (2.0, 5.0),
        formats: &["Bumper 6s", "Skippable In-Stream", "Shorts"],
        publishers: &["YouTube"],
        funnel_mix: [0.55, 0.35, 0.10],
        short_term_rate: 0.50,
    },
    ChannelProfile {
        channel: Channel::Meta,
        media_type: MediaType::Consumer,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: true,
        supports_video_completion: true,
        supports_buying_type: true,
        supports_targeting: true,
        supports_copy: true,
        supports_hour_bucket: true,
        budget_weight: 0.14,
        base_cpm: 9.0,
        frequency_range: (1.5, 4.0),
        formats: &["Reels", "Feed Video", "Static Image", "Carousel", "Stories"],
        publishers: &["Facebook", "Instagram"],
        funnel_mix: [0.30, 0.45, 0.25],
        short_term_rate: 0.65,
    },
    ChannelProfile {
        channel: Channel::TikTok,
        media_type: MediaType::Consumer,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: true,
        supports_video_completion: true,
        supports_buying_type: false,
        supports_targeting: true,
        supports_copy: true,
        supports_hour_bucket: true,
        budget_weight: 0.06,
        base_cpm: 7.0,
        frequency_range: (2.0, 5.0),
        formats: &["In-Feed Video", "TopView", "Spark Ads"],
        publishers: &["TikTok"],
        funnel_mix: [0.45, 0.40, 0.15],
        short_term_rate: 0.60,
    },
    ChannelProfile {
        channel: Channel::Search,
        media_type: MediaType::Consumer,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: false,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: true,
        supports_copy: true,
        supports_hour_bucket: true,
        budget_weight: 0.12,
        base_cpm: 45.0,
        frequency_range: (1.1, 1.8),
        formats: &["Text Ad", "Shopping Ad"],
        publishers: &["Google", "Bing"],
        funnel_mix: [0.05, 0.25, 0.70],
        short_term_rate: 0.85,
    },
    ChannelProfile {
        channel: Channel::Display,
        media_type: MediaType::Consumer,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: true,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: true,
        supports_copy: true,
        supports_hour_bucket: true,
        budget_weight: 0.06,
        base_cpm: 4.0,
        frequency_range: (3.0, 8.0),
        formats: &["Banner", "Rich Media", "Native"],
        publishers: &["Google Display Network", "The Trade Desk", "Yahoo DSP"],
        funnel_mix: [0.30, 0.40, 0.30],
        short_term_rate: 0.70,
    },
    ChannelProfile {
        channel: Channel::Audio,
        media_type: MediaType::Consumer,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: false,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: false,
        supports_copy: false,
        supports_hour_bucket: true,
        budget_weight: 0.04,
        base_cpm: 15.0,
        frequency_range: (2.0, 5.0),
        formats: &["15s Audio", "30s Audio", "Podcast Read"],
        publishers: &["Spotify", "iHeartRadio", "Pandora"],
        funnel_mix: [0.65, 0.30, 0.05],
        short_term_rate: 0.50,
    },
    ChannelProfile {
        channel: Channel::Ooh,
        media_type: MediaType::Consumer,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: false,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: false,
        supports_copy: false,
        supports_hour_bucket: false,
        budget_weight: 0.04,
        base_cpm: 6.0,
        frequency_range: (4.0, 10.0),
        formats: &["Billboard", "Transit", "Digital Screen"],
        publishers: &["Clear Channel", "Outfront", "Lamar"],
        funnel_mix: [0.85, 0.15, 0.0],
        short_term_rate: 0.35,
    },
    ChannelProfile {
        channel: Channel::AmazonAds,
        media_type: MediaType::Retail,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: true,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: true,
        supports_copy: true,
        supports_hour_bucket: false,
        budget_weight: 0.09,
        base_cpm: 18.0,
        frequency_range: (1.5, 3.0),
        formats: &["Sponsored Products", "Sponsored Brands", "Sponsored Display"],
        publishers: &["Amazon"],
        funnel_mix: [0.05, 0.30, 0.65],
        short_term_rate: 0.80,
    },
    ChannelProfile {
        channel: Channel::WalmartConnect,
        media_type: MediaType::Retail,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: true,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: true,
        supports_copy: false,
        supports_hour_bucket: false,
        budget_weight: 0.05,
        base_cpm: 16.0,
        frequency_range: (1.5, 3.0),
        formats: &["Sponsored Products", "Onsite Display"],
        publishers: &["Walmart"],
        funnel_mix: [0.05, 0.30, 0.65],
        short_term_rate: 0.80,
    },
    ChannelProfile {
        channel: Channel::TradePromo,
        media_type: MediaType::Promo,
        tv_like: false,
        supports_daypart: false,
        supports_viewability: false,
        supports_video_completion: false,
        supports_buying_type: false,
        supports_targeting: false,
        supports_copy: false,
        supports_hour_bucket: false,
        budget_weight: 0.06,
        base_cpm: 3.0,
        frequency_range: (1.0, 2.0),
        formats: &["Coupon", "Temporary Price Reduction", "Display Feature"],
        publishers: &["Kroger", "Target", "Costco", "Walmart"],
        funnel_mix: [0.0, 0.20, 0.80],
        short_term_rate: 0.90,
    },
];

/// Response-curve parameters for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelParams {
    /// Channel these parameters describe.
    pub channel: Channel,
    /// Adstock half-life in days (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_life: Option<f64>,
    /// Spend floor below which no incremental return is modeled.
    pub min_threshold_spend: f64,
    /// ROI at the threshold.
    pub max_marginal_roi: f64,
    /// Asymptotic ROI cap.
    pub max_roi: f64,
    /// Effective spend at which ~95% of the marginal-to-max gap is closed.
    pub saturation_point_spend: f64,
}

impl ChannelParams {
    /// Create a validated parameter row.
    pub fn new(
        channel: Channel,
        half_life: Option<f64>,
        min_threshold_spend: f64,
        max_marginal_roi: f64,
        max_roi: f64,
        saturation_point_spend: f64,
    ) -> Result<Self> {
        let params = Self {
            channel,
            half_life,
            min_threshold_spend,
            max_marginal_roi,
            max_roi,
            saturation_point_spend,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate the row.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| MediaMixError::InvalidChannelParams {
            channel: self.channel.name().to_string(),
            reason,
        };

        let values = [
            self.min_threshold_spend,
            self.max_marginal_roi,
            self.max_roi,
            self.saturation_point_spend,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("all values must be finite".into()));
        }
        if self.min_threshold_spend < 0.0 {
            return Err(invalid(format!(
                "minimum threshold spend must be >= 0, got {}",
                self.min_threshold_spend
            )));
        }
        if self.saturation_point_spend <= 0.0 {
            return Err(invalid(format!(
                "saturation point spend must be > 0, got {}",
                self.saturation_point_spend
            )));
        }
        if self.max_marginal_roi < 0.0 {
            return Err(invalid(format!(
                "max marginal ROI must be >= 0, got {}",
                self.max_marginal_roi
            )));
        }
        if self.max_marginal_roi > self.max_roi {
            return Err(invalid(format!(
                "max marginal ROI {} exceeds max ROI {}",
                self.max_marginal_roi, self.max_roi
            )));
        }
        if let Some(h) = self.half_life {
            if !h.is_finite() || h <= 0.0 {
                return Err(invalid(format!("half-life must be > 0, got {}", h)));
            }
        }
        Ok(())
    }

    /// Default parameter table, one row per channel in [`Channel::ALL`] order.
    pub fn defaults() -> Vec<ChannelParams> {
        DEFAULT_PARAMS
            .iter()
            .map(|&(channel, half_life, threshold, marginal, max, saturation)| ChannelParams {
                channel,
                half_life,
                min_threshold_spend: threshold,
                max_marginal_roi: marginal,
                max_roi: max,
                saturation_point_spend: saturation,
            })
            .collect()
    }
}

/// (channel, half-life, threshold, max marginal ROI, max ROI, saturation point)
type ParamRow = (Channel, Option<f64>, f64, f64, f64, f64);

const DEFAULT_PARAMS: [ParamRow; 12] = [
    (Channel::Tv, Some(14.0), 300.0, 1.2, 2.8, 4000.0),
    (Channel::Ctv, Some(10.0), 100.0, 1.0, 2.4, 2000.0),
    (Channel::YouTube, Some(7.0), 80.0, 1.1, 2.2, 2000.0),
    (Channel::Meta, Some(3.0), 50.0, 1.6, 3.4, 3000.0),
    (Channel::TikTok, Some(3.0), 60.0, 1.2, 2.6, 1500.0),
    (Channel::Search, None, 40.0, 2.5, 4.5, 2500.0),
    (Channel::Display, Some(2.0), 50.0, 0.6, 1.4, 1200.0),
    (Channel::Audio, Some(7.0), 60.0, 0.8, 1.8, 900.0),
    (Channel::Ooh, Some(14.0), 100.0, 0.7, 1.6, 900.0),
    (Channel::AmazonAds, None, 50.0, 2.2, 4.0, 2000.0),
    (Channel::WalmartConnect, None, 50.0, 1.8, 3.4, 1200.0),
    (Channel::TradePromo, None, 100.0, 1.5, 2.5, 1500.0),
];
