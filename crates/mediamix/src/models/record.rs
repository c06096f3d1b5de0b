//! Daily panel record and its categorical attributes.

use super::{market_group, Channel, MarketGroup, MediaType};
use crate::metrics;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Funnel stage a record's activity targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunnelStage {
    /// Top of funnel.
    Awareness,
    /// Mid funnel.
    Consideration,
    /// Bottom of funnel.
    Conversion,
}

impl FunnelStage {
    /// All stages in funnel order.
    pub const ALL: [FunnelStage; 3] = [
        FunnelStage::Awareness,
        FunnelStage::Consideration,
        FunnelStage::Conversion,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            FunnelStage::Awareness => "Awareness",
            FunnelStage::Consideration => "Consideration",
            FunnelStage::Conversion => "Conversion",
        }
    }
}

impl std::fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Broadcast daypart (TV-like channels only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Daypart {
    /// 6am - 9am.
    #[serde(rename = "Morning")]
    Morning,
    /// 9am - 4pm.
    #[serde(rename = "Daytime")]
    Daytime,
    /// 4pm - 8pm.
    #[serde(rename = "Early Fringe")]
    EarlyFringe,
    /// 8pm - 11pm.
    #[serde(rename = "Prime")]
    Prime,
    /// 11pm onwards.
    #[serde(rename = "Late Night")]
    LateNight,
}

impl Daypart {
    /// All dayparts.
    pub const ALL: [Daypart; 5] = [
        Daypart::Morning,
        Daypart::Daytime,
        Daypart::EarlyFringe,
        Daypart::Prime,
        Daypart::LateNight,
    ];

    /// Relative weight when assigning dayparts (prime-heavy).
    pub const WEIGHTS: [f64; 5] = [0.15, 0.20, 0.15, 0.40, 0.10];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Daypart::Morning => "Morning",
            Daypart::Daytime => "Daytime",
            Daypart::EarlyFringe => "Early Fringe",
            Daypart::Prime => "Prime",
            Daypart::LateNight => "Late Night",
        }
    }
}

/// Meta buying type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuyingType {
    /// Auction buying.
    Auction,
    /// Reservation (reach & frequency) buying.
    #[serde(rename = "Reach & Frequency")]
    ReachAndFrequency,
}

impl BuyingType {
    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            BuyingType::Auction => "Auction",
            BuyingType::ReachAndFrequency => "Reach & Frequency",
        }
    }
}

/// Audience targeting approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingType {
    /// Untargeted baseline.
    Broad,
    /// Advertiser or retailer first-party audiences.
    #[serde(rename = "1st Party")]
    FirstParty,
    /// Modeled lookalikes.
    Lookalike,
    /// Contextual placement.
    Contextual,
    /// Site or cart retargeting.
    Retargeting,
}

impl TargetingType {
    /// All targeting types.
    pub const ALL: [TargetingType; 5] = [
        TargetingType::Broad,
        TargetingType::FirstParty,
        TargetingType::Lookalike,
        TargetingType::Contextual,
        TargetingType::Retargeting,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            TargetingType::Broad => "Broad",
            TargetingType::FirstParty => "1st Party",
            TargetingType::Lookalike => "Lookalike",
            TargetingType::Contextual => "Contextual",
            TargetingType::Retargeting => "Retargeting",
        }
    }

    /// Whether the audience comes from first-party data.
    pub fn is_first_party(&self) -> bool {
        matches!(self, TargetingType::FirstParty | TargetingType::Retargeting)
    }
}

/// Ad copy length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyLength {
    /// Up to ~40 characters.
    Short,
    /// ~40-90 characters.
    Medium,
    /// Longer copy.
    Long,
}

impl CopyLength {
    /// All copy lengths.
    pub const ALL: [CopyLength; 3] = [CopyLength::Short, CopyLength::Medium, CopyLength::Long];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            CopyLength::Short => "Short",
            CopyLength::Medium => "Medium",
            CopyLength::Long => "Long",
        }
    }
}

/// One observation per (date, brand, market, channel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Calendar date.
    pub date: NaiveDate,
    /// Brand identifier.
    pub brand: String,
    /// Market identifier.
    pub market: String,
    /// Group the market belongs to.
    pub market_group: MarketGroup,
    /// Channel identifier.
    pub channel: Channel,
    /// Media spend (>= 0).
    pub spend: f64,
    /// Impressions delivered.
    pub impressions: u64,
    /// Gross rating points (TV-like channels only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grps: Option<f64>,
    /// People reached.
    pub reach: u64,
    /// impressions / reach, 0 when reach is 0.
    pub frequency: f64,
    /// Viewable share of impressions, in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewability: Option<f64>,
    /// Video completion rate, in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_completion: Option<f64>,
    /// Net revenue attributed to this slice.
    pub net_revenue: f64,
    /// net_revenue / spend, 0 when spend is 0.
    pub roi: f64,
    /// Creative format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Broadcast daypart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daypart: Option<Daypart>,
    /// Start hour of the 3-hour delivery bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_bucket: Option<u8>,
    /// Day of week, 0 = Monday.
    pub day_of_week: u8,
    /// Funnel stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel_stage: Option<FunnelStage>,
    /// Buying type (Meta only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buying_type: Option<BuyingType>,
    /// Targeting type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting_type: Option<TargetingType>,
    /// Publisher or seller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Campaign name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    /// Copy variant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_name: Option<String>,
    /// Copy length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_length: Option<CopyLength>,
    /// Channel is retail media.
    pub is_retail_media: bool,
    /// Channel is consumer media.
    pub is_consumer_media: bool,
    /// Channel is a promotion.
    pub is_promo: bool,
}

impl DailyRecord {
    /// Create a record with spend and revenue only.
    ///
    /// Delivery metrics start at zero and optional attributes are empty.
    /// Markets missing from the market table get [`MarketGroup::Other`].
    pub fn new(
        date: NaiveDate,
        brand: impl Into<String>,
        market: impl Into<String>,
        channel: Channel,
        spend: f64,
        net_revenue: f64,
    ) -> Self {
        let market = market.into();
        let group = market_group(&market).unwrap_or(MarketGroup::Other);
        let spend = spend.max(0.0);
        let media_type = channel.media_type();

        Self {
            date,
            brand: brand.into(),
            market,
            market_group: group,
            channel,
            spend,
            impressions: 0,
            grps: None,
            reach: 0,
            frequency: 0.0,
            viewability: None,
            video_completion: None,
            net_revenue,
            roi: metrics::roi(net_revenue, spend),
            format: None,
            daypart: None,
            hour_bucket: None,
            day_of_week: date.weekday().num_days_from_monday() as u8,
            funnel_stage: None,
            buying_type: None,
            targeting_type: None,
            publisher: None,
            campaign: None,
            copy_name: None,
            copy_length: None,
            is_retail_media: media_type == MediaType::Retail,
            is_consumer_media: media_type == MediaType::Consumer,
            is_promo: media_type == MediaType::Promo,
        }
    }

    /// Set impressions and reach, deriving frequency.
    pub fn with_delivery(mut self, impressions: u64, reach: u64) -> Self {
        self.impressions = impressions;
        self.reach = reach;
        self.frequency = metrics::frequency(impressions, reach);
        self
    }

    /// Set the funnel stage.
    pub fn with_funnel_stage(mut self, stage: FunnelStage) -> Self {
        self.funnel_stage = Some(stage);
        self
    }

    /// Set the targeting type.
    pub fn with_targeting(mut self, targeting: TargetingType) -> Self {
        self.targeting_type = Some(targeting);
        self
    }

    /// Media classification derived from the flags.
    pub fn media_type(&self) -> MediaType {
        if self.is_retail_media {
            MediaType::Retail
        } else if self.is_promo {
            MediaType::Promo
        } else {
            MediaType::Consumer
        }
    }

    /// Cost per thousand impressions.
    pub fn cpm(&self) -> f64 {
        metrics::cpm(self.spend, self.impressions)
    }

    /// Monday of the ISO week containing this record's date.
    pub fn week_start(&self) -> NaiveDate {
        week_start(self.date)
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - chrono::Duration::days(offset)
}
