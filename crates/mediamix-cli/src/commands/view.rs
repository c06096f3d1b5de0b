//! `mediamix view` command - Print one analytics view as JSON.

use clap::ValueEnum;
use mediamix::analytics::*;
use mediamix::config::MediaMixConfig;
use mediamix::filter::filter;
use tracing::debug;

use crate::error::{CliError, CliResult};

use super::{load_dataset, to_json, FilterArgs};

/// Views available from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Daily spend, revenue and ROI
    Daily,
    /// Weekly (Monday start) series
    Weekly,
    /// Monthly series
    Monthly,
    /// Weekly spend per channel
    WeeklyChannels,
    /// Daily series with a 7-day rolling ROI
    RollingRoi,
    /// Headline KPIs
    Kpi,
    /// Brand x channel ROI grid
    BrandChannel,
    /// Retail / consumer / promo split
    MediaType,
    /// Contribution per channel
    Channels,
    /// Contribution per brand
    Brands,
    /// Contribution per market
    Markets,
    /// Contribution per market group
    MarketGroups,
    /// Contribution per publisher
    Publishers,
    /// Contribution per creative format
    Formats,
    /// Contribution per copy length
    CopyLength,
    /// Contribution per daypart
    Dayparts,
    /// Contribution per hour bucket
    Hours,
    /// Contribution per day of week
    Weekdays,
    /// Contribution per buying type
    BuyingTypes,
    /// Top campaigns by revenue
    Campaigns,
    /// Viewability and completion per channel
    DeliveryQuality,
    /// Reach and frequency per channel
    ReachFrequency,
    /// Base / media / promo / other decomposition
    MediaContribution,
    /// Short vs long-term revenue per channel
    ShortLongTerm,
    /// Attribution models
    Attribution,
    /// Channel share of media revenue
    ChannelShare,
    /// Portfolio saturation curve
    SaturationCurve,
    /// Modeled response curve per channel
    ResponseCurves,
    /// Saturation status per channel
    SaturationStatus,
    /// Channel synergy matrix
    Synergy,
    /// Brand halo matrix
    Halo,
    /// Halo revenue impact
    HaloImpact,
    /// Synergy impact over active channel pairs
    SynergyImpact,
    /// Flighting scenarios
    Flighting,
    /// Weekly flighting spend profiles
    FlightingProfiles,
    /// Budget scenarios
    Budget,
    /// Share of voice vs market share
    ShareOfVoice,
    /// ROI-weighted reallocation
    Reallocation,
    /// Weekly series per funnel stage
    FunnelWeekly,
    /// Spend share per funnel stage
    FunnelShare,
    /// Three-stage conversion flow
    ConversionFlow,
    /// Targeting lift vs Broad
    Targeting,
    /// Performance per season bucket
    Seasons,
    /// Seasonal vs non-seasonal brands
    SeasonalBrands,
}

/// Trailing window for the rolling ROI view, in days.
const ROLLING_WINDOW: usize = 7;

/// Execute the `view` command.
pub fn execute(
    config: &MediaMixConfig,
    view: View,
    args: &FilterArgs,
    target_brand: Option<&str>,
    sample: Option<usize>,
    pretty: bool,
) -> CliResult<()> {
    let dataset = load_dataset(config)?;
    let records = filter(&dataset.records, &args.selection()?)?;
    let r = records.as_slice();
    let top = config.analytics.top_n;
    let points = sample.unwrap_or(config.analytics.sample_points);
    if points == 0 {
        return Err(CliError::InvalidArgument("--sample must be > 0".into()));
    }
    debug!(?view, records = r.len(), "rendering view");

    let json = match view {
        View::Daily => to_json(&sample_series(&daily_series(r), points), pretty)?,
        View::Weekly => to_json(&weekly_series(r), pretty)?,
        View::Monthly => to_json(&monthly_series(r), pretty)?,
        View::WeeklyChannels => to_json(&weekly_channel_spend(r), pretty)?,
        View::RollingRoi => to_json(&sample_series(&rolling_roi(r, ROLLING_WINDOW), points), pretty)?,
        View::Kpi => to_json(&kpi_summary(r), pretty)?,
        View::BrandChannel => to_json(&brand_channel_grid(r), pretty)?,
        View::MediaType => to_json(&media_type_split(r), pretty)?,
        View::Channels => to_json(&channel_contribution(r), pretty)?,
        View::Brands => to_json(&brand_contribution(r), pretty)?,
        View::Markets => to_json(&market_contribution(r), pretty)?,
        View::MarketGroups => to_json(&market_group_contribution(r), pretty)?,
        View::Publishers => to_json(&top_n(publisher_contribution(r), top), pretty)?,
        View::Formats => to_json(&format_contribution(r), pretty)?,
        View::CopyLength => to_json(&copy_length_contribution(r), pretty)?,
        View::Dayparts => to_json(&daypart_contribution(r), pretty)?,
        View::Hours => to_json(&hour_bucket_contribution(r), pretty)?,
        View::Weekdays => to_json(&day_of_week_contribution(r), pretty)?,
        View::BuyingTypes => to_json(&buying_type_contribution(r), pretty)?,
        View::Campaigns => to_json(&campaign_contribution(r, top), pretty)?,
        View::DeliveryQuality => to_json(&delivery_quality(r), pretty)?,
        View::ReachFrequency => to_json(&reach_frequency(r), pretty)?,
        View::MediaContribution => to_json(&media_contribution(r), pretty)?,
        View::ShortLongTerm => to_json(&short_long_term(r), pretty)?,
        View::Attribution => to_json(&attribution_models(r), pretty)?,
        View::ChannelShare => to_json(&channel_revenue_share(r), pretty)?,
        View::SaturationCurve => to_json(&portfolio_saturation_curve(r), pretty)?,
        View::ResponseCurves => to_json(&channel_response_curves(&dataset.channel_params), pretty)?,
        View::SaturationStatus => to_json(&saturation_status(r, &dataset.channel_params), pretty)?,
        View::Synergy => to_json(&synergy_view(&dataset.synergy_matrix), pretty)?,
        View::Halo => to_json(&halo_view(&dataset.halo_matrix, target_brand), pretty)?,
        View::HaloImpact => to_json(&top_n(halo_revenue_impact(r, &dataset.halo_matrix), top), pretty)?,
        View::SynergyImpact => to_json(&top_n(synergy_impact(r, &dataset.synergy_matrix), top), pretty)?,
        View::Flighting => to_json(&flighting_scenarios(r), pretty)?,
        View::FlightingProfiles => to_json(&flighting_profiles(r), pretty)?,
        View::Budget => to_json(&budget_scenarios(r), pretty)?,
        View::ShareOfVoice => to_json(&share_of_voice(r, config.generator.seed), pretty)?,
        View::Reallocation => to_json(&reallocation(r), pretty)?,
        View::FunnelWeekly => to_json(&funnel_weekly(r), pretty)?,
        View::FunnelShare => to_json(&funnel_budget_share(r), pretty)?,
        View::ConversionFlow => to_json(&conversion_flow(r), pretty)?,
        View::Targeting => to_json(&targeting_lift(r), pretty)?,
        View::Seasons => to_json(&season_performance(r), pretty)?,
        View::SeasonalBrands => to_json(&seasonal_comparison(r, &dataset.seasonal_brands), pretty)?,
    };

    println!("{}", json);
    Ok(())
}
