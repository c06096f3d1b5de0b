//! Integration tests for generation, filtering and the transform library.

use chrono::NaiveDate;
use mediamix::prelude::*;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).expect("valid date")
}

fn quarter_dataset() -> ApiDataResponse {
    let config = GeneratorConfig::default().with_window(date(4, 1), date(6, 30));
    PanelGenerator::with_defaults(config)
        .expect("Failed to create generator")
        .generate_dataset()
}

/// Test that the same seed reproduces the dataset exactly.
#[test]
fn test_determinism() {
    let a = PanelGenerator::with_defaults(GeneratorConfig::default())
        .expect("Failed to create generator")
        .generate_dataset();
    let b = PanelGenerator::with_defaults(GeneratorConfig::default())
        .expect("Failed to create generator")
        .generate_dataset();

    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    assert_eq!(a.records.len(), 366 * 8 * 12);
}

/// Test that every generated ROI is non-negative and finite.
#[test]
fn test_roi_floor() {
    let dataset = quarter_dataset();
    assert!(dataset.records.iter().all(|r| r.roi >= 0.0 && r.roi.is_finite()));
}

/// Test that zero denominators resolve to zero across transforms.
#[test]
fn test_ratio_guard() {
    let mut records = quarter_dataset().records;
    for r in records.iter_mut().filter(|r| r.channel == Channel::Audio) {
        r.spend = 0.0;
        r.roi = 0.0;
        r.impressions = 0;
    }

    let contribution = channel_contribution(&records);
    let audio = contribution
        .iter()
        .find(|r| r.channel == Channel::Audio)
        .expect("audio row present");
    assert_eq!(audio.roi, 0.0);
    assert_eq!(audio.cpm, 0.0);

    for row in reach_frequency(&records) {
        assert!(row.cpm.is_finite() && row.frequency.is_finite());
        if row.impressions == 0 {
            assert_eq!(row.cpm, 0.0);
        }
    }
    for row in short_long_term(&records) {
        assert!(row.total_roi.is_finite());
        if row.spend == 0.0 {
            assert_eq!(row.total_roi, 0.0);
        }
    }
    for row in saturation_status(&records, &ChannelParams::defaults()) {
        assert!(row.observed_roi.is_finite());
    }
}

/// Test filter correctness against a direct predicate.
#[test]
fn test_filter_correctness() {
    let dataset = quarter_dataset();
    let channels = [Channel::Meta, Channel::Search, Channel::AmazonAds];
    let selection = Selection::all()
        .with_range(date(5, 1), date(5, 31))
        .with_brand("Crestview Cola")
        .with_market("Germany")
        .with_channels(channels);

    let filtered = filter(&dataset.records, &selection).unwrap();
    let expected: Vec<DailyRecord> = dataset
        .records
        .iter()
        .filter(|r| {
            r.brand == "Crestview Cola"
                && r.market == "Germany"
                && r.date >= date(5, 1)
                && r.date <= date(5, 31)
                && channels.contains(&r.channel)
        })
        .cloned()
        .collect();

    assert!(!expected.is_empty());
    assert_eq!(filtered, expected);
}

/// Test that wildcard selectors return the input unchanged.
#[test]
fn test_filter_wildcards() {
    let dataset = quarter_dataset();
    let selection = Selection {
        brand: Selector::parse("All"),
        market: Selector::parse("All"),
        channels: "All".parse().unwrap(),
        ..Selection::all()
    };
    assert_eq!(filter(&dataset.records, &selection).unwrap(), dataset.records);
}

/// Test that the portfolio saturation curve never decreases.
#[test]
fn test_saturation_monotonicity() {
    let dataset = quarter_dataset();
    let curve = portfolio_saturation_curve(&dataset.records);
    assert_eq!(curve.len(), 30);
    for pair in curve.windows(2) {
        assert!(pair[0].saturation_pct <= pair[1].saturation_pct);
        assert!(pair[0].spend < pair[1].spend);
    }
}

/// Test that per-channel spend reconciles with the slice total.
#[test]
fn test_reconciliation() {
    let dataset = quarter_dataset();
    let slice = filter(&dataset.records, &Selection::all().with_brand("Summit Grill")).unwrap();

    let direct: f64 = slice.iter().map(|r| r.spend).sum();
    let by_channel: f64 = channel_contribution(&slice).iter().map(|r| r.spend).sum();
    let by_market: f64 = market_contribution(&slice).iter().map(|r| r.spend).sum();
    let weekly: f64 = weekly_series(&slice).iter().map(|p| p.spend).sum();
    let kpi = kpi_summary(&slice).unwrap();

    let tolerance = direct * 1e-9;
    assert!((by_channel - direct).abs() <= tolerance);
    assert!((by_market - direct).abs() <= tolerance);
    assert!((weekly - direct).abs() <= tolerance);
    assert!((kpi.spend - direct).abs() <= tolerance);
}

/// Test the single-channel contribution scenario.
#[test]
fn test_meta_contribution_scenario() {
    let records: Vec<DailyRecord> = (1..=10)
        .map(|d| DailyRecord::new(date(3, d), "Lumina Skin", "Japan", Channel::Meta, 100.0, 500.0))
        .collect();

    let rows = channel_contribution(&records);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].channel, Channel::Meta);
    assert_eq!(rows[0].spend, 1000.0);
    assert_eq!(rows[0].nr, 5000.0);
    assert_eq!(rows[0].roi, 5.0);

    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(json["channel"], "Meta");
    assert_eq!(json["nr"], 5000.0);
}

/// Test that downsampling is idempotent on a real series.
#[test]
fn test_sampling_idempotence() {
    let dataset = quarter_dataset();
    let daily = daily_series(&dataset.records);
    let once = sample_series(&daily, 50);
    let twice = sample_series(&once, 50);

    assert!(once.len() <= 50);
    assert_eq!(once[0], daily[0]);
    assert_eq!(once, twice);
}

/// Test that every transform returns an empty result for an empty slice.
#[test]
fn test_empty_inputs() {
    let dataset = quarter_dataset();
    let empty = filter(&dataset.records, &Selection::all().with_brand("No Such Brand")).unwrap();
    assert!(empty.is_empty());

    assert!(daily_series(&empty).is_empty());
    assert!(monthly_series(&empty).is_empty());
    assert!(kpi_summary(&empty).is_none());
    assert!(brand_channel_grid(&empty).is_empty());
    assert!(channel_contribution(&empty).is_empty());
    assert!(publisher_contribution(&empty).is_empty());
    assert!(delivery_quality(&empty).is_empty());
    assert!(media_contribution(&empty).is_empty());
    assert!(attribution_models(&empty).is_empty());
    assert!(portfolio_saturation_curve(&empty).is_empty());
    assert!(halo_revenue_impact(&empty, &dataset.halo_matrix).is_empty());
    assert!(synergy_impact(&empty, &dataset.synergy_matrix).is_empty());
    assert!(flighting_scenarios(&empty).is_empty());
    assert!(flighting_profiles(&empty).is_empty());
    assert!(budget_scenarios(&empty).is_empty());
    assert!(share_of_voice(&empty, 42).is_empty());
    assert!(reallocation(&empty).is_empty());
    assert!(conversion_flow(&empty).is_empty());
    assert!(targeting_lift(&empty).is_empty());
    assert!(season_performance(&empty).is_empty());
}

/// Test that the analysis classifier agrees with the generator's seasonality.
#[test]
fn test_shared_season_classifier() {
    let dataset = quarter_dataset();
    let rows = seasonal_comparison(&dataset.records, &dataset.seasonal_brands);
    // April is pre-season, May and June in-season
    let seasons: Vec<SeasonBucket> = rows.iter().map(|r| r.season).collect();
    assert_eq!(seasons, vec![SeasonBucket::InSeason, SeasonBucket::PreSeason]);

    let performance = season_performance(&dataset.records);
    let days: Vec<(SeasonBucket, usize)> = performance.iter().map(|r| (r.season, r.days)).collect();
    assert_eq!(
        days,
        vec![(SeasonBucket::InSeason, 61), (SeasonBucket::PreSeason, 30)]
    );

    // The generator scales seasonal budgets by 1.3 in-season and 1.1
    // pre-season; non-seasonal brands move by about 1.5% over the same months.
    let spend_lift = |seasonal: bool| {
        let subset: Vec<DailyRecord> = dataset
            .records
            .iter()
            .filter(|r| dataset.is_seasonal(&r.brand) == seasonal)
            .cloned()
            .collect();
        let rows = season_performance(&subset);
        let daily = |bucket: SeasonBucket| {
            let row = rows.iter().find(|r| r.season == bucket).unwrap();
            row.spend / row.days as f64
        };
        daily(SeasonBucket::InSeason) / daily(SeasonBucket::PreSeason)
    };
    let seasonal_lift = spend_lift(true);
    let steady_lift = spend_lift(false);
    assert!(seasonal_lift > 1.09, "seasonal lift = {}", seasonal_lift);
    assert!(steady_lift < 1.09, "non-seasonal lift = {}", steady_lift);
}

/// Test that the relationship matrices are exhaustive.
#[test]
fn test_relationship_matrices() {
    let dataset = quarter_dataset();
    assert_eq!(dataset.halo_matrix.len(), 8 * 7);
    assert_eq!(dataset.synergy_matrix.len(), 12 * 11 / 2);

    let synergy = synergy_view(&dataset.synergy_matrix);
    assert!(synergy.windows(2).all(|w| w[0].strength >= w[1].strength));
    for row in &synergy {
        assert!((row.lift_pct - (row.strength - 1.0) * 100.0).abs() < 1e-9);
    }
}
