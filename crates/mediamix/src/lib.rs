//! # MediaMix
//!
//! Synthetic media-mix panel generation and marketing analytics.
//!
//! The crate has two halves:
//!
//! - **Data Fabric**: a seeded generator producing one daily record per
//!   (day, brand, channel), shaped by per-channel response curves and
//!   seasonality, plus brand halo and channel synergy matrices
//! - **Analytics**: a filter engine and a catalogue of pure transforms
//!   (contribution, attribution, saturation, scenarios, funnel, seasonality)
//!   that turn a filtered slice into chart-ready tables
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌────────────────┐
//! │   Data Fabric   │────▶│  Dataset Cache   │────▶│ Filter Engine  │
//! │ (Synthetic Gen) │     │ (compute once)   │     │ (Selection)    │
//! └─────────────────┘     └──────────────────┘     └────────────────┘
//!         │                                                │
//!         ▼                                                ▼
//! ┌─────────────────┐                              ┌────────────────┐
//! │ Response Curves │                              │   Analytics    │
//! │ Seasonality     │                              │ (view tables)  │
//! │ Halo / Synergy  │                              └────────────────┘
//! └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mediamix::prelude::*;
//!
//! let dataset = mediamix::dataset()?;
//! let selection = Selection::all().with_channels([Channel::Meta, Channel::Tv]);
//! let slice = filter(&dataset.records, &selection)?;
//!
//! for row in channel_contribution(&slice) {
//!     println!("{}: ROI {:.2}", row.channel, row.roi);
//! }
//! # Ok::<(), mediamix::MediaMixError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analytics;
pub mod config;
pub mod error;
pub mod fabric;
pub mod filter;
pub mod metrics;
pub mod models;
pub mod rng;

pub use error::{MediaMixError, Result};
pub use fabric::dataset;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::analytics::*;
    pub use crate::config::{AnalyticsConfig, MediaMixConfig};
    pub use crate::error::{MediaMixError, Result};
    pub use crate::fabric::{
        build_halo_matrix, build_synergy_matrix, dataset, response_roi, seasonal_multiplier,
        DatasetCache, GeneratorConfig, PanelGenerator, SeasonBucket,
    };
    pub use crate::filter::{filter, ChannelSelector, Selection, Selector};
    pub use crate::models::{
        ApiDataResponse, BrandProfile, Channel, ChannelParams, ChannelSynergyEntry, DailyRecord,
        FunnelStage, HaloMatrixEntry, MarketGroup, MediaType, TargetingType,
    };
    pub use crate::rng::PanelRng;
}

/// Version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
