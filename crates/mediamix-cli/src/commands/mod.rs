//! CLI command implementations.

pub mod generate;
pub mod summary;
pub mod view;

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;
use mediamix::config::MediaMixConfig;
use mediamix::fabric::DatasetCache;
use mediamix::filter::{ChannelSelector, Selection, Selector};
use mediamix::models::ApiDataResponse;
use serde::Serialize;
use tracing::debug;

use crate::error::CliResult;

/// Selection flags shared by every command that reads records.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Brand to include, or "All"
    #[arg(short, long, default_value = "All")]
    pub brand: String,

    /// Market to include, or "All"
    #[arg(short, long, default_value = "All")]
    pub market: String,

    /// Comma-separated channels, or "All"
    #[arg(short, long, default_value = "All")]
    pub channels: String,
}

impl FilterArgs {
    /// Build the record selection.
    pub fn selection(&self) -> CliResult<Selection> {
        let channels: ChannelSelector = self.channels.parse()?;
        let selection = Selection {
            start: self.start,
            end: self.end,
            brand: Selector::parse(&self.brand),
            market: Selector::parse(&self.market),
            channels,
        };
        selection.validate()?;
        Ok(selection)
    }
}

/// Load configuration from a file, or from the environment alone.
pub fn load_config(path: Option<&Path>, seed: Option<u64>) -> CliResult<MediaMixConfig> {
    let config = match path {
        Some(p) => MediaMixConfig::load(p)?,
        None => MediaMixConfig::from_env()?,
    };
    Ok(match seed {
        Some(s) => config.with_seed(s),
        None => config,
    })
}

/// Generate (once) the dataset for a configuration.
pub fn load_dataset(config: &MediaMixConfig) -> CliResult<Arc<ApiDataResponse>> {
    debug!(seed = config.generator.seed, "loading dataset");
    let cache = DatasetCache::new(
        config.generator.clone(),
        mediamix::models::ChannelParams::defaults(),
    );
    Ok(cache.get()?)
}

/// Encode a value as JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> CliResult<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
