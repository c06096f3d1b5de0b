//! Process-wide dataset cache: compute once, read many.
//!
//! The first caller triggers generation; every later caller, concurrent or
//! not, receives the same immutable [`ApiDataResponse`]. `OnceLock` blocks
//! concurrent first callers until the single initializer finishes, so at
//! most one generation runs per cache instance.

use super::panel_gen::{GeneratorConfig, PanelGenerator};
use crate::error::Result;
use crate::models::{ApiDataResponse, ChannelParams};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Memoizing holder of the generated dataset.
pub struct DatasetCache {
    config: GeneratorConfig,
    params: Vec<ChannelParams>,
    cell: OnceLock<Result<Arc<ApiDataResponse>>>,
    generations: AtomicUsize,
}

impl DatasetCache {
    /// Create an empty cache for a configuration and parameter table.
    pub fn new(config: GeneratorConfig, params: Vec<ChannelParams>) -> Self {
        Self {
            config,
            params,
            cell: OnceLock::new(),
            generations: AtomicUsize::new(0),
        }
    }

    /// Create an empty cache with the default configuration and parameters.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default(), ChannelParams::defaults())
    }

    /// Get the dataset, generating it on first access.
    ///
    /// A configuration error is memoized like a successful result.
    pub fn get(&self) -> Result<Arc<ApiDataResponse>> {
        self.cell
            .get_or_init(|| {
                self.generations.fetch_add(1, Ordering::SeqCst);
                info!(seed = self.config.seed, "dataset cache miss, generating");
                PanelGenerator::new(self.config.clone(), &self.params)
                    .map(|generator| Arc::new(generator.generate_dataset()))
            })
            .clone()
    }

    /// Whether the dataset (or a generation error) is already held.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Number of generations run by this cache.
    pub fn generation_count(&self) -> usize {
        self.generations.load(Ordering::SeqCst)
    }

    /// Drop the held dataset so the next access regenerates it.
    pub fn invalidate(&mut self) {
        if self.cell.take().is_some() {
            info!("dataset cache invalidated");
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static GLOBAL_CACHE: OnceLock<DatasetCache> = OnceLock::new();

/// Process-wide dataset built from the default configuration.
///
/// Lives for the whole process; use a dedicated [`DatasetCache`] when the
/// dataset needs a custom configuration or invalidation.
pub fn dataset() -> Result<Arc<ApiDataResponse>> {
    GLOBAL_CACHE.get_or_init(DatasetCache::with_defaults).get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaMixError;
    use crate::models::Channel;
    use chrono::NaiveDate;

    fn small_cache() -> DatasetCache {
        let config = GeneratorConfig::default().with_window(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        );
        DatasetCache::new(config, ChannelParams::defaults())
    }

    #[test]
    fn test_generates_once() {
        let cache = small_cache();
        assert!(!cache.is_initialized());

        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.generation_count(), 1);
    }

    #[test]
    fn test_invalidate_regenerates() {
        let mut cache = small_cache();
        let first = cache.get().unwrap();
        cache.invalidate();
        assert!(!cache.is_initialized());

        let second = cache.get().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(cache.generation_count(), 2);
    }

    #[test]
    fn test_error_is_memoized() {
        let params: Vec<ChannelParams> = ChannelParams::defaults()
            .into_iter()
            .filter(|p| p.channel != Channel::Ooh)
            .collect();
        let cache = DatasetCache::new(GeneratorConfig::default(), params);

        assert_eq!(
            cache.get().unwrap_err(),
            MediaMixError::MissingChannelParams("OOH".into())
        );
        assert!(cache.get().is_err());
        assert_eq!(cache.generation_count(), 1);
    }
}
