//! Error types for panel generation and analytics.
//!
//! Degenerate ratios (zero spend, zero impressions, zero reach) and empty
//! filter results are not errors. They resolve to `0` or to an empty view.

use chrono::NaiveDate;
use thiserror::Error;

/// Error type for the mediamix crate.
///
/// `Clone` so that a failed generation can be memoized by the dataset cache
/// and handed to every caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaMixError {
    /// A channel referenced during generation has no parameter row.
    #[error("no channel parameters configured for channel '{0}'")]
    MissingChannelParams(String),

    /// A channel parameter row failed validation.
    #[error("invalid parameters for channel '{channel}': {reason}")]
    InvalidChannelParams {
        /// Channel the row belongs to.
        channel: String,
        /// What is wrong with the row.
        reason: String,
    },

    /// Date window with start after end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// Channel name that does not match any known channel.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// Selector string that cannot be parsed.
    #[error("unknown selector: {0}")]
    UnknownSelector(String),

    /// Configuration load or validation error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for MediaMixError {
    fn from(e: config::ConfigError) -> Self {
        MediaMixError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for MediaMixError {
    fn from(e: serde_json::Error) -> Self {
        MediaMixError::Serialization(e.to_string())
    }
}

/// Result type for mediamix operations.
pub type Result<T> = std::result::Result<T, MediaMixError>;
