//! Filter engine: narrow the panel by date range, brand, market and channels.
//!
//! Every dimension defaults to "All", which is a no-op on that dimension.
//! Filtering preserves record order and an empty result is not an error.

use crate::error::{MediaMixError, Result};
use crate::models::{Channel, DailyRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Wildcard literal accepted by selector parsing.
pub const ALL: &str = "All";

/// A single-value selector that may be the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selector<T> {
    /// Match everything.
    #[default]
    All,
    /// Match one value.
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    /// Whether a value passes the selector.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    /// Whether this is the wildcard.
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl Selector<String> {
    /// Parse a brand or market selector; empty or `"All"` is the wildcard.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            Selector::All
        } else {
            Selector::Only(s.to_string())
        }
    }

    fn matches_str(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

/// Channel-set selector: "All" or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelSelector {
    /// Every channel.
    #[default]
    All,
    /// Only the listed channels.
    Only(Vec<Channel>),
}

impl ChannelSelector {
    /// Whether a channel passes the selector.
    pub fn matches(&self, channel: Channel) -> bool {
        match self {
            ChannelSelector::All => true,
            ChannelSelector::Only(list) => list.contains(&channel),
        }
    }
}

impl FromStr for ChannelSelector {
    type Err = MediaMixError;

    /// Parse `"All"` or a comma-separated channel list (`"Meta, TV"`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(ChannelSelector::All);
        }
        let mut channels = Vec::new();
        for part in s.split(',').map(str::trim) {
            if part.is_empty() || part.eq_ignore_ascii_case(ALL) {
                return Err(MediaMixError::UnknownSelector(s.to_string()));
            }
            let channel: Channel = part.parse()?;
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        Ok(ChannelSelector::Only(channels))
    }
}

/// Caller's selection over the panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// First date to keep (inclusive); unbounded when `None`.
    pub start: Option<NaiveDate>,
    /// Last date to keep (inclusive); unbounded when `None`.
    pub end: Option<NaiveDate>,
    /// Brand selector.
    pub brand: Selector<String>,
    /// Market selector.
    pub market: Selector<String>,
    /// Channel selector.
    pub channels: ChannelSelector,
}

impl Selection {
    /// Selection that keeps everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive date range.
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Restrict to one brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Selector::Only(brand.into());
        self
    }

    /// Restrict to one market.
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Selector::Only(market.into());
        self
    }

    /// Restrict to a set of channels.
    pub fn with_channels(mut self, channels: impl IntoIterator<Item = Channel>) -> Self {
        self.channels = ChannelSelector::Only(channels.into_iter().collect());
        self
    }

    /// Reject an inverted date range. Used at input boundaries such as the CLI.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(MediaMixError::InvalidDateRange { start, end });
            }
        }
        Ok(())
    }

    /// Whether a record passes every active predicate.
    pub fn matches(&self, record: &DailyRecord) -> bool {
        self.start.map_or(true, |s| record.date >= s)
            && self.end.map_or(true, |e| record.date <= e)
            && self.brand.matches_str(&record.brand)
            && self.market.matches_str(&record.market)
            && self.channels.matches(record.channel)
    }
}

/// Records passing the selection, in input order.
///
/// An inverted date range selects nothing and yields an empty result.
pub fn filter(records: &[DailyRecord], selection: &Selection) -> Result<Vec<DailyRecord>> {
    Ok(records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> Vec<DailyRecord> {
        vec![
            DailyRecord::new(date(1, 1), "Crestview Cola", "Canada", Channel::Meta, 100.0, 300.0),
            DailyRecord::new(date(1, 2), "Crestview Cola", "Japan", Channel::Tv, 200.0, 300.0),
            DailyRecord::new(date(1, 3), "Summit Grill", "Canada", Channel::Meta, 50.0, 60.0),
            DailyRecord::new(date(1, 4), "Summit Grill", "Brazil", Channel::Search, 80.0, 400.0),
        ]
    }

    #[test]
    fn test_all_is_identity() {
        let records = sample();
        assert_eq!(filter(&records, &Selection::all()).unwrap(), records);
    }

    #[test]
    fn test_combined_predicates() {
        let records = sample();
        let selection = Selection::all()
            .with_range(date(1, 1), date(1, 3))
            .with_market("Canada")
            .with_channels([Channel::Meta]);
        let out = filter(&records, &selection).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].brand, "Crestview Cola");
        assert_eq!(out[1].brand, "Summit Grill");
    }

    #[test]
    fn test_range_is_inclusive() {
        let records = sample();
        let out = filter(&records, &Selection::all().with_range(date(1, 2), date(1, 2))).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, date(1, 2));
    }

    #[test]
    fn test_empty_result_is_ok() {
        let out = filter(&sample(), &Selection::all().with_brand("Lumina Skin")).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let selection = Selection::all().with_range(date(2, 1), date(1, 1));
        let out = filter(&sample(), &selection).unwrap();
        assert!(out.is_empty());

        assert!(matches!(
            selection.validate(),
            Err(MediaMixError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(Selector::parse("All"), Selector::All);
        assert_eq!(Selector::parse(""), Selector::All);
        assert_eq!(Selector::parse("Japan"), Selector::Only("Japan".to_string()));
        assert!(Selector::parse(" all ").is_all());
        assert!(!Selector::parse("Japan").is_all());

        assert_eq!("all".parse::<ChannelSelector>().unwrap(), ChannelSelector::All);
        assert_eq!(
            "meta, TV, Meta".parse::<ChannelSelector>().unwrap(),
            ChannelSelector::Only(vec![Channel::Meta, Channel::Tv])
        );
        assert!(matches!(
            "Meta,Radio".parse::<ChannelSelector>(),
            Err(MediaMixError::UnknownChannel(_))
        ));
        assert!(matches!(
            "Meta,All".parse::<ChannelSelector>(),
            Err(MediaMixError::UnknownSelector(_))
        ));
    }

    #[test]
    fn test_empty_channel_list_rejected() {
        for input in [",", " , ", "Meta,", "Meta,,TV"] {
            assert!(
                matches!(
                    input.parse::<ChannelSelector>(),
                    Err(MediaMixError::UnknownSelector(_))
                ),
                "{input:?} should be rejected"
            );
        }
    }
}
