//! Aggregation and transform library.
//!
//! Every view is an independent pure function over a filtered record slice
//! (and, for some views, the relationship matrices or parameter table). The
//! shared policy:
//!
//! - ratios with a zero denominator resolve to `0` (see [`crate::metrics`])
//! - groups without matching records do not appear
//! - sorting is stable, ties keep grouping (first-seen) order
//! - empty input yields an empty output
//!
//! No view filters, logs or mutates its input.

mod contribution;
mod decomposition;
mod delivery;
mod funnel;
mod relationships;
mod saturation;
mod scenarios;
mod seasonal;
mod summary;
mod time;

pub use contribution::*;
pub use decomposition::*;
pub use delivery::*;
pub use funnel::*;
pub use relationships::*;
pub use saturation::*;
pub use scenarios::*;
pub use seasonal::*;
pub use summary::*;
pub use time::*;

use crate::metrics;
use crate::models::DailyRecord;
use std::collections::HashMap;
use std::hash::Hash;

/// Running sums for one group of records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Summed spend.
    pub spend: f64,
    /// Summed net revenue.
    pub net_revenue: f64,
    /// Summed impressions.
    pub impressions: u64,
    /// Summed reach.
    pub reach: u64,
    /// Number of records accumulated.
    pub records: usize,
}

impl Totals {
    /// Accumulate one record.
    #[inline]
    pub fn add(&mut self, record: &DailyRecord) {
        self.spend += record.spend;
        self.net_revenue += record.net_revenue;
        self.impressions += record.impressions;
        self.reach += record.reach;
        self.records += 1;
    }

    /// Totals over a slice.
    pub fn of(records: &[DailyRecord]) -> Self {
        let mut totals = Self::default();
        for r in records {
            totals.add(r);
        }
        totals
    }

    /// Revenue over spend.
    pub fn roi(&self) -> f64 {
        metrics::roi(self.net_revenue, self.spend)
    }

    /// Cost per thousand impressions.
    pub fn cpm(&self) -> f64 {
        metrics::cpm(self.spend, self.impressions)
    }

    /// Impressions per person reached.
    pub fn frequency(&self) -> f64 {
        metrics::frequency(self.impressions, self.reach)
    }
}

/// Group records by key, keeping groups in first-seen order.
///
/// Records for which `key` returns `None` are skipped.
pub(crate) fn group_by<K, F>(records: &[DailyRecord], key: F) -> Vec<(K, Totals)>
where
    K: Eq + Hash + Clone,
    F: Fn(&DailyRecord) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Totals)> = Vec::new();

    for record in records {
        let Some(k) = key(record) else { continue };
        let slot = match index.get(&k) {
            Some(&i) => i,
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, Totals::default()));
                groups.len() - 1
            }
        };
        groups[slot].1.add(record);
    }

    groups
}

/// Stable descending sort on an `f64` metric.
pub(crate) fn sort_desc_by<T, F>(rows: &mut [T], metric: F)
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
}

/// Stable ascending sort on an ordering key.
pub(crate) fn sort_asc_by<T, K: Ord, F>(rows: &mut [T], key: F)
where
    F: Fn(&T) -> K,
{
    rows.sort_by(|a, b| key(a).cmp(&key(b)));
}

/// Keep at most `n` rows.
pub fn top_n<T>(mut rows: Vec<T>, n: usize) -> Vec<T> {
    rows.truncate(n);
    rows
}

/// Downsample a series to at most `max_points` with a fixed stride.
///
/// The stride is `ceil(len / max_points)`; the first point is always kept
/// and order is preserved, so sampling an already sampled series is a no-op.
pub fn sample_series<T: Clone>(series: &[T], max_points: usize) -> Vec<T> {
    if max_points == 0 {
        return Vec::new();
    }
    if series.len() <= max_points {
        return series.to_vec();
    }
    let stride = series.len().div_ceil(max_points);
    series.iter().step_by(stride).cloned().collect()
}
