//! Frequency tables, mode selection and top-N rankings.
//!
//! Ties are broken by first occurrence: when two values share a count, the
//! one seen earlier in the dataset ranks higher. [`FrequencyTable::mode`] and
//! [`FrequencyTable::top_n`] apply the same rule, so the first ranked entry is
//! always the mode.

use indexmap::IndexMap;
use std::hash::Hash;

use crate::analyzers::types::{RankedValue, Sentinel, Stat};

/// Number of entries kept for station and route rankings.
pub const TOP_N: usize = 10;

/// Value counts in first-occurrence order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K: Hash + Eq> {
    counts: IndexMap<K, usize>,
}

impl<K: Hash + Eq> Default for FrequencyTable<K> {
    fn default() -> Self {
        FrequencyTable {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every `Some` value; `None` is a missing value and is skipped.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<K>>,
    {
        let mut table = Self::new();
        for value in values.into_iter().flatten() {
            table.observe(value);
        }
        table
    }

    pub fn observe(&mut self, value: K) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    pub fn get(&self, value: &K) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of values counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, c)| (k, *c))
    }

    /// Most frequent value and its count, or `None` for an empty table.
    pub fn mode(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (value, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((value, count)),
            }
        }
        best
    }

    /// All entries, count descending, ties in first-occurrence order.
    pub fn ranked(&self) -> Vec<(&K, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        // stable: equal counts keep insertion order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// The `n` most frequent entries; fewer if there are fewer distinct values.
    pub fn top_n(&self, n: usize) -> Vec<(&K, usize)> {
        let mut entries = self.ranked();
        entries.truncate(n);
        entries
    }
}

/// Mode of `values` rendered through `label`, or [`Sentinel::NoData`].
pub fn mode_of<K, I, F>(values: I, label: F) -> Stat<String>
where
    K: Hash + Eq,
    I: IntoIterator<Item = Option<K>>,
    F: Fn(&K) -> String,
{
    let table = FrequencyTable::from_values(values);
    Stat::from_option(table.mode().map(|(k, _)| label(k)), Sentinel::NoData)
}

/// Top `n` entries of `table` as labelled (value, count) pairs.
pub fn ranking<K, F>(table: &FrequencyTable<K>, n: usize, label: F) -> Vec<RankedValue>
where
    K: Hash + Eq,
    F: Fn(&K) -> String,
{
    table
        .top_n(n)
        .into_iter()
        .map(|(k, count)| RankedValue::new(label(k), count))
        .collect()
}

/// Every entry of `table` in first-occurrence order, for chart series.
pub fn series<K, F>(table: &FrequencyTable<K>, label: F) -> Vec<RankedValue>
where
    K: Hash + Eq,
    F: Fn(&K) -> String,
{
    table
        .iter()
        .map(|(k, count)| RankedValue::new(label(k), count))
        .collect()
}
