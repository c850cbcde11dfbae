//! Aggregators over a filtered trip dataset.
//!
//! Each aggregator reads the dataset and nothing else, so they can run in
//! any order or in parallel. Empty selections and untracked columns produce
//! sentinels rather than errors.

pub mod demographics;
pub mod duration;
pub mod frequency;
pub mod travel;
pub mod types;
