pub mod analyzers;
pub mod city;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod preview;
pub mod report;
pub mod stats;
pub mod temporal;
