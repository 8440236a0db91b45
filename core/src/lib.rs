//! Core of the insurance marketing dashboard: the metrics aggregator over
//! the seed dataset, and the live monitoring feed with its synthetic
//! event generator.

pub mod clock;
pub mod command;
pub mod config;
pub mod dataset;
pub mod error;
pub mod event;
pub mod feed;
pub mod generator;
pub mod metrics;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod types;
