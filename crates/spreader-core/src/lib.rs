//! spreader-core - Infection tree risk ranking
//!
//! This crate provides functionality to:
//! - Build a directed infection tree from a population and a contact log
//! - Propagate a compounded transmission risk from the index case
//! - Rank the population by risk and classify each person's exposure

pub mod constants;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::builder::{BuildError, BuildOutcome, ContactGraph, build_graph};
pub use app::detector::{DetectorError, analyze, run_files};
pub use app::reporter::{Report, ReportRecord, build_report};
pub use constants::*;
pub use domain::classify::{Category, Thresholds};
pub use domain::config::{ConfigError, DetectorConfig, ParsePolicy};
pub use domain::node_store::NodeStore;
pub use domain::person::{Edge, Person};
pub use domain::risk::{Calibration, propagate_risk, transmission_factor};
pub use infra::config_io::load_config;
