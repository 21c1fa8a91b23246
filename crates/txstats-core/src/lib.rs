//! Core types and configuration for txstats.
//!
//! This crate defines the `txstats.toml` schema ([`TxStatsConfig`]), the
//! Transifex credentials ([`Credentials`]), the statistics model
//! ([`ResourceStats`], [`StatsReport`]), daily snapshot files and the
//! time-of-day math behind the daily schedule.

pub mod config;
pub mod credentials;
pub mod error;
pub mod schedule;
pub mod snapshot;
pub mod stats;

pub use config::{OutputConfig, ScheduleConfig, TransifexConfig, TxStatsConfig};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use schedule::{DailySchedule, DailyTime};
pub use stats::{AggregateOptions, ResourceStats, StatsReport};
