//! Transifex v2 API client for txstats.
//!
//! [`TransifexClient`] lists project resources and fetches per-language
//! statistics concurrently; [`collect_snapshot`] runs the whole
//! collect-and-save pipeline used by the CLI.

pub mod client;
pub mod collector;
pub mod doctor;
pub mod error;
pub mod transport;

pub use client::{Resource, TransifexClient};
pub use collector::collect_snapshot;
pub use doctor::{CheckResult, DoctorReport};
pub use error::{CollectError, TransifexError};
pub use transport::{HttpTransport, Transport};
