//! Request hardening for the holiday plans API
//!
//! Bounds how many requests are in flight at once and how long any single
//! request may take.

pub mod concurrency;
pub mod config;

pub use concurrency::{ConcurrencyLimiter, ConcurrencyStats};
pub use config::ResilienceConfig;
