//! Contribution-capped investment growth simulation: a deterministic
//! monthly compounding projector and a Monte Carlo risk projector built on
//! the same capped-contribution engine, reduced to per-year percentile
//! bands.

pub mod account;
pub mod analysis;
pub mod calibration;
pub mod config;
pub mod error;
pub mod montecarlo;
pub mod projector;
pub mod types;
