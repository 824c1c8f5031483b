use serde::Serialize;

use crate::account::AccountState;
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::types::{Month, Year};

/// Account state captured at a 12-month boundary. One row per elapsed year,
/// in increasing year order starting at year 1.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct YearlySnapshot {
    pub year: Year,
    /// Cumulative contributed principal, yen (capped at the ceiling).
    pub principal: f64,
    /// Unrealized gain: market value minus principal. Negative after losses.
    pub gain: f64,
    pub market_value: f64,
}

/// Deterministic projection: advance one account month by month at the
/// constant rate `annual_return_pct / 100 / 12` for the whole horizon,
/// snapshotting each year end. No randomness: identical inputs reproduce
/// identical output bit for bit.
pub fn project(config: &SimulationConfig) -> Result<Vec<YearlySnapshot>, ConfigError> {
    config.validate()?;

    let rate = config.monthly_rate();
    let months = config.horizon_years as u64 * Month::MONTHS_PER_YEAR;
    let mut account = AccountState::new();
    let mut snapshots = Vec::with_capacity(config.horizon_years as usize);

    for m in 1..=months {
        account.advance_month(config.monthly_contribution, config.ceiling, rate);
        if let Some(year) = Month(m).closes_year() {
            snapshots.push(YearlySnapshot {
                year,
                principal: account.principal,
                gain: account.gain(),
                market_value: account.market_value,
            });
        }
    }

    Ok(snapshots)
}
