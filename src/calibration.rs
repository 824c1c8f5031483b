use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::CalibrationError;

/// Externally observed market history used to seed the return assumptions:
/// annualized mean return and volatility, both in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    pub mean_return_pct: f64,
    pub volatility_pct: f64,
}

impl Default for Calibration {
    /// Locally-defined fallback so a projection can run even when every
    /// provider is down: long-run global-equity figures.
    fn default() -> Self {
        Calibration { mean_return_pct: 5.0, volatility_pct: 15.0 }
    }
}

/// A provider of calibration data, such as a quote service or a test stub.
/// Implementations may fail; `CachedCalibration` absorbs the failures so
/// they never reach the simulation core.
pub trait CalibrationSource {
    fn fetch(&mut self) -> Result<Calibration, CalibrationError>;
}

/// Time-expiring cache over a `CalibrationSource` with a last-known-good
/// fallback. `get` is total: a refresh failure serves the most recent
/// successful fetch, stale or not, and the built-in default when nothing
/// has ever succeeded.
pub struct CachedCalibration<S> {
    source: S,
    ttl: Duration,
    cached: Option<(Instant, Calibration)>,
}

impl<S: CalibrationSource> CachedCalibration<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        CachedCalibration { source, ttl, cached: None }
    }

    pub fn get(&mut self) -> Calibration {
        if let Some((fetched_at, cal)) = self.cached
            && fetched_at.elapsed() < self.ttl
        {
            return cal;
        }
        match self.source.fetch() {
            Ok(cal) => {
                self.cached = Some((Instant::now(), cal));
                cal
            }
            Err(_) => self.cached.map(|(_, cal)| cal).unwrap_or_default(),
        }
    }
}
