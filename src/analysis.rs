use serde::Serialize;

use crate::config::{CentralTendency, SimulationConfig};
use crate::types::Year;

/// Per-year reduction of the Monte Carlo ensemble: a central line, the
/// configured percentile band, and the no-return contribution schedule as a
/// reference. Owns no reference back to individual paths.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct YearBand {
    pub year: Year,
    /// Mean or median market value across paths, per config.
    pub central: f64,
    /// Lower band percentile, yen.
    pub lower: f64,
    /// Upper band percentile, yen.
    pub upper: f64,
    /// Capped contribution schedule `min(monthly × 12 × year, ceiling)`.
    pub principal: f64,
}

/// Percentile by linear interpolation between order statistics:
/// h = p/100 × (n−1). `sorted` must be ascending and non-empty.
/// Out-of-range percentiles clamp to the extremes.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = ((p / 100.0) * (n - 1) as f64).clamp(0.0, (n - 1) as f64);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// The contribution schedule with the cap applied, ignoring returns.
pub fn principal_reference(config: &SimulationConfig, year: Year) -> f64 {
    (config.monthly_contribution * 12.0 * year.0 as f64).min(config.ceiling)
}

/// Reduce a path-major matrix of yearly market values
/// (`paths[p][y]` = path p at the end of year y+1) to per-year bands.
///
/// Expects at least one path; the stochastic projector rejects empty
/// ensembles before reaching here. With all paths identical (zero
/// volatility) every band collapses onto the central value.
pub fn reduce(paths: &[Vec<f64>], config: &SimulationConfig) -> Vec<YearBand> {
    let horizon = config.horizon_years as usize;
    let mut bands = Vec::with_capacity(horizon);

    for y in 0..horizon {
        let mut values: Vec<f64> = paths.iter().map(|p| p[y]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let central = match config.central {
            CentralTendency::Mean => values.iter().sum::<f64>() / values.len() as f64,
            CentralTendency::Median => percentile(&values, 50.0),
        };

        let year = Year(y as u32 + 1);
        bands.push(YearBand {
            year,
            central,
            lower: percentile(&values, config.lower_percentile),
            upper: percentile(&values, config.upper_percentile),
            principal: principal_reference(config, year),
        });
    }

    bands
}
