use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use crate::account::AccountState;
use crate::analysis::{self, YearBand};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::types::Month;

/// Monthly return model: independent Gaussian shocks,
/// r ~ Normal(mu_annual/100/12, sigma_annual/100/sqrt(12)), drawn
/// independently across months and across paths. Deliberately the simple
/// i.i.d. model: no autocorrelation, no cross-path correlation.
pub struct ReturnModel {
    dist: Normal<f64>,
}

impl ReturnModel {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let mu = config.annual_return_pct / 100.0 / 12.0;
        let sigma = config.annual_volatility_pct / 100.0 / 12_f64.sqrt();
        ReturnModel { dist: Normal::new(mu, sigma).expect("invalid Normal params") }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.dist.sample(rng)
    }
}

/// Run the full ensemble. Returns a path-major matrix:
/// `result[p][y]` = market value of path p at the end of year y+1.
///
/// Each path draws from its own generator seeded `seed + path_index`, so
/// the ensemble is reproducible regardless of how rayon schedules the
/// paths. Months within a path are strictly sequential.
pub fn simulate_paths(config: &SimulationConfig) -> Result<Vec<Vec<f64>>, ConfigError> {
    config.validate()?;
    if config.n_paths == 0 {
        return Err(ConfigError::NoPaths);
    }

    let model = ReturnModel::from_config(config);
    let paths: Vec<Vec<f64>> = (0..config.n_paths as u64)
        .into_par_iter()
        .map(|i| run_path(config, &model, config.seed + i))
        .collect();
    Ok(paths)
}

fn run_path(config: &SimulationConfig, model: &ReturnModel, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut account = AccountState::new();
    let months = config.horizon_years as u64 * Month::MONTHS_PER_YEAR;
    let mut yearly = Vec::with_capacity(config.horizon_years as usize);

    for m in 1..=months {
        let r = model.sample(&mut rng);
        account.advance_month(config.monthly_contribution, config.ceiling, r);
        if Month(m).is_year_end() {
            yearly.push(account.market_value);
        }
    }

    yearly
}

/// Stochastic projection: simulate the ensemble and reduce it to per-year
/// bands (central line, configured percentiles, principal reference).
pub fn simulate(config: &SimulationConfig) -> Result<Vec<YearBand>, ConfigError> {
    let paths = simulate_paths(config)?;
    Ok(analysis::reduce(&paths, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector;

    fn small_config(seed: u64) -> SimulationConfig {
        let mut config = SimulationConfig::canonical();
        config.seed = seed;
        config.horizon_years = 10;
        config.n_paths = 200;
        config
    }

    #[test]
    fn fixed_seed_is_bit_reproducible() {
        let config = small_config(42);
        let a = simulate_paths(&config).unwrap();
        let b = simulate_paths(&config).unwrap();
        assert_eq!(a, b, "same seed must reproduce the ensemble bit for bit");
    }

    #[test]
    fn different_seeds_diverge() {
        let a = simulate_paths(&small_config(1)).unwrap();
        let b = simulate_paths(&small_config(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn ensemble_shape_is_paths_by_years() {
        let config = small_config(42);
        let paths = simulate_paths(&config).unwrap();
        assert_eq!(paths.len(), 200);
        for p in &paths {
            assert_eq!(p.len(), 10);
        }
    }

    #[test]
    fn zero_paths_rejected() {
        let mut config = small_config(42);
        config.n_paths = 0;
        assert_eq!(simulate_paths(&config), Err(ConfigError::NoPaths));
    }

    /// With zero volatility every draw is exactly μ, so the stochastic
    /// projector degenerates to the deterministic one: all paths identical,
    /// bands collapsed onto the central value.
    #[test]
    fn zero_volatility_collapses_to_deterministic() {
        let mut config = small_config(42);
        config.annual_volatility_pct = 0.0;
        config.n_paths = 50;

        let bands = simulate(&config).unwrap();
        let snapshots = projector::project(&config).unwrap();

        for (band, snap) in bands.iter().zip(&snapshots) {
            assert_eq!(band.central, snap.market_value, "year {}", band.year.0);
            assert_eq!(band.lower, band.central);
            assert_eq!(band.upper, band.central);
        }
    }

    #[test]
    fn bands_are_ordered_for_seeded_canonical_run() {
        let bands = simulate(&small_config(42)).unwrap();
        for b in &bands {
            assert!(b.lower <= b.central, "year {}: lower > central", b.year.0);
            assert!(b.central <= b.upper, "year {}: central > upper", b.year.0);
        }
    }

    /// E[∏(1+rᵢ)] = (1+μ)ⁿ for independent draws, and the contribution
    /// schedule is deterministic, so the ensemble mean of the final value
    /// estimates the deterministic projection. 200 paths put the standard
    /// error of that mean around 2 %; ±10 % is a safe acceptance band.
    #[test]
    fn ensemble_mean_tracks_deterministic_value() {
        let config = small_config(42);
        let bands = simulate(&config).unwrap();
        let snapshots = projector::project(&config).unwrap();

        let mc = bands.last().unwrap().central;
        let det = snapshots.last().unwrap().market_value;
        let lo = det * 0.90;
        let hi = det * 1.10;
        assert!(
            mc >= lo && mc <= hi,
            "ensemble mean {mc:.0} outside [{lo:.0}, {hi:.0}]"
        );
    }

    #[test]
    fn principal_reference_is_independent_of_seed() {
        let a = simulate(&small_config(1)).unwrap();
        let b = simulate(&small_config(99)).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.principal, y.principal);
        }
    }

    /// Large losses are allowed to push the whole band below the principal
    /// reference; there is no clamping anywhere in the pipeline.
    #[test]
    fn negative_mean_return_sinks_below_principal() {
        let mut config = small_config(42);
        config.annual_return_pct = -30.0;
        config.annual_volatility_pct = 5.0;

        let bands = simulate(&config).unwrap();
        let last = bands.last().unwrap();
        assert!(
            last.central < last.principal,
            "central {} should sit below principal {} after sustained losses",
            last.central,
            last.principal
        );
    }
}
