//! Stochastic dithering engine for sampledither.
//!
//! Converts a grayscale [`Grid`] to a binary one by independent random trials
//! per output cell: the dense majority-vote mode ([`SamplingDither`]) and the
//! sparse point mode ([`IterativeDither`]).
//!
//! # Example
//! ```
//! use sd_core::{DitherParams, Grid};
//! let input = Grid::from_rows(&[vec![0, 64], vec![192, 255]]).unwrap();
//! let params = DitherParams { size_multiplier: 2, samples: 3, seed: Some(7), ..Default::default() };
//! let out = sd_dither::dither(&input, &params).unwrap();
//! assert_eq!(out.dimensions(), (4, 4));
//! assert!(out.is_binary());
//! ```

pub mod iterative;
pub mod rng;
pub mod sampling;
pub mod stretch;

use sd_core::config::{DitherConfig, DitherMode};
use sd_core::{CoreError, DitherParams, Ditherer, Grid};

pub use iterative::{IterativeDither, iterative_dither};
pub use sampling::SamplingDither;

/// Sampling-mode dither. Uses `params.seed`, or fresh entropy when absent.
///
/// # Errors
/// Returns a [`CoreError`] for an empty/ragged grid or invalid parameters.
pub fn dither(input: &Grid, params: &DitherParams) -> Result<Grid, CoreError> {
    let seed = params.seed.unwrap_or_else(rng::fresh_seed);
    dither_seeded(input, params, seed)
}

/// Sampling-mode dither with an explicit seed (`params.seed` is ignored).
///
/// # Errors
/// Returns a [`CoreError`] for an empty/ragged grid or invalid parameters.
///
/// # Example
/// ```
/// use sd_core::{DitherParams, Grid};
/// let input = Grid::from_rows(&vec![vec![127u8; 8]; 8]).unwrap();
/// let p = DitherParams::default();
/// assert_eq!(
///     sd_dither::dither_seeded(&input, &p, 3).unwrap(),
///     sd_dither::dither_seeded(&input, &p, 3).unwrap(),
/// );
/// ```
pub fn dither_seeded(input: &Grid, params: &DitherParams, seed: u64) -> Result<Grid, CoreError> {
    SamplingDither.dither(input, params, seed)
}

/// Ditherer selected by the configuration's mode.
#[must_use]
pub fn ditherer_for(config: &DitherConfig) -> Box<dyn Ditherer> {
    match config.mode {
        DitherMode::Sampling => Box::new(SamplingDither),
        DitherMode::Iterative => Box::new(IterativeDither { hits: config.hits }),
    }
}

/// Run one full pass as described by `config`.
///
/// Logs a warning for parameters outside the recommended control ranges; they
/// are still honoured.
///
/// # Errors
/// Returns a [`CoreError`] for an empty/ragged grid or invalid parameters.
///
/// # Example
/// ```
/// use sd_core::{DitherConfig, DitherMode, Grid};
/// let input = Grid::from_rows(&[vec![255, 0]]).unwrap();
/// let config = DitherConfig { mode: DitherMode::Iterative, hits: Some(0), ..Default::default() };
/// let out = sd_dither::run(&input, &config).unwrap();
/// assert_eq!(out.data, vec![0, 0]);
/// ```
pub fn run(input: &Grid, config: &DitherConfig) -> Result<Grid, CoreError> {
    let params = config.params();
    for name in params.out_of_range() {
        log::warn!("{name} hors de la plage recommandée ({params:?})");
    }
    let seed = params.seed.unwrap_or_else(rng::fresh_seed);
    let ditherer = ditherer_for(config);
    log::debug!("Passe {} (graine {seed})", ditherer.name());
    ditherer.dither(input, &params, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_dispatches_on_mode() {
        let input = Grid::from_raw(8, 8, vec![255; 64]).unwrap();
        let sampling = DitherConfig {
            seed: Some(1),
            ..Default::default()
        };
        let iterative = DitherConfig {
            mode: DitherMode::Iterative,
            hits: Some(3),
            seed: Some(1),
            ..Default::default()
        };
        // 255 à s=1 : le mode dense est presque tout blanc, le mode itératif
        // ne peint qu'au plus 3 cellules.
        assert!(run(&input, &sampling).unwrap().white_fraction() > 0.9);
        let sparse = run(&input, &iterative).unwrap();
        assert!(sparse.data.iter().filter(|&&v| v == 255).count() <= 3);
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let input = Grid::from_raw(10, 10, (0..100u8).collect()).unwrap();
        let config = DitherConfig {
            size_multiplier: 2,
            samples: 5,
            seed: Some(99),
            ..Default::default()
        };
        assert_eq!(run(&input, &config).unwrap(), run(&input, &config).unwrap());
        assert_eq!(
            run(&input, &config).unwrap(),
            dither_seeded(&input, &config.params(), 99).unwrap()
        );
    }

    #[test]
    fn names() {
        assert_eq!(ditherer_for(&DitherConfig::default()).name(), "sampling");
        let cfg = DitherConfig {
            mode: DitherMode::Iterative,
            ..Default::default()
        };
        assert_eq!(ditherer_for(&cfg).name(), "iterative");
    }
}
