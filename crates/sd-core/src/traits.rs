use crate::error::CoreError;
use crate::grid::Grid;
use crate::params::DitherParams;

/// Convertit une grille en niveaux de gris en grille binaire {0, 255}.
///
/// Implémenté par : `SamplingDither`, `IterativeDither`. Chaque cellule de
/// sortie est décidée par un tirage aléatoire indépendant ; `seed` fixe
/// entièrement la suite de tirages.
///
/// # Example
/// ```
/// use sd_core::traits::Ditherer;
/// use sd_core::{CoreError, DitherParams, Grid};
///
/// struct Threshold;
/// impl Ditherer for Threshold {
///     fn dither(&self, input: &Grid, params: &DitherParams, _seed: u64) -> Result<Grid, CoreError> {
///         params.check(input)?;
///         let data = input.data.iter().map(|&v| if v > 127 { 255 } else { 0 }).collect();
///         Grid::from_raw(input.width, input.height, data)
///     }
///     fn name(&self) -> &'static str { "threshold" }
/// }
///
/// let out = Threshold.dither(&Grid::new(2, 2), &DitherParams::default(), 0).unwrap();
/// assert!(out.is_binary());
/// ```
pub trait Ditherer: Send + Sync {
    /// Produce a fresh binary grid of `(width·k) × (height·k)` cells.
    ///
    /// # Errors
    /// Returns a [`CoreError`] if the input grid or the parameters are invalid.
    /// No computation happens in that case.
    fn dither(&self, input: &Grid, params: &DitherParams, seed: u64) -> Result<Grid, CoreError>;

    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;
}
