//! Mode itératif : motif de points clairsemé.
//!
//! La grille part toute noire ; chaque « hit » tire une coordonnée de sortie
//! uniforme et la peint en blanc si l'intensité BRUTE du pixel source (sans
//! étirement) bat un tirage dans [0, 255]. Les cellules jamais tirées restent
//! noires. Séquentiel : deux hits peuvent viser la même cellule.

use log::debug;
use rand::Rng;
use sd_core::{CoreError, DitherParams, Ditherer, Grid, WHITE};

use crate::rng::{stream_rng, trial};

/// Secondary mode. `hits = None` probes as many times as there are output cells.
///
/// `samples` and `stretch_factor` are validated but otherwise unused.
///
/// # Example
/// ```
/// use sd_core::{DitherParams, Ditherer, Grid};
/// use sd_dither::IterativeDither;
///
/// let input = Grid::from_rows(&[vec![0, 0], vec![0, 0]]).unwrap();
/// let out = IterativeDither::default().dither(&input, &DitherParams::default(), 1).unwrap();
/// assert!(out.data.iter().all(|&v| v == 0));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IterativeDither {
    /// Nombre de tirages de coordonnées.
    pub hits: Option<u64>,
}

impl Ditherer for IterativeDither {
    fn dither(&self, input: &Grid, params: &DitherParams, seed: u64) -> Result<Grid, CoreError> {
        let (out_w, out_h) = params.check(input)?;
        let hits = self
            .hits
            .unwrap_or(u64::from(out_w) * u64::from(out_h));
        debug!(
            "iterative: {}×{} → {out_w}×{out_h}, hits={hits}",
            input.width, input.height
        );

        let k = params.size_multiplier;
        let mut output = Grid::new(out_w, out_h);
        let mut rng = stream_rng(seed, 0);
        for _ in 0..hits {
            let oy = rng.random_range(0..out_h);
            let ox = rng.random_range(0..out_w);
            if trial(f64::from(input.get(ox / k, oy / k)), &mut rng) {
                output.set(ox, oy, WHITE);
            }
        }
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "iterative"
    }
}

/// Free-function form of [`IterativeDither`].
///
/// # Errors
/// Returns a [`CoreError`] for an invalid grid or `size_multiplier < 1`.
///
/// # Example
/// ```
/// use sd_core::Grid;
/// use sd_dither::iterative_dither;
/// let input = Grid::from_rows(&[vec![255, 255]]).unwrap();
/// let out = iterative_dither(&input, 0, 2, 5).unwrap();
/// assert_eq!(out.dimensions(), (4, 2));
/// assert!(out.data.iter().all(|&v| v == 0));
/// ```
pub fn iterative_dither(
    input: &Grid,
    hits: u64,
    size_multiplier: u32,
    seed: u64,
) -> Result<Grid, CoreError> {
    let params = DitherParams {
        size_multiplier,
        ..DitherParams::default()
    };
    IterativeDither { hits: Some(hits) }.dither(input, &params, seed)
}
