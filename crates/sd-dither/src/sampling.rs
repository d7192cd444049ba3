//! Dithering par échantillonnage : vote majoritaire sur `samples` tirages
//! indépendants pour chaque cellule de sortie.
//!
//! Chaque pixel source pilote un bloc k×k de cellules qui partagent la même
//! intensité étirée mais tirent chacune leurs propres échantillons.
//! `samples = 1` donne une quantification de Bernoulli pure ; un grand nombre
//! d'échantillons converge vers un seuillage à 127.

use log::debug;
use rand::Rng;
use rayon::prelude::*;
use sd_core::{BLACK, CoreError, DitherParams, Ditherer, Grid, WHITE};

use crate::rng::{stream_rng, trial};
use crate::stretch::StretchLut;

/// Majority vote over `samples` trials. Ties go to white.
///
/// Stops drawing as soon as the outcome is fixed; values above 255 or at/below
/// 0 are decided without drawing since every trial would agree.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use sd_dither::sampling::vote;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// assert!(vote(300.0, 5, &mut rng));
/// assert!(!vote(-4.0, 5, &mut rng));
/// ```
#[inline]
pub fn vote<R: Rng + ?Sized>(value: f64, samples: u32, rng: &mut R) -> bool {
    if value > 255.0 {
        return true;
    }
    if value <= 0.0 {
        return false;
    }

    let samples = u64::from(samples);
    let mut white = 0u64;
    let mut black = 0u64;
    for _ in 0..samples {
        if trial(value, rng) {
            white += 1;
            if 2 * white >= samples {
                return true;
            }
        } else {
            black += 1;
            if 2 * black > samples {
                return false;
            }
        }
    }
    white >= black
}

/// Primary mode: dense per-cell majority vote, rows evaluated in parallel.
///
/// # Example
/// ```
/// use sd_core::{DitherParams, Ditherer, Grid};
/// use sd_dither::SamplingDither;
///
/// let input = Grid::from_rows(&[vec![0, 255]]).unwrap();
/// let params = DitherParams { samples: 9, ..Default::default() };
/// let out = SamplingDither.dither(&input, &params, 42).unwrap();
/// assert_eq!(out.data, vec![0, 255]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SamplingDither;

impl Ditherer for SamplingDither {
    fn dither(&self, input: &Grid, params: &DitherParams, seed: u64) -> Result<Grid, CoreError> {
        let (out_w, out_h) = params.check(input)?;
        debug!(
            "sampling: {}×{} → {out_w}×{out_h}, samples={}, stretch={}",
            input.width, input.height, params.samples, params.stretch_factor
        );

        let lut = StretchLut::new(params.stretch_factor);
        let k = params.size_multiplier as usize;
        let in_w = input.width as usize;
        let samples = params.samples;

        let mut output = Grid::new(out_w, out_h);
        // Une ligne de sortie = une partition : écriture disjointe, un RNG par ligne.
        output
            .data
            .par_chunks_mut(out_w as usize)
            .enumerate()
            .for_each(|(oy, row)| {
                let sy = oy / k;
                let src = &input.data[sy * in_w..(sy + 1) * in_w];
                let mut rng = stream_rng(seed, oy as u64);
                for (ox, cell) in row.iter_mut().enumerate() {
                    let value = lut.get(src[ox / k]);
                    *cell = if vote(value, samples, &mut rng) {
                        WHITE
                    } else {
                        BLACK
                    };
                }
            });

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "sampling"
    }
}
