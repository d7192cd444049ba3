//! Étirement de contraste autour du point milieu 127.
//!
//! Les valeurs étirées ne sont PAS bornées à [0, 255] : la comparaison avec un
//! tirage dans [0, 255] sature d'elle-même (> 255 gagne toujours, ≤ 0 perd
//! toujours). Borner ici changerait le résultat à 255 exactement.

use sd_core::Grid;

/// Point fixe de l'étirement.
pub const MIDPOINT: f64 = 127.0;

/// `(value - 127) * factor + 127`, en flottant signé.
///
/// # Example
/// ```
/// use sd_dither::stretch::stretch;
/// assert_eq!(stretch(127, 2.0), 127.0);
/// assert_eq!(stretch(200, 2.0), 273.0);
/// assert_eq!(stretch(0, 2.0), -127.0);
/// ```
#[inline(always)]
#[must_use]
pub fn stretch(value: u8, factor: f64) -> f64 {
    (f64::from(value) - MIDPOINT) * factor + MIDPOINT
}

/// Lookup table intensity [0..255] → stretched value.
///
/// Pre-computed once per call: the sampling pass reads it for every output cell.
///
/// # Example
/// ```
/// use sd_dither::stretch::StretchLut;
/// let lut = StretchLut::new(1.0);
/// assert_eq!(lut.get(42), 42.0);
/// ```
pub struct StretchLut {
    lut: [f64; 256],
}

impl StretchLut {
    /// Build the table for `factor`.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        let mut lut = [0.0f64; 256];
        for (v, slot) in (0..=u8::MAX).zip(lut.iter_mut()) {
            *slot = stretch(v, factor);
        }
        Self { lut }
    }

    /// Stretched value of `intensity`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, intensity: u8) -> f64 {
        self.lut[intensity as usize]
    }
}

/// Stretch every cell of `grid`, row-major, same dimensions.
///
/// # Example
/// ```
/// use sd_core::Grid;
/// use sd_dither::stretch::stretch_grid;
/// let g = Grid::from_rows(&[vec![127, 200]]).unwrap();
/// assert_eq!(stretch_grid(&g, 2.0), vec![127.0, 273.0]);
/// ```
#[must_use]
pub fn stretch_grid(grid: &Grid, factor: f64) -> Vec<f64> {
    let lut = StretchLut::new(factor);
    grid.data.iter().map(|&v| lut.get(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_at_unit_factor() {
        let lut = StretchLut::new(1.0);
        for v in 0..=255u8 {
            assert_eq!(lut.get(v), f64::from(v));
        }
    }

    #[test]
    fn values_leave_byte_range_unclamped() {
        let lut = StretchLut::new(2.0);
        assert!(lut.get(255) > 255.0);
        assert!(lut.get(0) < 0.0);
        // Pas de bouclage u8 sous le point milieu.
        assert!(lut.get(10) < lut.get(11));
    }

    #[test]
    fn low_factor_compresses_toward_midpoint() {
        let lut = StretchLut::new(0.01);
        assert!((lut.get(0) - 125.73).abs() < 1e-3);
        assert!((lut.get(255) - 128.28).abs() < 1e-3);
    }

    #[test]
    fn exact_integer_results_stay_exact() {
        // En simple précision : 10.0000076.
        assert_eq!(stretch(37, 1.3), 10.0);
        assert_eq!(StretchLut::new(0.6).get(22), 64.0);
    }
}
