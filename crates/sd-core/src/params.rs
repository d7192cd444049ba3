use crate::error::CoreError;
use crate::grid::Grid;

/// Plage recommandée du multiplicateur de taille (surface de contrôle).
pub const SIZE_MULTIPLIER_RANGE: (u32, u32) = (1, 8);
/// Recommended range for the number of samples per cell.
pub const SAMPLES_RANGE: (u32, u32) = (1, 20);
/// Recommended range for the contrast stretch factor.
pub const STRETCH_RANGE: (f64, f64) = (0.01, 2.0);

/// Paramètres d'un appel de dithering.
///
/// # Example
/// ```
/// use sd_core::params::DitherParams;
/// let p = DitherParams::default();
/// assert_eq!((p.size_multiplier, p.samples), (1, 1));
/// assert!(p.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DitherParams {
    /// Output upscaling factor (≥ 1). Each source pixel drives a k×k block.
    pub size_multiplier: u32,
    /// Stochastic trials per output cell (≥ 1).
    pub samples: u32,
    /// Contrast gain around 127 (> 0). 1.0 = neutre.
    pub stretch_factor: f64,
    /// Graine du générateur. `None` = entropie OS à chaque appel.
    pub seed: Option<u64>,
}

impl Default for DitherParams {
    fn default() -> Self {
        Self {
            size_multiplier: 1,
            samples: 1,
            stretch_factor: 1.0,
            seed: None,
        }
    }
}

impl DitherParams {
    /// Reject parameters outside their domain.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidParameter`] for `size_multiplier < 1`,
    /// `samples < 1`, or a stretch factor that is not a finite positive number.
    ///
    /// # Example
    /// ```
    /// use sd_core::params::DitherParams;
    /// let p = DitherParams { stretch_factor: 0.0, ..Default::default() };
    /// assert!(p.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.size_multiplier < 1 {
            return Err(CoreError::param("size_multiplier", self.size_multiplier));
        }
        if self.samples < 1 {
            return Err(CoreError::param("samples", self.samples));
        }
        if !self.stretch_factor.is_finite() || self.stretch_factor <= 0.0 {
            return Err(CoreError::param("stretch_factor", self.stretch_factor));
        }
        Ok(())
    }

    /// Validate both the parameters and the input grid, and return the output
    /// dimensions.
    ///
    /// # Errors
    /// Returns the first [`CoreError`] found: input shape first, then parameters.
    ///
    /// # Example
    /// ```
    /// use sd_core::{DitherParams, Grid};
    /// let grid = Grid::new(3, 2);
    /// let p = DitherParams { size_multiplier: 2, ..Default::default() };
    /// assert_eq!(p.check(&grid).unwrap(), (6, 4));
    /// ```
    pub fn check(&self, input: &Grid) -> Result<(u32, u32), CoreError> {
        input.validate()?;
        self.validate()?;
        input.scaled_dimensions(self.size_multiplier)
    }

    /// Names of the parameters lying outside the recommended control ranges.
    ///
    /// Ces valeurs restent acceptées ; l'appelant se contente d'avertir.
    #[must_use]
    pub fn out_of_range(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if !(SIZE_MULTIPLIER_RANGE.0..=SIZE_MULTIPLIER_RANGE.1).contains(&self.size_multiplier) {
            names.push("size_multiplier");
        }
        if !(SAMPLES_RANGE.0..=SAMPLES_RANGE.1).contains(&self.samples) {
            names.push("samples");
        }
        if !(STRETCH_RANGE.0..=STRETCH_RANGE.1).contains(&self.stretch_factor) {
            names.push("stretch_factor");
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_multiplier_and_samples() {
        let p = DitherParams {
            size_multiplier: 0,
            ..Default::default()
        };
        assert_eq!(
            p.validate(),
            Err(CoreError::InvalidParameter {
                name: "size_multiplier",
                value: "0".into()
            })
        );

        let p = DitherParams {
            samples: 0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(CoreError::InvalidParameter { name: "samples", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_or_nan_stretch() {
        for s in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let p = DitherParams {
                stretch_factor: s,
                ..Default::default()
            };
            assert!(p.validate().is_err(), "stretch {s} accepté");
        }
    }

    #[test]
    fn check_reports_input_before_params() {
        let p = DitherParams {
            samples: 0,
            ..Default::default()
        };
        let empty = Grid::new(0, 0);
        assert!(matches!(p.check(&empty), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn out_of_range_is_advisory() {
        let p = DitherParams {
            size_multiplier: 12,
            samples: 50,
            stretch_factor: 3.0,
            seed: None,
        };
        assert!(p.validate().is_ok());
        assert_eq!(
            p.out_of_range(),
            vec!["size_multiplier", "samples", "stretch_factor"]
        );
        assert!(DitherParams::default().out_of_range().is_empty());
    }
}
