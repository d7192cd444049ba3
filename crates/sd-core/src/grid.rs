use crate::error::CoreError;

/// Valeur d'une cellule noire.
pub const BLACK: u8 = 0;
/// Valeur d'une cellule blanche.
pub const WHITE: u8 = 255;

/// Single-channel pixel grid, row-major, 1 byte per cell.
///
/// Used both for the grayscale input (values in `[0, 255]`) and for the binary
/// output (values in `{0, 255}`).
///
/// # Example
/// ```
/// use sd_core::grid::Grid;
/// let g = Grid::new(4, 3);
/// assert_eq!(g.data.len(), 12);
/// assert!(g.is_binary());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Intensités, row-major.
    pub data: Vec<u8>,
    /// Width in cells (columns).
    pub width: u32,
    /// Height in cells (rows).
    pub height: u32,
}

impl Grid {
    /// Crée une grille noire aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use sd_core::grid::Grid;
    /// let g = Grid::new(2, 5);
    /// assert_eq!((g.width, g.height), (2, 5));
    /// assert!(g.data.iter().all(|&v| v == 0));
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if the grid would be empty or the
    /// buffer length does not match `width * height`.
    ///
    /// # Example
    /// ```
    /// use sd_core::grid::Grid;
    /// let g = Grid::from_raw(2, 1, vec![0, 255]).unwrap();
    /// assert_eq!(g.get(1, 0), 255);
    /// assert!(Grid::from_raw(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let grid = Self {
            data,
            width,
            height,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Build a grid from a list of rows.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] for zero rows, zero columns, or
    /// rows of differing lengths.
    ///
    /// # Example
    /// ```
    /// use sd_core::grid::Grid;
    /// let g = Grid::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    /// assert_eq!((g.width, g.height), (3, 2));
    /// assert_eq!(g.get(0, 1), 4);
    /// assert!(Grid::from_rows(&[vec![1, 2], vec![3]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, CoreError> {
        let Some(first) = rows.first() else {
            return Err(CoreError::InvalidInput("aucune ligne".into()));
        };
        let width = first.as_ref().len();
        if width == 0 {
            return Err(CoreError::InvalidInput("aucune colonne".into()));
        }

        let mut data = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(CoreError::InvalidInput(format!(
                    "grille non rectangulaire : ligne {y} a {} colonnes, attendu {width}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        let width = u32::try_from(width)
            .map_err(|_| CoreError::InvalidInput(format!("largeur hors limites : {width}")))?;
        let height = u32::try_from(rows.len()).map_err(|_| {
            CoreError::InvalidInput(format!("hauteur hors limites : {}", rows.len()))
        })?;
        Self::from_raw(width, height, data)
    }

    /// Check the shape invariant: non-empty, buffer length = `width * height`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] when the invariant does not hold.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidInput(format!(
                "grille vide ({}×{})",
                self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize;
        if self.data.len() != expected {
            return Err(CoreError::InvalidInput(format!(
                "{} octets pour {}×{} (attendu {expected})",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// `(width, height)`.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Dimensions of this grid upscaled by `factor` on both axes.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidParameter`] if `factor` is zero or the
    /// upscaled grid would not be addressable.
    ///
    /// # Example
    /// ```
    /// use sd_core::grid::Grid;
    /// let g = Grid::new(3, 2);
    /// assert_eq!(g.scaled_dimensions(4).unwrap(), (12, 8));
    /// assert!(g.scaled_dimensions(0).is_err());
    /// ```
    pub fn scaled_dimensions(&self, factor: u32) -> Result<(u32, u32), CoreError> {
        if factor == 0 {
            return Err(CoreError::param("size_multiplier", factor));
        }
        let overflow = || CoreError::param("size_multiplier", factor);
        let w = self.width.checked_mul(factor).ok_or_else(overflow)?;
        let h = self.height.checked_mul(factor).ok_or_else(overflow)?;
        (w as usize).checked_mul(h as usize).ok_or_else(overflow)?;
        Ok((w, h))
    }

    /// Valeur de la cellule (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "cell out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set the cell at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        debug_assert!(x < self.width && y < self.height, "cell out of bounds");
        self.data[y as usize * self.width as usize + x as usize] = value;
    }

    /// True si toutes les cellules valent 0 ou 255.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&v| v == BLACK || v == WHITE)
    }

    /// Fraction of cells equal to [`WHITE`], in `[0.0, 1.0]`.
    ///
    /// # Example
    /// ```
    /// use sd_core::grid::Grid;
    /// let g = Grid::from_rows(&[vec![0, 255, 255, 0]]).unwrap();
    /// assert!((g.white_fraction() - 0.5).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn white_fraction(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let whites = self.data.iter().filter(|&&v| v == WHITE).count();
        whites as f64 / self.data.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_empty() {
        let empty: [Vec<u8>; 0] = [];
        assert!(matches!(
            Grid::from_rows(&empty),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            Grid::from_rows(&[Vec::<u8>::new()]),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = Grid::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7]]).unwrap_err();
        assert!(err.to_string().contains("ligne 2"));
    }

    #[test]
    fn validate_catches_tampered_buffer() {
        let mut g = Grid::new(3, 3);
        g.data.pop();
        assert!(g.validate().is_err());
    }

    #[test]
    fn scaled_dimensions_overflow_is_rejected() {
        let g = Grid {
            data: Vec::new(),
            width: u32::MAX / 2,
            height: 1,
        };
        assert!(matches!(
            g.scaled_dimensions(4),
            Err(CoreError::InvalidParameter {
                name: "size_multiplier",
                ..
            })
        ));
    }

    #[test]
    fn get_set_row_major() {
        let mut g = Grid::new(3, 2);
        g.set(2, 1, WHITE);
        assert_eq!(g.data[5], WHITE);
        assert_eq!(g.get(2, 1), WHITE);
        assert!(g.is_binary());
        g.set(0, 0, 12);
        assert!(!g.is_binary());
    }
}
