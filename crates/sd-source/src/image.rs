use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use sd_core::Grid;

/// Charge une image depuis le disque et la convertit en niveaux de gris.
///
/// Any format the `image` crate decodes is accepted (PNG, JPEG, BMP, GIF…).
/// Colour images are reduced to luma; alpha is dropped.
///
/// # Errors
/// Returns an error if the file is missing, cannot be decoded, or has a zero
/// dimension.
///
/// # Example
/// ```no_run
/// use sd_source::image::load_gray;
/// use std::path::Path;
/// let grid = load_gray(Path::new("photo.png")).unwrap();
/// ```
pub fn load_gray(path: &Path) -> Result<Grid> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let grid = grid_from_image(&img).with_context(|| format!("Image vide : {}", path.display()))?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        grid.width,
        grid.height
    );
    Ok(grid)
}

/// Convert an in-memory image to a grayscale grid.
///
/// # Errors
/// Returns an error if the image has a zero dimension.
///
/// # Example
/// ```
/// use image::{DynamicImage, Rgb, RgbImage};
/// use sd_source::image::grid_from_image;
/// let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([255, 255, 255])));
/// let grid = grid_from_image(&img).unwrap();
/// assert_eq!((grid.width, grid.height), (3, 2));
/// assert!(grid.data.iter().all(|&v| v == 255));
/// ```
pub fn grid_from_image(img: &DynamicImage) -> Result<Grid> {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    Ok(Grid::from_raw(width, height, luma.into_raw())?)
}
