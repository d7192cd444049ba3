use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat};
use sd_core::Grid;

/// Suffixe ajouté au nom de fichier de sortie.
pub const OUTPUT_SUFFIX: &str = "_dithered";

/// `<dir>/<stem>_dithered.png` for `input`, next to the input unless `out_dir`
/// is given.
///
/// # Example
/// ```
/// use sd_source::export::default_output_path;
/// use std::path::{Path, PathBuf};
/// assert_eq!(
///     default_output_path(Path::new("img/cat.jpg"), None),
///     PathBuf::from("img/cat_dithered.png")
/// );
/// assert_eq!(
///     default_output_path(Path::new("img/cat.jpg"), Some(Path::new("out"))),
///     PathBuf::from("out/cat_dithered.png")
/// );
/// ```
#[must_use]
pub fn default_output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |s| s.to_string_lossy());
    let name = format!("{stem}{OUTPUT_SUFFIX}.png");
    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Refuse un chemin de sortie qui ne se termine pas par `.png`.
///
/// Un encodeur avec perte (JPEG) ne garantirait plus des cellules à 0 ou 255.
///
/// # Errors
/// Returns an error naming the path when its extension is missing or not `png`.
pub fn check_png_path(path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        anyhow::bail!(
            "Sortie PNG uniquement : {} (extension .png attendue)",
            path.display()
        );
    }
    Ok(())
}

/// Encode a binary grid as an 8-bit grayscale PNG.
///
/// # Errors
/// Returns an error if `path` is not a `.png` path, the grid is malformed, the
/// parent directory cannot be created, or encoding fails.
///
/// # Example
/// ```no_run
/// use sd_core::Grid;
/// use sd_source::export::save_binary;
/// use std::path::Path;
/// save_binary(&Grid::new(8, 8), Path::new("black.png")).unwrap();
/// ```
pub fn save_binary(grid: &Grid, path: &Path) -> Result<()> {
    check_png_path(path)?;
    grid.validate()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer {}", parent.display()))?;
    }
    let img = GrayImage::from_raw(grid.width, grid.height, grid.data.clone())
        .context("Buffer incompatible avec les dimensions")?;
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!(
        "Image enregistrée : {} ({}×{})",
        path.display(),
        grid.width,
        grid.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let grid = Grid::from_rows(&[vec![0, 255, 0], vec![255, 0, 255]]).unwrap();
        save_binary(&grid, &path).unwrap();

        let back = crate::image::load_gray(&path).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn output_name_without_extension() {
        assert_eq!(
            default_output_path(Path::new("scan"), None),
            PathBuf::from("scan_dithered.png")
        );
    }

    #[test]
    fn rejects_malformed_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut grid = Grid::new(2, 2);
        grid.data.push(0);
        assert!(save_binary(&grid, &dir.path().join("x.png")).is_err());
    }

    #[test]
    fn lossy_or_missing_extension_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let grid = Grid::from_rows(&[vec![0, 255], vec![255, 0]]).unwrap();
        for name in ["out.jpg", "out.jpeg", "out"] {
            let path = dir.path().join(name);
            assert!(save_binary(&grid, &path).is_err(), "{name} accepté");
            assert!(!path.exists());
        }
        let upper = dir.path().join("OUT.PNG");
        save_binary(&grid, &upper).unwrap();
        assert_eq!(crate::image::load_gray(&upper).unwrap(), grid);
    }
}
