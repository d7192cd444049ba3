use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::export::OUTPUT_SUFFIX;

/// Extensions image reconnues.
pub const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Liste récursivement les images d'un dossier, triées.
///
/// Files whose stem already ends in `_dithered` are skipped so that a batch
/// written next to its sources can be re-run.
///
/// # Errors
/// Returns an error if `folder` is not a readable directory.
///
/// # Example
/// ```no_run
/// use sd_source::folder_batch::scan_images;
/// use std::path::Path;
/// let files = scan_images(Path::new("photos")).unwrap();
/// ```
pub fn scan_images(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        anyhow::bail!("Dossier introuvable : {}", folder.display());
    }
    let mut files = Vec::new();
    scan_dir(folder, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("Lecture de {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            scan_dir(&path, files)?;
        } else if is_source_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_source_image(path: &Path) -> bool {
    let known_ext = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| IMAGE_EXTS.contains(&e.to_lowercase().as_str()));
    let already_done = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with(OUTPUT_SUFFIX));
    known_ext && !already_done
}
