use std::path::Path;

use anyhow::Result;
use sd_core::config::DitherConfig;
use sd_source::{default_output_path, scan_images};

use crate::pipeline::process_file;

/// Bilan d'un traitement par lots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Images écrites.
    pub processed: usize,
    /// Images en échec (journalisées).
    pub failed: usize,
}

/// Point d'entrée du traitement par lots.
///
/// Files are processed one after the other; each pass already spreads its rows
/// over the rayon pool. A failing file is logged and counted.
///
/// # Errors
/// Retourne une erreur si le dossier est illisible, ne contient aucune image,
/// ou si aucune image n'a pu être traitée.
pub fn run_batch(
    folder: &Path,
    out_dir: Option<&Path>,
    config: &DitherConfig,
) -> Result<BatchReport> {
    let files = scan_images(folder)?;
    if files.is_empty() {
        anyhow::bail!("Aucune image trouvée dans {}", folder.display());
    }
    log::info!("{} images à traiter dans {}", files.len(), folder.display());

    let mut report = BatchReport::default();
    for (i, file) in files.iter().enumerate() {
        let output = default_output_path(file, out_dir);
        log::info!("[{}/{}] {}", i + 1, files.len(), file.display());
        match process_file(file, &output, config) {
            Ok(()) => report.processed += 1,
            Err(e) => {
                log::error!("Échec sur {} : {e:#}", file.display());
                report.failed += 1;
            }
        }
    }

    if report.processed == 0 {
        anyhow::bail!("Aucune image traitée ({} échecs).", report.failed);
    }
    log::info!(
        "Lot terminé : {} traitées, {} échecs.",
        report.processed,
        report.failed
    );
    Ok(report)
}
