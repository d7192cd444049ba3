use std::path::PathBuf;

use clap::Parser;
use sd_core::config::{DitherConfig, DitherMode};

/// sampledither — stochastic sampling dithering of grayscale images.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF). Convertie en niveaux de gris.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Fichier de sortie PNG. Défaut : <input>_dithered.png à côté de la source.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Multiplicateur de résolution de sortie (1-8 recommandé).
    #[arg(long)]
    pub size_multiplier: Option<u32>,

    /// Tirages par cellule (1-20 recommandé).
    #[arg(long)]
    pub samples: Option<u32>,

    /// Étirement de contraste autour de 127 (0.01-2.0 recommandé).
    #[arg(long)]
    pub stretch: Option<f64>,

    /// Graine fixe pour un rendu reproductible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Mode : sampling, iterative.
    #[arg(long)]
    pub mode: Option<String>,

    /// Nombre de tirages de coordonnées en mode iterative.
    #[arg(long)]
    pub hits: Option<u64>,

    /// Threads du pool rayon. Défaut : un par cœur.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Traiter toutes les images d'un dossier (récursif).
    #[arg(long)]
    pub batch_folder: Option<PathBuf>,

    /// Dossier de sortie du traitement par lots. Défaut : à côté des sources.
    #[arg(long)]
    pub batch_out: Option<PathBuf>,

    /// Recalculer à chaque modification du fichier de configuration.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that exactly one source (`--input` or `--batch-folder`) is given.
    ///
    /// # Errors
    /// Returns an error for zero or two sources, `--watch` without `--input`,
    /// or an `--output` that is not a `.png` path.
    pub fn validate_source(&self) -> anyhow::Result<()> {
        match (self.input.is_some(), self.batch_folder.is_some()) {
            (false, false) => {
                anyhow::bail!("Aucune source spécifiée. Utilisez --input ou --batch-folder.")
            }
            (true, true) => {
                anyhow::bail!("Une seule source à la fois : --input OU --batch-folder.")
            }
            _ => {}
        }
        if self.watch && self.input.is_none() {
            anyhow::bail!("--watch requiert --input.");
        }
        if let Some(ref output) = self.output {
            sd_source::check_png_path(output)?;
        }
        if self.batch_out.is_some() && self.batch_folder.is_none() {
            log::warn!("--batch-out ignoré sans --batch-folder.");
        }
        Ok(())
    }

    /// Appliquer les overrides CLI par-dessus la config fichier.
    pub fn apply_overrides(&self, config: &mut DitherConfig) {
        if let Some(ref mode) = self.mode {
            config.mode = match mode.to_ascii_lowercase().as_str() {
                "sampling" | "sequential" => DitherMode::Sampling,
                "iterative" => DitherMode::Iterative,
                _ => {
                    log::warn!("Mode inconnu '{mode}', utilisation de {:?}.", config.mode);
                    config.mode
                }
            };
        }
        if let Some(v) = self.size_multiplier {
            config.size_multiplier = v;
        }
        if let Some(v) = self.samples {
            config.samples = v;
        }
        if let Some(v) = self.stretch {
            config.stretch_factor = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.hits.is_some() {
            config.hits = self.hits;
        }
    }
}
