use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::params::DitherParams;

/// Dithering mode selection.
///
/// # Example
/// ```
/// use sd_core::config::DitherMode;
/// assert_eq!(DitherMode::default(), DitherMode::Sampling);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum DitherMode {
    /// Vote majoritaire sur `samples` tirages par cellule (mode principal).
    #[default]
    #[serde(alias = "sampling", alias = "Sequential", alias = "sequential")]
    Sampling,
    /// Sparse point pattern: `hits` random probes on an all-black grid.
    #[serde(alias = "iterative")]
    Iterative,
}

/// Configuration complète d'une passe de dithering.
///
/// Sérialisable en TOML (section `[dither]`). Chaque champ a une valeur par
/// défaut saine.
///
/// # Example
/// ```
/// use sd_core::config::DitherConfig;
/// let config = DitherConfig::default();
/// assert_eq!(config.samples, 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DitherConfig {
    /// "Sampling" | "Iterative"
    pub mode: DitherMode,
    /// Multiplicateur de résolution de sortie [1, 8] recommandé.
    pub size_multiplier: u32,
    /// Tirages par cellule [1, 20] recommandé. Ignoré en mode Iterative.
    pub samples: u32,
    /// Contrast stretch around 127, [0.01, 2.0] recommended. Ignored in Iterative mode.
    pub stretch_factor: f64,
    /// Graine fixe pour un rendu reproductible.
    pub seed: Option<u64>,
    /// Iterative mode probe count. `None` = one per output cell.
    pub hits: Option<u64>,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            mode: DitherMode::Sampling,
            size_multiplier: 1,
            samples: 1,
            stretch_factor: 1.0,
            seed: None,
            hits: None,
        }
    }
}

impl DitherConfig {
    /// Parameters for the core call.
    #[must_use]
    pub fn params(&self) -> DitherParams {
        DitherParams {
            size_multiplier: self.size_multiplier,
            samples: self.samples,
            stretch_factor: self.stretch_factor,
            seed: self.seed,
        }
    }

    /// Reject invalid values. Unlike the render-time clamps used elsewhere,
    /// a bad value here is an error: nothing is silently corrected.
    ///
    /// # Errors
    /// Returns the [`CoreError`] of the first invalid parameter.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.params().validate()
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    dither: Option<DitherSection>,
}

/// `[dither]` section, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DitherSection {
    mode: Option<DitherMode>,
    size_multiplier: Option<u32>,
    samples: Option<u32>,
    stretch_factor: Option<f64>,
    seed: Option<u64>,
    hits: Option<u64>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML, contains unknown keys, or
/// yields invalid parameters.
///
/// # Example
/// ```
/// use sd_core::config::{parse_config, DitherMode};
/// let config = parse_config("[dither]\nsamples = 5\nmode = \"Iterative\"").unwrap();
/// assert_eq!(config.samples, 5);
/// assert_eq!(config.mode, DitherMode::Iterative);
/// assert_eq!(config.size_multiplier, 1);
/// ```
pub fn parse_config(content: &str) -> Result<DitherConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = DitherConfig::default();
    if let Some(d) = file.dither {
        if let Some(v) = d.mode {
            config.mode = v;
        }
        if let Some(v) = d.size_multiplier {
            config.size_multiplier = v;
        }
        if let Some(v) = d.samples {
            config.samples = v;
        }
        if let Some(v) = d.stretch_factor {
            config.stretch_factor = v;
        }
        if d.seed.is_some() {
            config.seed = d.seed;
        }
        if d.hits.is_some() {
            config.hits = d.hits;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or validated.
///
/// # Example
/// ```no_run
/// use sd_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<DitherConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))?;
    log::debug!("Config chargée depuis {} : {config:?}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), DitherConfig::default());
        assert_eq!(parse_config("[dither]").unwrap(), DitherConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let c = parse_config("[dither]\nstretch_factor = 2.0\nseed = 42").unwrap();
        assert!((c.stretch_factor - 2.0).abs() < f64::EPSILON);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.samples, 1);
        assert_eq!(c.hits, None);
    }

    #[test]
    fn invalid_values_are_rejected_not_clamped() {
        let err = parse_config("[dither]\nsamples = 0").unwrap_err();
        let core = err.downcast_ref::<CoreError>();
        assert!(matches!(
            core,
            Some(CoreError::InvalidParameter { name: "samples", .. })
        ));
        assert!(parse_config("[dither]\nstretch_factor = -0.5").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("[dither]\nsample = 3").is_err());
    }

    #[test]
    fn lowercase_mode_alias() {
        let c = parse_config("[dither]\nmode = \"iterative\"\nhits = 10").unwrap();
        assert_eq!(c.mode, DitherMode::Iterative);
        assert_eq!(c.hits, Some(10));
    }

    #[test]
    fn load_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[dither]\nsize_multiplier = 3\n").unwrap();
        assert_eq!(load_config(&path).unwrap().size_multiplier, 3);
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
