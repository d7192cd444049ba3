use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use sd_core::config::{DitherConfig, parse_config};

use crate::cli::Cli;

/// Relit le fichier de config pour la boucle de surveillance, puis réapplique
/// les overrides CLI.
///
/// Contrairement au démarrage, un fichier absent ou vide est une erreur : un
/// éditeur qui supprime ou tronque le fichier avant de le réécrire ne doit pas
/// faire retomber la config sur les défauts.
///
/// # Errors
/// Returns an error if the file is missing, empty, unparsable, or yields
/// invalid parameters once the overrides are applied.
pub fn reload_config(cli: &Cli) -> Result<DitherConfig> {
    let path = &cli.config;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    if content.trim().is_empty() {
        anyhow::bail!("Fichier de config vide : {}", path.display());
    }
    let mut config =
        parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Recharge la config et la publie. Retourne `true` si elle a changé.
///
/// En cas d'erreur, l'ancienne config est conservée.
pub fn apply_reload(
    config: &ArcSwap<DitherConfig>,
    reload: &dyn Fn() -> Result<DitherConfig>,
) -> bool {
    match reload() {
        Ok(new_config) => {
            if **config.load() == new_config {
                log::debug!("Config inchangée, pas de recalcul.");
                return false;
            }
            config.store(Arc::new(new_config));
            true
        }
        Err(e) => {
            log::warn!("Erreur de rechargement config : {e:#}");
            false
        }
    }
}

/// Lance un watcher sur le fichier config : à chaque modification, la config
/// est rechargée via `reload`, stockée dans l'ArcSwap, et un tick est envoyé
/// sur `changed`.
///
/// Retourne le Watcher (doit rester vivant tant que la boucle tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher<F>(
    config_path: &Path,
    config: &Arc<ArcSwap<DitherConfig>>,
    changed: flume::Sender<()>,
    reload: F,
) -> Result<notify::RecommendedWatcher>
where
    F: Fn() -> Result<DitherConfig> + Send + 'static,
{
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
            && apply_reload(&config, &reload)
        {
            log::info!("Config rechargée depuis {}", path.display());
            // Récepteur fermé = boucle terminée, rien à faire.
            let _ = changed.send(());
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
