use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use clap::Parser;
use sd_core::config::{DitherConfig, load_config};

pub mod batch;
pub mod cli;
pub mod hotreload;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    cli.validate_source()?;

    // 4. Pool rayon
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Impossible de configurer le pool de threads")?;
        log::info!("Pool rayon : {threads} threads");
    }

    // 5. Charger la config + overrides CLI
    let config = resolve_config(&cli)?;

    // Export par lots
    if let Some(folder) = cli.batch_folder.as_deref() {
        batch::run_batch(folder, cli.batch_out.as_deref(), &config)?;
        return Ok(());
    }

    let Some(input) = cli.input.clone() else {
        anyhow::bail!("Aucune source spécifiée.");
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| sd_source::default_output_path(&input, None));

    if cli.watch {
        return run_watch(&cli, &input, &output, config);
    }

    pipeline::process_file(&input, &output, &config)
}

/// Resolve the startup config: file values (or defaults when the file is
/// missing), then CLI overrides, then validation.
fn resolve_config(cli: &cli::Cli) -> Result<DitherConfig> {
    let mut config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        DitherConfig::default()
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Boucle de recalcul : l'image est chargée une fois, puis re-tramée à chaque
/// modification du fichier de configuration. Ctrl-C pour quitter.
fn run_watch(cli: &cli::Cli, input: &Path, output: &Path, config: DitherConfig) -> Result<()> {
    if !cli.config.exists() {
        anyhow::bail!(
            "--watch requiert un fichier de configuration existant : {}",
            cli.config.display()
        );
    }

    let grid = sd_source::load_gray(input)?;
    let config = Arc::new(ArcSwap::from_pointee(config));
    let (tx, rx) = flume::unbounded();

    let reload_cli = cli.clone();
    let _watcher = hotreload::spawn_config_watcher(&cli.config, &config, tx, move || {
        hotreload::reload_config(&reload_cli)
    })?;

    let render = |config: &DitherConfig| -> Result<()> {
        let out = pipeline::dither_grid(&grid, config)?;
        sd_source::save_binary(&out, output)
    };

    render(&config.load())?;
    log::info!("Surveillance de {}", cli.config.display());

    while rx.recv().is_ok() {
        // Un enregistrement d'éditeur émet souvent plusieurs événements.
        while rx.try_recv().is_ok() {}
        if let Err(e) = render(&config.load()) {
            log::warn!("Recalcul échoué : {e:#}");
        }
    }
    Ok(())
}
