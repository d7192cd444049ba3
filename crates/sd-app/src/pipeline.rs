use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use sd_core::Grid;
use sd_core::config::DitherConfig;

/// One dithering pass with timing and coverage logged.
///
/// # Errors
/// Returns an error if the grid or the configuration is rejected by the core.
pub fn dither_grid(grid: &Grid, config: &DitherConfig) -> Result<Grid> {
    let started = Instant::now();
    let out = sd_dither::run(grid, config).context("Dithering refusé")?;
    log::info!(
        "{:?} {}×{} → {}×{} en {:.1?} ({:.1}% blanc)",
        config.mode,
        grid.width,
        grid.height,
        out.width,
        out.height,
        started.elapsed(),
        out.white_fraction() * 100.0
    );
    Ok(out)
}

/// Load `input`, dither it, write the result to `output`.
///
/// # Errors
/// Returns an error if decoding, dithering, or encoding fails.
pub fn process_file(input: &Path, output: &Path, config: &DitherConfig) -> Result<()> {
    let grid = sd_source::load_gray(input)?;
    let out = dither_grid(&grid, config)?;
    sd_source::save_binary(&out, output)
}
