/// Shared types, errors, and configuration for sampledither.
///
/// This crate holds the pixel grid, the dithering parameters and their
/// validation, the `Ditherer` trait, and the TOML configuration layer used
/// across the workspace.

pub mod config;
pub mod error;
pub mod grid;
pub mod params;
pub mod traits;

pub use config::{DitherConfig, DitherMode};
pub use error::CoreError;
pub use grid::{BLACK, Grid, WHITE};
pub use params::DitherParams;
pub use traits::Ditherer;
