//! Headless driver for the bird overlay simulation.

use std::path::Path;

use anyhow::{Context, Result};
use aviary_core::FlockConfig;
use aviary_shared::FlockSettings;

pub mod pointer;
pub mod runner;

pub use pointer::PointerPath;
pub use runner::{run_wanderer, RunSummary, Runner, WandererFrame};

/// Reads a JSON settings file and checks it describes a usable flock.
pub fn load_settings(path: &Path) -> Result<FlockConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings = FlockSettings::from_json(&text)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    let config: FlockConfig = settings.into();
    config
        .validate()
        .with_context(|| format!("settings file {} is not usable", path.display()))?;
    Ok(config)
}
