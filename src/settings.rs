use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use gridnav_planner::PlannerConfig;
use serde::Deserialize;
use tracing::{error, info};

use crate::scenario::{Obstacles, Query};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Everything the runner needs for one scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub planner: PlannerConfig,
    pub obstacles: Obstacles,
    #[serde(default)]
    pub queries: Vec<Query>,
}

/// Loads the scenario at `path`, with `GRIDNAV__SECTION__KEY` environment
/// variables overriding file values.
pub fn load_settings(path: &str) -> anyhow::Result<Settings> {
    info!("Attempting to load configuration from {}", path);

    let config = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("GRIDNAV")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e).with_context(|| format!("failed to load {path}"));
        }
    };

    let settings: Settings = config
        .try_deserialize()
        .with_context(|| format!("invalid scenario in {path}"))?;
    info!(
        queries = settings.queries.len(),
        resolution = settings.planner.resolution,
        robot_radius = settings.planner.robot_radius,
        "Successfully loaded configuration"
    );
    Ok(settings)
}
