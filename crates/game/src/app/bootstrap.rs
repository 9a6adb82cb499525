use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walls_engine::{AppError, LoopConfig, MapError, OccupancyGrid, Scene};

use super::gameplay::{self, SimulationConfig};

pub(crate) const ASSET_DIR_ENV_VAR: &str = "WALLS_ASSET_DIR";
pub(crate) const MAX_FPS_ENV_VAR: &str = "WALLS_MAX_FPS";
pub(crate) const RAIN_SEED_ENV_VAR: &str = "WALLS_RAIN_SEED";

const DEFAULT_PROGRAM_NAME: &str = "walls";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ArgumentError {
    #[error("Usage: {program} <map_file_path>")]
    WrongArity { program: String, given: usize },
}

#[derive(Debug, Error)]
pub(crate) enum LaunchError {
    #[error(transparent)]
    Arguments(#[from] ArgumentError),
    #[error("failed to load map: {0}")]
    Map(#[from] MapError),
    #[error(transparent)]
    App(#[from] AppError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

/// Environment-driven settings. Unset or invalid values leave the defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EnvOverrides {
    pub(crate) asset_dir: Option<PathBuf>,
    pub(crate) max_render_fps: Option<u32>,
    pub(crate) rain_seed: Option<u64>,
}

impl EnvOverrides {
    pub(crate) fn from_env() -> Self {
        Self {
            asset_dir: env::var_os(ASSET_DIR_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            max_render_fps: parse_override(MAX_FPS_ENV_VAR, env::var(MAX_FPS_ENV_VAR).ok()),
            rain_seed: parse_override(RAIN_SEED_ENV_VAR, env::var(RAIN_SEED_ENV_VAR).ok()),
        }
    }

    pub(crate) fn apply(&self, config: &mut LoopConfig, simulation: &mut SimulationConfig) {
        if let Some(asset_dir) = &self.asset_dir {
            config.asset_dir = asset_dir.clone();
        }
        if self.max_render_fps.is_some() {
            config.max_render_fps = self.max_render_fps;
        }
        if self.rain_seed.is_some() {
            simulation.rain_seed = self.rain_seed;
        }
    }
}

/// Loads the map named on the command line and wires the scene and loop config around it.
///
/// The map is loaded before any window exists so a bad path fails fast.
pub(crate) fn build_app<I>(args: I) -> Result<AppWiring, LaunchError>
where
    I: IntoIterator<Item = String>,
{
    let map_path = parse_map_path(args)?;
    let grid = OccupancyGrid::load(&map_path)?;
    info!(
        path = %map_path.display(),
        walls = grid.wall_count(),
        "map_loaded"
    );

    let mut config = LoopConfig::default();
    let mut simulation = SimulationConfig::default();
    let overrides = EnvOverrides::from_env();
    overrides.apply(&mut config, &mut simulation);
    info!(
        asset_dir = %config.asset_dir.display(),
        rain_seed = ?simulation.rain_seed,
        "config_resolved"
    );

    let scene = gameplay::build_scene(grid, simulation, &config);
    Ok(AppWiring { config, scene })
}

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// Accepts exactly one argument after the program name.
pub(crate) fn parse_map_path<I>(args: I) -> Result<PathBuf, ArgumentError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    match args.as_slice() {
        [_, map_path] => Ok(PathBuf::from(map_path)),
        _ => Err(ArgumentError::WrongArity {
            program: args
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string()),
            given: args.len().saturating_sub(1),
        }),
    }
}

fn parse_override<T: FromStr>(env_var: &'static str, raw: Option<String>) -> Option<T> {
    let value = raw?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(
                env_var,
                value = value.as_str(),
                "invalid env var value; falling back to default"
            );
            None
        }
    }
}
