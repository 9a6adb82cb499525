mod scene;
mod simulation;

use walls_engine::{LoopConfig, OccupancyGrid, Scene};

pub(crate) use scene::WallsScene;
pub(crate) use simulation::{SimulationConfig, SimulationState};

pub(crate) fn build_scene(
    grid: OccupancyGrid,
    simulation: SimulationConfig,
    config: &LoopConfig,
) -> Box<dyn Scene> {
    let state = SimulationState::new(grid, simulation, config.viewport);
    Box::new(WallsScene::new(config.window_title.clone(), state))
}

#[cfg(test)]
mod tests;
