use tracing::info;
use walls_engine::{DrawCommand, InputSnapshot, Scene, SceneCommand, SceneComposer};

use super::SimulationState;

pub(crate) struct WallsScene {
    base_title: String,
    state: SimulationState,
}

impl WallsScene {
    pub(crate) fn new(base_title: String, state: SimulationState) -> Self {
        Self { base_title, state }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &SimulationState {
        &self.state
    }
}

impl Scene for WallsScene {
    fn load(&mut self) {
        let pose = self.state.pose();
        info!(
            walls = self.state.grid().wall_count(),
            spawn_x = pose.x,
            spawn_y = pose.y,
            spawn_angle = pose.angle,
            "scene_loaded"
        );
    }

    fn update(&mut self, _fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }
        self.state.step(input);
        SceneCommand::None
    }

    fn render(&mut self, composer: &SceneComposer, commands: &mut Vec<DrawCommand>) {
        composer.compose_into(&self.state.scene_frame(), commands);
    }

    fn unload(&mut self) {
        info!(
            ticks = self.state.tick_count(),
            live_particles = self.state.rain().len(),
            evicted_particles = self.state.rain().evicted_total(),
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let rain = if self.state.rain_enabled() {
            format!("rain on ({} drops)", self.state.rain().len())
        } else {
            "rain off".to_string()
        };
        let map = if self.state.show_grid() {
            ""
        } else {
            " | map hidden"
        };
        Some(format!("{} | {rain}{map}", self.base_title))
    }

    fn live_particle_count(&self) -> usize {
        self.state.rain().len()
    }
}
