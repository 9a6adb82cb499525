use super::input::{ActionStates, InputAction};
use super::rendering::{DrawCommand, SceneComposer};
use crate::world::MotionIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Input state for one simulation tick.
///
/// Held actions report key-down state. Toggles report a press edge, visible to exactly one
/// tick per physical key press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    rain_toggle_pressed: bool,
    map_toggle_pressed: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        rain_toggle_pressed: bool,
        map_toggle_pressed: bool,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            rain_toggle_pressed,
            map_toggle_pressed,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn rain_toggle_pressed(&self) -> bool {
        self.rain_toggle_pressed
    }

    pub fn map_toggle_pressed(&self) -> bool {
        self.map_toggle_pressed
    }

    pub fn motion_intent(&self) -> MotionIntent {
        MotionIntent {
            forward: self.is_down(InputAction::MoveForward),
            backward: self.is_down(InputAction::MoveBackward),
            strafe_left: self.is_down(InputAction::StrafeLeft),
            strafe_right: self.is_down(InputAction::StrafeRight),
            rotate_left: self.is_down(InputAction::RotateLeft),
            rotate_right: self.is_down(InputAction::RotateRight),
        }
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_rain_toggle_pressed(mut self, pressed: bool) -> Self {
        self.rain_toggle_pressed = pressed;
        self
    }

    pub fn with_map_toggle_pressed(mut self, pressed: bool) -> Self {
        self.map_toggle_pressed = pressed;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    /// Writes this frame's draw list into `commands`, replacing its previous contents.
    fn render(&mut self, composer: &SceneComposer, commands: &mut Vec<DrawCommand>);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
    fn live_particle_count(&self) -> usize {
        0
    }
}
