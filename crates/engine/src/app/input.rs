#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    RotateLeft,
    RotateRight,
    ToggleRain,
    ToggleMap,
    Quit,
}

const ACTION_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveForward => 0,
            InputAction::MoveBackward => 1,
            InputAction::StrafeLeft => 2,
            InputAction::StrafeRight => 3,
            InputAction::RotateLeft => 4,
            InputAction::RotateRight => 5,
            InputAction::ToggleRain => 6,
            InputAction::ToggleMap => 7,
            InputAction::Quit => 8,
        }
    }
}

/// Press-edge tracker for a single key: reports one press per physical press, no matter
/// how long the key is held or how many repeat events the platform sends.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct KeyEdge {
    is_down: bool,
    pressed_edge: bool,
}

impl KeyEdge {
    pub(crate) fn handle(&mut self, is_pressed: bool) {
        if is_pressed {
            if !self.is_down {
                self.pressed_edge = true;
            }
            self.is_down = true;
        } else {
            self.is_down = false;
        }
    }

    pub(crate) fn take(&mut self) -> bool {
        std::mem::take(&mut self.pressed_edge)
    }
}
