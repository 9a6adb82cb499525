use std::f32::consts::FRAC_PI_2;

use super::grid::OccupancyGrid;

pub const DEFAULT_MOVE_SPEED: f32 = 0.1;
pub const DEFAULT_ROTATION_SPEED: f32 = 0.05;

/// Player position in continuous grid coordinates plus facing angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

impl Pose {
    pub const fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, angle }
    }

    /// Unit vector along the facing angle.
    pub fn facing(&self) -> (f32, f32) {
        (self.angle.cos(), self.angle.sin())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(4.5, 4.5, 0.0)
    }
}

/// Held directional inputs for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionIntent {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl MotionIntent {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Moves `pose` by `(dx, dy)` unless the destination cell is a wall.
///
/// A blocked move is a full stop: the original pose comes back untouched, there is no
/// sliding along the wall.
pub fn try_move(grid: &OccupancyGrid, pose: Pose, dx: f32, dy: f32) -> Pose {
    let candidate = Pose {
        x: pose.x + dx,
        y: pose.y + dy,
        angle: pose.angle,
    };
    if grid.is_wall(candidate.x, candidate.y) {
        pose
    } else {
        candidate
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionController {
    pub move_speed: f32,
    pub rotation_speed: f32,
}

impl Default for MotionController {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            rotation_speed: DEFAULT_ROTATION_SPEED,
        }
    }
}

impl MotionController {
    pub fn new(move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            move_speed,
            rotation_speed,
        }
    }

    /// Applies one tick of intent: walk, then strafe, then turn.
    ///
    /// Opposing inputs on the same axis cancel out. Walk and strafe are collision-checked
    /// independently, so a blocked walk does not stop the strafe.
    pub fn step(&self, grid: &OccupancyGrid, pose: Pose, intent: MotionIntent) -> Pose {
        let mut next = pose;

        let walk = axis(intent.backward, intent.forward);
        if walk != 0.0 {
            let dx = walk * self.move_speed * next.angle.cos();
            let dy = walk * self.move_speed * next.angle.sin();
            next = try_move(grid, next, dx, dy);
        }

        let strafe = axis(intent.strafe_left, intent.strafe_right);
        if strafe != 0.0 {
            let side = next.angle + FRAC_PI_2;
            let dx = strafe * self.move_speed * side.cos();
            let dy = strafe * self.move_speed * side.sin();
            next = try_move(grid, next, dx, dy);
        }

        next.angle += axis(intent.rotate_left, intent.rotate_right) * self.rotation_speed;
        next
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (false, true) => 1.0,
        (true, false) => -1.0,
        _ => 0.0,
    }
}
