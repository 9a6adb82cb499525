use super::motion::Pose;

/// Cosine threshold of the lit cone, roughly a 45 degree half-angle.
pub const LIT_CONE_THRESHOLD: f32 = 0.7;

/// Whether the wall cell at `(cell_x, cell_y)` falls inside the player's lit cone.
///
/// This is an orientation cue, not shadow casting: a wall is drawn only while the
/// normalised direction from the player to the cell's corner is within the cone. The
/// comparison is strict, so a dot of exactly [`LIT_CONE_THRESHOLD`] is not lit. A cell
/// sitting exactly on the player has no direction and is never lit.
pub fn is_shadowed(cell_x: f32, cell_y: f32, pose: &Pose) -> bool {
    facing_dot(cell_x, cell_y, pose).is_some_and(is_within_lit_cone)
}

pub fn is_within_lit_cone(dot: f32) -> bool {
    dot > LIT_CONE_THRESHOLD
}

/// Normalised dot product of the player-to-cell direction with the facing vector.
pub fn facing_dot(cell_x: f32, cell_y: f32, pose: &Pose) -> Option<f32> {
    let dx = cell_x - pose.x;
    let dy = cell_y - pose.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 || !distance.is_finite() {
        return None;
    }
    let (facing_x, facing_y) = pose.facing();
    Some((dx * facing_x + dy * facing_y) / distance)
}
