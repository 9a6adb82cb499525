use super::*;
use walls_engine::{
    Cell, DrawCommand, InputAction, InputSnapshot, LoopConfig, OccupancyGrid, Pose, Scene,
    SceneCommand, SceneComposer, TextureKey, Viewport,
};

fn snapshot_from_actions(actions: &[InputAction]) -> InputSnapshot {
    let mut snapshot = InputSnapshot::empty();
    for action in actions {
        snapshot = snapshot.with_action_down(*action, true);
    }
    snapshot
}

fn rain_toggle() -> InputSnapshot {
    InputSnapshot::empty().with_rain_toggle_pressed(true)
}

fn open_floor() -> OccupancyGrid {
    OccupancyGrid::filled(Cell::Floor)
}

fn seeded_config() -> SimulationConfig {
    SimulationConfig {
        rain_seed: Some(42),
        ..SimulationConfig::default()
    }
}

fn state_on(grid: OccupancyGrid, config: SimulationConfig) -> SimulationState {
    SimulationState::new(grid, config, Viewport::default())
}

fn scene_on(grid: OccupancyGrid) -> WallsScene {
    WallsScene::new(
        "Raycasting Example".to_string(),
        state_on(grid, seeded_config()),
    )
}

fn render(scene: &mut WallsScene) -> Vec<DrawCommand> {
    let composer = SceneComposer::new(Viewport::default());
    let mut commands = Vec::new();
    scene.render(&composer, &mut commands);
    commands
}

fn count_textures(commands: &[DrawCommand], key: TextureKey) -> usize {
    commands
        .iter()
        .filter(|command| command.texture() == Some(key))
        .count()
}

#[test]
fn opposing_walk_inputs_leave_spawn_pose_unchanged() {
    let mut state = state_on(open_floor(), seeded_config());
    state.step(&snapshot_from_actions(&[
        InputAction::MoveForward,
        InputAction::MoveBackward,
    ]));

    assert_eq!(state.pose(), Pose::new(4.5, 4.5, 0.0));
}

#[test]
fn forward_on_open_floor_moves_one_step_along_facing() {
    let mut state = state_on(open_floor(), seeded_config());
    state.step(&snapshot_from_actions(&[InputAction::MoveForward]));

    let pose = state.pose();
    assert_eq!(pose.x, 4.5 + 0.1);
    assert_eq!(pose.y, 4.5);
    assert_eq!(pose.angle, 0.0);
}

#[test]
fn wall_ahead_blocks_forward_motion() {
    let mut grid = open_floor();
    assert!(grid.set_cell(5, 4, Cell::Wall));
    let spawn = Pose::new(4.95, 4.5, 0.0);
    let mut state = state_on(
        grid,
        SimulationConfig {
            spawn,
            ..seeded_config()
        },
    );

    for _ in 0..10 {
        state.step(&snapshot_from_actions(&[InputAction::MoveForward]));
    }

    assert_eq!(state.pose(), spawn);
}

#[test]
fn rotation_keys_turn_without_moving() {
    let mut state = state_on(open_floor(), seeded_config());
    state.step(&snapshot_from_actions(&[InputAction::RotateRight]));
    state.step(&snapshot_from_actions(&[InputAction::RotateRight]));
    state.step(&snapshot_from_actions(&[InputAction::RotateLeft]));

    let pose = state.pose();
    assert_eq!((pose.x, pose.y), (4.5, 4.5));
    assert!((pose.angle - 0.05).abs() < 1e-6);
}

#[test]
fn rain_toggle_flips_once_per_press_edge() {
    let mut state = state_on(open_floor(), seeded_config());
    assert!(!state.rain_enabled());

    state.step(&rain_toggle());
    assert!(state.rain_enabled());
    state.step(&InputSnapshot::empty());
    assert!(state.rain_enabled());

    state.step(&rain_toggle());
    assert!(!state.rain_enabled());
}

#[test]
fn each_rain_tick_adds_one_drop() {
    let mut state = state_on(open_floor(), seeded_config());
    state.step(&rain_toggle());
    for _ in 0..9 {
        state.step(&InputSnapshot::empty());
    }

    assert_eq!(state.rain().len(), 10);
    assert!(state.rain().iter().all(|drop| drop.y <= 600.0));
}

#[test]
fn disabled_rain_freezes_and_hides_drops() {
    let mut scene = scene_on(open_floor());
    scene.update(1.0 / 60.0, &rain_toggle());
    for _ in 0..4 {
        scene.update(1.0 / 60.0, &InputSnapshot::empty());
    }
    assert_eq!(count_textures(&render(&mut scene), TextureKey::Raindrop), 5);

    scene.update(1.0 / 60.0, &rain_toggle());
    let frozen: Vec<_> = scene.state().rain().iter().copied().collect();
    for _ in 0..20 {
        scene.update(1.0 / 60.0, &InputSnapshot::empty());
    }

    let after: Vec<_> = scene.state().rain().iter().copied().collect();
    assert_eq!(frozen, after);
    assert_eq!(count_textures(&render(&mut scene), TextureKey::Raindrop), 0);
}

#[test]
fn all_floor_map_draws_floor_and_ceiling_for_every_cell() {
    let mut scene = scene_on(open_floor());
    let commands = render(&mut scene);

    assert_eq!(count_textures(&commands, TextureKey::Wall), 0);
    assert_eq!(count_textures(&commands, TextureKey::Floor), 64);
    assert_eq!(count_textures(&commands, TextureKey::Ceiling), 64);
    assert_eq!(count_textures(&commands, TextureKey::Weapon), 1);
}

#[test]
fn only_walls_inside_the_lit_cone_are_drawn() {
    let mut grid = open_floor();
    assert!(grid.set_cell(6, 4, Cell::Wall));
    assert!(grid.set_cell(2, 4, Cell::Wall));
    let mut scene = scene_on(grid);

    assert_eq!(count_textures(&render(&mut scene), TextureKey::Wall), 1);

    // 63 ticks at 0.05 rad turn just past PI.
    for _ in 0..63 {
        scene.update(
            1.0 / 60.0,
            &snapshot_from_actions(&[InputAction::RotateRight]),
        );
    }
    let commands = render(&mut scene);
    let lit_walls: Vec<_> = commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Texture {
                texture: TextureKey::Wall,
                rect,
            } => Some(rect.x),
            _ => None,
        })
        .collect();
    assert_eq!(lit_walls, vec![200]);
}

#[test]
fn map_toggle_hides_tiles_but_keeps_overlay() {
    let mut scene = scene_on(open_floor());
    scene.update(
        1.0 / 60.0,
        &InputSnapshot::empty().with_map_toggle_pressed(true),
    );
    let commands = render(&mut scene);

    assert_eq!(count_textures(&commands, TextureKey::Floor), 0);
    assert_eq!(count_textures(&commands, TextureKey::Ceiling), 0);
    assert_eq!(count_textures(&commands, TextureKey::Weapon), 1);
    assert!(commands
        .iter()
        .any(|command| matches!(command, DrawCommand::Line { .. })));
    assert!(scene
        .debug_title()
        .is_some_and(|title| title.ends_with("map hidden")));
}

#[test]
fn quit_request_ends_the_scene_without_stepping() {
    let mut scene = scene_on(open_floor());
    let command = scene.update(
        1.0 / 60.0,
        &snapshot_from_actions(&[InputAction::MoveForward]).with_quit_requested(true),
    );

    assert_eq!(command, SceneCommand::Quit);
    assert_eq!(scene.state().tick_count(), 0);
    assert_eq!(scene.state().pose(), Pose::default());
}

#[test]
fn title_reports_rain_state_and_drop_count() {
    let mut scene = scene_on(open_floor());
    assert_eq!(
        scene.debug_title().as_deref(),
        Some("Raycasting Example | rain off")
    );

    scene.update(1.0 / 60.0, &rain_toggle());
    scene.update(1.0 / 60.0, &InputSnapshot::empty());
    assert_eq!(
        scene.debug_title().as_deref(),
        Some("Raycasting Example | rain on (2 drops)")
    );
    assert_eq!(scene.live_particle_count(), 2);
}

#[test]
fn rain_respects_configured_capacity() {
    let mut state = state_on(
        open_floor(),
        SimulationConfig {
            rain_capacity: 8,
            rain_speed: 0.0,
            ..seeded_config()
        },
    );
    state.step(&rain_toggle());
    for _ in 0..30 {
        state.step(&InputSnapshot::empty());
    }

    assert_eq!(state.rain().len(), 8);
    assert_eq!(state.rain().evicted_total(), 23);
}

#[test]
fn build_scene_uses_loop_title_and_viewport() {
    let config = LoopConfig::default();
    let scene = build_scene(open_floor(), seeded_config(), &config);

    assert_eq!(
        scene.debug_title().as_deref(),
        Some("Raycasting Example | rain off")
    );
    assert_eq!(scene.live_particle_count(), 0);
}
