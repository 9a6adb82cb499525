use crate::world::{is_shadowed, Cell, OccupancyGrid, ParticleSystem, Pose, GRID_HEIGHT, GRID_WIDTH};

use super::transform::{ScreenRect, TileLayout, Viewport};

pub const PLAYER_MARKER_SIZE_PX: u32 = 5;
pub const PLAYER_MARKER_COLOR: [u8; 4] = [255, 0, 0, 255];
pub const SIGHT_LINE_LENGTH_PX: f32 = 50.0;
pub const SIGHT_LINE_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const RAINDROP_SIZE_PX: u32 = 5;
pub const DEFAULT_WEAPON_SIZE_PX: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Wall,
    Floor,
    Ceiling,
    Weapon,
    Raindrop,
}

impl TextureKey {
    pub const ALL: [TextureKey; 5] = [
        TextureKey::Wall,
        TextureKey::Floor,
        TextureKey::Ceiling,
        TextureKey::Weapon,
        TextureKey::Raindrop,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            TextureKey::Wall => 0,
            TextureKey::Floor => 1,
            TextureKey::Ceiling => 2,
            TextureKey::Weapon => 3,
            TextureKey::Raindrop => 4,
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            TextureKey::Wall => "wall_texture.png",
            TextureKey::Floor => "floor_texture.png",
            TextureKey::Ceiling => "ceiling_texture.png",
            TextureKey::Weapon => "weapon_texture.png",
            TextureKey::Raindrop => "raindrop_texture.png",
        }
    }
}

/// One frame's worth of drawing, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Texture {
        texture: TextureKey,
        rect: ScreenRect,
    },
    FillRect {
        color: [u8; 4],
        rect: ScreenRect,
    },
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: [u8; 4],
    },
}

impl DrawCommand {
    pub fn texture(&self) -> Option<TextureKey> {
        match self {
            DrawCommand::Texture { texture, .. } => Some(*texture),
            _ => None,
        }
    }
}

/// Held weapon sprite, anchored to the bottom-center of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSlot {
    pub texture: TextureKey,
    pub width: u32,
    pub height: u32,
}

impl Default for WeaponSlot {
    fn default() -> Self {
        Self {
            texture: TextureKey::Weapon,
            width: DEFAULT_WEAPON_SIZE_PX,
            height: DEFAULT_WEAPON_SIZE_PX,
        }
    }
}

/// Everything the composer reads for one frame. `rain` is `None` while the effect is off.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    pub grid: &'a OccupancyGrid,
    pub pose: Pose,
    pub rain: Option<&'a ParticleSystem>,
    pub weapon: WeaponSlot,
    pub show_grid: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SceneComposer {
    viewport: Viewport,
    layout: TileLayout,
}

impl SceneComposer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layout: TileLayout::for_viewport(viewport),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    pub fn compose(&self, frame: &SceneFrame<'_>) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(GRID_WIDTH * GRID_HEIGHT * 2 + 3);
        self.compose_into(frame, &mut commands);
        commands
    }

    /// Fills `commands` back to front: map tiles, player marker, sight line, weapon, rain.
    pub fn compose_into(&self, frame: &SceneFrame<'_>, commands: &mut Vec<DrawCommand>) {
        commands.clear();

        if frame.show_grid {
            self.compose_map(frame.grid, &frame.pose, commands);
        }

        let (player_x, player_y) = self.layout.grid_to_screen(frame.pose.x, frame.pose.y);
        commands.push(DrawCommand::FillRect {
            color: PLAYER_MARKER_COLOR,
            rect: ScreenRect::new(
                player_x as i32,
                player_y as i32,
                PLAYER_MARKER_SIZE_PX,
                PLAYER_MARKER_SIZE_PX,
            ),
        });

        let (facing_x, facing_y) = frame.pose.facing();
        commands.push(DrawCommand::Line {
            from: (player_x as i32, player_y as i32),
            to: (
                (player_x + SIGHT_LINE_LENGTH_PX * facing_x) as i32,
                (player_y + SIGHT_LINE_LENGTH_PX * facing_y) as i32,
            ),
            color: SIGHT_LINE_COLOR,
        });

        commands.push(DrawCommand::Texture {
            texture: frame.weapon.texture,
            rect: self.weapon_rect(frame.weapon),
        });

        if let Some(rain) = frame.rain {
            commands.extend(rain.iter().map(|particle| DrawCommand::Texture {
                texture: TextureKey::Raindrop,
                rect: ScreenRect::new(
                    particle.x as i32,
                    particle.y as i32,
                    RAINDROP_SIZE_PX,
                    RAINDROP_SIZE_PX,
                ),
            }));
        }
    }

    fn compose_map(&self, grid: &OccupancyGrid, pose: &Pose, commands: &mut Vec<DrawCommand>) {
        let ceiling_height = self.viewport.height / (2 * GRID_HEIGHT as u32);
        // Column-major so ceiling strips land over the floor tiles of row 0.
        for x in 0..GRID_WIDTH {
            for y in 0..GRID_HEIGHT {
                let rect = self.layout.cell_rect(x, y);
                match grid.cell(x, y) {
                    Some(Cell::Wall) => {
                        if is_shadowed(x as f32, y as f32, pose) {
                            commands.push(DrawCommand::Texture {
                                texture: TextureKey::Wall,
                                rect,
                            });
                        }
                    }
                    Some(Cell::Floor) => {
                        commands.push(DrawCommand::Texture {
                            texture: TextureKey::Floor,
                            rect,
                        });
                        commands.push(DrawCommand::Texture {
                            texture: TextureKey::Ceiling,
                            rect: ScreenRect::new(rect.x, 0, rect.width, ceiling_height),
                        });
                    }
                    None => {}
                }
            }
        }
    }

    fn weapon_rect(&self, weapon: WeaponSlot) -> ScreenRect {
        let x = (self.viewport.width / 2) as i32 - (weapon.width / 2) as i32;
        let y = self.viewport.height as i32 - weapon.height as i32;
        ScreenRect::new(x, y, weapon.width, weapon.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Particle, ParticleConfig};
    use std::f32::consts::PI;

    fn composer() -> SceneComposer {
        SceneComposer::new(Viewport::default())
    }

    fn frame<'a>(grid: &'a OccupancyGrid, pose: Pose) -> SceneFrame<'a> {
        SceneFrame {
            grid,
            pose,
            rain: None,
            weapon: WeaponSlot::default(),
            show_grid: true,
        }
    }

    fn count_texture(commands: &[DrawCommand], key: TextureKey) -> usize {
        commands
            .iter()
            .filter(|command| command.texture() == Some(key))
            .count()
    }

    #[test]
    fn all_floor_map_emits_floor_and_ceiling_per_cell() {
        let grid = OccupancyGrid::filled(Cell::Floor);
        let commands = composer().compose(&frame(&grid, Pose::default()));

        assert_eq!(count_texture(&commands, TextureKey::Wall), 0);
        assert_eq!(count_texture(&commands, TextureKey::Floor), 64);
        assert_eq!(count_texture(&commands, TextureKey::Ceiling), 64);

        let map_commands = &commands[..128];
        for pair in map_commands.chunks_exact(2) {
            assert_eq!(pair[0].texture(), Some(TextureKey::Floor));
            assert_eq!(pair[1].texture(), Some(TextureKey::Ceiling));
        }
    }

    #[test]
    fn floor_and_ceiling_rects_follow_tile_layout() {
        let mut grid = OccupancyGrid::filled(Cell::Wall);
        grid.set_cell(3, 5, Cell::Floor);
        let commands = composer().compose(&frame(&grid, Pose::new(0.5, 0.5, PI)));
        let floors: Vec<_> = commands
            .iter()
            .filter(|command| command.texture() != Some(TextureKey::Wall))
            .take(2)
            .copied()
            .collect();
        assert_eq!(
            floors[0],
            DrawCommand::Texture {
                texture: TextureKey::Floor,
                rect: ScreenRect::new(300, 375, 100, 75),
            }
        );
        assert_eq!(
            floors[1],
            DrawCommand::Texture {
                texture: TextureKey::Ceiling,
                rect: ScreenRect::new(300, 0, 100, 37),
            }
        );
    }

    #[test]
    fn only_walls_inside_facing_cone_are_drawn() {
        let grid = OccupancyGrid::filled(Cell::Wall);
        let pose = Pose::new(4.5, 4.5, 0.0);
        let commands = composer().compose(&frame(&grid, pose));

        let wall_rects: Vec<ScreenRect> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Texture {
                    texture: TextureKey::Wall,
                    rect,
                } => Some(*rect),
                _ => None,
            })
            .collect();
        assert!(!wall_rects.is_empty());
        let layout = composer().layout();
        for rect in &wall_rects {
            let cell_x = rect.x as u32 / layout.tile_width;
            let cell_y = rect.y as u32 / layout.tile_height;
            assert!(is_shadowed(cell_x as f32, cell_y as f32, &pose));
            assert!(cell_x >= 5, "wall behind player drawn: {rect:?}");
        }
        assert_eq!(count_texture(&commands, TextureKey::Floor), 0);
    }

    #[test]
    fn player_marker_line_and_weapon_are_always_emitted() {
        let grid = OccupancyGrid::filled(Cell::Floor);
        let mut hidden = frame(&grid, Pose::new(4.5, 4.5, 0.0));
        hidden.show_grid = false;
        let commands = composer().compose(&hidden);

        assert_eq!(
            commands,
            vec![
                DrawCommand::FillRect {
                    color: PLAYER_MARKER_COLOR,
                    rect: ScreenRect::new(450, 337, 5, 5),
                },
                DrawCommand::Line {
                    from: (450, 337),
                    to: (500, 337),
                    color: SIGHT_LINE_COLOR,
                },
                DrawCommand::Texture {
                    texture: TextureKey::Weapon,
                    rect: ScreenRect::new(375, 550, 50, 50),
                },
            ]
        );
    }

    #[test]
    fn sight_line_follows_facing_angle() {
        let grid = OccupancyGrid::filled(Cell::Floor);
        let mut hidden = frame(&grid, Pose::new(2.0, 2.0, PI / 2.0));
        hidden.show_grid = false;
        let commands = composer().compose(&hidden);
        match commands[1] {
            DrawCommand::Line { from, to, .. } => {
                assert_eq!(from, (200, 150));
                assert_eq!(to.0, 200);
                assert_eq!(to.1, 200);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn rain_emits_one_drop_per_particle_only_when_enabled() {
        let grid = OccupancyGrid::filled(Cell::Floor);
        let mut rain = ParticleSystem::new(ParticleConfig {
            seed: Some(1),
            ..ParticleConfig::for_viewport(800, 600)
        });
        rain.push(Particle {
            x: 12.7,
            y: 40.2,
            speed: 5.0,
        });
        rain.push(Particle {
            x: 700.0,
            y: 0.0,
            speed: 5.0,
        });

        let mut with_rain = frame(&grid, Pose::default());
        with_rain.show_grid = false;
        with_rain.rain = Some(&rain);
        let commands = composer().compose(&with_rain);
        assert_eq!(count_texture(&commands, TextureKey::Raindrop), 2);
        assert_eq!(
            commands[3],
            DrawCommand::Texture {
                texture: TextureKey::Raindrop,
                rect: ScreenRect::new(12, 40, 5, 5),
            }
        );

        with_rain.rain = None;
        let commands = composer().compose(&with_rain);
        assert_eq!(count_texture(&commands, TextureKey::Raindrop), 0);
    }

    #[test]
    fn compose_into_reuses_buffer() {
        let grid = OccupancyGrid::filled(Cell::Floor);
        let mut commands = Vec::new();
        composer().compose_into(&frame(&grid, Pose::default()), &mut commands);
        let first_len = commands.len();
        composer().compose_into(&frame(&grid, Pose::default()), &mut commands);
        assert_eq!(commands.len(), first_len);
        assert_eq!(first_len, 128 + 3);
    }
}
