use three_d::*;

use crate::config::{color, GameConfig};
use crate::game::{GameState, Grid, Position};

/// Fill squares are drawn this many pixels in from the cell edge, leaving the
/// border colour visible underneath.
const BORDER_PX: f32 = 1.0;

pub struct GameRenderer {
    borders: Gm<InstancedMesh, ColorMaterial>,
    snake_cells: Gm<InstancedMesh, ColorMaterial>,
    apple_cell: Gm<InstancedMesh, ColorMaterial>,
    background: [f32; 3],
    grid: Grid,
    viewport: Viewport,
}

impl GameRenderer {
    pub fn new(context: &Context, config: &GameConfig) -> Self {
        let layer = |albedo: Srgba| {
            Gm::new(
                InstancedMesh::new(context, &Instances::default(), &CpuMesh::square()),
                ColorMaterial {
                    color: albedo,
                    ..Default::default()
                },
            )
        };

        Self {
            borders: layer(color(config.border_color)),
            snake_cells: layer(color(config.snake_color)),
            apple_cell: layer(color(config.apple_color)),
            background: config.background_color.map(|c| c as f32 / 255.0),
            grid: config.grid(),
            viewport: Viewport::new_at_origo(config.screen_width, config.screen_height),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn render<R>(&mut self, game: &GameState<R>, target: &RenderTarget) {
        let cell = self.cell_extent();

        let snake: Vec<Position> = game.snake.body.iter().copied().collect();
        let apple = [game.apple.position];

        // Borders sit at z = 0, fills at z = 0.5, closer to the 2D camera.
        let border_cells: Vec<Mat4> = snake
            .iter()
            .chain(apple.iter())
            .map(|&pos| self.cell_transform(pos, cell, 0.0, 0.0))
            .collect();
        let snake_fills: Vec<Mat4> = snake
            .iter()
            .map(|&pos| self.cell_transform(pos, cell, BORDER_PX, 0.5))
            .collect();
        let apple_fill: Vec<Mat4> = apple
            .iter()
            .map(|&pos| self.cell_transform(pos, cell, BORDER_PX, 0.5))
            .collect();

        set_transforms(&mut self.borders, border_cells);
        set_transforms(&mut self.snake_cells, snake_fills);
        set_transforms(&mut self.apple_cell, apple_fill);

        let [r, g, b] = self.background;
        let camera = Camera::new_2d(self.viewport);
        let objects: &[&dyn Object] = &[&self.borders, &self.snake_cells, &self.apple_cell];
        target
            .clear(ClearState::color_and_depth(r, g, b, 1.0, 1.0))
            .render(&camera, objects, &[]);
    }

    /// Cell size in physical pixels for the current viewport.
    fn cell_extent(&self) -> Vec2 {
        vec2(
            self.viewport.width as f32 / self.grid.width as f32,
            self.viewport.height as f32 / self.grid.height as f32,
        )
    }

    fn cell_transform(&self, pos: Position, cell: Vec2, inset: f32, depth: f32) -> Mat4 {
        // Grid rows count down from the top; the 2D camera's y axis points up.
        let cx = (pos.x as f32 + 0.5) * cell.x;
        let cy = self.viewport.height as f32 - (pos.y as f32 + 0.5) * cell.y;
        // The unit square spans [-1, 1], so scale by half extents.
        let half_w = (cell.x / 2.0 - inset).max(0.0);
        let half_h = (cell.y / 2.0 - inset).max(0.0);
        Mat4::from_translation(vec3(cx, cy, depth)) * Mat4::from_nonuniform_scale(half_w, half_h, 1.0)
    }
}

fn set_transforms(layer: &mut Gm<InstancedMesh, ColorMaterial>, transformations: Vec<Mat4>) {
    layer.geometry.set_instances(&Instances {
        transformations,
        ..Default::default()
    });
}
