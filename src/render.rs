use image::{ImageBuffer, Rgb, RgbImage};

use crate::grid::FluidGrid;
use crate::manager::ObstacleManager;
use crate::obstacle::Obstacle;

/// Which field is colour-mapped into a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldView {
    #[default]
    Density,
    Velocity,
    Temperature,
}

impl FieldView {
    pub fn next(self) -> Self {
        match self {
            FieldView::Density => FieldView::Velocity,
            FieldView::Velocity => FieldView::Temperature,
            FieldView::Temperature => FieldView::Density,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldView::Density => "density",
            FieldView::Velocity => "velocity",
            FieldView::Temperature => "temperature",
        }
    }
}

pub const FIXED_COLOR: Rgb<u8> = Rgb([128, 128, 128]);
pub const RECT_COLOR: Rgb<u8> = Rgb([204, 128, 51]);
pub const DISK_COLOR: Rgb<u8> = Rgb([51, 128, 204]);
pub const SELECTED_RECT_COLOR: Rgb<u8> = Rgb([204, 204, 51]);
pub const SELECTED_DISK_COLOR: Rgb<u8> = Rgb([51, 204, 204]);

/// Colour used to draw an obstacle, honouring its selection state.
pub fn obstacle_color(obstacle: &Obstacle) -> Rgb<u8> {
    match (obstacle, obstacle.is_selected()) {
        (Obstacle::Fixed(_), _) => FIXED_COLOR,
        (Obstacle::Rect(_), false) => RECT_COLOR,
        (Obstacle::Rect(_), true) => SELECTED_RECT_COLOR,
        (Obstacle::Disk(_), false) => DISK_COLOR,
        (Obstacle::Disk(_), true) => SELECTED_DISK_COLOR,
    }
}

/// Rasterizes grid fields and obstacles into RGB images.
///
/// Image row 0 is the top of the domain (largest `j`).
pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    /// Zero dimensions are raised to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Interior cell `(i, j)` under pixel `(x, y)`.
    fn cell_at(&self, n: usize, x: u32, y: u32) -> (usize, usize) {
        let i = (x as usize * n) / self.width as usize + 1;
        let j = n - (y as usize * n) / self.height as usize;
        (i.min(n), j.max(1))
    }

    pub fn render_field(&self, grid: &FluidGrid, view: FieldView) -> RgbImage {
        let n = grid.size();
        let max_temp = grid.temp.iter().fold(1e-6f32, |m, t| m.max(t.abs()));

        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let (i, j) = self.cell_at(n, x, y);
            let idx = grid.ix(i, j);
            match view {
                FieldView::Density => {
                    let d = (grid.dens[idx].clamp(0.0, 1.0) * 255.0) as u8;
                    Rgb([d, d, d])
                }
                FieldView::Velocity => {
                    // Red for |u|, green for |v|
                    let r = (grid.u[idx].abs() * 255.0).min(255.0) as u8;
                    let g = (grid.v[idx].abs() * 255.0).min(255.0) as u8;
                    Rgb([r, g, 64])
                }
                FieldView::Temperature => {
                    let t = grid.temp[idx] / max_temp;
                    if t >= 0.0 {
                        Rgb([(t * 255.0) as u8, (t * 96.0) as u8, 0])
                    } else {
                        Rgb([0, 0, (-t * 255.0) as u8])
                    }
                }
            }
        })
    }

    /// Field frame with every obstacle painted on top.
    pub fn render_frame(
        &self,
        grid: &FluidGrid,
        obstacles: &ObstacleManager,
        view: FieldView,
    ) -> RgbImage {
        let mut img = self.render_field(grid, view);
        self.overlay_obstacles(&mut img, grid.size(), obstacles);
        img
    }

    pub fn overlay_obstacles(&self, img: &mut RgbImage, n: usize, obstacles: &ObstacleManager) {
        let scale_x = n as f32 / self.width as f32;
        let scale_y = n as f32 / self.height as f32;
        for obstacle in obstacles.iter() {
            let color = obstacle_color(obstacle);
            for (x, y, pixel) in img.enumerate_pixels_mut() {
                // Continuous cell coordinates of the pixel centre.
                let cx = (x as f32 + 0.5) * scale_x + 0.5;
                let cy = n as f32 + 0.5 - (y as f32 + 0.5) * scale_y;
                if obstacle.contains(cx, cy) {
                    *pixel = color;
                }
            }
        }
    }
}
