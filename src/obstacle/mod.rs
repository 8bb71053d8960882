//! Rigid obstacles immersed in the fluid.
//!
//! Three variants share one tagged enum: a static cell mask, a movable
//! oriented rectangle and a movable disk. Each can imprint itself onto the
//! grid; the movable ones also sense the local flow and integrate their own
//! motion.

mod body;
mod disk;
mod fixed;
mod rect;

pub use body::RigidBody;
pub use disk::Disk;
pub use fixed::FixedMask;
pub use rect::MovableRect;

use glam::Vec2;

use crate::config::CouplingConfig;
use crate::grid::FluidGrid;

/// Anything that enforces a solid constraint on the grid after a tick.
pub trait SolidBoundary {
    fn apply_to(&self, grid: &mut FluidGrid);
}

impl SolidBoundary for FixedMask {
    fn apply_to(&self, grid: &mut FluidGrid) {
        self.apply(grid);
    }
}

#[derive(Debug, Clone)]
pub enum Obstacle {
    Fixed(FixedMask),
    Rect(MovableRect),
    Disk(Disk),
}

impl Obstacle {
    pub fn is_movable(&self) -> bool {
        !matches!(self, Obstacle::Fixed(_))
    }

    pub fn body(&self) -> Option<&RigidBody> {
        match self {
            Obstacle::Fixed(_) => None,
            Obstacle::Rect(rect) => Some(&rect.body),
            Obstacle::Disk(disk) => Some(&disk.body),
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut RigidBody> {
        match self {
            Obstacle::Fixed(_) => None,
            Obstacle::Rect(rect) => Some(&mut rect.body),
            Obstacle::Disk(disk) => Some(&mut disk.body),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Obstacle::Fixed(mask) => mask.contains(x, y),
            Obstacle::Rect(rect) => rect.contains(x, y),
            Obstacle::Disk(disk) => disk.contains(x, y),
        }
    }

    /// Velocity imprinted on covered cells.
    pub fn velocity(&self) -> Vec2 {
        self.body().map_or(Vec2::ZERO, |body| body.velocity)
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        if let Some(body) = self.body_mut() {
            body.velocity = Vec2::new(vx, vy);
        }
    }

    pub fn set_angular_velocity(&mut self, radians_per_second: f32) {
        if let Some(body) = self.body_mut() {
            body.angular_velocity = radians_per_second;
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        if let Some(body) = self.body_mut() {
            body.selected = selected;
        }
    }

    pub fn is_selected(&self) -> bool {
        self.body().is_some_and(|body| body.selected)
    }

    /// Move the obstacle's centre to `position`.
    pub fn update_position(&mut self, position: Vec2) {
        if let Some(body) = self.body_mut() {
            body.position = position;
        }
    }

    /// Force covered cells to the obstacle's velocity and clear their density.
    pub fn apply(&self, grid: &mut FluidGrid) {
        match self {
            Obstacle::Fixed(mask) => mask.apply(grid),
            _ => {
                let velocity = self.velocity();
                self.for_each_covered_cell(grid.size(), |idx| {
                    grid.u[idx] = velocity.x;
                    grid.v[idx] = velocity.y;
                    grid.dens[idx] = 0.0;
                });
            }
        }
    }

    /// Record the mean fluid velocity over the covered cells.
    pub fn sense(&mut self, grid: &FluidGrid) {
        if !self.is_movable() {
            return;
        }
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;
        self.for_each_covered_cell(grid.size(), |idx| {
            sum += Vec2::new(grid.u[idx], grid.v[idx]);
            count += 1;
        });
        let flow = (count > 0).then(|| sum / count as f32);
        if let Some(body) = self.body_mut() {
            body.sensed_flow = flow;
        }
    }

    /// Nudge toward the sensed flow using the coupling for this kind.
    pub fn react(&mut self, coupling: &CouplingConfig, dt: f32) {
        match self {
            Obstacle::Fixed(_) => {}
            Obstacle::Rect(rect) => rect.body.react(coupling.rect, dt),
            Obstacle::Disk(disk) => disk.body.react(coupling.disk, dt),
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(body) = self.body_mut() {
            body.integrate(dt);
        }
    }

    /// Clamp the centre so the shape stays within the interior `[1, n]`.
    ///
    /// Velocity along a clamped axis is zeroed. Rectangles use the
    /// half-size of their rotated bounding box.
    pub fn keep_inside(&mut self, n: usize) {
        let reach = match self {
            Obstacle::Fixed(_) => return,
            Obstacle::Rect(rect) => {
                let (sin, cos) = rect.body.angle.sin_cos();
                let (sin, cos) = (sin.abs(), cos.abs());
                let h = rect.half_extents();
                Vec2::new(cos * h.x + sin * h.y, sin * h.x + cos * h.y)
            }
            Obstacle::Disk(disk) => Vec2::splat(disk.radius()),
        };
        let Some(body) = self.body_mut() else {
            return;
        };

        let lo = Vec2::ONE + reach;
        let hi = Vec2::splat(n as f32) - reach;
        // A shape wider than the domain sits in the middle.
        let mid = Vec2::splat((1.0 + n as f32) * 0.5);
        let lo = lo.min(mid);
        let hi = hi.max(mid);

        let clamped = body.position.clamp(lo, hi);
        if clamped.x != body.position.x {
            body.velocity.x = 0.0;
        }
        if clamped.y != body.position.y {
            body.velocity.y = 0.0;
        }
        body.position = clamped;
    }

    /// Visit the linear index of every interior cell inside the shape.
    fn for_each_covered_cell(&self, n: usize, mut visit: impl FnMut(usize)) {
        let (center, reach) = match self {
            Obstacle::Fixed(_) => return,
            Obstacle::Rect(rect) => (rect.center(), rect.bounding_radius()),
            Obstacle::Disk(disk) => (disk.center(), disk.radius()),
        };
        let Some((i_min, i_max)) = cell_span(center.x - reach, center.x + reach, n) else {
            return;
        };
        let Some((j_min, j_max)) = cell_span(center.y - reach, center.y + reach, n) else {
            return;
        };
        for j in j_min..=j_max {
            for i in i_min..=i_max {
                if self.contains(i as f32, j as f32) {
                    visit(crate::grid::ix(i, j, n));
                }
            }
        }
    }
}

/// Interior cell range overlapping `[lo, hi]`, if any.
fn cell_span(lo: f32, hi: f32, n: usize) -> Option<(usize, usize)> {
    let lo = lo.ceil().max(1.0);
    let hi = hi.floor().min(n as f32);
    if !(lo <= hi) {
        return None;
    }
    Some((lo as usize, hi as usize))
}
