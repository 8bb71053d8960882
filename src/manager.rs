use glam::Vec2;

use crate::collision;
use crate::config::{CollisionConfig, CouplingConfig};
use crate::error::{Result, SimError};
use crate::grid::{FluidGrid, MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::obstacle::{Disk, FixedMask, MovableRect, Obstacle, SolidBoundary};

/// Owns every obstacle of one simulation and steps their rigid-body motion.
///
/// Insertion order is drawing order; later obstacles win point queries.
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    n: usize,
    obstacles: Vec<Obstacle>,
    coupling: CouplingConfig,
    collision: CollisionConfig,
}

impl ObstacleManager {
    pub fn new(n: usize) -> Result<Self> {
        Self::with_config(n, CouplingConfig::default(), CollisionConfig::default())
    }

    pub fn with_config(n: usize, coupling: CouplingConfig, collision: CollisionConfig) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&n) {
            return Err(SimError::GridSize(n));
        }
        coupling.validate()?;
        collision.validate()?;
        Ok(Self {
            n,
            obstacles: Vec::new(),
            coupling,
            collision,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.n
    }

    pub fn coupling(&self) -> &CouplingConfig {
        &self.coupling
    }

    pub fn set_coupling(&mut self, coupling: CouplingConfig) -> Result<()> {
        coupling.validate()?;
        self.coupling = coupling;
        Ok(())
    }

    pub fn collision_config(&self) -> &CollisionConfig {
        &self.collision
    }

    pub fn set_collision_config(&mut self, collision: CollisionConfig) -> Result<()> {
        collision.validate()?;
        self.collision = collision;
        Ok(())
    }

    /// Static block covering cells `x..x+w` by `y..y+h`.
    pub fn add_fixed_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> usize {
        log::debug!("Adding fixed rect at ({}, {}) size {}x{}", x, y, w, h);
        self.push(Obstacle::Fixed(FixedMask::from_rect(self.n, x, y, w, h)))
    }

    /// Movable block with its unrotated lower-left corner at `(x, y)`.
    pub fn add_movable_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> usize {
        log::debug!("Adding movable rect at ({}, {}) size {}x{}", x, y, w, h);
        self.push(Obstacle::Rect(MovableRect::new(x, y, w, h)))
    }

    /// Movable disk centred at `(x, y)`.
    pub fn add_disk(&mut self, x: f32, y: f32, radius: f32) -> usize {
        log::debug!("Adding disk at ({}, {}) radius {}", x, y, radius);
        self.push(Obstacle::Disk(Disk::new(x, y, radius)))
    }

    pub fn push(&mut self, obstacle: Obstacle) -> usize {
        if let Obstacle::Fixed(mask) = &obstacle {
            if mask.grid_size() != self.n {
                log::warn!(
                    "Fixed mask built for N={} will be ignored on N={}",
                    mask.grid_size(),
                    self.n
                );
            }
        }
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    pub fn clear(&mut self) {
        log::info!("Clearing {} obstacles", self.obstacles.len());
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Topmost movable obstacle containing `(x, y)`.
    pub fn find_movable_at(&self, x: f32, y: f32) -> Option<usize> {
        self.obstacles
            .iter()
            .rposition(|obstacle| obstacle.is_movable() && obstacle.contains(x, y))
    }

    /// Sample the flow under every movable obstacle.
    ///
    /// Must run before the obstacles are imprinted, otherwise each body only
    /// sees its own velocity.
    pub fn sense(&mut self, grid: &FluidGrid) {
        for obstacle in &mut self.obstacles {
            obstacle.sense(grid);
        }
    }

    /// Per-tick kinematics: fluid reaction, integration, then contacts.
    ///
    /// Bodies are finally clamped back inside the grid.
    pub fn update(&mut self, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.react(&self.coupling, dt);
        }
        self.integrate(dt);
        self.handle_collisions();
        for obstacle in &mut self.obstacles {
            obstacle.keep_inside(self.n);
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }
    }

    /// Iteratively push apart every overlapping pair of movable obstacles.
    pub fn handle_collisions(&mut self) {
        let movables: Vec<usize> = (0..self.obstacles.len())
            .filter(|&k| self.obstacles[k].is_movable())
            .collect();

        for _ in 0..self.collision.iterations {
            for (pos, &first) in movables.iter().enumerate() {
                for &second in &movables[pos + 1..] {
                    self.resolve_pair(first, second);
                }
            }
        }
    }

    /// Test one pair and resolve it if it overlaps. Requires `first < second`.
    fn resolve_pair(&mut self, first: usize, second: usize) -> bool {
        let (left, right) = self.obstacles.split_at_mut(second);
        let a = &mut left[first];
        let b = &mut right[0];

        let Some(mtv) = detect(a, b) else {
            return false;
        };
        log::debug!("Contact between obstacles {} and {}: mtv {:?}", first, second, mtv);

        if let (Some(body_a), Some(body_b)) = (a.body_mut(), b.body_mut()) {
            collision::resolve(body_a, body_b, mtv, &self.collision);
        }
        true
    }
}

/// Dispatch to the narrow-phase test for this pair of variants.
fn detect(a: &Obstacle, b: &Obstacle) -> Option<Vec2> {
    match (a, b) {
        (Obstacle::Rect(ra), Obstacle::Rect(rb)) => collision::rect_rect(ra, rb),
        (Obstacle::Disk(da), Obstacle::Disk(db)) => collision::disk_disk(da, db),
        (Obstacle::Rect(r), Obstacle::Disk(d)) => collision::rect_disk(r, d),
        (Obstacle::Disk(d), Obstacle::Rect(r)) => collision::rect_disk(r, d).map(|mtv| -mtv),
        _ => None,
    }
}

impl SolidBoundary for ObstacleManager {
    fn apply_to(&self, grid: &mut FluidGrid) {
        if grid.size() != self.n {
            return;
        }
        for obstacle in &self.obstacles {
            obstacle.apply(grid);
        }
    }
}
