use crate::grid::{FluidGrid, ix};

/// Immovable solid region stored as a per-cell occupancy mask.
#[derive(Debug, Clone)]
pub struct FixedMask {
    n: usize,
    solid: Vec<bool>,
    /// Inclusive `(i_min, i_max, j_min, j_max)` of the solid cells.
    bounds: Option<(usize, usize, usize, usize)>,
}

impl FixedMask {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            solid: vec![false; (n + 2) * (n + 2)],
            bounds: None,
        }
    }

    /// Mask covering cells `x..x+w` by `y..y+h`, clipped to the interior.
    pub fn from_rect(n: usize, x: i32, y: i32, w: i32, h: i32) -> Self {
        let mut mask = Self::new(n);
        mask.add_rect(x, y, w, h);
        mask
    }

    /// Mark an additional rectangle of cells as solid.
    pub fn add_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let n = self.n as i32;
        let i_lo = x.max(1);
        let i_hi = (x + w - 1).min(n);
        let j_lo = y.max(1);
        let j_hi = (y + h - 1).min(n);
        if i_lo > i_hi || j_lo > j_hi {
            return;
        }

        for j in j_lo..=j_hi {
            for i in i_lo..=i_hi {
                self.solid[ix(i as usize, j as usize, self.n)] = true;
            }
        }

        let (i_lo, i_hi, j_lo, j_hi) = (i_lo as usize, i_hi as usize, j_lo as usize, j_hi as usize);
        self.bounds = Some(match self.bounds {
            Some((a, b, c, d)) => (a.min(i_lo), b.max(i_hi), c.min(j_lo), d.max(j_hi)),
            None => (i_lo, i_hi, j_lo, j_hi),
        });
    }

    pub fn grid_size(&self) -> usize {
        self.n
    }

    pub fn bounds(&self) -> Option<(usize, usize, usize, usize)> {
        self.bounds
    }

    pub fn is_solid(&self, i: usize, j: usize) -> bool {
        i <= self.n + 1 && j <= self.n + 1 && self.solid[ix(i, j, self.n)]
    }

    /// Point test against the cell containing `(x, y)`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (i, j) = (x.round(), y.round());
        i >= 0.0 && j >= 0.0 && self.is_solid(i as usize, j as usize)
    }

    /// Zero velocity and density on every solid cell.
    pub fn apply(&self, grid: &mut FluidGrid) {
        let Some((i_min, i_max, j_min, j_max)) = self.bounds else {
            return;
        };
        if grid.size() != self.n {
            return;
        }
        for j in j_min..=j_max {
            for i in i_min..=i_max {
                let idx = ix(i, j, self.n);
                if self.solid[idx] {
                    grid.u[idx] = 0.0;
                    grid.v[idx] = 0.0;
                    grid.dens[idx] = 0.0;
                }
            }
        }
    }
}
