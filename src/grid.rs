use crate::error::{Result, SimError};

pub const MIN_GRID_SIZE: usize = 8;
pub const MAX_GRID_SIZE: usize = 1024;

/// Linear index of cell `(i, j)` on a grid with interior size `n`.
///
/// `i` runs along x, `j` along y (up). Rows are contiguous in `i`.
#[inline(always)]
pub fn ix(i: usize, j: usize, n: usize) -> usize {
    i + (n + 2) * j
}

/// Field storage for an `n x n` interior padded with one ghost ring.
///
/// Every buffer holds exactly `(n + 2)^2` values. The `*_prev` buffers double
/// as per-tick source accumulators and as scratch space for the solver.
#[derive(Debug, Clone)]
pub struct FluidGrid {
    n: usize,
    pub u: Vec<f32>,
    pub v: Vec<f32>,
    pub dens: Vec<f32>,
    pub temp: Vec<f32>,
    pub vort: Vec<f32>,
    pub u_prev: Vec<f32>,
    pub v_prev: Vec<f32>,
    pub dens_prev: Vec<f32>,
    pub temp_prev: Vec<f32>,
}

impl FluidGrid {
    pub fn new(n: usize) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&n) {
            log::warn!("Rejected grid size {}", n);
            return Err(SimError::GridSize(n));
        }
        let size = (n + 2) * (n + 2);
        Ok(Self {
            n,
            u: vec![0.0; size],
            v: vec![0.0; size],
            dens: vec![0.0; size],
            temp: vec![0.0; size],
            vort: vec![0.0; size],
            u_prev: vec![0.0; size],
            v_prev: vec![0.0; size],
            dens_prev: vec![0.0; size],
            temp_prev: vec![0.0; size],
        })
    }

    /// Interior size N.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Length of every field buffer.
    pub fn len(&self) -> usize {
        (self.n + 2) * (self.n + 2)
    }

    #[inline(always)]
    pub fn ix(&self, i: usize, j: usize) -> usize {
        ix(i, j, self.n)
    }

    /// True for `1 <= i, j <= N`.
    pub fn in_interior(&self, i: usize, j: usize) -> bool {
        (1..=self.n).contains(&i) && (1..=self.n).contains(&j)
    }

    /// Zero every field, shadow buffers included. Keeps the allocations.
    pub fn reset(&mut self) {
        for field in [
            &mut self.u,
            &mut self.v,
            &mut self.dens,
            &mut self.temp,
            &mut self.vort,
            &mut self.u_prev,
            &mut self.v_prev,
            &mut self.dens_prev,
            &mut self.temp_prev,
        ] {
            field.fill(0.0);
        }
    }

    pub fn density_at(&self, i: usize, j: usize) -> f32 {
        self.dens[self.ix(i, j)]
    }

    pub fn temperature_at(&self, i: usize, j: usize) -> f32 {
        self.temp[self.ix(i, j)]
    }

    pub fn velocity_at(&self, i: usize, j: usize) -> glam::Vec2 {
        let idx = self.ix(i, j);
        glam::Vec2::new(self.u[idx], self.v[idx])
    }

    /// Sum of density over interior cells.
    pub fn total_density(&self) -> f32 {
        self.interior_sum(&self.dens)
    }

    /// Sum of temperature over interior cells.
    pub fn total_temperature(&self) -> f32 {
        self.interior_sum(&self.temp)
    }

    fn interior_sum(&self, field: &[f32]) -> f32 {
        let mut total = 0.0;
        for j in 1..=self.n {
            let row = self.ix(1, j);
            total += field[row..row + self.n].iter().sum::<f32>();
        }
        total
    }
}
