use std::mem;

use crate::boundary::{BoundaryKind, set_bounds};
use crate::config::SolverConfig;
use crate::error::{Result, SimError};
use crate::grid::FluidGrid;
use crate::kernels::{add_source, advect, buoyancy, diffuse, project, vorticity_confinement};
use crate::manager::ObstacleManager;
use crate::obstacle::SolidBoundary;

/// Drives one stable-fluids tick over a grid and its obstacles.
///
/// The solver owns both the grid and the obstacle manager; front-ends reach
/// them through the accessors between ticks.
pub struct FluidSolver {
    grid: FluidGrid,
    manager: ObstacleManager,
    boundaries: Vec<Box<dyn SolidBoundary>>,
    config: SolverConfig,
    frame: u64,
}

impl FluidSolver {
    pub fn new(grid: FluidGrid, manager: ObstacleManager, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        if grid.size() != manager.grid_size() {
            return Err(SimError::GridMismatch {
                grid: grid.size(),
                manager: manager.grid_size(),
            });
        }
        log::info!(
            "Created solver: N={} dt={} diff={} visc={} vort={}",
            grid.size(),
            config.dt,
            config.diffusion,
            config.viscosity,
            config.vorticity
        );
        Ok(Self {
            grid,
            manager,
            boundaries: Vec::new(),
            config,
            frame: 0,
        })
    }

    /// Fresh grid and empty obstacle manager of size `n`.
    pub fn with_size(n: usize, config: SolverConfig) -> Result<Self> {
        Self::new(FluidGrid::new(n)?, ObstacleManager::new(n)?, config)
    }

    pub fn grid(&self) -> &FluidGrid {
        &self.grid
    }

    pub fn manager(&self) -> &ObstacleManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ObstacleManager {
        &mut self.manager
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Number of completed ticks since construction or the last resize.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Register an extra solid constraint, applied before the obstacles.
    pub fn add_boundary(&mut self, boundary: Box<dyn SolidBoundary>) {
        self.boundaries.push(boundary);
    }

    /// Replace the grid and every obstacle with empty state of size `n`.
    ///
    /// Extra boundaries are dropped as well since they were sized for the
    /// old grid. On error the current state is left untouched.
    pub fn resize(&mut self, n: usize) -> Result<()> {
        let grid = FluidGrid::new(n)?;
        let manager = ObstacleManager::with_config(
            n,
            self.manager.coupling().clone(),
            self.manager.collision_config().clone(),
        )?;
        log::info!("Resizing grid {} -> {}", self.grid.size(), n);
        self.grid = grid;
        self.manager = manager;
        self.boundaries.clear();
        self.frame = 0;
        Ok(())
    }

    /// Zero every field. Obstacles are kept.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    pub fn add_density(&mut self, i: usize, j: usize, amount: f32) {
        if self.grid.in_interior(i, j) {
            let idx = self.grid.ix(i, j);
            self.grid.dens[idx] += amount;
        }
    }

    pub fn add_temperature(&mut self, i: usize, j: usize, amount: f32) {
        if self.grid.in_interior(i, j) {
            let idx = self.grid.ix(i, j);
            self.grid.temp[idx] += amount;
        }
    }

    pub fn add_velocity(&mut self, i: usize, j: usize, du: f32, dv: f32) {
        if self.grid.in_interior(i, j) {
            let idx = self.grid.ix(i, j);
            self.grid.u[idx] += du;
            self.grid.v[idx] += dv;
        }
    }

    /// Advance the simulation by one time step.
    pub fn step(&mut self) {
        let n = self.grid.size();
        let SolverConfig {
            dt,
            diffusion,
            viscosity,
            vorticity,
            buoyancy: buoyancy_factor,
            buoyancy_enabled,
            ambient_temperature,
            temperature_diffusion,
            iterations,
        } = self.config;
        let g = &mut self.grid;

        // Forces for this tick go into the source buffers.
        g.u_prev.fill(0.0);
        g.v_prev.fill(0.0);
        g.dens_prev.fill(0.0);
        g.temp_prev.fill(0.0);
        if vorticity > 0.0 {
            vorticity_confinement(n, &g.u, &g.v, &mut g.vort, &mut g.u_prev, &mut g.v_prev, vorticity);
        }
        if buoyancy_enabled {
            buoyancy(n, &mut g.v_prev, &g.temp, buoyancy_factor, ambient_temperature);
        }

        add_source(&mut g.u, &g.u_prev, dt);
        add_source(&mut g.v, &g.v_prev, dt);
        add_source(&mut g.dens, &g.dens_prev, dt);
        add_source(&mut g.temp, &g.temp_prev, dt);

        // Velocity
        mem::swap(&mut g.u, &mut g.u_prev);
        diffuse(n, BoundaryKind::VelocityX, &mut g.u, &g.u_prev, viscosity, dt, iterations);
        mem::swap(&mut g.v, &mut g.v_prev);
        diffuse(n, BoundaryKind::VelocityY, &mut g.v, &g.v_prev, viscosity, dt, iterations);
        project(n, &mut g.u, &mut g.v, &mut g.u_prev, &mut g.v_prev, iterations);

        mem::swap(&mut g.u, &mut g.u_prev);
        mem::swap(&mut g.v, &mut g.v_prev);
        advect(n, BoundaryKind::VelocityX, &mut g.u, &g.u_prev, &g.u_prev, &g.v_prev, dt);
        advect(n, BoundaryKind::VelocityY, &mut g.v, &g.v_prev, &g.u_prev, &g.v_prev, dt);
        project(n, &mut g.u, &mut g.v, &mut g.u_prev, &mut g.v_prev, iterations);

        // Density
        mem::swap(&mut g.dens, &mut g.dens_prev);
        diffuse(n, BoundaryKind::Scalar, &mut g.dens, &g.dens_prev, diffusion, dt, iterations);
        mem::swap(&mut g.dens, &mut g.dens_prev);
        advect(n, BoundaryKind::Scalar, &mut g.dens, &g.dens_prev, &g.u, &g.v, dt);

        // Temperature
        mem::swap(&mut g.temp, &mut g.temp_prev);
        diffuse(n, BoundaryKind::Scalar, &mut g.temp, &g.temp_prev, temperature_diffusion, dt, iterations);
        mem::swap(&mut g.temp, &mut g.temp_prev);
        advect(n, BoundaryKind::Scalar, &mut g.temp, &g.temp_prev, &g.u, &g.v, dt);

        // Rigid constraints, then obstacle motion
        self.manager.sense(&self.grid);
        for boundary in &self.boundaries {
            boundary.apply_to(&mut self.grid);
        }
        self.manager.apply_to(&mut self.grid);
        // Imprints can overwrite edge cells; keep the ghost ring in step.
        let g = &mut self.grid;
        set_bounds(n, BoundaryKind::VelocityX, &mut g.u);
        set_bounds(n, BoundaryKind::VelocityY, &mut g.v);
        set_bounds(n, BoundaryKind::Scalar, &mut g.dens);
        self.manager.update(dt);

        self.frame += 1;
    }
}
