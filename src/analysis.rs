use rayon::prelude::*;

use crate::grid::FluidGrid;
use crate::solver::FluidSolver;

/// Whole-domain diagnostics for one frame.
#[derive(Debug, Clone, Default)]
pub struct FluidMetrics {
    pub frame: u64,
    pub total_mass: f32,
    pub max_density: f32,
    pub total_temperature: f32,
    pub total_kinetic_energy: f32,
    pub max_velocity: f32,
    /// Mean absolute divergence over interior cells.
    pub velocity_divergence: f32,
    /// Mean absolute curl over interior cells.
    pub vorticity: f32,
    pub obstacle_count: usize,
}

#[derive(Default)]
struct RowSums {
    mass: f32,
    max_density: f32,
    temperature: f32,
    kinetic_energy: f32,
    max_velocity: f32,
    divergence: f32,
    vorticity: f32,
}

impl RowSums {
    fn merge(self, other: RowSums) -> RowSums {
        RowSums {
            mass: self.mass + other.mass,
            max_density: self.max_density.max(other.max_density),
            temperature: self.temperature + other.temperature,
            kinetic_energy: self.kinetic_energy + other.kinetic_energy,
            max_velocity: self.max_velocity.max(other.max_velocity),
            divergence: self.divergence + other.divergence,
            vorticity: self.vorticity + other.vorticity,
        }
    }
}

impl FluidMetrics {
    pub fn analyze(solver: &FluidSolver) -> Self {
        let mut metrics = Self::analyze_grid(solver.grid());
        metrics.frame = solver.frame();
        metrics.obstacle_count = solver.manager().len();
        metrics
    }

    /// Rows are reduced in parallel; the grid itself is only read.
    pub fn analyze_grid(grid: &FluidGrid) -> Self {
        let n = grid.size();
        let stride = n + 2;
        let nf = n as f32;

        let sums = (1..=n)
            .into_par_iter()
            .map(|j| {
                let mut row = RowSums::default();
                for i in 1..=n {
                    let idx = grid.ix(i, j);
                    let density = grid.dens[idx];
                    let (u, v) = (grid.u[idx], grid.v[idx]);
                    let speed_sq = u * u + v * v;

                    row.mass += density;
                    row.max_density = row.max_density.max(density);
                    row.temperature += grid.temp[idx];
                    row.kinetic_energy += 0.5 * speed_sq;
                    row.max_velocity = row.max_velocity.max(speed_sq.sqrt());

                    let div = 0.5 * nf * (grid.u[idx + 1] - grid.u[idx - 1] + grid.v[idx + stride] - grid.v[idx - stride]);
                    row.divergence += div.abs();

                    let curl = 0.5 * nf * (grid.v[idx + 1] - grid.v[idx - 1] - grid.u[idx + stride] + grid.u[idx - stride]);
                    row.vorticity += curl.abs();
                }
                row
            })
            .reduce(RowSums::default, RowSums::merge);

        let cells = (n * n) as f32;
        Self {
            frame: 0,
            total_mass: sums.mass,
            max_density: sums.max_density,
            total_temperature: sums.temperature,
            total_kinetic_energy: sums.kinetic_energy,
            max_velocity: sums.max_velocity,
            velocity_divergence: sums.divergence / cells,
            vorticity: sums.vorticity / cells,
            obstacle_count: 0,
        }
    }

    pub fn print_summary(&self) {
        println!("Frame {} Metrics:", self.frame);
        println!("  Total Mass: {:.6}", self.total_mass);
        println!("  Max Density: {:.6}", self.max_density);
        println!("  Total Temperature: {:.6}", self.total_temperature);
        println!("  Kinetic Energy: {:.6}", self.total_kinetic_energy);
        println!("  Max Velocity: {:.6}", self.max_velocity);
        println!("  Velocity Divergence: {:.6}", self.velocity_divergence);
        println!("  Vorticity: {:.6}", self.vorticity);
        println!("  Obstacles: {}", self.obstacle_count);
        println!();
    }
}

/// Keeps a metrics history to report trends over a run.
#[derive(Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, solver: &FluidSolver) {
        self.metrics_history.push(FluidMetrics::analyze(solver));
    }

    pub fn print_trends(&self) {
        let (Some(first), Some(last)) = (self.metrics_history.first(), self.metrics_history.last()) else {
            return;
        };
        if self.metrics_history.len() < 2 {
            return;
        }

        println!("=== TREND ANALYSIS ===");
        println!(
            "Mass change: {:.6} -> {:.6} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            (last.total_mass - first.total_mass) / first.total_mass.max(0.001) * 100.0
        );
        println!(
            "Kinetic Energy change: {:.6} -> {:.6} ({:+.3}%)",
            first.total_kinetic_energy,
            last.total_kinetic_energy,
            (last.total_kinetic_energy - first.total_kinetic_energy)
                / first.total_kinetic_energy.max(0.001)
                * 100.0
        );
        println!(
            "Heat change: {:.6} -> {:.6}",
            first.total_temperature, last.total_temperature
        );
        println!(
            "Divergence change: {:.6} -> {:.6} over {} frames",
            first.velocity_divergence,
            last.velocity_divergence,
            last.frame - first.frame
        );
    }
}
