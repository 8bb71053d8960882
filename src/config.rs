//! Simulation configuration.
//!
//! Every struct here is plain data with serde derives so a whole setup can be
//! loaded from a JSON file. Missing fields fall back to [`Default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Gauss-Seidel sweeps per linear solve.
pub const DEFAULT_ITERATIONS: usize = 20;

/// Scalar parameters of the stable-fluids solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Time step, must be positive.
    pub dt: f32,
    /// Density diffusion rate.
    pub diffusion: f32,
    /// Kinematic viscosity used when diffusing velocity.
    pub viscosity: f32,
    /// Vorticity confinement strength, 0 disables it.
    pub vorticity: f32,
    /// Upward force per unit temperature above ambient.
    pub buoyancy: f32,
    pub buoyancy_enabled: bool,
    /// Reference temperature that produces no buoyant force.
    pub ambient_temperature: f32,
    /// Temperature diffusion rate.
    pub temperature_diffusion: f32,
    /// Sweeps per Gauss-Seidel solve.
    pub iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            diffusion: 0.0,
            viscosity: 0.0,
            vorticity: 0.0,
            buoyancy: 1.0,
            buoyancy_enabled: false,
            ambient_temperature: 0.0,
            temperature_diffusion: 0.0,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "dt",
                value: self.dt,
            });
        }
        non_negative("diffusion", self.diffusion)?;
        non_negative("viscosity", self.viscosity)?;
        non_negative("vorticity", self.vorticity)?;
        non_negative("temperature_diffusion", self.temperature_diffusion)?;
        if !self.buoyancy.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "buoyancy",
                value: self.buoyancy,
            });
        }
        if self.iterations == 0 {
            return Err(SimError::InvalidParameter {
                name: "iterations",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Fluid-to-body coupling strengths, one per movable obstacle kind.
///
/// The per-tick nudge toward the sensed flow is
/// `coupling * inverse_mass * dt`, capped at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingConfig {
    pub rect: f32,
    pub disk: f32,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            rect: 40.0,
            disk: 40.0,
        }
    }
}

impl CouplingConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("coupling.rect", self.rect)?;
        non_negative("coupling.disk", self.disk)
    }
}

/// Rigid-rigid contact resolution constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Resolution passes over all movable pairs per tick.
    pub iterations: usize,
    /// Fraction of the penetration removed per pass.
    pub percent: f32,
    /// Penetration tolerated without positional correction.
    pub slop: f32,
    /// Coefficient of restitution.
    pub restitution: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            percent: 0.8,
            slop: 0.01,
            restitution: 0.3,
        }
    }
}

impl CollisionConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("collision.percent", self.percent)?;
        non_negative("collision.slop", self.slop)?;
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::InvalidParameter {
                name: "collision.restitution",
                value: self.restitution,
            });
        }
        Ok(())
    }
}

/// Everything needed to stand up a simulation plus the interaction gains
/// used by the front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_size: usize,
    pub solver: SolverConfig,
    pub coupling: CouplingConfig,
    pub collision: CollisionConfig,
    /// Velocity injected per pixel of mouse drag.
    pub force: f32,
    /// Density injected per frame while painting.
    pub source: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 64,
            solver: SolverConfig::default(),
            coupling: CouplingConfig::default(),
            collision: CollisionConfig::default(),
            force: 5.0,
            source: 100.0,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(SimError::GridSize(self.grid_size));
        }
        self.solver.validate()?;
        self.coupling.validate()?;
        self.collision.validate()
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}
