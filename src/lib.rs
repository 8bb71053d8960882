//! Real-time 2D stable fluids with immersed rigid obstacles.
//!
//! The engine is [`FluidSolver`]: it owns a padded [`FluidGrid`] and an
//! [`ObstacleManager`], and advances both by one fixed sequence of kernels per
//! [`FluidSolver::step`]. Rendering, PNG export and the desktop front-end are
//! thin layers on top of the public API.

pub mod analysis;
pub mod app;
pub mod boundary;
pub mod collision;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod kernels;
pub mod manager;
pub mod obstacle;
pub mod render;
pub mod solver;

pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use app::InteractiveApp;
pub use boundary::{BoundaryKind, set_bounds};
pub use config::{CollisionConfig, CouplingConfig, SimConfig, SolverConfig};
pub use error::{Result, SimError};
pub use export::ImageExporter;
pub use grid::{FluidGrid, ix};
pub use manager::ObstacleManager;
pub use obstacle::{Disk, FixedMask, MovableRect, Obstacle, RigidBody, SolidBoundary};
pub use render::{FieldView, Renderer};
pub use solver::FluidSolver;
