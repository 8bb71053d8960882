//! Error types for fluidtoy.

use thiserror::Error;

use crate::grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Errors reported when building or reconfiguring a simulation.
///
/// A running tick never fails; everything here is raised at construction,
/// configuration or export time.
#[derive(Debug, Error)]
pub enum SimError {
    /// Grid size outside the supported range.
    #[error("grid size N must be between {min} and {max}, got {0}", min = MIN_GRID_SIZE, max = MAX_GRID_SIZE)]
    GridSize(usize),

    /// A solver or obstacle parameter is out of range.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Parameter name as it appears in the configuration.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// Grid and obstacle manager were built for different sizes.
    #[error("grid is {grid}x{grid} but obstacle manager expects {manager}x{manager}")]
    GridMismatch {
        /// Interior size of the grid.
        grid: usize,
        /// Interior size the manager was created for.
        manager: usize,
    },

    /// Filesystem failure while loading configuration or writing frames.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Frame encoding failure.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SimError>;
