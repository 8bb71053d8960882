use std::path::Path;

use crate::error::Result;
use crate::render::{FieldView, Renderer};
use crate::solver::FluidSolver;

/// Writes simulation frames to PNG files.
pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_png(&self, solver: &FluidSolver, view: FieldView, path: &Path) -> Result<()> {
        let img = self
            .renderer
            .render_frame(solver.grid(), solver.manager(), view);
        img.save(path)?;
        Ok(())
    }

    /// Step `steps` times, saving a density frame after each tick.
    pub fn export_frame_sequence(
        &self,
        solver: &mut FluidSolver,
        steps: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;
        for i in 0..steps {
            solver.step();

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            self.export_png(solver, FieldView::Density, &output_dir.join(filename))?;
        }
        log::info!("Exported {} frames to {:?}", steps, output_dir);
        Ok(())
    }
}
