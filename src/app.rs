use eframe::egui;
use glam::Vec2;

use crate::config::SimConfig;
use crate::error::Result;
use crate::obstacle::Obstacle;
use crate::render::{FieldView, Renderer, obstacle_color};
use crate::solver::FluidSolver;

const GRID_SIZES: [usize; 5] = [32, 64, 128, 256, 512];

/// Desktop front-end: paints the fluid, forwards mouse and keyboard
/// commands to the solver and exposes its parameters as sliders.
pub struct InteractiveApp {
    solver: FluidSolver,
    config: SimConfig,
    view: FieldView,
    paused: bool,
    paint_heat: bool,
    canvas_size: f32,
    /// Obstacle currently dragged with the left button.
    dragged: Option<usize>,
    /// Last pointer position in continuous cell coordinates.
    last_pointer: Option<Vec2>,
    texture: Option<egui::TextureHandle>,
}

impl InteractiveApp {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let solver = Self::build_solver(&config, config.grid_size)?;
        Ok(Self {
            solver,
            config,
            view: FieldView::Density,
            paused: false,
            paint_heat: true,
            canvas_size: 512.0,
            dragged: None,
            last_pointer: None,
            texture: None,
        })
    }

    fn build_solver(config: &SimConfig, n: usize) -> Result<FluidSolver> {
        let mut solver = FluidSolver::with_size(n, config.solver.clone())?;
        solver.manager_mut().set_coupling(config.coupling.clone())?;
        solver
            .manager_mut()
            .set_collision_config(config.collision.clone())?;
        Self::seed_scene(&mut solver);
        Ok(solver)
    }

    /// One movable block in the middle of the domain.
    fn seed_scene(solver: &mut FluidSolver) {
        let half = solver.size() as f32 / 2.0;
        solver.manager_mut().add_movable_rect(half - 5.0, half - 5.0, 10.0, 10.0);
    }

    fn change_grid_size(&mut self, n: usize) {
        if n == self.solver.size() {
            return;
        }
        match self.solver.resize(n) {
            Ok(()) => {
                Self::seed_scene(&mut self.solver);
                self.config.grid_size = n;
                self.dragged = None;
                self.last_pointer = None;
            }
            Err(e) => log::warn!("Cannot resize to {}: {}", n, e),
        }
    }

    fn cell_size(&self) -> f32 {
        self.canvas_size / self.solver.size() as f32
    }

    fn to_cell(&self, rect: egui::Rect, pos: egui::Pos2) -> Vec2 {
        let n = self.solver.size() as f32;
        let cell = self.cell_size();
        Vec2::new(
            (pos.x - rect.left()) / cell + 0.5,
            n + 0.5 - (pos.y - rect.top()) / cell,
        )
    }

    fn to_screen(&self, rect: egui::Rect, p: Vec2) -> egui::Pos2 {
        let n = self.solver.size() as f32;
        let cell = self.cell_size();
        egui::pos2(
            rect.left() + (p.x - 0.5) * cell,
            rect.top() + (n + 0.5 - p.y) * cell,
        )
    }

    fn handle_keys(&mut self, ctx: &egui::Context, cursor: Option<Vec2>) {
        let pressed = |key| ctx.input(|i| i.key_pressed(key));

        if pressed(egui::Key::Space) {
            self.paused = !self.paused;
        }
        if pressed(egui::Key::V) {
            self.view = self.view.next();
        }
        if pressed(egui::Key::C) {
            self.solver.reset();
            self.solver.manager_mut().clear();
            self.dragged = None;
        }
        if pressed(egui::Key::Q) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let Some(cursor) = cursor else {
            return;
        };
        let (i, j) = (cursor.x.round() as i32, cursor.y.round() as i32);
        let manager = self.solver.manager_mut();
        if pressed(egui::Key::Num1) {
            manager.add_fixed_rect(i - 2, j - 2, 5, 5);
        }
        if pressed(egui::Key::Num2) {
            manager.add_movable_rect(cursor.x - 4.0, cursor.y - 4.0, 8.0, 8.0);
        }
        if pressed(egui::Key::Num3) {
            manager.add_disk(cursor.x, cursor.y, 4.0);
        }
    }

    fn handle_pointer(&mut self, rect: egui::Rect, response: &egui::Response) {
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            if let Some(index) = self.dragged.take() {
                if let Some(obstacle) = self.solver.manager_mut().get_mut(index) {
                    obstacle.set_velocity(0.0, 0.0);
                    obstacle.set_selected(false);
                }
            }
            self.last_pointer = None;
            return;
        }

        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let cell = self.to_cell(rect, pos);
        let dt = self.solver.config().dt;

        if response.drag_started_by(egui::PointerButton::Primary) {
            self.dragged = self.solver.manager().find_movable_at(cell.x, cell.y);
            if let Some(index) = self.dragged {
                if let Some(obstacle) = self.solver.manager_mut().get_mut(index) {
                    obstacle.set_selected(true);
                }
            }
            self.last_pointer = Some(cell);
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = self.last_pointer.map_or(Vec2::ZERO, |last| cell - last);
            match self.dragged {
                Some(index) => {
                    if let Some(obstacle) = self.solver.manager_mut().get_mut(index) {
                        obstacle.update_position(cell);
                        let velocity = delta / dt;
                        obstacle.set_velocity(velocity.x, velocity.y);
                    }
                }
                None => {
                    let force = delta * self.config.force;
                    let (i, j) = (cell.x.round() as usize, cell.y.round() as usize);
                    self.solver.add_velocity(i, j, force.x, force.y);
                }
            }
            self.last_pointer = Some(cell);
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.secondary_clicked()
        {
            let (i, j) = (cell.x.round() as usize, cell.y.round() as usize);
            self.solver.add_density(i, j, self.config.source);
            if self.paint_heat {
                self.solver.add_temperature(i, j, self.config.source * 0.1);
            }
        }
    }

    fn parameter_panel(&mut self, ui: &mut egui::Ui) {
        let mut solver_config = self.solver.config().clone();

        ui.horizontal(|ui| {
            if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                self.paused = !self.paused;
            }
            if ui.button(format!("View: {}", self.view.label())).clicked() {
                self.view = self.view.next();
            }
            ui.checkbox(&mut solver_config.buoyancy_enabled, "Buoyancy");
            ui.checkbox(&mut self.paint_heat, "Paint heat");
        });

        ui.horizontal(|ui| {
            ui.add(egui::Slider::new(&mut solver_config.dt, 0.01..=0.5).text("dt"));
            ui.add(
                egui::Slider::new(&mut solver_config.diffusion, 0.0..=0.001)
                    .text("Diffusion"),
            );
            ui.add(
                egui::Slider::new(&mut solver_config.viscosity, 0.0..=0.001)
                    .text("Viscosity"),
            );
        });

        ui.horizontal(|ui| {
            ui.add(egui::Slider::new(&mut solver_config.vorticity, 0.0..=20.0).text("Vorticity"));
            ui.add(egui::Slider::new(&mut solver_config.buoyancy, -5.0..=5.0).text("Buoyancy"));
            ui.add(
                egui::Slider::new(&mut solver_config.temperature_diffusion, 0.0..=0.001)
                    .text("Heat diffusion"),
            );
        });

        ui.horizontal(|ui| {
            ui.add(egui::Slider::new(&mut self.config.force, 0.0..=50.0).text("Force"));
            ui.add(egui::Slider::new(&mut self.config.source, 0.0..=500.0).text("Source"));
            ui.add(egui::Slider::new(&mut self.canvas_size, 256.0..=1024.0).text("Canvas"));
        });

        if solver_config != *self.solver.config() {
            match self.solver.set_config(solver_config.clone()) {
                Ok(()) => self.config.solver = solver_config,
                Err(e) => log::warn!("Rejected solver parameters: {}", e),
            }
        }

        ui.horizontal(|ui| {
            ui.label("Grid:");
            for &n in &GRID_SIZES {
                let is_current = self.solver.size() == n;
                if ui.selectable_label(is_current, format!("{}", n)).clicked() {
                    self.change_grid_size(n);
                }
            }
        });
    }

    fn paint(&mut self, ctx: &egui::Context, ui: &egui::Ui, rect: egui::Rect) {
        let n = self.solver.size();
        let frame = Renderer::new(n as u32, n as u32).render_field(self.solver.grid(), self.view);
        let image = egui::ColorImage::from_rgb([n, n], frame.as_raw());

        if let Some(texture) = &mut self.texture {
            texture.set(image, egui::TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("fluid", image, egui::TextureOptions::LINEAR));
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let painter = ui.painter_at(rect);
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let cell = self.cell_size();
        for obstacle in self.solver.manager().iter() {
            let [r, g, b] = obstacle_color(obstacle).0;
            let color = egui::Color32::from_rgb(r, g, b);
            match obstacle {
                Obstacle::Fixed(mask) => {
                    let Some((i_min, i_max, j_min, j_max)) = mask.bounds() else {
                        continue;
                    };
                    for j in j_min..=j_max {
                        for i in i_min..=i_max {
                            if mask.is_solid(i, j) {
                                let min = self.to_screen(rect, Vec2::new(i as f32 - 0.5, j as f32 + 0.5));
                                painter.rect_filled(
                                    egui::Rect::from_min_size(min, egui::vec2(cell, cell)),
                                    0.0,
                                    color,
                                );
                            }
                        }
                    }
                }
                Obstacle::Rect(block) => {
                    let points = block
                        .vertices()
                        .iter()
                        .map(|&v| self.to_screen(rect, v))
                        .collect();
                    painter.add(egui::Shape::convex_polygon(points, color, egui::Stroke::NONE));
                }
                Obstacle::Disk(disk) => {
                    painter.circle_filled(self.to_screen(rect, disk.center()), disk.radius() * cell, color);
                }
            }
        }
    }
}

impl eframe::App for InteractiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("fluidtoy - Stable Fluids with Obstacles");
            self.parameter_panel(ui);
            ui.separator();

            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(self.canvas_size, self.canvas_size),
                egui::Sense::click_and_drag(),
            );
            let cursor = response.hover_pos().map(|pos| self.to_cell(rect, pos));

            self.handle_keys(ctx, cursor);
            self.handle_pointer(rect, &response);

            if !self.paused {
                self.solver.step();
            }

            self.paint(ctx, ui, rect);

            ui.label(format!(
                "Frame: {} | Grid: {}x{} | Obstacles: {} | View: {} | LMB drag: push fluid / move obstacle | RMB: smoke | 1/2/3: block/movable/disk | v: view | c: clear | q: quit",
                self.solver.frame(),
                self.solver.size(),
                self.solver.size(),
                self.solver.manager().len(),
                self.view.label()
            ));
            if let Some(cell) = cursor {
                let (i, j) = (cell.x.round() as usize, cell.y.round() as usize);
                let grid = self.solver.grid();
                if grid.in_interior(i, j) {
                    let velocity = grid.velocity_at(i, j);
                    ui.label(format!(
                        "Cell ({}, {}): density {:.3} | temperature {:.3} | velocity ({:.3}, {:.3})",
                        i,
                        j,
                        grid.density_at(i, j),
                        grid.temperature_at(i, j),
                        velocity.x,
                        velocity.y
                    ));
                }
            }
        });

        ctx.request_repaint();
    }
}
