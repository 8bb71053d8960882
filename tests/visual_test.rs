use fluidtoy::render::{DISK_COLOR, FIXED_COLOR, SELECTED_DISK_COLOR, obstacle_color};
use fluidtoy::{FieldView, FluidSolver, ImageExporter, Renderer, SolverConfig};
use image::{GenericImageView, Rgb};

#[test]
fn test_density_view_puts_top_row_first() {
    let mut sim = FluidSolver::with_size(16, SolverConfig::default()).unwrap();
    sim.add_density(1, 16, 1.0);
    sim.add_density(16, 1, 0.5);

    let img = Renderer::new(16, 16).render_field(sim.grid(), FieldView::Density);
    assert_eq!(img.dimensions(), (16, 16));
    assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 255]));
    assert_eq!(*img.get_pixel(15, 15), Rgb([127, 127, 127]));
    assert_eq!(*img.get_pixel(0, 15), Rgb([0, 0, 0]));
}

#[test]
fn test_obstacles_drawn_over_field() {
    let mut sim = FluidSolver::with_size(16, SolverConfig::default()).unwrap();
    let disk = sim.manager_mut().add_disk(8.0, 8.0, 2.0);
    sim.manager_mut().add_fixed_rect(2, 2, 2, 2);

    let renderer = Renderer::new(16, 16);
    let img = renderer.render_frame(sim.grid(), sim.manager(), FieldView::Velocity);
    // Cell (8, 8) lands on pixel (7, 8); cell (2, 2) on pixel (1, 14).
    assert_eq!(*img.get_pixel(7, 8), DISK_COLOR);
    assert_eq!(*img.get_pixel(1, 14), FIXED_COLOR);
    assert_eq!(*img.get_pixel(12, 3), Rgb([0, 0, 64]));

    sim.manager_mut().get_mut(disk).unwrap().set_selected(true);
    let obstacle = sim.manager().get(disk).unwrap();
    assert_eq!(obstacle_color(obstacle), SELECTED_DISK_COLOR);
}

#[test]
fn test_field_view_cycles() {
    let mut view = FieldView::default();
    assert_eq!(view, FieldView::Density);
    for _ in 0..3 {
        view = view.next();
    }
    assert_eq!(view, FieldView::Density);
    assert_eq!(FieldView::Temperature.label(), "temperature");
}

#[test]
fn test_export_png_frames() {
    let dir = std::env::temp_dir().join("fluidtoy_visual_test");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sim = FluidSolver::with_size(32, SolverConfig::default()).unwrap();
    sim.add_density(16, 16, 10.0);
    sim.manager_mut().add_disk(8.0, 8.0, 3.0);

    let exporter = ImageExporter::new(64, 64);
    exporter
        .export_frame_sequence(&mut sim, 3, &dir, "smoke")
        .unwrap();
    assert_eq!(sim.frame(), 3);

    for k in 0..3 {
        let path = dir.join(format!("smoke_frame_{:04}.png", k));
        let img = image::open(&path).unwrap();
        assert_eq!(img.dimensions(), (64, 64));
    }

    let single = dir.join("temperature.png");
    exporter
        .export_png(&sim, FieldView::Temperature, &single)
        .unwrap();
    assert!(single.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_zero_sized_renderer_draws_one_pixel() {
    let sim = FluidSolver::with_size(8, SolverConfig::default()).unwrap();
    let img = Renderer::new(0, 0).render_frame(sim.grid(), sim.manager(), FieldView::Density);
    assert_eq!(img.dimensions(), (1, 1));
}
