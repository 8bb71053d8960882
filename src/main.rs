use std::path::{Path, PathBuf};

use fluidtoy::{AnalysisRecorder, FieldView, FluidMetrics, FluidSolver, ImageExporter, SimConfig};
use rand::{Rng, SeedableRng, rngs::StdRng};

const USAGE: &str = "usage: fluidtoy [N dt diff visc force source]
       fluidtoy --config <file.json>
       fluidtoy headless [frames] [out_dir] [--config <file.json>]
       fluidtoy print-config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = take_config_flag(&mut args)?;

    match args.first().map(String::as_str) {
        Some("headless") => {
            let frames = match args.get(1) {
                Some(value) => value.parse()?,
                None => 60,
            };
            let out_dir = PathBuf::from(args.get(2).map_or("frames", String::as_str));
            run_headless(config.unwrap_or_default(), frames, &out_dir)?;
        }
        Some("print-config") => {
            println!("{}", config.unwrap_or_default().to_json()?);
        }
        Some("-h") | Some("--help") => println!("{}", USAGE),
        _ => {
            let config = match (config, args.len()) {
                (Some(config), 0) => config,
                (None, 0) => SimConfig::default(),
                (None, 6) => config_from_positional(&args)?,
                _ => {
                    eprintln!("{}", USAGE);
                    std::process::exit(1);
                }
            };
            config.validate()?;
            println!(
                "Using: N={} dt={} diff={} visc={} force={} source={}",
                config.grid_size,
                config.solver.dt,
                config.solver.diffusion,
                config.solver.viscosity,
                config.force,
                config.source
            );
            run_gui_app(config)?;
        }
    }

    Ok(())
}

/// Strip `--config <path>` from the argument list and load it.
fn take_config_flag(args: &mut Vec<String>) -> Result<Option<SimConfig>, Box<dyn std::error::Error>> {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    let path = args.get(pos + 1).ok_or("--config needs a file path")?.clone();
    args.drain(pos..pos + 2);
    Ok(Some(SimConfig::from_json_file(Path::new(&path))?))
}

fn config_from_positional(args: &[String]) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let mut config = SimConfig::default();
    config.grid_size = args[0].parse()?;
    config.solver.dt = args[1].parse()?;
    config.solver.diffusion = args[2].parse()?;
    config.solver.viscosity = args[3].parse()?;
    config.force = args[4].parse()?;
    config.source = args[5].parse()?;
    Ok(config)
}

fn run_gui_app(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = fluidtoy::InteractiveApp::new(config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 820.0])
            .with_title("fluidtoy - Stable Fluids Demo"),
        ..Default::default()
    };

    println!(
        "\nControls:\n\
         \x20 Left-drag          : add velocity (if not on an obstacle)\n\
         \x20 Left-drag obstacle : move it\n\
         \x20 Right-drag         : add smoke and heat\n\
         \x20 1 / 2 / 3          : fixed block / movable block / disk\n\
         \x20 v                  : cycle density / velocity / temperature\n\
         \x20 space              : pause\n\
         \x20 c                  : clear fields and obstacles\n\
         \x20 q                  : quit\n"
    );

    eframe::run_native("fluidtoy", options, Box::new(|_cc| Box::new(app)))?;
    Ok(())
}

/// Scripted scene: a heated smoke plume rising past scattered obstacles.
fn run_headless(config: SimConfig, frames: usize, out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Running headless simulation: {} frames into {:?}", frames, out_dir);
    std::fs::create_dir_all(out_dir)?;

    let n = config.grid_size;
    let mut solver = FluidSolver::with_size(n, config.solver.clone())?;
    solver.manager_mut().set_coupling(config.coupling.clone())?;
    solver.manager_mut().set_collision_config(config.collision.clone())?;

    let nf = n as f32;
    let manager = solver.manager_mut();
    manager.add_fixed_rect((n / 4) as i32, (n / 2) as i32, (n / 8) as i32, 2);
    let mut rng = StdRng::seed_from_u64(42);
    for k in 0..4 {
        let x = rng.gen_range(0.2 * nf..0.8 * nf);
        let y = rng.gen_range(0.4 * nf..0.9 * nf);
        if k % 2 == 0 {
            manager.add_disk(x, y, rng.gen_range(1.5..(nf / 12.0).max(2.0)));
        } else {
            manager.add_movable_rect(x, y, nf / 10.0, nf / 16.0);
        }
    }

    let exporter = ImageExporter::new(512, 512);
    let mut recorder = AnalysisRecorder::new();
    recorder.record_frame(&solver);

    let plume_x = n / 2;
    for frame in 1..=frames {
        for di in 0..3 {
            let i = plume_x + di - 1;
            solver.add_density(i, 2, config.source * 0.05);
            solver.add_temperature(i, 2, config.source * 0.01);
            solver.add_velocity(i, 2, 0.0, config.force * 0.01);
        }
        solver.step();
        recorder.record_frame(&solver);

        let path = out_dir.join(format!("frame_{:04}.png", frame));
        exporter.export_png(&solver, FieldView::Density, &path)?;

        if frame % 10 == 0 {
            FluidMetrics::analyze(&solver).print_summary();
        }
    }

    exporter.export_png(&solver, FieldView::Velocity, &out_dir.join("final_velocity.png"))?;
    exporter.export_png(&solver, FieldView::Temperature, &out_dir.join("final_temperature.png"))?;

    recorder.print_trends();
    println!("Done: wrote {} frames.", frames);
    Ok(())
}
