use fluidtoy::{
    CouplingConfig, FluidGrid, FluidSolver, ObstacleManager, SimConfig, SimError, SolverConfig,
};

#[test]
fn test_grid_allocation() {
    let grid = FluidGrid::new(8).unwrap();
    assert_eq!(grid.size(), 8);
    assert_eq!(grid.len(), 100);
    assert_eq!(grid.dens.len(), 100);
    assert_eq!(grid.u_prev.len(), 100);
    assert!(grid.dens.iter().all(|&d| d == 0.0));
}

#[test]
fn test_grid_size_rejected() {
    assert!(matches!(FluidGrid::new(7), Err(SimError::GridSize(7))));
    assert!(matches!(FluidGrid::new(1025), Err(SimError::GridSize(1025))));
    assert!(FluidGrid::new(1024).is_ok());
    assert!(ObstacleManager::new(0).is_err());
    assert!(FluidSolver::with_size(4, SolverConfig::default()).is_err());
}

#[test]
fn test_solver_rejects_mismatched_manager() {
    let grid = FluidGrid::new(16).unwrap();
    let manager = ObstacleManager::new(32).unwrap();
    let result = FluidSolver::new(grid, manager, SolverConfig::default());
    assert!(matches!(
        result,
        Err(SimError::GridMismatch { grid: 16, manager: 32 })
    ));
}

#[test]
fn test_solver_rejects_bad_parameters() {
    let config = SolverConfig {
        dt: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        FluidSolver::with_size(32, config),
        Err(SimError::InvalidParameter { name: "dt", .. })
    ));

    let mut solver = FluidSolver::with_size(32, SolverConfig::default()).unwrap();
    let bad = SolverConfig {
        viscosity: -1.0,
        ..Default::default()
    };
    assert!(solver.set_config(bad).is_err());
    assert_eq!(solver.config().viscosity, 0.0);
}

#[test]
fn test_injection_outside_interior_is_ignored() {
    let mut solver = FluidSolver::with_size(16, SolverConfig::default()).unwrap();
    solver.add_density(0, 5, 10.0);
    solver.add_density(17, 5, 10.0);
    solver.add_velocity(5, 0, 1.0, 1.0);
    solver.add_temperature(5, 17, 1.0);
    assert_eq!(solver.grid().dens.iter().sum::<f32>(), 0.0);
    assert_eq!(solver.grid().u.iter().sum::<f32>(), 0.0);
    assert_eq!(solver.grid().temp.iter().sum::<f32>(), 0.0);

    solver.add_density(16, 16, 10.0);
    assert_eq!(solver.grid().density_at(16, 16), 10.0);
}

#[test]
fn test_frame_counter_and_reset() {
    let mut solver = FluidSolver::with_size(16, SolverConfig::default()).unwrap();
    solver.add_density(8, 8, 5.0);
    for _ in 0..3 {
        solver.step();
    }
    assert_eq!(solver.frame(), 3);

    solver.manager_mut().add_disk(4.0, 4.0, 1.0);
    solver.reset();
    assert_eq!(solver.grid().total_density(), 0.0);
    assert_eq!(solver.manager().len(), 1, "reset keeps obstacles");
}

#[test]
fn test_resize_drops_state() {
    let mut solver = FluidSolver::with_size(64, SolverConfig::default()).unwrap();
    solver.manager_mut().add_disk(10.0, 10.0, 3.0);
    solver.manager_mut().add_fixed_rect(20, 20, 4, 4);
    solver.add_density(32, 32, 50.0);
    solver.step();

    solver.resize(32).unwrap();
    assert_eq!(solver.size(), 32);
    assert_eq!(solver.grid().len(), 34 * 34);
    assert!(solver.manager().is_empty());
    assert_eq!(solver.manager().grid_size(), 32);
    assert_eq!(solver.frame(), 0);
    assert_eq!(solver.grid().total_density(), 0.0);

    // Invalid sizes leave the solver untouched.
    solver.manager_mut().add_disk(5.0, 5.0, 1.0);
    assert!(solver.resize(2000).is_err());
    assert_eq!(solver.size(), 32);
    assert_eq!(solver.manager().len(), 1);
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config =
        SimConfig::from_json_str(r#"{ "grid_size": 128, "solver": { "dt": 0.05, "vorticity": 2.0 } }"#)
            .unwrap();
    assert_eq!(config.grid_size, 128);
    assert_eq!(config.solver.dt, 0.05);
    assert_eq!(config.solver.vorticity, 2.0);
    assert_eq!(config.solver.iterations, 20);
    assert_eq!(config.collision.percent, 0.8);
    assert_eq!(config.collision.restitution, 0.3);
    assert_eq!(config.coupling, CouplingConfig::default());
}

#[test]
fn test_config_json_survives_serialization() {
    let mut config = SimConfig::default();
    config.grid_size = 96;
    config.solver.buoyancy_enabled = true;
    config.coupling.disk = 10.0;

    let text = config.to_json().unwrap();
    let parsed = SimConfig::from_json_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_validation_errors() {
    assert!(matches!(
        SimConfig::from_json_str(r#"{ "grid_size": 4 }"#),
        Err(SimError::GridSize(4))
    ));
    assert!(matches!(
        SimConfig::from_json_str(r#"{ "collision": { "restitution": 1.5 } }"#),
        Err(SimError::InvalidParameter { name: "collision.restitution", .. })
    ));
    assert!(matches!(
        SimConfig::from_json_str("{ not json"),
        Err(SimError::Config(_))
    ));
    assert!(SimConfig::default().validate().is_ok());
}

#[test]
fn test_config_from_missing_file() {
    let path = std::env::temp_dir().join("fluidtoy_missing_config_file.json");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(SimConfig::from_json_file(&path), Err(SimError::Io(_))));
}
