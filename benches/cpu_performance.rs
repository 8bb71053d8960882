use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fluidtoy::kernels::{advect, diffuse, project};
use fluidtoy::{BoundaryKind, FluidGrid, FluidSolver, SolverConfig};

fn seeded_solver(size: usize) -> FluidSolver {
    let config = SolverConfig {
        diffusion: 0.0001,
        viscosity: 0.0001,
        ..Default::default()
    };
    let mut sim = FluidSolver::with_size(size, config).unwrap();
    let c = size / 2;
    sim.add_density(c, c, 100.0);
    sim.add_velocity(c, c, 5.0, 2.0);
    sim
}

fn benchmark_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for size in [64, 128, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut sim = seeded_solver(size);
            b.iter(|| {
                sim.step();
                black_box(sim.grid().total_density());
            });
        });
    }
    group.finish();
}

fn benchmark_step_with_obstacles(c: &mut Criterion) {
    c.bench_function("step_128_with_obstacles", |b| {
        let mut sim = seeded_solver(128);
        let manager = sim.manager_mut();
        manager.add_fixed_rect(20, 60, 30, 4);
        for k in 0..6 {
            let x = 20.0 + 15.0 * k as f32;
            manager.add_disk(x, 90.0, 4.0);
            manager.add_movable_rect(x, 30.0, 8.0, 6.0);
        }

        b.iter(|| {
            sim.add_density(64, 10, 50.0);
            sim.add_velocity(64, 10, 0.0, 3.0);
            sim.step();
        });
    });
}

fn benchmark_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernels");
    let n = 128;

    let mut grid = FluidGrid::new(n).unwrap();
    for j in 1..=n {
        for i in 1..=n {
            let idx = grid.ix(i, j);
            grid.u[idx] = ((i as f32) * 0.1).sin();
            grid.v[idx] = ((j as f32) * 0.1).cos();
            grid.dens_prev[idx] = (i * j % 7) as f32;
        }
    }

    group.bench_function("diffuse", |b| {
        let FluidGrid { dens, dens_prev, .. } = &mut grid;
        b.iter(|| diffuse(n, BoundaryKind::Scalar, dens, dens_prev, 0.0001, 0.1, 20));
    });

    group.bench_function("advect", |b| {
        let FluidGrid { dens, dens_prev, u, v, .. } = &mut grid;
        b.iter(|| advect(n, BoundaryKind::Scalar, dens, dens_prev, u, v, 0.1));
    });

    group.bench_function("project", |b| {
        let FluidGrid { u, v, u_prev, v_prev, .. } = &mut grid;
        b.iter(|| project(n, u, v, u_prev, v_prev, 20));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_step,
    benchmark_step_with_obstacles,
    benchmark_kernels
);
criterion_main!(benches);
