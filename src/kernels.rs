//! Numerical kernels of the stable-fluids method.
//!
//! All functions work on raw `(n + 2)^2` buffers indexed with [`ix`] and never
//! allocate. Interior loops run `j` outer, `i` inner so the inner loop walks
//! contiguous memory.

use crate::boundary::{BoundaryKind, set_bounds};
use crate::grid::ix;

/// `x += dt * s` over the whole buffer.
pub fn add_source(x: &mut [f32], s: &[f32], dt: f32) {
    for (x, s) in x.iter_mut().zip(s) {
        *x += dt * s;
    }
}

/// Gauss-Seidel relaxation of `c * x - a * (sum of 4 neighbours) = x0`.
///
/// Updates `x` in place, re-applying the boundary after every sweep.
pub fn lin_solve(
    n: usize,
    kind: BoundaryKind,
    x: &mut [f32],
    x0: &[f32],
    a: f32,
    c: f32,
    iterations: usize,
) {
    let stride = n + 2;
    let inv_c = 1.0 / c;
    for _ in 0..iterations {
        for j in 1..=n {
            for i in 1..=n {
                let idx = ix(i, j, n);
                x[idx] = (x0[idx]
                    + a * (x[idx - 1] + x[idx + 1] + x[idx - stride] + x[idx + stride]))
                    * inv_c;
            }
        }
        set_bounds(n, kind, x);
    }
}

/// Implicit diffusion of `x0` into `x` at `rate` over one time step.
pub fn diffuse(
    n: usize,
    kind: BoundaryKind,
    x: &mut [f32],
    x0: &[f32],
    rate: f32,
    dt: f32,
    iterations: usize,
) {
    let a = dt * rate * (n * n) as f32;
    lin_solve(n, kind, x, x0, a, 1.0 + 4.0 * a, iterations);
}

/// Semi-Lagrangian transport of `d0` along `(u, v)` into `d`.
pub fn advect(
    n: usize,
    kind: BoundaryKind,
    d: &mut [f32],
    d0: &[f32],
    u: &[f32],
    v: &[f32],
    dt: f32,
) {
    let dt0 = dt * n as f32;
    let max = n as f32 + 0.5;

    for j in 1..=n {
        for i in 1..=n {
            let idx = ix(i, j, n);
            let x = (i as f32 - dt0 * u[idx]).clamp(0.5, max);
            let y = (j as f32 - dt0 * v[idx]).clamp(0.5, max);

            let i0 = x as usize;
            let i1 = i0 + 1;
            let j0 = y as usize;
            let j1 = j0 + 1;

            let s1 = x - i0 as f32;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f32;
            let t0 = 1.0 - t1;

            d[idx] = s0 * (t0 * d0[ix(i0, j0, n)] + t1 * d0[ix(i0, j1, n)])
                + s1 * (t0 * d0[ix(i1, j0, n)] + t1 * d0[ix(i1, j1, n)]);
        }
    }

    set_bounds(n, kind, d);
}

/// Remove the divergent part of `(u, v)`.
///
/// `p` and `div` are scratch buffers; their previous contents are discarded.
pub fn project(
    n: usize,
    u: &mut [f32],
    v: &mut [f32],
    p: &mut [f32],
    div: &mut [f32],
    iterations: usize,
) {
    let stride = n + 2;
    let nf = n as f32;

    for j in 1..=n {
        for i in 1..=n {
            let idx = ix(i, j, n);
            div[idx] = -0.5 * (u[idx + 1] - u[idx - 1] + v[idx + stride] - v[idx - stride]) / nf;
            p[idx] = 0.0;
        }
    }
    set_bounds(n, BoundaryKind::Scalar, div);
    set_bounds(n, BoundaryKind::Scalar, p);

    lin_solve(n, BoundaryKind::Scalar, p, div, 1.0, 4.0, iterations);

    for j in 1..=n {
        for i in 1..=n {
            let idx = ix(i, j, n);
            u[idx] -= 0.5 * nf * (p[idx + 1] - p[idx - 1]);
            v[idx] -= 0.5 * nf * (p[idx + stride] - p[idx - stride]);
        }
    }
    set_bounds(n, BoundaryKind::VelocityX, u);
    set_bounds(n, BoundaryKind::VelocityY, v);
}

/// Add a vorticity confinement force to the sources `(fx, fy)`.
///
/// The curl of `(u, v)` is written to `curl`. The force pushes along
/// `N x w`, where `N` is the unit gradient of `|w|`, re-injecting the small
/// eddies that numerical dissipation smears out.
pub fn vorticity_confinement(
    n: usize,
    u: &[f32],
    v: &[f32],
    curl: &mut [f32],
    fx: &mut [f32],
    fy: &mut [f32],
    strength: f32,
) {
    let stride = n + 2;
    let nf = n as f32;

    curl.fill(0.0);
    for j in 1..=n {
        for i in 1..=n {
            let idx = ix(i, j, n);
            curl[idx] = 0.5 * nf * (v[idx + 1] - v[idx - 1] - u[idx + stride] + u[idx - stride]);
        }
    }

    for j in 2..n {
        for i in 2..n {
            let idx = ix(i, j, n);
            let grad_x = 0.5 * (curl[idx + 1].abs() - curl[idx - 1].abs());
            let grad_y = 0.5 * (curl[idx + stride].abs() - curl[idx - stride].abs());
            let len = (grad_x * grad_x + grad_y * grad_y).sqrt() + 1e-10;
            let w = curl[idx];

            fx[idx] += strength * (grad_y / len) * w / nf;
            fy[idx] -= strength * (grad_x / len) * w / nf;
        }
    }
}

/// Add `factor * (T - ambient)` to the vertical force source.
pub fn buoyancy(n: usize, fy: &mut [f32], temp: &[f32], factor: f32, ambient: f32) {
    for j in 1..=n {
        for i in 1..=n {
            let idx = ix(i, j, n);
            fy[idx] += factor * (temp[idx] - ambient);
        }
    }
}
