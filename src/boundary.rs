use crate::grid::ix;

/// How a field behaves at the domain walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Zero-gradient scalar (density, temperature, pressure).
    Scalar,
    /// Horizontal velocity: negated on the left and right walls.
    VelocityX,
    /// Vertical velocity: negated on the bottom and top walls.
    VelocityY,
}

impl BoundaryKind {
    /// Classic numeric tag: 0 scalar, 1 x-velocity, 2 y-velocity.
    pub fn tag(self) -> u8 {
        match self {
            BoundaryKind::Scalar => 0,
            BoundaryKind::VelocityX => 1,
            BoundaryKind::VelocityY => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(BoundaryKind::Scalar),
            1 => Some(BoundaryKind::VelocityX),
            2 => Some(BoundaryKind::VelocityY),
            _ => None,
        }
    }
}

/// Fill the ghost ring of `x` from its interior edge.
///
/// Normal velocity components are mirrored with opposite sign so the wall is
/// impermeable; everything else is copied. Corners average their two
/// neighbouring ghosts.
pub fn set_bounds(n: usize, kind: BoundaryKind, x: &mut [f32]) {
    let flip_x = if kind == BoundaryKind::VelocityX { -1.0 } else { 1.0 };
    let flip_y = if kind == BoundaryKind::VelocityY { -1.0 } else { 1.0 };

    for k in 1..=n {
        x[ix(0, k, n)] = flip_x * x[ix(1, k, n)];
        x[ix(n + 1, k, n)] = flip_x * x[ix(n, k, n)];
        x[ix(k, 0, n)] = flip_y * x[ix(k, 1, n)];
        x[ix(k, n + 1, n)] = flip_y * x[ix(k, n, n)];
    }

    x[ix(0, 0, n)] = 0.5 * (x[ix(1, 0, n)] + x[ix(0, 1, n)]);
    x[ix(0, n + 1, n)] = 0.5 * (x[ix(1, n + 1, n)] + x[ix(0, n, n)]);
    x[ix(n + 1, 0, n)] = 0.5 * (x[ix(n, 0, n)] + x[ix(n + 1, 1, n)]);
    x[ix(n + 1, n + 1, n)] = 0.5 * (x[ix(n, n + 1, n)] + x[ix(n + 1, n, n)]);
}
