//! Narrow-phase tests and contact resolution between movable obstacles.
//!
//! Every test returns the minimum translation vector (MTV) pointing from the
//! first shape toward the second; its length is the penetration depth.

use glam::Vec2;

use crate::config::CollisionConfig;
use crate::obstacle::{Disk, MovableRect, RigidBody};

/// Separating-axis test between two oriented rectangles.
pub fn rect_rect(a: &MovableRect, b: &MovableRect) -> Option<Vec2> {
    let verts_a = a.vertices();
    let verts_b = b.vertices();

    let mut min_overlap = f32::MAX;
    let mut best_axis = Vec2::X;

    for verts in [&verts_a, &verts_b] {
        for k in 0..4 {
            let axis = (verts[(k + 1) % 4] - verts[k]).perp().normalize_or_zero();
            if axis == Vec2::ZERO {
                continue;
            }
            let (min_a, max_a) = project_onto(&verts_a, axis);
            let (min_b, max_b) = project_onto(&verts_b, axis);
            if max_a < min_b || max_b < min_a {
                return None;
            }
            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap < min_overlap {
                min_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    if (b.center() - a.center()).dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }
    Some(best_axis * min_overlap)
}

/// Circle-circle overlap. Coincident centres separate along +x.
pub fn disk_disk(a: &Disk, b: &Disk) -> Option<Vec2> {
    let delta = b.center() - a.center();
    let dist_sq = delta.length_squared();
    let radius_sum = a.radius() + b.radius();
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    let depth = radius_sum - dist;
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::X };
    Some(normal * depth)
}

/// Rectangle-disk overlap, MTV pointing from the rectangle to the disk.
///
/// When the disk centre lies inside the rectangle the disk is pushed out
/// through the nearest face, so the depth is the radius plus the distance
/// to that face rather than the radius alone. If the centre sits exactly on
/// the boundary the rectangle-centre to disk-centre direction is used.
pub fn rect_disk(rect: &MovableRect, disk: &Disk) -> Option<Vec2> {
    let center = disk.center();
    let radius = disk.radius();
    let closest = closest_point_on_boundary(rect, center);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if rect.contains(center.x, center.y) {
        // Centre is inside: push it out through the nearest face.
        let dist = dist_sq.sqrt();
        let normal = (closest - center)
            .try_normalize()
            .or_else(|| (center - rect.center()).try_normalize())
            .unwrap_or(Vec2::X);
        return Some(normal * (radius + dist));
    }

    if dist_sq >= radius * radius {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON {
        offset / dist
    } else {
        (center - rect.center()).try_normalize().unwrap_or(Vec2::X)
    };
    Some(normal * (radius - dist))
}

/// Separate two overlapping bodies and exchange impulse along the MTV.
///
/// `mtv` must point from `a` toward `b`.
pub fn resolve(a: &mut RigidBody, b: &mut RigidBody, mtv: Vec2, config: &CollisionConfig) {
    let total_inverse_mass = a.inverse_mass + b.inverse_mass;
    if total_inverse_mass <= 0.0 {
        return;
    }

    let depth = mtv.length();
    let normal = mtv.normalize_or_zero();
    if normal == Vec2::ZERO {
        return;
    }

    let correction =
        normal * ((depth - config.slop).max(0.0) / total_inverse_mass) * config.percent;
    a.position -= correction * a.inverse_mass;
    b.position += correction * b.inverse_mass;

    let velocity_along_normal = (b.velocity - a.velocity).dot(normal);
    if velocity_along_normal > 0.0 {
        return;
    }

    let j = -(1.0 + config.restitution) * velocity_along_normal / total_inverse_mass;
    let impulse = normal * j;
    a.velocity -= impulse * a.inverse_mass;
    b.velocity += impulse * b.inverse_mass;
}

fn project_onto(verts: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    verts.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
        let p = v.dot(axis);
        (lo.min(p), hi.max(p))
    })
}

fn closest_point_on_boundary(rect: &MovableRect, point: Vec2) -> Vec2 {
    let verts = rect.vertices();
    let mut closest = point;
    let mut best = f32::MAX;
    for k in 0..4 {
        let p1 = verts[k];
        let edge = verts[(k + 1) % 4] - p1;
        let len_sq = edge.length_squared();
        let t = if len_sq > 0.0 {
            ((point - p1).dot(edge) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let candidate = p1 + edge * t;
        let dist_sq = (point - candidate).length_squared();
        if dist_sq < best {
            best = dist_sq;
            closest = candidate;
        }
    }
    closest
}
