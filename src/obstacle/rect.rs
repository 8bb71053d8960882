use glam::Vec2;

use super::RigidBody;

/// Oriented rectangle that can be pushed around by the fluid.
#[derive(Debug, Clone)]
pub struct MovableRect {
    pub body: RigidBody,
    half_extents: Vec2,
}

impl MovableRect {
    /// Rectangle whose unrotated lower-left corner is `(x, y)`.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        let half_extents = Vec2::new(w, h) * 0.5;
        Self {
            body: RigidBody::new(Vec2::new(x, y) + half_extents, w * h),
            half_extents,
        }
    }

    /// Rectangle centred at `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            body: RigidBody::new(center, w * h),
            half_extents: Vec2::new(w, h) * 0.5,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.body.position
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Express a world point in the rectangle's body frame.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        Vec2::from_angle(-self.body.angle).rotate(point - self.body.position)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        let local = self.to_local(Vec2::new(x, y));
        local.x.abs() <= self.half_extents.x && local.y.abs() <= self.half_extents.y
    }

    /// World-space corners in counter-clockwise order.
    pub fn vertices(&self) -> [Vec2; 4] {
        let rot = Vec2::from_angle(self.body.angle);
        let h = self.half_extents;
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
        .map(|corner| self.body.position + rot.rotate(corner))
    }

    /// Radius of the circle enclosing every orientation of the rectangle.
    pub fn bounding_radius(&self) -> f32 {
        self.half_extents.length()
    }
}
