use std::f32::consts::PI;

use glam::Vec2;

use super::RigidBody;

#[derive(Debug, Clone)]
pub struct Disk {
    pub body: RigidBody,
    radius: f32,
}

impl Disk {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            body: RigidBody::new(Vec2::new(x, y), PI * radius * radius),
            radius,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.body.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (Vec2::new(x, y) - self.body.position).length_squared() <= self.radius * self.radius
    }
}
