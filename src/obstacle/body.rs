use glam::Vec2;

/// Kinematic state shared by every movable obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Centre in continuous cell coordinates; cell `(i, j)` sits at `(i, j)`.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians, counter-clockwise.
    pub angle: f32,
    /// Radians per second.
    pub angular_velocity: f32,
    pub mass: f32,
    /// `1 / mass`, or 0 for a massless (immovable) body.
    pub inverse_mass: f32,
    pub selected: bool,
    /// Mean fluid velocity over the covered cells, refreshed every tick.
    pub sensed_flow: Option<Vec2>,
}

impl RigidBody {
    pub fn new(position: Vec2, mass: f32) -> Self {
        let inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            mass,
            inverse_mass,
            selected: false,
            sensed_flow: None,
        }
    }

    /// Explicit Euler step of position and orientation.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }

    /// Relax velocity toward the sensed flow.
    ///
    /// Lighter bodies (larger inverse mass) follow the flow faster.
    pub fn react(&mut self, coupling: f32, dt: f32) {
        if let Some(flow) = self.sensed_flow {
            let blend = (coupling * self.inverse_mass * dt).clamp(0.0, 1.0);
            self.velocity += (flow - self.velocity) * blend;
        }
    }
}
