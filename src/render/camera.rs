use std::f32::consts::PI;

use crate::math::{Mat4, Vec3};

pub const MIN_DISTANCE: f32 = 10.0;
pub const MAX_DISTANCE: f32 = 40.0;
pub const MIN_POLAR: f32 = PI / 4.0;
pub const MAX_POLAR: f32 = PI / 1.8;

/// Radians per second at auto-rotate speed 0.5 (one turn per 120 s)
const AUTO_ROTATE_RATE: f32 = 2.0 * PI / 60.0 * 0.5;

const NEAR: f32 = 0.1;
const FAR: f32 = 200.0;

/// Orbit camera around a fixed target, no panning
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub fov: f32,
    distance: f32,
    /// Angle from +Y
    polar: f32,
    /// Angle around Y, 0 looks down -Z from +Z
    azimuth: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(Vec3::new(0.0, 2.0, 22.0), Vec3::ZERO, 45f32.to_radians())
    }
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, target: Vec3, fov: f32) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let polar = (offset.y / offset.length().max(f32::EPSILON)).clamp(-1.0, 1.0).acos();

        Self {
            target,
            fov,
            distance,
            polar: polar.clamp(MIN_POLAR, MAX_POLAR),
            azimuth: offset.x.atan2(offset.z),
        }
    }

    /// Drag in screen pixels
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.azimuth -= delta_x * 0.01;
        self.polar = (self.polar - delta_y * 0.01).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Wheel delta, positive moves away
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * 0.5).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn update(&mut self, dt: f32, auto_rotate: bool) {
        if auto_rotate {
            self.azimuth -= AUTO_ROTATE_RATE * dt;
        }
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target + Vec3::new(
            self.distance * sin_polar * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * sin_polar * self.azimuth.cos(),
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position(), self.target, Vec3::UP)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov, aspect, NEAR, FAR)
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }
}
