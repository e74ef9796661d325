//! Perspective camera and damped orbit controls.
//!
//! These types avoid platform-specific APIs; the web frontend feeds pointer
//! deltas into [`OrbitControls`] and the frame loop calls
//! [`CameraControls::update`] once per tick.

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Right-handed camera with a cached perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    aspect: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::from_array(CAMERA_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            aspect,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Set the aspect ratio and recompute the projection in one step.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-4), self.znear, self.zfar);
    }

    /// Clip-space projection matrix, as of the last
    /// [`update_projection_matrix`](Self::update_projection_matrix).
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Per-frame camera update capability.
pub trait CameraControls {
    /// Returns `true` if the camera moved.
    fn update(&mut self, camera: &mut Camera) -> bool;
}

/// Orbit around the camera target with damped rotation.
///
/// Pointer input accumulates a spherical delta; each `update` applies a
/// `damping` fraction of it and decays the rest, so motion eases out over
/// several frames after the pointer stops.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub damping: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer drag of `(dx, dy)` CSS pixels over a surface `height` pixels
    /// tall. A drag across the full height is one full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Wheel input; positive `delta_y` moves away from the target.
    pub fn zoom(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.scale /= ORBIT_ZOOM_STEP;
        } else if delta_y < 0.0 {
            self.scale *= ORBIT_ZOOM_STEP;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.delta_theta.abs() < 1e-6 && self.delta_phi.abs() < 1e-6 && self.scale == 1.0
    }
}

impl CameraControls for OrbitControls {
    fn update(&mut self, camera: &mut Camera) -> bool {
        if self.is_settled() {
            return false;
        }
        let offset = camera.eye - camera.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.delta_theta * self.damping;
        phi += self.delta_phi * self.damping;
        phi = phi.clamp(1e-4, PI - 1e-4);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        camera.eye = camera.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        self.delta_theta *= 1.0 - self.damping;
        self.delta_phi *= 1.0 - self.damping;
        self.scale = 1.0;
        true
    }
}
