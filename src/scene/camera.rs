use super::constants::*;
use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: CAMERA_START,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl PerspectiveCamera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Camera-space right and up axes in world space.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let fwd = (self.target - self.eye).normalize_or_zero();
        let right = fwd.cross(self.up).normalize_or_zero();
        let up = right.cross(fwd);
        (right, up)
    }
}

/// Orbit/pan/dolly rig around `target` with exponential damping.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enabled: bool,
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Rotate from a pointer drag of `dx, dy` pixels in a viewport `viewport_h` tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_h: f32) {
        if !self.enabled || viewport_h <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * dx / viewport_h * self.rotate_speed;
        self.delta_phi -= TAU * dy / viewport_h * self.rotate_speed;
    }

    /// Screen-space pan from a pointer drag of `dx, dy` pixels.
    pub fn pan(&mut self, camera: &PerspectiveCamera, dx: f32, dy: f32, viewport_h: f32) {
        if !self.enabled || viewport_h <= 0.0 {
            return;
        }
        let distance = (camera.eye - camera.target).length() * (camera.fovy_radians * 0.5).tan();
        let (right, up) = camera.basis();
        let dx = dx * self.pan_speed;
        let dy = dy * self.pan_speed;
        self.pan_offset += right * (-2.0 * dx * distance / viewport_h);
        self.pan_offset += up * (2.0 * dy * distance / viewport_h);
    }

    /// Dolly by wheel notches; positive `steps` moves towards the target.
    pub fn dolly(&mut self, steps: f32) {
        if !self.enabled || steps == 0.0 {
            return;
        }
        let zoom_scale = ORBIT_ZOOM_BASE.powf(self.zoom_speed);
        self.scale *= zoom_scale.powf(steps);
    }

    /// Scale the orbit radius directly, e.g. from a pinch ratio.
    pub fn dolly_by(&mut self, factor: f32) {
        if !self.enabled || factor <= 0.0 || !factor.is_finite() {
            return;
        }
        self.scale *= factor;
    }

    /// Apply accumulated input to the camera and decay the remaining motion.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.eye - camera.target;
        let mut radius = offset.length().max(1e-6);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.delta_theta * self.damping;
        phi += self.delta_phi * self.damping;
        phi = phi.clamp(1e-6, PI - 1e-6);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        camera.target += self.pan_offset * self.damping;

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.eye = camera.target + offset;

        let keep = 1.0 - self.damping;
        self.delta_theta *= keep;
        self.delta_phi *= keep;
        self.pan_offset *= keep;
        self.scale = 1.0;
    }
}

/// Which mouse button started a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragButton {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug)]
struct TrackedPointer {
    id: i32,
    pos: Vec2,
    touch: bool,
    button: DragButton,
}

/// Turns raw pointer traffic into orbit rig input.
///
/// Mouse: left rotates, middle dollies, right pans. Touch: one finger pans,
/// two fingers pinch-dolly and rotate.
#[derive(Default)]
pub struct GestureTracker {
    pointers: SmallVec<[TrackedPointer; 2]>,
}

impl GestureTracker {
    pub fn pointer_down(&mut self, id: i32, pos: Vec2, touch: bool, button: DragButton) {
        self.pointers.retain(|p| p.id != id);
        if self.pointers.len() < 2 {
            self.pointers.push(TrackedPointer {
                id,
                pos,
                touch,
                button,
            });
        }
    }

    pub fn pointer_up(&mut self, id: i32) {
        self.pointers.retain(|p| p.id != id);
    }

    pub fn active(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_move(
        &mut self,
        id: i32,
        pos: Vec2,
        controls: &mut OrbitControls,
        camera: &PerspectiveCamera,
        viewport_h: f32,
    ) {
        let Some(slot) = self.pointers.iter().position(|p| p.id == id) else {
            return;
        };
        let prev = self.pointers[slot];
        let delta = pos - prev.pos;

        if self.pointers.len() == 2 {
            let other = self.pointers[1 - slot].pos;
            let before = (prev.pos - other).length();
            let after = (pos - other).length();
            if before > 1.0 && after > 1.0 {
                controls.dolly_by(before / after);
            }
            // midpoint travel rotates
            controls.rotate(delta.x * 0.5, delta.y * 0.5, viewport_h);
        } else if prev.touch {
            controls.pan(camera, delta.x, delta.y, viewport_h);
        } else {
            match prev.button {
                DragButton::Left => controls.rotate(delta.x, delta.y, viewport_h),
                DragButton::Right => controls.pan(camera, delta.x, delta.y, viewport_h),
                DragButton::Middle => {
                    if delta.y != 0.0 {
                        controls.dolly(-delta.y * 0.1);
                    }
                }
            }
        }
        self.pointers[slot].pos = pos;
    }
}
