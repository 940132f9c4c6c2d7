// Host-side tests for pointer picking, the camera rig and gesture mapping.
// The main crate is wasm-only, so we mount the platform-free scene module directly.

#![allow(dead_code)]
#[path = "../src/scene/mod.rs"]
mod scene;

use glam::{Vec2, Vec3};
use scene::constants::*;
use scene::objects::look_at_rotation;
use scene::picking::{ray_disc, ray_from_ndc, screen_to_ndc, Ray};
use scene::*;

#[test]
fn screen_corners_map_to_ndc() {
    assert_eq!(screen_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(screen_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(screen_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    assert_eq!(screen_to_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
}

#[test]
fn disc_hit_and_miss() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 10.0),
        dir: Vec3::NEG_Z,
    };
    let t = ray_disc(&ray, Vec3::ZERO, Vec3::Z, 1.0).expect("hit");
    assert!((t - 10.0).abs() < 1e-5);
    // back side counts too
    assert!(ray_disc(&ray, Vec3::ZERO, Vec3::NEG_Z, 1.0).is_some());
    assert!(ray_disc(&ray, Vec3::new(1.5, 0.0, 0.0), Vec3::Z, 1.0).is_none());
    // edge-on
    assert!(ray_disc(&ray, Vec3::ZERO, Vec3::X, 1.0).is_none());
    // behind the origin
    assert!(ray_disc(&ray, Vec3::new(0.0, 0.0, 20.0), Vec3::Z, 1.0).is_none());
}

#[test]
fn center_ray_points_at_target() {
    let mut camera = PerspectiveCamera::default();
    camera.set_viewport(1280.0, 720.0);
    let ray = ray_from_ndc(&camera, Vec2::ZERO);
    assert_eq!(ray.origin, CAMERA_START);
    assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn look_at_turns_normal_towards_target() {
    let from = Vec3::new(3.0, 2.0, -1.0);
    for target in [CAMERA_START, Vec3::new(-10.0, 4.0, 0.0), Vec3::new(3.0, 30.0, -1.0)] {
        let n = look_at_rotation(from, target) * Vec3::Z;
        assert!((n - (target - from).normalize()).length() < 1e-4);
    }
}

#[test]
fn dolly_respects_distance_limits() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    for _ in 0..200 {
        controls.dolly(1.0);
        controls.update(&mut camera);
    }
    assert!(((camera.eye - camera.target).length() - ORBIT_MIN_DISTANCE).abs() < 1e-3);
    for _ in 0..400 {
        controls.dolly(-1.0);
        controls.update(&mut camera);
    }
    assert!(((camera.eye - camera.target).length() - ORBIT_MAX_DISTANCE).abs() < 1e-3);
}

#[test]
fn disabled_controls_ignore_input() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    controls.enabled = false;
    controls.rotate(200.0, 50.0, 600.0);
    controls.pan(&camera, 40.0, 40.0, 600.0);
    controls.dolly(3.0);
    controls.dolly_by(0.5);
    controls.update(&mut camera);
    assert!((camera.eye - CAMERA_START).length() < 1e-4);
    assert_eq!(camera.target, Vec3::ZERO);
    controls.update(&mut camera);
    assert!((camera.eye - CAMERA_START).length() < 1e-4, "no motion was queued");
}

#[test]
fn rotation_keeps_distance_and_settles() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    controls.rotate(120.0, 30.0, 600.0);
    controls.update(&mut camera);
    let first_step = camera.eye;
    controls.update(&mut camera);
    assert!((camera.eye - first_step).length() > 1e-3, "inertia carries past the first frame");
    for _ in 0..600 {
        controls.update(&mut camera);
    }
    let settled = camera.eye;
    controls.update(&mut camera);
    assert!((camera.eye - settled).length() < 1e-4);
    assert!(((camera.eye - camera.target).length() - 22.0).abs() < 1e-3);
    assert!((camera.eye - CAMERA_START).length() > 1.0);
}

#[test]
fn pan_moves_target_and_eye_together() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    controls.pan(&camera, 50.0, 0.0, 600.0);
    for _ in 0..600 {
        controls.update(&mut camera);
    }
    // dragging right moves the scene right, so the rig slides left
    assert!(camera.target.x < 0.0);
    assert!((camera.eye - camera.target - CAMERA_START).length() < 1e-3);
}

#[test]
fn mouse_buttons_map_to_rotate_pan_dolly() {
    let camera = PerspectiveCamera::default();

    let mut controls = OrbitControls::default();
    let mut gestures = GestureTracker::default();
    gestures.pointer_down(1, Vec2::ZERO, false, DragButton::Left);
    gestures.pointer_move(1, Vec2::new(30.0, 0.0), &mut controls, &camera, 600.0);
    let mut cam = camera.clone();
    controls.update(&mut cam);
    assert_eq!(cam.target, Vec3::ZERO, "left drag rotates only");
    assert!(cam.eye.x.abs() > 1e-4);

    let mut controls = OrbitControls::default();
    let mut gestures = GestureTracker::default();
    gestures.pointer_down(1, Vec2::ZERO, false, DragButton::Right);
    gestures.pointer_move(1, Vec2::new(30.0, 0.0), &mut controls, &camera, 600.0);
    let mut cam = camera.clone();
    controls.update(&mut cam);
    assert!(cam.target.x < 0.0, "right drag pans");

    let mut controls = OrbitControls::default();
    let mut gestures = GestureTracker::default();
    gestures.pointer_down(1, Vec2::ZERO, false, DragButton::Middle);
    gestures.pointer_move(1, Vec2::new(0.0, 40.0), &mut controls, &camera, 600.0);
    let mut cam = camera.clone();
    controls.update(&mut cam);
    assert!((cam.eye - cam.target).length() > 22.0, "middle drag down dollies out");
}

#[test]
fn touch_pinch_dollies_in() {
    let camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    let mut gestures = GestureTracker::default();
    gestures.pointer_down(1, Vec2::new(100.0, 300.0), true, DragButton::Left);
    gestures.pointer_down(2, Vec2::new(300.0, 300.0), true, DragButton::Left);
    assert_eq!(gestures.active(), 2);
    gestures.pointer_move(2, Vec2::new(500.0, 300.0), &mut controls, &camera, 600.0);
    let mut cam = camera.clone();
    controls.update(&mut cam);
    assert!((cam.eye - cam.target).length() < 22.0);

    gestures.pointer_up(1);
    gestures.pointer_up(2);
    assert_eq!(gestures.active(), 0);
}

#[test]
fn single_touch_pans() {
    let camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    let mut gestures = GestureTracker::default();
    gestures.pointer_down(7, Vec2::ZERO, true, DragButton::Left);
    gestures.pointer_move(7, Vec2::new(0.0, 40.0), &mut controls, &camera, 600.0);
    let mut cam = camera.clone();
    controls.update(&mut cam);
    assert!(cam.target.y > 0.0);
}

#[test]
fn unknown_pointer_moves_are_ignored() {
    let camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    let mut gestures = GestureTracker::default();
    gestures.pointer_move(3, Vec2::new(50.0, 50.0), &mut controls, &camera, 600.0);
    let mut cam = camera.clone();
    controls.update(&mut cam);
    assert!((cam.eye - CAMERA_START).length() < 1e-4);
    assert_eq!(cam.target, Vec3::ZERO);
}
