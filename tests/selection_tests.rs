// Host-side tests for the selection/highlight and modal state machines.
// The main crate is wasm-only, so we mount the platform-free scene module directly.

#![allow(dead_code)]
#[path = "../src/scene/mod.rs"]
mod scene;

use glam::{Vec2, Vec3};
use scene::constants::*;
use scene::*;

#[derive(Default)]
struct FakeSurface {
    calls: Vec<&'static str>,
    image: String,
    info: String,
    open_class: bool,
    visible: bool,
}

impl ModalSurface for FakeSurface {
    fn populate(&mut self, content: &ModalContent) {
        self.calls.push("populate");
        self.image = content.image.clone();
        self.info = content.info_html.clone();
    }
    fn unhide(&mut self) {
        self.calls.push("unhide");
        self.visible = true;
    }
    fn set_open_class(&mut self, open: bool) {
        self.calls.push(if open { "open_class" } else { "close_class" });
        self.open_class = open;
    }
    fn hide(&mut self) {
        self.calls.push("hide");
        self.visible = false;
    }
}

fn item(kind: GrapeType, name: &str) -> CatalogItem {
    CatalogItem {
        kind,
        name: name.to_string(),
        origin: format!("{} valley", name),
        additional_information: format!("Notes on {}", name),
        image: format!("images/{}.jpg", name.to_lowercase()),
    }
}

fn viewer_with(items: &[CatalogItem], positions: &[Vec3]) -> ViewerState {
    let mut v = ViewerState::new(7);
    v.resize(800.0, 600.0);
    v.load_catalog(items, Filter::All);
    for (obj, p) in v.objects.iter_mut().zip(positions) {
        obj.position = *p;
    }
    v.tick(0.0);
    v
}

fn ndc_of(v: &ViewerState, p: Vec3) -> Vec2 {
    let clip = v.camera.view_projection() * p.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

fn ids(v: &ViewerState) -> Vec<ObjectId> {
    v.objects.iter().map(|o| o.id).collect()
}

const LEFT: Vec3 = Vec3::new(-5.0, 2.0, 0.0);
const RIGHT: Vec3 = Vec3::new(5.0, 2.0, 0.0);

fn two_balls() -> ViewerState {
    viewer_with(
        &[item(GrapeType::Red, "Merlot"), item(GrapeType::White, "Riesling")],
        &[LEFT, RIGHT],
    )
}

#[test]
fn pick_then_open_then_close_restores_original_material() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let id = ids(&v)[0];
    let before = v.objects.get(id).unwrap().base_material.clone();

    let task = v.pointer_down(ndc_of(&v, LEFT)).expect("hit");
    assert!(matches!(task, Deferred::Select { target, .. } if target == id));
    assert_eq!(task.delay(), Delay::Millis(PICK_DELAY_MS));

    let reveal = v.fire(task, &mut s).expect("reveal");
    assert_eq!(reveal.delay(), Delay::NextFrame);
    assert_eq!(v.modal_phase(), ModalPhase::Opening);
    assert!(v.modal_active());
    assert_eq!(v.selection(), Some(id));
    assert!(!v.controls_enabled());
    assert!(s.visible);
    assert!(!s.open_class);

    assert_eq!(v.fire(reveal, &mut s), None);
    assert_eq!(v.modal_phase(), ModalPhase::Open);
    assert!(s.open_class);

    let obj = v.objects.get(id).unwrap();
    assert!(obj.is_highlighted());
    assert_eq!(obj.material().map, None);
    assert_eq!(obj.material().emissive_intensity, HIGHLIGHT_EMISSIVE_INTENSITY);

    for _ in 0..60 {
        v.tick(0.016);
    }
    assert!(v.objects.get(id).unwrap().scale > 1.0);

    let hide = v.request_close(&mut s).expect("hide");
    assert_eq!(hide.delay(), Delay::Millis(CLOSE_GRACE_MS));
    assert_eq!(v.modal_phase(), ModalPhase::Closing);
    assert!(v.controls_enabled());
    assert!(!s.open_class);
    assert!(s.visible, "overlay stays in layout during the grace period");
    assert_eq!(v.selection(), Some(id));

    assert_eq!(v.fire(hide, &mut s), None);
    assert_eq!(v.modal_phase(), ModalPhase::Closed);
    assert_eq!(v.selection(), None);
    assert!(!s.visible);

    let obj = v.objects.get(id).unwrap();
    assert!(!obj.is_highlighted());
    assert!(std::ptr::eq(obj.material(), &obj.base_material));
    assert_eq!(*obj.material(), before);
    assert_eq!(obj.material().emissive_intensity, BASE_EMISSIVE_INTENSITY);
    assert_eq!(obj.scale, 1.0);
}

#[test]
fn modal_shows_the_picked_item() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let task = v.pointer_down(ndc_of(&v, RIGHT)).expect("hit");
    v.fire(task, &mut s);

    assert_eq!(s.image, "images/riesling.jpg");
    assert!(s.info.contains("Riesling"));
    assert!(s.info.contains("White"));
    assert!(s.info.contains("Riesling valley"));
    assert!(s.info.contains("Notes on Riesling"));
    assert_eq!(&s.calls[..2], &["populate", "unhide"]);
}

#[test]
fn miss_does_not_schedule_anything() {
    let mut v = two_balls();
    assert_eq!(v.pointer_down(Vec2::new(0.0, -0.9)), None);
    assert_eq!(v.modal_phase(), ModalPhase::Closed);
}

#[test]
fn empty_scene_pick_is_a_noop() {
    let mut v = ViewerState::new(1);
    assert_eq!(v.pointer_down(Vec2::ZERO), None);
}

#[test]
fn nearest_ball_wins_when_several_are_hit() {
    let near = Vec3::new(0.0, 2.0, 5.0);
    let far = Vec3::new(0.0, 2.0, -2.0);
    let mut v = viewer_with(
        &[item(GrapeType::Red, "Far"), item(GrapeType::Red, "Near")],
        &[far, near],
    );
    let near_id = ids(&v)[1];
    match v.pointer_down(ndc_of(&v, near)) {
        Some(Deferred::Select { target, .. }) => assert_eq!(target, near_id),
        other => panic!("expected a selection, got {:?}", other),
    }
}

#[test]
fn pointer_is_ignored_while_modal_is_active() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let task = v.pointer_down(ndc_of(&v, LEFT)).unwrap();
    let reveal = v.fire(task, &mut s).unwrap();
    v.fire(reveal, &mut s);

    assert_eq!(v.pointer_down(ndc_of(&v, RIGHT)), None);

    let _hide = v.request_close(&mut s).unwrap();
    assert_eq!(v.pointer_down(ndc_of(&v, RIGHT)), None, "still closing");
}

#[test]
fn selecting_another_ball_reverts_the_previous_one() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let [a, b] = [ids(&v)[0], ids(&v)[1]];

    v.open(a, &mut s).unwrap();
    for _ in 0..60 {
        v.tick(0.1);
    }
    assert_ne!(v.objects.get(a).unwrap().scale, 1.0);
    v.open(b, &mut s).unwrap();

    let obj_a = v.objects.get(a).unwrap();
    assert!(!obj_a.is_highlighted());
    assert_eq!(obj_a.material().emissive_intensity, BASE_EMISSIVE_INTENSITY);
    assert_eq!(obj_a.scale, 1.0);
    assert!(v.objects.get(b).unwrap().is_highlighted());
    assert_eq!(v.objects.iter().filter(|o| o.is_highlighted()).count(), 1);
    assert_eq!(v.selection(), Some(b));
}

#[test]
fn reselecting_resets_pulse() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let a = ids(&v)[0];
    v.open(a, &mut s).unwrap();
    for _ in 0..5 {
        v.tick(0.0);
    }
    v.open(a, &mut s).unwrap();
    match &v.objects.get(a).unwrap().state {
        ObjectVisualState::Highlighted { pulse, .. } => {
            assert_eq!(pulse.time, 0.0);
            assert_eq!(pulse.speed, PULSE_SPEED);
            assert_eq!(pulse.intensity, PULSE_INTENSITY);
        }
        ObjectVisualState::Base => panic!("expected highlight"),
    }
}

#[test]
fn closing_when_nothing_is_open_is_a_noop() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    assert_eq!(v.request_close(&mut s), None);
    assert_eq!(v.escape(&mut s), None);
    assert_eq!(v.overlay_click(true, &mut s), None);
    assert!(s.calls.is_empty());
    assert_eq!(v.modal_phase(), ModalPhase::Closed);
    assert_eq!(v.selection(), None);
    assert!(v.controls_enabled());
}

#[test]
fn second_close_during_grace_period_is_ignored() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    v.open(ids(&v)[0], &mut s).unwrap();
    assert!(v.request_close(&mut s).is_some());
    assert_eq!(v.request_close(&mut s), None);
    assert_eq!(v.escape(&mut s), None);
}

#[test]
fn escape_and_backdrop_click_close() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    v.open(ids(&v)[0], &mut s).unwrap();
    assert_eq!(v.overlay_click(false, &mut s), None, "click inside the panel");
    assert_eq!(v.modal_phase(), ModalPhase::Opening);
    assert!(v.escape(&mut s).is_some());
    assert_eq!(v.modal_phase(), ModalPhase::Closing);

    let mut v = two_balls();
    v.open(ids(&v)[1], &mut s).unwrap();
    assert!(v.overlay_click(true, &mut s).is_some());
    assert_eq!(v.modal_phase(), ModalPhase::Closing);
}

#[test]
fn only_the_latest_pick_opens() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let first = v.pointer_down(ndc_of(&v, LEFT)).unwrap();
    let second = v.pointer_down(ndc_of(&v, RIGHT)).unwrap();

    assert_eq!(v.fire(first, &mut s), None);
    assert_eq!(v.modal_phase(), ModalPhase::Closed);
    assert!(s.calls.is_empty());

    assert!(v.fire(second, &mut s).is_some());
    assert_eq!(v.selection(), Some(ids(&v)[1]));
}

#[test]
fn stale_hide_cannot_close_a_reopened_modal() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let [a, b] = [ids(&v)[0], ids(&v)[1]];

    let reveal = v.open(a, &mut s).unwrap();
    v.fire(reveal, &mut s);
    let hide = v.request_close(&mut s).unwrap();

    let reveal_b = v.open(b, &mut s).unwrap();
    assert_eq!(v.fire(hide, &mut s), None);
    assert_eq!(v.modal_phase(), ModalPhase::Opening);
    assert_eq!(v.selection(), Some(b));
    assert!(v.objects.get(b).unwrap().is_highlighted());
    assert!(s.visible);

    v.fire(reveal_b, &mut s);
    assert_eq!(v.modal_phase(), ModalPhase::Open);
}

#[test]
fn stale_reveal_after_close_is_dropped() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let reveal = v.open(ids(&v)[0], &mut s).unwrap();
    let hide = v.request_close(&mut s).unwrap();
    assert_eq!(v.fire(reveal, &mut s), None);
    assert!(!s.open_class);
    assert_eq!(v.modal_phase(), ModalPhase::Closing);
    v.fire(hide, &mut s);
    assert_eq!(v.modal_phase(), ModalPhase::Closed);
}

#[test]
fn pulse_drives_emissive_and_scale_of_selected_only() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let [a, b] = [ids(&v)[0], ids(&v)[1]];
    v.open(a, &mut s).unwrap();

    v.tick(0.0);
    let expected = PULSE_SPEED.sin() * PULSE_INTENSITY + PULSE_BASELINE;
    let obj = v.objects.get(a).unwrap();
    assert!((obj.material().emissive_intensity - expected).abs() < 1e-6);
    assert!((obj.scale - (1.0 + (expected - PULSE_BASELINE) * PULSE_SCALE_GAIN)).abs() < 1e-6);

    let other = v.objects.get(b).unwrap();
    assert_eq!(other.scale, 1.0);
    assert_eq!(other.material().emissive_intensity, BASE_EMISSIVE_INTENSITY);
}

#[test]
fn balls_face_the_camera_every_frame() {
    let mut v = two_balls();
    v.tick(0.0);
    for obj in v.objects.iter() {
        let to_eye = (v.camera.eye - obj.position).normalize();
        assert!(obj.normal().dot(to_eye) > 0.999);
    }
}

#[test]
fn reload_invalidates_pending_picks_and_selection() {
    let mut v = two_balls();
    let mut s = FakeSurface::default();
    let pending = v.pointer_down(ndc_of(&v, LEFT)).unwrap();
    let items = [item(GrapeType::Red, "Syrah")];
    v.load_catalog(&items, Filter::All);
    assert_eq!(v.fire(pending, &mut s), None);
    assert_eq!(v.modal_phase(), ModalPhase::Closed);

    let fresh = ids(&v)[0];
    v.open(fresh, &mut s).unwrap();
    v.load_catalog(&items, Filter::All);
    let hide = v.request_close(&mut s).unwrap();
    v.fire(hide, &mut s);
    assert_eq!(v.selection(), None);
    assert!(v.objects.iter().all(|o| !o.is_highlighted()));
}

#[test]
fn freshly_loaded_balls_are_pickable_before_any_frame() {
    let mut v = ViewerState::new(11);
    v.resize(800.0, 600.0);
    v.load_catalog(&[item(GrapeType::White, "Chenin")], Filter::All);
    let obj = v.objects.iter().next().unwrap();
    let to_eye = (v.camera.eye - obj.position).normalize();
    assert!(obj.normal().dot(to_eye) > 0.999);

    let target = obj.id;
    let p = obj.position;
    match v.pointer_down(ndc_of(&v, p)) {
        Some(Deferred::Select { target: hit, .. }) => assert_eq!(hit, target),
        other => panic!("expected a selection, got {:?}", other),
    }
}
