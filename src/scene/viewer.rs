use super::camera::{GestureTracker, OrbitControls, PerspectiveCamera};
use super::catalog::{CatalogItem, Filter, ModalContent};
use super::modal::{Deferred, ModalController, ModalPhase, ModalSurface};
use super::objects::{ObjectId, ObjectSet};
use super::picking::{pick_nearest, ray_from_ndc};
use super::starfield::Starfield;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything the input handlers and the frame loop share.
///
/// Selection and modal phase move together: while the modal is not closed a
/// ball is selected, and finishing a close clears the selection.
pub struct ViewerState {
    pub objects: ObjectSet,
    pub starfield: Starfield,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub gestures: GestureTracker,
    modal: ModalController,
    selection: Option<ObjectId>,
    pick_ticket: u64,
    load_ticket: u64,
    rng: StdRng,
}

impl ViewerState {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let starfield = Starfield::new(&mut rng);
        Self {
            objects: ObjectSet::new(),
            starfield,
            camera: PerspectiveCamera::default(),
            controls: OrbitControls::default(),
            gestures: GestureTracker::default(),
            modal: ModalController::default(),
            selection: None,
            pick_ticket: 0,
            load_ticket: 0,
            rng,
        }
    }

    #[inline]
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    #[inline]
    pub fn modal_phase(&self) -> ModalPhase {
        self.modal.phase()
    }

    #[inline]
    pub fn modal_active(&self) -> bool {
        self.modal.is_active()
    }

    #[inline]
    pub fn controls_enabled(&self) -> bool {
        self.controls.enabled
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    /// Replace every ball with one per item passing `filter`. Returns the new count.
    ///
    /// New balls already face the camera, so they are pickable before the next frame.
    pub fn load_catalog(&mut self, items: &[CatalogItem], filter: Filter) -> usize {
        let kept = filter.apply(items);
        let count = self.objects.replace(kept, &mut self.rng);
        let eye = self.camera.eye;
        for obj in self.objects.iter_mut() {
            obj.face(eye);
        }
        log::info!(
            "[catalog] filter={} items={} balls={}",
            filter,
            items.len(),
            count
        );
        count
    }

    /// Claim a ticket for a catalog fetch about to start. Only the newest ticket may load.
    pub fn begin_load(&mut self) -> u64 {
        self.load_ticket += 1;
        self.load_ticket
    }

    /// Apply a finished fetch, unless a newer one was started meanwhile.
    pub fn finish_load(
        &mut self,
        ticket: u64,
        items: &[CatalogItem],
        filter: Filter,
    ) -> Option<usize> {
        if ticket != self.load_ticket {
            log::debug!("[catalog] drop stale load {} ({})", ticket, filter);
            return None;
        }
        Some(self.load_catalog(items, filter))
    }

    /// Pointer pressed at `ndc`. Returns the deferred selection for the nearest hit.
    pub fn pointer_down(&mut self, ndc: Vec2) -> Option<Deferred> {
        if self.modal.is_active() {
            return None;
        }
        let ray = ray_from_ndc(&self.camera, ndc);
        let target = pick_nearest(&ray, self.objects.iter())?;
        self.pick_ticket += 1;
        log::debug!("[pick] hit {:?} ticket={}", target, self.pick_ticket);
        Some(Deferred::Select {
            ticket: self.pick_ticket,
            target,
        })
    }

    /// Select `target` and open its detail panel.
    ///
    /// Returns `None` if `target` no longer exists.
    pub fn open(&mut self, target: ObjectId, surface: &mut dyn ModalSurface) -> Option<Deferred> {
        let content = ModalContent::for_item(&self.objects.get(target)?.item);

        if let Some(prev) = self.selection.take() {
            if let Some(obj) = self.objects.get_mut(prev) {
                obj.restore();
            }
        }

        self.selection = Some(target);
        let reveal = self.modal.open(&content, surface);
        self.sync_controls();

        let obj = self.objects.get_mut(target)?;
        obj.highlight();
        log::info!("[modal] open {:?} ({})", target, obj.item.name);
        Some(reveal)
    }

    /// Start closing the panel. No-op when nothing is open.
    pub fn request_close(&mut self, surface: &mut dyn ModalSurface) -> Option<Deferred> {
        let hide = self.modal.begin_close(surface)?;
        self.sync_controls();
        log::info!("[modal] closing");
        Some(hide)
    }

    /// Overlay clicked; only a click on the overlay root itself closes.
    pub fn overlay_click(
        &mut self,
        on_root: bool,
        surface: &mut dyn ModalSurface,
    ) -> Option<Deferred> {
        if !on_root {
            return None;
        }
        self.request_close(surface)
    }

    pub fn escape(&mut self, surface: &mut dyn ModalSurface) -> Option<Deferred> {
        if !self.modal.is_active() {
            return None;
        }
        self.request_close(surface)
    }

    /// Run a task previously handed out. Stale tasks are dropped.
    pub fn fire(&mut self, task: Deferred, surface: &mut dyn ModalSurface) -> Option<Deferred> {
        match task {
            Deferred::Select { ticket, target } => {
                if ticket != self.pick_ticket {
                    log::debug!("[pick] drop stale ticket {}", ticket);
                    return None;
                }
                self.open(target, surface)
            }
            Deferred::Reveal { generation } => {
                if !self.modal.reveal(generation, surface) {
                    log::debug!("[modal] drop stale reveal {}", generation);
                }
                None
            }
            Deferred::Hide { generation } => {
                if !self.modal.finish_close(generation, surface) {
                    log::debug!("[modal] drop stale hide {}", generation);
                    return None;
                }
                if let Some(id) = self.selection.take() {
                    if let Some(obj) = self.objects.get_mut(id) {
                        obj.restore();
                    }
                }
                self.sync_controls();
                log::info!("[modal] closed");
                None
            }
        }
    }

    /// Per-frame update: billboards, selected pulse, camera damping, star drift.
    pub fn tick(&mut self, elapsed_secs: f64) {
        let eye = self.camera.eye;
        for obj in self.objects.iter_mut() {
            obj.face(eye);
        }
        if let Some(id) = self.selection {
            if let Some(obj) = self.objects.get_mut(id) {
                obj.advance_pulse();
            }
        }
        self.controls.update(&mut self.camera);
        self.starfield.animate(elapsed_secs);
    }

    fn sync_controls(&mut self) {
        self.controls.enabled = !self.modal.blocks_camera();
    }
}
