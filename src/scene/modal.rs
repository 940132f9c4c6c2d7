use super::catalog::ModalContent;
use super::constants::{CLOSE_GRACE_MS, PICK_DELAY_MS};
use super::objects::ObjectId;

/// Lifecycle of the detail overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    /// Unhidden; the enter-transition class lands on the next frame.
    Opening,
    Open,
    /// Transition class removed; still in layout until the grace period ends.
    Closing,
}

/// When a deferred task should run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delay {
    NextFrame,
    Millis(u32),
}

/// Work the state machine wants done later. The browser layer schedules it
/// and hands it back through `ViewerState::fire`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    Select { ticket: u64, target: ObjectId },
    Reveal { generation: u64 },
    Hide { generation: u64 },
}

impl Deferred {
    pub fn delay(&self) -> Delay {
        match self {
            Deferred::Select { .. } => Delay::Millis(PICK_DELAY_MS),
            Deferred::Reveal { .. } => Delay::NextFrame,
            Deferred::Hide { .. } => Delay::Millis(CLOSE_GRACE_MS),
        }
    }
}

/// The DOM side of the overlay.
pub trait ModalSurface {
    /// Fill the detail image and the info block.
    fn populate(&mut self, content: &ModalContent);
    /// Make the overlay part of layout again.
    fn unhide(&mut self);
    /// Add or remove the CSS transition class.
    fn set_open_class(&mut self, open: bool);
    /// Remove the overlay from layout and hit-testing.
    fn hide(&mut self);
}

/// Open/close sequencing with a generation counter so stale timers are ignored.
#[derive(Debug, Default)]
pub struct ModalController {
    phase: ModalPhase,
    generation: u64,
}

impl ModalController {
    #[inline]
    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// Any phase other than `Closed`.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// Camera controls stay disabled while this is true.
    #[inline]
    pub fn blocks_camera(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    pub fn open(&mut self, content: &ModalContent, surface: &mut dyn ModalSurface) -> Deferred {
        self.generation += 1;
        self.phase = ModalPhase::Opening;
        surface.populate(content);
        surface.unhide();
        Deferred::Reveal {
            generation: self.generation,
        }
    }

    /// Apply the enter-transition class; false if `generation` is stale.
    pub fn reveal(&mut self, generation: u64, surface: &mut dyn ModalSurface) -> bool {
        if generation != self.generation || self.phase != ModalPhase::Opening {
            return false;
        }
        surface.set_open_class(true);
        self.phase = ModalPhase::Open;
        true
    }

    /// Start the exit transition. No-op unless opening or open.
    pub fn begin_close(&mut self, surface: &mut dyn ModalSurface) -> Option<Deferred> {
        if !self.blocks_camera() {
            return None;
        }
        self.generation += 1;
        self.phase = ModalPhase::Closing;
        surface.set_open_class(false);
        Some(Deferred::Hide {
            generation: self.generation,
        })
    }

    /// Finish the exit once the grace period has elapsed; false if `generation` is stale.
    pub fn finish_close(&mut self, generation: u64, surface: &mut dyn ModalSurface) -> bool {
        if generation != self.generation || self.phase != ModalPhase::Closing {
            return false;
        }
        surface.hide();
        self.phase = ModalPhase::Closed;
        true
    }
}
