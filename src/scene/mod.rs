//! Platform-free scene and interaction state.
//!
//! Nothing in here touches the DOM or the GPU, so the host-side tests can
//! mount this module directly.

pub mod camera;
pub mod catalog;
pub mod constants;
pub mod material;
pub mod modal;
pub mod objects;
pub mod picking;
pub mod starfield;
pub mod viewer;

pub use camera::{DragButton, GestureTracker, OrbitControls, PerspectiveCamera};
pub use catalog::{parse_catalog, CatalogError, CatalogItem, Filter, GrapeType, ModalContent};
pub use material::Material;
pub use modal::{Deferred, Delay, ModalPhase, ModalSurface};
pub use objects::{ObjectId, ObjectSet, ObjectVisualState, VisualObject};
pub use starfield::{StarLayer, Starfield};
pub use viewer::ViewerState;
