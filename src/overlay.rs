use crate::scene::{ModalContent, ModalSurface};
use web_sys as web;

pub const OVERLAY_ID: &str = "modalOverlay";
pub const CLOSE_ID: &str = "modalClose";
const IMAGE_ID: &str = "modalImage";
const INFO_ID: &str = "modalInfo";
const OPEN_CLASS: &str = "open";

/// The detail overlay as it exists in the page.
pub struct DomModal {
    document: web::Document,
}

impl DomModal {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    #[inline]
    fn overlay(&self) -> Option<web::Element> {
        self.document.get_element_by_id(OVERLAY_ID)
    }
}

impl ModalSurface for DomModal {
    fn populate(&mut self, content: &ModalContent) {
        if let Some(el) = self.document.get_element_by_id(IMAGE_ID) {
            _ = el.set_attribute("src", &content.image);
        }
        if let Some(el) = self.document.get_element_by_id(INFO_ID) {
            el.set_inner_html(&content.info_html);
        }
    }

    fn unhide(&mut self) {
        if let Some(el) = self.overlay() {
            _ = el.remove_attribute("hidden");
        }
    }

    fn set_open_class(&mut self, open: bool) {
        if let Some(el) = self.overlay() {
            let cl = el.class_list();
            _ = if open {
                cl.add_1(OPEN_CLASS)
            } else {
                cl.remove_1(OPEN_CLASS)
            };
        }
    }

    fn hide(&mut self) {
        if let Some(el) = self.overlay() {
            _ = el.set_attribute("hidden", "");
        }
    }
}
