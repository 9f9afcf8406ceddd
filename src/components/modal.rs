//! Bootstrap modal dialogs.
//!
//! * [`Modal`] – one reusable dialog whose title/body/footer are replaced on
//!   every [`Modal::popup`].
//! * [`create_static_modal`] – fixed markup, opened through a
//!   `data-bs-toggle="modal"` trigger pointing at its id.

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::bootstrap::BsModal;
use super::Body;
use crate::component::{append_all, el, Component, ComponentOptions, Mountable};
use crate::constants::{ATTR_ARIA_LABEL, ATTR_BS_DISMISS, ATTR_TYPE, BUTTON_TYPE_BUTTON, CSS_BTN_CLOSE};
use crate::dom_utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSize {
    Small,
    Large,
    ExtraLarge,
}

impl ModalSize {
    fn as_str(self) -> &'static str {
        match self {
            ModalSize::Small => "sm",
            ModalSize::Large => "lg",
            ModalSize::ExtraLarge => "xl",
        }
    }
}

pub fn dialog_classes(size: Option<ModalSize>) -> String {
    match size {
        Some(size) => format!("modal-dialog modal-{}", size.as_str()),
        None => "modal-dialog".to_string(),
    }
}

fn close_button() -> Result<Element, JsValue> {
    let btn = el("button", CSS_BTN_CLOSE, "")?;
    btn.set_attribute(ATTR_TYPE, BUTTON_TYPE_BUTTON)?;
    btn.set_attribute(ATTR_BS_DISMISS, "modal")?;
    btn.set_attribute(ATTR_ARIA_LABEL, "Close")?;
    Ok(btn)
}

fn header(title: &str) -> Result<Element, JsValue> {
    let header = el("div", "modal-header", "")?;
    append_all(&header, &[el("h5", "modal-title", title)?, close_button()?])?;
    Ok(header)
}

fn footer(content: Body) -> Result<Element, JsValue> {
    let footer = el("div", "modal-footer", "")?;
    let child = content.into_element("p")?;
    footer.append_child(&child)?;
    Ok(footer)
}

/// Modal with fixed title, body and optional footer.
pub fn create_static_modal(title: &str, body: Body, footer_content: Option<Body>) -> Result<Component, JsValue> {
    let content = el("div", "modal-content", "")?;
    let child = header(title)?;
    content.append_child(&child)?;
    let body_el = el("div", "modal-body", "")?;
    let child = body.into_element("p")?;
    body_el.append_child(&child)?;
    content.append_child(&body_el)?;
    if let Some(f) = footer_content {
        let child = footer(f)?;
        content.append_child(&child)?;
    }

    let dialog = el("div", &dialog_classes(None), "")?;
    dialog.append_child(&content)?;

    Component::with_options("div", ComponentOptions::new().classes("modal").children(vec![dialog]))
}

/// Reusable modal; content is set on every popup.
#[derive(Debug, Clone)]
pub struct Modal {
    comp: Component,
}

impl Modal {
    pub fn new(size: Option<ModalSize>) -> Result<Self, JsValue> {
        let content = el("div", "modal-content", "")?;
        append_all(&content, &[header("")?, el("div", "modal-body", "")?])?;

        let dialog = el("div", &dialog_classes(size), "")?;
        dialog.append_child(&content)?;

        let comp = Component::with_options("div", ComponentOptions::new().classes("modal").children(vec![dialog]))?;
        Ok(Self { comp })
    }

    /// Replace title, body and footer, then open the dialog.
    pub fn popup(&self, title: &str, body: Body, footer_content: Option<Body>) -> Result<(), JsValue> {
        self.fill(title, body, footer_content)?;
        BsModal::new(self.comp.view())?.show();
        Ok(())
    }

    /// Content replacement without opening; split out of `popup` so it
    /// works in pages that have not loaded the Bootstrap bundle.
    pub fn fill(&self, title: &str, body: Body, footer_content: Option<Body>) -> Result<(), JsValue> {
        if let Some(t) = self.comp.find(".modal-title") {
            dom_utils::set_text(&t, title);
        }
        if let Some(b) = self.comp.find(".modal-body") {
            dom_utils::clear_children(&b);
            let child = body.into_element("p")?;
            b.append_child(&child)?;
        }
        dom_utils::remove_all(self.comp.view(), ".modal-footer")?;
        if let Some(f) = footer_content {
            if let Some(content) = self.comp.find(".modal-content") {
                let child = footer(f)?;
                content.append_child(&child)?;
            }
        }
        Ok(())
    }
}

impl Mountable for Modal {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_size_classes() {
        assert_eq!(dialog_classes(None), "modal-dialog");
        assert_eq!(dialog_classes(Some(ModalSize::Large)), "modal-dialog modal-lg");
        assert_eq!(dialog_classes(Some(ModalSize::ExtraLarge)), "modal-dialog modal-xl");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn fill_replaces_body_and_footer() {
        let modal = Modal::new(Some(ModalSize::Small)).unwrap();
        modal.fill("First", Body::from("one"), Some(Body::from("foot"))).unwrap();
        modal.fill("Second", Body::from("two"), None).unwrap();

        let view = modal.view();
        assert_eq!(
            view.query_selector(".modal-title").unwrap().unwrap().text_content().as_deref(),
            Some("Second")
        );
        assert_eq!(
            view.query_selector(".modal-body").unwrap().unwrap().text_content().as_deref(),
            Some("two")
        );
        assert!(view.query_selector(".modal-footer").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn static_modal_has_footer_when_given() {
        let modal = create_static_modal("T", Body::from("b"), Some(Body::from("f"))).unwrap();
        assert!(modal.find(".modal-footer").is_some());
        assert!(modal.find(".modal-dialog").is_some());
    }
}
