//! Bootstrap toasts.
//!
//! Usage:
//!
//! ```rust,ignore
//! let toasts = Toasts::new(None)?;
//! root.append_child(toasts.view())?; // must be attached before popping up
//! let toast = toasts.new_toast()?;
//! toast.popup(Body::from("saved"), Some("Files"), Some("success"))?;
//! ```

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::bootstrap::BsToast;
use super::Body;
use crate::component::{append_all, el, Component, ComponentOptions, Mountable};
use crate::constants::{ATTR_ARIA_LABEL, ATTR_BS_DISMISS, ATTR_TYPE, BUTTON_TYPE_BUTTON, CSS_BTN_CLOSE, DEFAULT_TOASTS_CLASSES};
use crate::dom_utils;
use crate::utils;

/// Class list for a toast of the given colour (`primary` when `None`).
pub fn toast_classes(color: Option<&str>) -> String {
    format!("toast text-bg-{}", color.unwrap_or("primary"))
}

/// Container holding toasts, newest on top.
#[derive(Debug, Clone)]
pub struct Toasts {
    comp: Component,
}

impl Toasts {
    pub fn new(classes: Option<&str>) -> Result<Self, JsValue> {
        let comp = Component::with_options(
            "div",
            ComponentOptions::new().classes(classes.unwrap_or(DEFAULT_TOASTS_CLASSES)),
        )?;
        Ok(Self { comp })
    }

    /// Create a toast and prepend it to the container.
    pub fn new_toast(&self) -> Result<Toast, JsValue> {
        let toast = Toast::new()?;
        self.comp.view().prepend_with_node_1(toast.view())?;
        Ok(toast)
    }
}

impl Mountable for Toasts {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    comp: Component,
}

impl Toast {
    fn new() -> Result<Self, JsValue> {
        let close = el("button", CSS_BTN_CLOSE, "")?;
        close.set_attribute(ATTR_TYPE, BUTTON_TYPE_BUTTON)?;
        close.set_attribute(ATTR_BS_DISMISS, "toast")?;
        close.set_attribute(ATTR_ARIA_LABEL, "Close")?;

        let header = el("div", "toast-header", "")?;
        append_all(&header, &[el("strong", "me-auto", "")?, el("small", "", "")?])?;
        header.append_child(&close)?;

        let comp = Component::with_options(
            "div",
            ComponentOptions::new()
                .classes(toast_classes(None))
                .attrs(attrs! {
                    "role" => "alert",
                    "aria-live" => "assertive",
                    "aria-atomic" => "true",
                })
                .children(vec![header, el("div", "toast-body", "")?]),
        )?;
        Ok(Self { comp })
    }

    pub fn set_title(&self, title: &str) {
        if let Some(strong) = self.comp.find("strong") {
            dom_utils::set_text(&strong, title);
        }
    }

    /// Fill the toast and show it.
    pub fn popup(&self, body: Body, title: Option<&str>, color: Option<&str>) -> Result<(), JsValue> {
        self.fill(body, title, color)?;
        BsToast::new(self.comp.view())?.show();
        Ok(())
    }

    pub fn fill(&self, body: Body, title: Option<&str>, color: Option<&str>) -> Result<(), JsValue> {
        dom_utils::set_classes(self.comp.view(), &toast_classes(color));
        if let Some(title) = title {
            self.set_title(title);
        }
        if let Some(small) = self.comp.find("small") {
            dom_utils::set_text(&small, &utils::now_hms());
        }
        if let Some(body_el) = self.comp.find(".toast-body") {
            dom_utils::clear_children(&body_el);
            let child = body.into_element("span")?;
            body_el.append_child(&child)?;
        }
        Ok(())
    }
}

impl Mountable for Toast {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_colour_defaults_to_primary() {
        assert_eq!(toast_classes(None), "toast text-bg-primary");
        assert_eq!(toast_classes(Some("danger")), "toast text-bg-danger");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn newest_toast_is_first() {
        let toasts = Toasts::new(None).unwrap();
        let first = toasts.new_toast().unwrap();
        let second = toasts.new_toast().unwrap();
        let top = toasts.view().first_element_child().unwrap();
        assert!(top.is_same_node(Some(second.view())));
        assert!(!top.is_same_node(Some(first.view())));
    }

    #[wasm_bindgen_test]
    fn fill_sets_colour_title_and_body() {
        let toasts = Toasts::new(None).unwrap();
        let toast = toasts.new_toast().unwrap();
        toast.fill(Body::from("done"), Some("Files"), Some("success")).unwrap();
        let view = toast.view();
        assert!(view.class_list().contains("text-bg-success"));
        assert_eq!(
            view.query_selector("strong").unwrap().unwrap().text_content().as_deref(),
            Some("Files")
        );
        assert_eq!(
            view.query_selector(".toast-body").unwrap().unwrap().text_content().as_deref(),
            Some("done")
        );
    }
}
