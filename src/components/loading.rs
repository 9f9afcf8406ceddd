//! Loading spinner shown while a request is pending.

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::component::{el, Component, ComponentOptions, Mountable};
use crate::constants::{ATTR_ROLE, DEFAULT_LOADING_CLASSES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl SpinnerSize {
    fn spinner_classes(self) -> &'static str {
        match self {
            SpinnerSize::Small => "spinner-border spinner-border-sm",
            SpinnerSize::Normal | SpinnerSize::Large => "spinner-border",
        }
    }

    /// Inline size for the large variant; Bootstrap has no class for it.
    fn inline_size(self) -> Option<&'static str> {
        match self {
            SpinnerSize::Large => Some("3rem"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Loading {
    comp: Component,
}

impl Loading {
    /// `classes` is the outer alignment, `text-center` when `None`.
    pub fn new(id: Option<&str>, size: SpinnerSize, classes: Option<&str>) -> Result<Self, JsValue> {
        let spinner = el("div", size.spinner_classes(), "")?;
        spinner.set_attribute(ATTR_ROLE, "status")?;
        if let Some(px) = size.inline_size() {
            crate::dom_utils::set_css(&spinner, "width", px)?;
            crate::dom_utils::set_css(&spinner, "height", px)?;
        }
        let child = el("span", "visually-hidden", "Loading...")?;
        spinner.append_child(&child)?;

        let comp = Component::with_options(
            "div",
            ComponentOptions::new()
                .maybe_id(id)
                .classes(classes.unwrap_or(DEFAULT_LOADING_CLASSES))
                .children(vec![spinner]),
        )?;
        Ok(Self { comp })
    }

    pub fn large() -> Result<Self, JsValue> {
        Self::new(None, SpinnerSize::Large, None)
    }

    pub fn show(&self) {
        self.comp.show();
    }

    pub fn hide(&self) {
        self.comp.hide();
    }

    pub fn is_hidden(&self) -> bool {
        self.comp.is_hidden()
    }
}

impl Mountable for Loading {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_variants() {
        assert_eq!(SpinnerSize::default(), SpinnerSize::Normal);
        assert!(SpinnerSize::Small.spinner_classes().contains("spinner-border-sm"));
        assert_eq!(SpinnerSize::Normal.inline_size(), None);
        assert_eq!(SpinnerSize::Large.inline_size(), Some("3rem"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn spinner_markup_and_alignment() {
        let loading = Loading::new(Some("page-loading"), SpinnerSize::Small, Some("text-end")).unwrap();
        let view = loading.view();
        assert_eq!(view.id(), "page-loading");
        assert!(view.class_list().contains("text-end"));
        assert!(view.query_selector(".spinner-border-sm").unwrap().is_some());

        loading.hide();
        assert!(loading.is_hidden());
    }
}
