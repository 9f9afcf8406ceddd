//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Exposes small, **ergonomic** wrappers for common show / hide / class / css
//! patterns without sprinkling `set_attribute("style", …)` calls across the
//! code-base.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::constants::CSS_HIDDEN;

/// The global `window`. A page without one cannot run this crate at all.
pub fn window() -> Window {
    web_sys::window().expect("no global `window` exists")
}

/// The global `document`.
pub fn document() -> Document {
    window()
        .document()
        .expect("should have a document on window")
}

/// Visible unless the Bootstrap `d-none` utility class is present.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1(CSS_HIDDEN);
}

/// Hide the element by toggling the `d-none` class.
pub fn hide(el: &Element) {
    let _ = el.class_list().add_1(CSS_HIDDEN);
}

pub fn is_hidden(el: &Element) -> bool {
    el.class_list().contains(CSS_HIDDEN)
}

/// Add a whitespace separated list of classes (`"btn btn-primary"`).
pub fn add_classes(el: &Element, classes: &str) -> Result<(), JsValue> {
    for class in split_classes(classes) {
        el.class_list().add_1(class)?;
    }
    Ok(())
}

/// Replace the full class attribute.
pub fn set_classes(el: &Element, classes: &str) {
    el.set_class_name(classes);
}

/// Set one inline CSS property. Non-HTML elements (SVG etc.) are ignored.
pub fn set_css(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

pub fn css_value(el: &Element, property: &str) -> Option<String> {
    el.dyn_ref::<HtmlElement>()
        .and_then(|html| html.style().get_property_value(property).ok())
        .filter(|v| !v.is_empty())
}

/// Set text content; the text is never parsed as HTML.
pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Remove every child node.
pub fn clear_children(el: &Element) {
    while let Some(child) = el.first_child() {
        let _ = el.remove_child(&child);
    }
}

/// Remove every element matching `selector` inside `el`.
pub fn remove_all(el: &Element, selector: &str) -> Result<(), JsValue> {
    let nodes = el.query_selector_all(selector)?;
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            if let Some(parent) = node.parent_node() {
                parent.remove_child(&node)?;
            }
        }
    }
    Ok(())
}

/// Set `document.title`.
pub fn set_title(title: &str) {
    document().set_title(title);
}

/// Register a click handler that suppresses the default action (link
/// navigation, form submission) before running `handler`.
pub fn on_click<F>(el: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let cb = wasm_bindgen::closure::Closure::wrap(Box::new(move |event: web_sys::Event| {
        event.prevent_default();
        handler();
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Register a `change` handler.
pub fn on_change<F>(el: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    on_event(el, "change", handler)
}

/// Register a handler for any event name, including Bootstrap's
/// namespaced ones (`hidden.bs.offcanvas`).
pub fn on_event<F>(el: &Element, name: &str, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let cb = wasm_bindgen::closure::Closure::wrap(Box::new(move |_event: web_sys::Event| {
        handler();
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Iterate the class names in a whitespace separated list.
pub fn split_classes(classes: &str) -> impl Iterator<Item = &str> {
    classes.split_whitespace()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_classes_ignores_extra_whitespace() {
        let classes: Vec<&str> = split_classes("  btn  btn-primary\tmy-1 ").collect();
        assert_eq!(classes, vec!["btn", "btn-primary", "my-1"]);
        assert_eq!(split_classes("").count(), 0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn show_hide_toggle_only_the_hidden_class() {
        let el = document().create_element("div").unwrap();
        el.set_class_name("card");
        hide(&el);
        assert!(is_hidden(&el));
        show(&el);
        assert!(!is_hidden(&el));
        assert!(el.class_list().contains("card"));
    }

    #[wasm_bindgen_test]
    fn remove_all_drops_matching_descendants() {
        let el = document().create_element("div").unwrap();
        el.set_inner_html("<p class='x'></p><p></p><span class='x'></span>");
        remove_all(&el, ".x").unwrap();
        assert_eq!(el.child_element_count(), 1);
    }
}
