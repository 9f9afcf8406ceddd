//! Interaction helpers: enable / disable, delayed focus, list insertion.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::component::{Component, Mountable};
use crate::constants::{CARET_END_OFFSET, DEFAULT_FOCUS_DELAY_MS};
use crate::dom_utils;

/// What `enable` / `disable` act on: a component, or a CSS selector for the
/// cases where the element is only known at runtime.
#[derive(Debug, Clone, Copy)]
pub enum ControlTarget<'a> {
    Element(&'a Element),
    Selector(&'a str),
}

impl<'a> From<&'a Component> for ControlTarget<'a> {
    fn from(c: &'a Component) -> Self {
        ControlTarget::Element(c.view())
    }
}

impl<'a> From<&'a Element> for ControlTarget<'a> {
    fn from(e: &'a Element) -> Self {
        ControlTarget::Element(e)
    }
}

impl<'a> From<&'a str> for ControlTarget<'a> {
    fn from(s: &'a str) -> Self {
        ControlTarget::Selector(s)
    }
}

impl<'a> ControlTarget<'a> {
    fn resolve(self) -> Option<Element> {
        match self {
            ControlTarget::Element(e) => Some(e.clone()),
            ControlTarget::Selector(s) => dom_utils::document().query_selector(s).ok().flatten(),
        }
    }
}

/// How an element is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableMechanism {
    /// Native `disabled` property.
    DisabledProperty,
    /// `pointer-events: none` – links and icons have no `disabled`.
    PointerEvents,
}

/// Form controls use the native property, everything else pointer events.
pub fn disable_mechanism(node_name: &str) -> DisableMechanism {
    match node_name.to_ascii_uppercase().as_str() {
        "BUTTON" | "INPUT" | "SELECT" | "TEXTAREA" => DisableMechanism::DisabledProperty,
        _ => DisableMechanism::PointerEvents,
    }
}

fn set_enabled(el: &Element, enabled: bool) -> Result<(), JsValue> {
    match disable_mechanism(&el.node_name()) {
        DisableMechanism::DisabledProperty => {
            js_sys::Reflect::set(el, &JsValue::from_str("disabled"), &JsValue::from_bool(!enabled))?;
        }
        DisableMechanism::PointerEvents => {
            dom_utils::set_css(el, "pointer-events", if enabled { "auto" } else { "none" })?;
        }
    }
    Ok(())
}

/// Switch a control off. Unknown selectors are a no-op.
pub fn disable<'a>(target: impl Into<ControlTarget<'a>>) {
    if let Some(el) = target.into().resolve() {
        if let Err(e) = set_enabled(&el, false) {
            log::warn!("disable failed: {:?}", e);
        }
    }
}

/// Switch a control back on.
pub fn enable<'a>(target: impl Into<ControlTarget<'a>>) {
    if let Some(el) = target.into().resolve() {
        if let Err(e) = set_enabled(&el, true) {
            log::warn!("enable failed: {:?}", e);
        }
    }
}

/// Focus after the default 300 ms so fade-in animations finish first.
pub fn focus(target: &dyn Mountable) {
    focus_after(target, DEFAULT_FOCUS_DELAY_MS);
}

/// Focus `target` after `delay_ms` and move the caret to the end.
pub fn focus_after(target: &dyn Mountable, delay_ms: u32) {
    let el = target.view().clone();
    Timeout::new(delay_ms, move || focus_now(&el)).forget();
}

fn focus_now(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
    // Number / checkbox inputs throw on selection ranges; ignore that.
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        let _ = input.set_selection_range(CARET_END_OFFSET, CARET_END_OFFSET);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        let _ = area.set_selection_range(CARET_END_OFFSET, CARET_END_OFFSET);
    }
}

/// Append each item to `list`, then run its `init()`.
pub fn append_to_list<T, I>(list: &dyn Mountable, items: I) -> Result<(), JsValue>
where
    T: Mountable,
    I: IntoIterator<Item = T>,
{
    for item in items {
        list.view().append_child(item.view())?;
        item.init();
    }
    Ok(())
}

/// Prepend each item to `list`, then run its `init()`. Items end up in
/// reverse order, the last one on top.
pub fn prepend_to_list<T, I>(list: &dyn Mountable, items: I) -> Result<(), JsValue>
where
    T: Mountable,
    I: IntoIterator<Item = T>,
{
    for item in items {
        list.view().prepend_with_node_1(item.view())?;
        item.init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_controls_use_disabled_property() {
        for name in ["BUTTON", "INPUT", "button", "SELECT", "TEXTAREA"] {
            assert_eq!(disable_mechanism(name), DisableMechanism::DisabledProperty);
        }
    }

    #[test]
    fn other_elements_use_pointer_events() {
        for name in ["A", "SPAN", "DIV", "I", "LI"] {
            assert_eq!(disable_mechanism(name), DisableMechanism::PointerEvents);
        }
    }
}
