//! Element / component builder.
//!
//! A [`Component`] is an element plus an id plus an optional `init` hook.
//! Components are declared in one expression through [`ComponentOptions`]:
//!
//! ```rust,ignore
//! let list = Component::with_options(
//!     "ul",
//!     ComponentOptions::new().classes("list-group list-group-flush"),
//! )?;
//! let item = Component::with_options("li", ComponentOptions::new().text("hello"))?;
//! controls::append_to_list(&list, [item])?;
//! ```
//!
//! The element handle is retained by the component itself, so callers never
//! need to go back through a CSS selector to reach the node.

use std::fmt;
use std::rc::Rc;

use rand::Rng;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::constants::{RANDOM_ID_MAX, RANDOM_ID_PREFIX};
use crate::dom_utils;

/// Anything that owns one DOM element and may run code once it is attached.
pub trait Mountable {
    /// The underlying element. Always the same node for a given value.
    fn view(&self) -> &Element;

    /// Lifecycle hook run right after the element has been inserted into
    /// its parent. No-op by default.
    fn init(&self) {}
}

/// Either a tag name or something that already owns an element.
pub trait ElementSource {
    fn to_element(self) -> Result<Element, JsValue>;
}

impl ElementSource for &str {
    fn to_element(self) -> Result<Element, JsValue> {
        dom_utils::document().create_element(self)
    }
}

impl<T: Mountable + ?Sized> ElementSource for &T {
    fn to_element(self) -> Result<Element, JsValue> {
        Ok(self.view().clone())
    }
}

/// Create a new element from a tag name, or return the element owned by a
/// component. For a component every call yields a handle to the same node.
pub fn make_element(source: impl ElementSource) -> Result<Element, JsValue> {
    source.to_element()
}

/// Shorthand for [`make_element`] with a tag name.
pub fn m(tag: &str) -> Result<Element, JsValue> {
    make_element(tag)
}

/// A `<span>` holding `text`. Text is never parsed as HTML.
pub fn span(text: &str) -> Result<Element, JsValue> {
    let el = m("span")?;
    dom_utils::set_text(&el, text);
    Ok(el)
}

/// Create `tag` with classes and text in one go.
pub fn el(tag: &str, classes: &str, text: &str) -> Result<Element, JsValue> {
    let el = m(tag)?;
    if !classes.is_empty() {
        dom_utils::add_classes(&el, classes)?;
    }
    if !text.is_empty() {
        dom_utils::set_text(&el, text);
    }
    Ok(el)
}

/// Append every child in order.
pub fn append_all(parent: &Element, children: &[Element]) -> Result<(), JsValue> {
    for child in children {
        parent.append_child(child)?;
    }
    Ok(())
}

/// Random `r<number>` id. Collisions are possible but unlikely.
pub fn random_id() -> String {
    let n = rand::thread_rng().gen_range(0..=RANDOM_ID_MAX);
    format!("{}{}", RANDOM_ID_PREFIX, n)
}

/// Value written through `element[name] = value`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Bool(bool),
    Text(String),
    Number(f64),
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Text(v.to_string())
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Number(v)
    }
}

impl From<&PropValue> for JsValue {
    fn from(v: &PropValue) -> Self {
        match v {
            PropValue::Bool(b) => JsValue::from_bool(*b),
            PropValue::Text(s) => JsValue::from_str(s),
            PropValue::Number(n) => JsValue::from_f64(*n),
        }
    }
}

/// Initial content of a component: plain text or child elements, never both.
#[derive(Debug, Clone)]
pub enum Content {
    Text(String),
    Children(Vec<Element>),
}

/// Declarative construction options. Every field is optional; the last of
/// `text` / `children` that is set wins.
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    pub id: Option<String>,
    pub content: Option<Content>,
    pub classes: Option<String>,
    pub css: Vec<(String, String)>,
    pub attr: Vec<(String, String)>,
    pub prop: Vec<(String, PropValue)>,
}

impl ComponentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit id. Empty ids are ignored so a random one is kept.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() {
            self.id = Some(id);
        }
        self
    }

    pub fn maybe_id(self, id: Option<&str>) -> Self {
        match id {
            Some(id) => self.id(id),
            None => self,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.content = Some(Content::Text(text));
        }
        self
    }

    pub fn children(mut self, children: Vec<Element>) -> Self {
        self.content = Some(Content::Children(children));
        self
    }

    pub fn classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    pub fn css(mut self, property: &str, value: &str) -> Self {
        self.css.push((property.to_string(), value.to_string()));
        self
    }

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attr.push((name.to_string(), value.to_string()));
        self
    }

    /// Append several attributes, e.g. from the `attrs!` macro.
    pub fn attrs(mut self, attrs: Vec<(String, String)>) -> Self {
        self.attr.extend(attrs);
        self
    }

    pub fn prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.prop.push((name.to_string(), value.into()));
        self
    }
}

type InitHook = Rc<dyn Fn(&Component)>;

/// An element with an id and an optional lifecycle hook.
#[derive(Clone)]
pub struct Component {
    raw_id: String,
    element: Element,
    init_hook: Option<InitHook>,
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("raw_id", &self.raw_id)
            .field("has_init", &self.init_hook.is_some())
            .finish()
    }
}

impl Component {
    /// `tag` with a random id and nothing else.
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Self::with_options(tag, ComponentOptions::default())
    }

    /// `tag` built from `options`: attributes, properties, css, classes and
    /// then the content.
    pub fn with_options(tag: &str, options: ComponentOptions) -> Result<Self, JsValue> {
        let raw_id = options.id.clone().unwrap_or_else(random_id);
        let element = m(tag)?;
        element.set_id(&raw_id);

        for (name, value) in &options.attr {
            element.set_attribute(name, value)?;
        }
        for (name, value) in &options.prop {
            js_sys::Reflect::set(&element, &JsValue::from_str(name), &JsValue::from(value))?;
        }
        for (property, value) in &options.css {
            dom_utils::set_css(&element, property, value)?;
        }
        if let Some(classes) = &options.classes {
            dom_utils::add_classes(&element, classes)?;
        }
        match options.content {
            Some(Content::Text(text)) => dom_utils::set_text(&element, &text),
            Some(Content::Children(children)) => append_all(&element, &children)?,
            None => {}
        }

        Ok(Self {
            raw_id,
            element,
            init_hook: None,
        })
    }

    /// CSS selector for this component (`#<raw_id>`).
    pub fn id(&self) -> String {
        format!("#{}", self.raw_id)
    }

    pub fn raw_id(&self) -> &str {
        &self.raw_id
    }

    /// Live handle to the underlying node.
    pub fn element(&self) -> Element {
        self.element.clone()
    }

    /// First descendant matching `selector`.
    pub fn find(&self, selector: &str) -> Option<Element> {
        self.element.query_selector(selector).ok().flatten()
    }

    pub fn show(&self) {
        dom_utils::show(&self.element);
    }

    pub fn hide(&self) {
        dom_utils::hide(&self.element);
    }

    pub fn is_hidden(&self) -> bool {
        dom_utils::is_hidden(&self.element)
    }

    /// Builder-style `hide()` for components that start out hidden.
    pub fn hidden(self) -> Self {
        self.hide();
        self
    }

    /// Add classes after construction (`m(comp).addClass(...)`).
    pub fn add_classes(&self, classes: &str) -> Result<&Self, JsValue> {
        dom_utils::add_classes(&self.element, classes)?;
        Ok(self)
    }

    pub fn set_text(&self, text: &str) {
        dom_utils::set_text(&self.element, text);
    }

    /// Install the hook run by [`Mountable::init`].
    pub fn on_init<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Component) + 'static,
    {
        self.init_hook = Some(Rc::new(hook));
        self
    }
}

impl Mountable for Component {
    fn view(&self) -> &Element {
        &self.element
    }

    fn init(&self) {
        if let Some(hook) = &self.init_hook {
            hook(self);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_have_prefix_and_range() {
        for _ in 0..100 {
            let id = random_id();
            assert!(id.starts_with(RANDOM_ID_PREFIX));
            let n: u32 = id[RANDOM_ID_PREFIX.len()..].parse().unwrap();
            assert!(n <= RANDOM_ID_MAX);
        }
    }

    #[test]
    fn options_keep_last_content_and_ignore_empty_values() {
        let opts = ComponentOptions::new().children(Vec::new()).text("hello");
        assert!(matches!(opts.content, Some(Content::Text(ref t)) if t == "hello"));

        let opts = ComponentOptions::new().text("hello").children(Vec::new());
        assert!(matches!(opts.content, Some(Content::Children(ref c)) if c.is_empty()));

        let opts = ComponentOptions::new().id("").text("");
        assert!(opts.id.is_none());
        assert!(opts.content.is_none());
    }

    #[test]
    fn options_collect_attributes_in_order() {
        let opts = ComponentOptions::new()
            .attr("type", "button")
            .attrs(attrs! { "rows" => 3 })
            .prop("required", true)
            .css("cursor", "pointer")
            .maybe_id(Some("login-btn"));
        assert_eq!(opts.id.as_deref(), Some("login-btn"));
        assert_eq!(opts.attr[0], ("type".to_string(), "button".to_string()));
        assert_eq!(opts.attr[1], ("rows".to_string(), "3".to_string()));
        assert_eq!(opts.prop[0].1, PropValue::Bool(true));
        assert_eq!(opts.css.len(), 1);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn element_handles_refer_to_the_same_node() {
        let comp = Component::new("div").unwrap();
        let a = comp.element();
        let b = comp.element();
        assert!(a.is_same_node(Some(&b)));
        let c = make_element(&comp).unwrap();
        assert!(c.is_same_node(Some(&a)));
    }

    #[wasm_bindgen_test]
    fn make_element_with_tag_creates_fresh_nodes() {
        let a = make_element("p").unwrap();
        let b = make_element("p").unwrap();
        assert_eq!(a.tag_name(), "P");
        assert!(!a.is_same_node(Some(&b)));
    }

    #[wasm_bindgen_test]
    fn options_are_applied_to_the_element() {
        let comp = Component::with_options(
            "button",
            ComponentOptions::new()
                .id("save")
                .classes("btn btn-primary")
                .attr("type", "button")
                .prop("disabled", true)
                .text("<b>Save</b>"),
        )
        .unwrap();
        assert_eq!(comp.id(), "#save");
        assert_eq!(comp.raw_id(), "save");
        let el = comp.element();
        assert_eq!(el.id(), "save");
        assert!(el.class_list().contains("btn-primary"));
        assert_eq!(el.get_attribute("type").as_deref(), Some("button"));
        assert!(el.has_attribute("disabled"));
        // Text is never parsed as markup.
        assert_eq!(el.child_element_count(), 0);
        assert_eq!(el.text_content().as_deref(), Some("<b>Save</b>"));
    }

    #[wasm_bindgen_test]
    fn children_find_and_visibility() {
        let child = el("span", "label", "hi").unwrap();
        let comp =
            Component::with_options("div", ComponentOptions::new().children(vec![child])).unwrap();
        assert!(comp.find(".label").is_some());
        assert!(comp.find(".missing").is_none());
        comp.hide();
        assert!(comp.is_hidden());
        comp.show();
        assert!(!comp.is_hidden());
    }

    #[wasm_bindgen_test]
    fn init_is_noop_by_default_and_runs_installed_hook() {
        Component::new("div").unwrap().init();

        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let comp = Component::new("div")
            .unwrap()
            .on_init(move |_| seen.set(seen.get() + 1));
        comp.init();
        assert_eq!(calls.get(), 1);
    }
}
