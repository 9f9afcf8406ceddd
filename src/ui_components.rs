//! Reusable widget factories: buttons, typed inputs, textareas, form
//! controls, links.
//!
//! Inputs come back as typed wrappers so callers read `i64` / `bool` /
//! `String` instead of raw DOM strings.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};

use crate::component::{el, m, Component, ComponentOptions, Mountable};
use crate::components::Body;
use crate::constants::*;

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// `btn btn-<color>` button. `color` is any Bootstrap colour or `link`.
pub fn create_button(name: &str, color: &str, button_type: &str) -> Result<Component, JsValue> {
    Component::with_options(
        "button",
        ComponentOptions::new()
            .text(name)
            .classes(format!("btn btn-{}", color))
            .attr(ATTR_TYPE, button_type),
    )
}

pub fn create_primary_button(name: &str) -> Result<Component, JsValue> {
    create_button(name, "primary", BUTTON_TYPE_BUTTON)
}

/// Hidden submit button that swallows the Enter key so forms never submit
/// on their own.
pub fn hidden_submit_button() -> Result<Element, JsValue> {
    let btn = el("button", "", "submit")?;
    btn.set_attribute(ATTR_TYPE, BUTTON_TYPE_SUBMIT)?;
    crate::dom_utils::hide(&btn);
    crate::dom_utils::on_click(&btn, || {})?;
    Ok(btn)
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Search,
    Password,
    Number,
    Checkbox,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Search => "search",
            InputType::Password => "password",
            InputType::Number => "number",
            InputType::Checkbox => "checkbox",
        }
    }

    fn classes(self) -> &'static str {
        match self {
            InputType::Checkbox => CSS_FORM_CHECK_INPUT,
            _ => CSS_FORM_CONTROL,
        }
    }
}

/// Parse the content of a number input. Blank or non-integer → `None`.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn input_component(kind: InputType, required: bool, id: Option<&str>) -> Result<Component, JsValue> {
    Component::with_options(
        "input",
        ComponentOptions::new()
            .maybe_id(id)
            .classes(kind.classes())
            .attr(ATTR_TYPE, kind.as_str())
            .prop("required", required),
    )
}

fn as_input(comp: &Component) -> &HtmlInputElement {
    comp.view().unchecked_ref::<HtmlInputElement>()
}

/// Text, search and password inputs.
#[derive(Debug, Clone)]
pub struct TextInput {
    comp: Component,
}

impl TextInput {
    pub fn new(kind: InputType, required: bool, id: Option<&str>) -> Result<Self, JsValue> {
        Ok(Self { comp: input_component(kind, required, id)? })
    }

    pub fn text() -> Result<Self, JsValue> {
        Self::new(InputType::Text, false, None)
    }

    pub fn value(&self) -> String {
        as_input(&self.comp).value()
    }

    pub fn trimmed_value(&self) -> String {
        self.value().trim().to_string()
    }

    pub fn set_value(&self, value: &str) {
        as_input(&self.comp).set_value(value);
    }

    pub fn component(&self) -> &Component {
        &self.comp
    }
}

/// `type=number` input with integer accessors.
#[derive(Debug, Clone)]
pub struct NumberInput {
    comp: Component,
}

impl NumberInput {
    pub fn new(required: bool, id: Option<&str>) -> Result<Self, JsValue> {
        Ok(Self { comp: input_component(InputType::Number, required, id)? })
    }

    pub fn int_value(&self) -> Option<i64> {
        parse_int(&as_input(&self.comp).value())
    }

    pub fn set_int_value(&self, value: i64) {
        as_input(&self.comp).set_value(&value.to_string());
    }

    pub fn component(&self) -> &Component {
        &self.comp
    }
}

/// Checkbox (or radio) input with boolean accessors.
#[derive(Debug, Clone)]
pub struct CheckboxInput {
    comp: Component,
}

impl CheckboxInput {
    pub fn new(id: Option<&str>) -> Result<Self, JsValue> {
        Ok(Self { comp: input_component(InputType::Checkbox, false, id)? })
    }

    /// Radio button belonging to group `name`.
    pub fn radio(name: &str, value: &str) -> Result<Self, JsValue> {
        let comp = Component::with_options(
            "input",
            ComponentOptions::new()
                .classes(CSS_FORM_CHECK_INPUT)
                .attrs(attrs! { ATTR_TYPE => "radio", "name" => name, "value" => value }),
        )?;
        Ok(Self { comp })
    }

    pub fn is_checked(&self) -> bool {
        as_input(&self.comp).checked()
    }

    pub fn set_checked(&self, checked: bool) {
        as_input(&self.comp).set_checked(checked);
    }

    pub fn component(&self) -> &Component {
        &self.comp
    }
}

/// Result of [`create_input`], specialised by the declared type.
#[derive(Debug, Clone)]
pub enum Input {
    Text(TextInput),
    Number(NumberInput),
    Checkbox(CheckboxInput),
}

/// Create an input whose accessors match `kind`.
pub fn create_input(kind: InputType, required: bool, id: Option<&str>) -> Result<Input, JsValue> {
    Ok(match kind {
        InputType::Number => Input::Number(NumberInput::new(required, id)?),
        InputType::Checkbox => Input::Checkbox(CheckboxInput::new(id)?),
        InputType::Text | InputType::Search | InputType::Password => {
            Input::Text(TextInput::new(kind, required, id)?)
        }
    })
}

impl Input {
    pub fn component(&self) -> &Component {
        match self {
            Input::Text(i) => i.component(),
            Input::Number(i) => i.component(),
            Input::Checkbox(i) => i.component(),
        }
    }
}

macro_rules! mountable_via_component {
    ($($ty:ty),+) => {
        $(impl Mountable for $ty {
            fn view(&self) -> &Element {
                self.component().view()
            }
        })+
    };
}

mountable_via_component!(TextInput, NumberInput, CheckboxInput, Input, Textarea);

// ---------------------------------------------------------------------------
// Textarea
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Textarea {
    comp: Component,
}

impl Textarea {
    pub fn value(&self) -> String {
        self.comp.view().unchecked_ref::<HtmlTextAreaElement>().value()
    }

    pub fn trimmed_value(&self) -> String {
        self.value().trim().to_string()
    }

    pub fn set_value(&self, value: &str) {
        self.comp.view().unchecked_ref::<HtmlTextAreaElement>().set_value(value);
    }

    pub fn component(&self) -> &Component {
        &self.comp
    }
}

/// `rows` defaults to 3.
pub fn create_textarea(rows: Option<u32>, id: Option<&str>) -> Result<Textarea, JsValue> {
    let comp = Component::with_options(
        "textarea",
        ComponentOptions::new()
            .maybe_id(id)
            .classes(CSS_FORM_CONTROL)
            .attr("rows", rows.unwrap_or(DEFAULT_TEXTAREA_ROWS)),
    )?;
    Ok(Textarea { comp })
}

// ---------------------------------------------------------------------------
// Form wrappers
// ---------------------------------------------------------------------------

/// Label + control + optional description, wrapped in `div.<classes>`
/// (`mb-3` by default).
pub fn create_form_control(
    control: &dyn Mountable,
    label_text: &str,
    description: Option<Body>,
    classes: Option<&str>,
) -> Result<Element, JsValue> {
    let wrapper = el("div", classes.unwrap_or(DEFAULT_FORM_CONTROL_CLASSES), "")?;
    let label = el("label", CSS_FORM_LABEL, label_text)?;
    label.set_attribute("for", &control.view().id())?;
    wrapper.append_child(&label)?;
    wrapper.append_child(control.view())?;

    match description {
        Some(Body::Text(text)) => {
            let child = el("div", CSS_FORM_TEXT, &text)?;
            wrapper.append_child(&child)?;
        }
        Some(Body::Element(node)) => {
            wrapper.append_child(&node)?;
        }
        None => {}
    }
    Ok(wrapper)
}

/// `div.form-check` with the check input followed by its label.
pub fn create_form_check(input: &CheckboxInput, label_text: &str) -> Result<Element, JsValue> {
    let wrapper = el("div", CSS_FORM_CHECK, "")?;
    wrapper.append_child(input.view())?;
    let label = el("label", CSS_FORM_CHECK_LABEL, label_text)?;
    label.set_attribute("for", input.component().raw_id())?;
    wrapper.append_child(&label)?;
    Ok(wrapper)
}

// ---------------------------------------------------------------------------
// Links & ids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    /// Falls back to `href`.
    pub text: Option<String>,
    pub title: Option<String>,
    pub blank: bool,
}

impl LinkOptions {
    pub fn text(text: &str) -> Self {
        Self { text: Some(text.to_string()), ..Default::default() }
    }
}

pub fn create_link(href: &str, options: LinkOptions) -> Result<Element, JsValue> {
    let link = m("a")?;
    let text = options.text.as_deref().filter(|t| !t.is_empty()).unwrap_or(href);
    crate::dom_utils::set_text(&link, text);
    link.set_attribute("href", href)?;
    if let Some(title) = &options.title {
        link.set_attribute("title", title)?;
    }
    if options.blank {
        link.set_attribute("target", "_blank")?;
    }
    Ok(link)
}

/// DOM ids may not start with a digit; prefix them (`"e"` by default).
pub fn elem_id(id: &str, prefix: Option<&str>) -> String {
    format!("{}{}", prefix.unwrap_or(DEFAULT_ELEM_ID_PREFIX), id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_accepts_trimmed_integers_only() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" -7 "), Some(-7));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int("abc"), None);
    }

    #[test]
    fn input_type_names() {
        assert_eq!(InputType::default().as_str(), "text");
        assert_eq!(InputType::Password.as_str(), "password");
        assert_eq!(InputType::Checkbox.classes(), "form-check-input");
        assert_eq!(InputType::Search.classes(), "form-control");
    }

    #[test]
    fn elem_ids_are_prefixed() {
        assert_eq!(elem_id("123", None), "e123");
        assert_eq!(elem_id("abc", Some("B-")), "B-abc");
    }
}
