//! Alert banner: a container of dismissible messages, newest first.

use std::fmt;
use std::str::FromStr;

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::component::{m, span, Component, ComponentOptions, Mountable};
use crate::constants::{ATTR_ARIA_LABEL, ATTR_BS_DISMISS, ATTR_ROLE, ATTR_TYPE, BUTTON_TYPE_BUTTON, CSS_BTN_CLOSE};
use crate::dom_utils;
use crate::utils;

/// Message severity. The eight Bootstrap contextual colours plus anything
/// else, which is forwarded verbatim into the class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
    Custom(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Primary => "primary",
            Severity::Secondary => "secondary",
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Light => "light",
            Severity::Dark => "dark",
            Severity::Custom(s) => s,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "primary" => Severity::Primary,
            "secondary" => Severity::Secondary,
            "success" => Severity::Success,
            "danger" => Severity::Danger,
            "warning" => Severity::Warning,
            "info" => Severity::Info,
            "light" => Severity::Light,
            "dark" => Severity::Dark,
            other => Severity::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(sev) => sev,
            Err(never) => match never {},
        }
    }
}

/// Class list of one message block.
pub fn message_classes(severity: &Severity) -> String {
    format!("alert alert-{} alert-dismissible fade show my-1", severity)
}

/// Prefix `msg` with the current `HH:MM:SS` time.
pub fn timestamped(msg: &str) -> String {
    format!("{} {}", utils::now_hms(), msg)
}

/// Anything that can display an error/status message. The HTTP helpers
/// report failures through this.
pub trait AlertSink {
    fn insert_message(&self, severity: Severity, msg: &str);
}

/// Page- or item-scoped alert banner.
#[derive(Debug, Clone)]
pub struct Alert {
    comp: Component,
}

impl Alert {
    pub fn new() -> Result<Self, JsValue> {
        Self::with_id(None)
    }

    pub fn with_id(id: Option<&str>) -> Result<Self, JsValue> {
        let comp = Component::with_options("div", ComponentOptions::new().maybe_id(id))?;
        Ok(Self { comp })
    }

    pub fn component(&self) -> &Component {
        &self.comp
    }

    /// Prepend an arbitrary node.
    pub fn insert_element(&self, node: &Element) -> &Self {
        if let Err(e) = self.comp.view().prepend_with_node_1(node) {
            log::error!("failed to insert alert node: {:?}", e);
        }
        self
    }

    /// Prepend a timestamped message.
    pub fn insert(&self, severity: impl Into<Severity>, msg: &str) -> &Self {
        self.insert_with(severity.into(), msg, true)
    }

    /// Prepend a message without the time prefix.
    pub fn insert_untimed(&self, severity: impl Into<Severity>, msg: &str) -> &Self {
        self.insert_with(severity.into(), msg, false)
    }

    fn insert_with(&self, severity: Severity, msg: &str, prefix_time: bool) -> &Self {
        let msg = if prefix_time { timestamped(msg) } else { msg.to_string() };
        if severity == Severity::Danger {
            log::error!("{}", msg);
        }
        match build_message(&severity, &msg) {
            Ok(block) => {
                self.insert_element(&block);
            }
            Err(e) => log::error!("failed to render alert message: {:?}", e),
        }
        self
    }

    /// Remove every message.
    pub fn clear(&self) -> &Self {
        dom_utils::clear_children(self.comp.view());
        self
    }

    /// Number of message blocks currently shown.
    pub fn len(&self) -> u32 {
        self.comp.view().child_element_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn show(&self) {
        self.comp.show();
    }

    pub fn hide(&self) {
        self.comp.hide();
    }
}

impl Mountable for Alert {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

impl AlertSink for Alert {
    fn insert_message(&self, severity: Severity, msg: &str) {
        self.insert(severity, msg);
    }
}

fn build_message(severity: &Severity, msg: &str) -> Result<Element, JsValue> {
    let dismiss = m("button")?;
    dismiss.set_class_name(CSS_BTN_CLOSE);
    dismiss.set_attribute(ATTR_TYPE, BUTTON_TYPE_BUTTON)?;
    dismiss.set_attribute(ATTR_BS_DISMISS, "alert")?;
    dismiss.set_attribute(ATTR_ARIA_LABEL, "Close")?;

    let block = m("div")?;
    block.set_class_name(&message_classes(severity));
    block.set_attribute(ATTR_ROLE, "alert")?;
    let child = span(msg)?;
    block.append_child(&child)?;
    block.append_child(&dismiss)?;
    Ok(block)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_severities_parse_and_render() {
        for name in ["primary", "secondary", "success", "danger", "warning", "info", "light", "dark"] {
            let sev = Severity::from(name);
            assert!(!matches!(sev, Severity::Custom(_)));
            assert_eq!(sev.as_str(), name);
        }
        assert_eq!(
            message_classes(&Severity::Danger),
            "alert alert-danger alert-dismissible fade show my-1"
        );
    }

    #[test]
    fn timestamp_prefix_is_clock_time() {
        let msg = timestamped("hello");
        let (time, rest) = msg.split_once(' ').unwrap();
        assert_eq!(rest, "hello");
        assert_eq!(time.len(), 8);
        assert_eq!(time.matches(':').count(), 2);
    }

    proptest! {
        #[test]
        fn unknown_severity_is_forwarded_verbatim(name in "[a-z]{1,12}") {
            let sev = Severity::from(name.as_str());
            prop_assert_eq!(sev.as_str(), name.as_str());
            let expected = format!("alert-{}", name);
            prop_assert!(message_classes(&sev).contains(&expected));
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn texts(alert: &Alert) -> Vec<String> {
        let children = alert.view().children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter_map(|el| el.query_selector("span").ok().flatten())
            .filter_map(|s| s.text_content())
            .collect()
    }

    #[wasm_bindgen_test]
    fn insert_prepends_most_recent_first() {
        let alert = Alert::new().unwrap();
        alert.insert_untimed("info", "first");
        alert.insert_untimed("warning", "second");
        assert_eq!(texts(&alert), vec!["second".to_string(), "first".to_string()]);

        let newest = alert.view().first_element_child().unwrap();
        assert!(newest.class_list().contains("alert-warning"));
        assert!(newest.query_selector(".btn-close").unwrap().is_some());
    }

    #[wasm_bindgen_test]
    fn clear_empties_the_container() {
        let alert = Alert::new().unwrap();
        alert.insert("danger", "boom").insert("success", "ok");
        assert_eq!(alert.len(), 2);
        alert.clear();
        assert!(alert.is_empty());
        alert.clear().insert("success", "again");
        assert_eq!(alert.len(), 1);
    }

    #[wasm_bindgen_test]
    fn invalid_severity_renders_unstyled_class() {
        let alert = Alert::new().unwrap();
        alert.insert_untimed("nonsense", "x");
        let block = alert.view().first_element_child().unwrap();
        assert!(block.class_list().contains("alert-nonsense"));
    }

    #[wasm_bindgen_test]
    fn insert_element_prepends_raw_nodes() {
        let alert = Alert::new().unwrap();
        alert.insert_untimed("info", "text");
        let node = crate::component::el("p", "rich", "rich content").unwrap();
        alert.insert_element(&node);
        assert!(alert
            .view()
            .first_element_child()
            .unwrap()
            .class_list()
            .contains("rich"));
    }

    #[wasm_bindgen_test]
    fn rejected_node_leaves_alert_unchanged() {
        let alert = Alert::new().unwrap();
        alert.insert_untimed("info", "kept");
        // A node cannot be inserted into itself; the DOM error is logged.
        alert.insert_element(alert.view());
        assert_eq!(alert.len(), 1);
    }
}
