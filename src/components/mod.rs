pub mod alert;
pub mod bootstrap;
pub mod loading;
pub mod modal;
pub mod page_nav;
pub mod same_name;
pub mod toast;

pub use alert::{Alert, AlertSink, Severity};
pub use loading::{Loading, SpinnerSize};

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::component::el;

/// Widget content: plain text (wrapped in a text-only element) or a node.
#[derive(Debug, Clone)]
pub enum Body {
    Text(String),
    Element(Element),
}

impl Body {
    /// Text becomes `<wrapper>` with text content; elements pass through.
    pub fn into_element(self, wrapper: &str) -> Result<Element, JsValue> {
        match self {
            Body::Text(text) => el(wrapper, "", &text),
            Body::Element(node) => Ok(node),
        }
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<Element> for Body {
    fn from(node: Element) -> Self {
        Body::Element(node)
    }
}
