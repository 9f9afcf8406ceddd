//! Previous / this / next pagination bar.

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::component::{el, Component, ComponentOptions, Mountable};
use crate::dom_utils;

pub fn pagination_classes(size: Option<&str>, align: Option<&str>) -> String {
    let mut classes = String::from("pagination");
    if let Some(size) = size {
        classes.push_str(&format!(" pagination-{}", size));
    }
    if let Some(align) = align {
        classes.push_str(&format!(" justify-content-{}", align));
    }
    classes
}

#[derive(Debug, Clone)]
pub struct SimplePageNav {
    comp: Component,
    previous: Component,
    this_page: Component,
    next: Component,
}

impl SimplePageNav {
    /// `size` is `lg` / `sm`, `align` is `center` / `end`.
    pub fn new(size: Option<&str>, align: Option<&str>) -> Result<Self, JsValue> {
        let previous = Component::with_options("a", ComponentOptions::new().classes("page-link").attr("href", "#"))?;
        let this_page = Component::with_options(
            "a",
            ComponentOptions::new().classes("page-link disabled text-bg-light text-muted"),
        )?;
        let next = Component::with_options("a", ComponentOptions::new().classes("page-link").attr("href", "#"))?;

        let ul = el("ul", &pagination_classes(size, align), "")?;
        for link in [&previous, &this_page, &next] {
            let li = el("li", "page-item", "")?;
            li.append_child(link.view())?;
            ul.append_child(&li)?;
        }

        let comp = Component::with_options(
            "nav",
            ComponentOptions::new().attr("aria-label", "Page navigation").children(vec![ul]),
        )?;
        Ok(Self { comp, previous, this_page, next })
    }

    pub fn set_this_page(&self, text: &str) {
        self.this_page.set_text(text);
    }

    pub fn set_previous_page(&self, href: &str, text: &str) -> Result<(), JsValue> {
        set_link(&self.previous, href, text)
    }

    pub fn set_next_page(&self, href: &str, text: &str) -> Result<(), JsValue> {
        set_link(&self.next, href, text)
    }

    pub fn show(&self) {
        self.comp.show();
    }

    pub fn hide(&self) {
        self.comp.hide();
    }
}

fn set_link(link: &Component, href: &str, text: &str) -> Result<(), JsValue> {
    link.view().set_attribute("href", href)?;
    dom_utils::set_text(link.view(), text);
    Ok(())
}

impl Mountable for SimplePageNav {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_class_variants() {
        assert_eq!(pagination_classes(None, None), "pagination");
        assert_eq!(
            pagination_classes(Some("lg"), Some("center")),
            "pagination pagination-lg justify-content-center"
        );
        assert_eq!(pagination_classes(None, Some("end")), "pagination justify-content-end");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn setters_update_links() {
        let nav = SimplePageNav::new(Some("sm"), None).unwrap();
        nav.set_this_page("2024-01-02");
        nav.set_previous_page("?day=2024-01-01", "prev").unwrap();
        nav.set_next_page("?day=2024-01-03", "next").unwrap();

        let links = nav.view().query_selector_all("a").unwrap();
        assert_eq!(links.length(), 3);
        let prev: Element = wasm_bindgen::JsCast::unchecked_into(links.item(0).unwrap());
        assert_eq!(prev.get_attribute("href").as_deref(), Some("?day=2024-01-01"));
        assert_eq!(prev.text_content().as_deref(), Some("prev"));
        let this: Element = wasm_bindgen::JsCast::unchecked_into(links.item(1).unwrap());
        assert_eq!(this.text_content().as_deref(), Some("2024-01-02"));
    }
}
