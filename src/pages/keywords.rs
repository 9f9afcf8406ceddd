//! Keyword list (`keywords.html`); each keyword searches the file list.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{nav_bar, place, NavLink};
use crate::component::{Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::network::api_client;
use crate::ui_components::{create_link, LinkOptions};

pub const NO_KEYWORDS: &str = "未找到任何關鍵詞.";

/// `(dom id, keyword)` pairs; blank keywords are skipped but keep their
/// index in the id.
pub fn keyword_entries(keywords: &[String]) -> Vec<(String, &str)> {
    keywords
        .iter()
        .enumerate()
        .filter(|(_, kw)| !kw.is_empty())
        .map(|(i, kw)| (format!("Keywords-{}", i), kw.as_str()))
        .collect()
}

pub fn search_href(keyword: &str) -> String {
    let encoded = String::from(js_sys::encode_uri_component(keyword));
    format!("files.html?search={}", encoded)
}

fn keyword_item(id: String, keyword: &str) -> Result<Component, JsValue> {
    let link = create_link(&search_href(keyword), LinkOptions::text(keyword))?;
    Component::with_options("li", ComponentOptions::new().id(id).children(vec![link]))
}

struct KeywordsPage {
    alert: Alert,
    loading: Loading,
    list: Component,
}

impl KeywordsPage {
    fn show_keywords(&self, keywords: &[String]) {
        let entries = keyword_entries(keywords);
        if entries.is_empty() {
            self.alert.insert(Severity::Warning, NO_KEYWORDS);
            return;
        }
        let items: Result<Vec<_>, JsValue> = entries.into_iter().map(|(id, kw)| keyword_item(id, kw)).collect();
        if let Err(e) = items.and_then(|items| controls::append_to_list(&self.list, items)) {
            log::error!("failed to render keywords: {:?}", e);
        }
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = Rc::new(KeywordsPage {
        alert: Alert::new()?,
        loading: Loading::large()?,
        list: Component::new("ul")?,
    });
    place(
        root,
        &nav_bar(
            "Keywords (關鍵詞清單)",
            &[
                NavLink::new("files.html", "Files"),
                NavLink::new("pics.html", "Pics"),
                NavLink::new("buckets.html", "Buckets"),
            ],
        )?,
        "mt-3 mb-5",
    )?;
    place(root, page.loading.view(), "my-5")?;
    place(root, page.alert.view(), "my-3")?;
    place(root, page.list.view(), "my-3")?;

    let on_ok = page.clone();
    let on_done = page.clone();
    api_client::auto_get_keywords()
        .alert(&page.alert)
        .on_success(move |keywords| on_ok.show_keywords(&keywords.unwrap_or_default()))
        .on_always(move || on_done.loading.hide())
        .send();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keywords_are_skipped() {
        let keywords = vec!["cat".to_string(), String::new(), "dog".to_string()];
        assert_eq!(
            keyword_entries(&keywords),
            vec![("Keywords-0".to_string(), "cat"), ("Keywords-2".to_string(), "dog")]
        );
        assert!(keyword_entries(&[String::new()]).is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn keywords_link_to_a_file_search() {
        assert_eq!(search_href("貓 cat"), "files.html?search=%E8%B2%93%20cat");
        let page = KeywordsPage {
            alert: Alert::new().unwrap(),
            loading: Loading::large().unwrap(),
            list: Component::new("ul").unwrap(),
        };
        page.show_keywords(&["cat".to_string(), String::new()]);
        assert_eq!(page.list.view().child_element_count(), 1);

        page.show_keywords(&[]);
        assert!(page.alert.view().text_content().unwrap_or_default().contains(NO_KEYWORDS));
    }
}
