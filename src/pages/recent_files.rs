//! Recently updated files (`recent-files.html`, `?bucket=<id>` to limit to
//! one bucket). Each card links to the edit-file page.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::browse::{file_item_id, BucketFilter};
use super::files::no_files_text;
use super::{nav_bar, place, NavLink};
use crate::component::{append_all, el, span, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::models::File;
use crate::network::api_client;
use crate::ui_components::{create_link, LinkOptions};
use crate::utils::file_size_to_string;

/// Card header: `<bucket>/<name>`, locked when encrypted.
pub fn header_text(file: &File) -> String {
    let text = format!("{}/{}", file.bucket_name, file.name);
    if file.encrypted {
        format!("🔒{}", text)
    } else {
        text
    }
}

fn labelled(label: &str, value: &str) -> Result<Element, JsValue> {
    let line = el("div", "", "")?;
    append_all(&line, &[span(label)?, el("span", "text-muted", value)?])?;
    Ok(line)
}

fn file_item(file: &File) -> Result<Component, JsValue> {
    let badges = el("div", "text-right FileItemBadges", "")?;
    if file.damaged {
        let badge = el("span", "badge text-bg-danger", "DAMAGED")?;
        badges.append_child(&badge)?;
    }
    if file.deleted {
        let badge = el("span", "badge text-bg-secondary ms-2", "DELETED")?;
        badges.append_child(&badge)?;
    }
    let row_one = el("div", "mb-2 FileItemBodyRowOne", "")?;
    row_one.append_child(&badges)?;
    if !file.notes.is_empty() {
        let notes = labelled("Notes: ", &file.notes)?;
        row_one.append_child(&notes)?;
    }
    if !file.keywords.is_empty() {
        let keywords = labelled("Keywords: ", &file.keywords)?;
        row_one.append_child(&keywords)?;
    }

    let date = el("span", "me-2", file.udate())?;
    date.set_attribute("title", &file.utime)?;
    let right = el("div", "col text-end", "")?;
    append_all(
        &right,
        &[
            el("span", "me-2", &format!("({})", file_size_to_string(file.size)))?,
            date,
            create_link(&format!("edit-file.html?id={}", file.id), LinkOptions::text("info"))?,
        ],
    )?;
    let row_two = el("div", "row", "")?;
    append_all(&row_two, &[el("div", "col text-start", "")?, right])?;

    let body = el("div", "card-body", "")?;
    append_all(&body, &[row_one, row_two])?;

    Component::with_options(
        "div",
        ComponentOptions::new()
            .id(file_item_id(file.id))
            .classes("card mb-4")
            .children(vec![el("div", "card-header", &header_text(file))?, body]),
    )
}

struct RecentFilesPage {
    alert: Alert,
    loading: Loading,
    list: Component,
}

impl RecentFilesPage {
    fn show_files(&self, files: &[File], in_bucket: bool) {
        if files.is_empty() {
            self.alert.insert(Severity::Warning, no_files_text(in_bucket));
            return;
        }
        let items: Result<Vec<_>, JsValue> = files.iter().map(file_item).collect();
        if let Err(e) = items.and_then(|items| controls::append_to_list(&self.list, items)) {
            log::error!("failed to render recent files: {:?}", e);
        }
    }

    fn load(self: &Rc<Self>, bucket_id: Option<i64>) {
        let request = match bucket_id {
            Some(id) => api_client::recent_files_in(id),
            None => api_client::recent_files(),
        };
        let on_ok = self.clone();
        let on_done = self.clone();
        request
            .alert(&self.alert)
            .on_success(move |files| on_ok.show_files(&files.unwrap_or_default(), bucket_id.is_some()))
            .on_always(move || on_done.loading.hide())
            .send();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = Rc::new(RecentFilesPage {
        alert: Alert::new()?,
        loading: Loading::large()?,
        list: Component::new("div")?,
    });
    place(
        root,
        &nav_bar(
            "Recent (最近檔案)",
            &[NavLink::new("recent-pics.html", "Recent Pics"), NavLink::new("files.html", "Files")],
        )?,
        "my-3",
    )?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.loading.view(), "my-5")?;
    place(root, page.list.view(), "my-5")?;
    page.load(BucketFilter::from_url().id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_shows_bucket_and_lock() {
        let file = File { bucket_name: "docs".into(), name: "a.md".into(), ..Default::default() };
        assert_eq!(header_text(&file), "docs/a.md");
        let file = File { encrypted: true, ..file };
        assert_eq!(header_text(&file), "🔒docs/a.md");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> RecentFilesPage {
        RecentFilesPage {
            alert: Alert::new().unwrap(),
            loading: Loading::large().unwrap(),
            list: Component::new("div").unwrap(),
        }
    }

    #[wasm_bindgen_test]
    fn deleted_and_damaged_files_get_badges() {
        let item = file_item(&File {
            id: 9,
            name: "a.md".into(),
            notes: "n".into(),
            damaged: true,
            deleted: true,
            ..Default::default()
        })
        .unwrap();
        let text = item.view().text_content().unwrap_or_default();
        assert!(text.contains("DAMAGED"));
        assert!(text.contains("DELETED"));
        assert!(text.contains("Notes: n"));
        let link = item.find("a").unwrap();
        assert_eq!(link.get_attribute("href").as_deref(), Some("edit-file.html?id=9"));
    }

    #[wasm_bindgen_test]
    fn empty_list_warns() {
        let page = page();
        page.show_files(&[], true);
        assert!(page.alert.view().text_content().unwrap_or_default().contains(no_files_text(true)));
        assert_eq!(page.list.view().child_element_count(), 0);
    }
}
