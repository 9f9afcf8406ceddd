//! Bucket list with per-bucket actions and two-step delete.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{apply_backup_mode, nav_bar, place, NavLink, HIDE_IF_BACKUP};
use crate::component::{append_all, el, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::BucketStatus;
use crate::network::api_client;
use crate::ui_components::{create_link, LinkOptions};
use crate::utils::file_size_to_string;

pub const NO_BUCKETS: &str = "沒有倉庫, 請點擊右上角的 New 新建倉庫.";
pub const BUCKET_DELETED: &str = "該倉庫已被刪除";
const DELETE_CONFIRM_DELAY_MS: u32 = 2000;

/// Card classes for a bucket, by encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    pub card: &'static str,
    pub header: &'static str,
    pub body: &'static str,
    pub button: &'static str,
}

pub fn card_style(encrypted: bool) -> CardStyle {
    if encrypted {
        CardStyle {
            card: "card mb-4 text-bg-dark",
            header: "card-header",
            body: "card-body text-bg-secondary",
            button: "btn-secondary",
        }
    } else {
        CardStyle {
            card: "card mb-4 border-success",
            header: "card-header text-success",
            body: "card-body text-success",
            button: "btn-light",
        }
    }
}

/// Bucket name with a lock for encrypted buckets.
pub fn display_name(name: &str, encrypted: bool) -> String {
    if encrypted {
        format!("🔒{}", name)
    } else {
        name.to_string()
    }
}

/// `"<n> files"`, blank for zero or one file.
pub fn files_count_text(count: i64) -> String {
    if count <= 1 {
        String::new()
    } else {
        format!("{} files", count)
    }
}

/// DOM id of a bucket card.
pub fn bucket_item_id(name: &str) -> String {
    format!("B-{}", name)
}

struct BucketItem {
    comp: Component,
    alert: Alert,
    buttons: Vec<Element>,
    del_button: Element,
    danger_button: Element,
    bucket_id: i64,
}

impl BucketItem {
    fn new(status: &BucketStatus) -> Result<Rc<Self>, JsValue> {
        let bucket = &status.bucket;
        let item_id = bucket_item_id(&bucket.name);
        let style = card_style(bucket.encrypted);
        let alert = Alert::with_id(Some(&format!("{}-alert", item_id)))?;

        let info = el("div", "col-9", "")?;
        append_all(&info, &[el("div", "fw-bold", &bucket.title)?, el("div", "", &bucket.subtitle)?])?;
        let usage = el("div", "col-3 text-end", "")?;
        append_all(
            &usage,
            &[
                el("div", "", &files_count_text(status.files_count))?,
                el("div", "", &format!("({})", file_size_to_string(status.total_size)))?,
            ],
        )?;
        let row = el("div", "BucketItemBodyRowOne row", "")?;
        row.append_child(&info)?;
        row.append_child(&usage)?;

        let button = |href: String, text: &str, extra: &str| -> Result<Element, JsValue> {
            let link = create_link(&href, LinkOptions::text(text))?;
            dom_utils::add_classes(&link, &format!("btn btn-sm {} {}", style.button, extra))?;
            Ok(link)
        };
        let hide_if_backup = format!("{} me-2", HIDE_IF_BACKUP);
        let buttons = vec![
            button(format!("files.html?bucket={}", bucket.id), "files", "me-2")?,
            button(format!("pics.html?bucket={}", bucket.id), "pics", "me-2")?,
            button(format!("waiting.html?bucket={}", bucket.name), "upload", &hide_if_backup)?,
            button(format!("edit-bucket.html?id={}", bucket.id), "edit", &hide_if_backup)?,
        ];
        let del_button = button("#".into(), "del", &format!("DelBtn {}", HIDE_IF_BACKUP))?;
        del_button.set_attribute("title", "delete")?;
        let danger_button = create_link("#", LinkOptions::text("DELETE"))?;
        dom_utils::add_classes(&danger_button, &format!("btn btn-sm btn-danger DangerDelBtn {}", HIDE_IF_BACKUP))?;
        dom_utils::hide(&danger_button);

        let actions = el("div", "text-end", "")?;
        for b in buttons.iter().chain([&del_button, &danger_button]) {
            actions.append_child(b)?;
        }

        let body = el("div", style.body, "")?;
        body.append_child(&row)?;
        body.append_child(&actions)?;
        body.append_child(alert.view())?;

        let comp = Component::with_options(
            "div",
            ComponentOptions::new().id(item_id).classes(style.card).children(vec![
                el("div", style.header, &display_name(&bucket.name, bucket.encrypted))?,
                body,
            ]),
        )?;

        let item = Rc::new(Self { comp, alert, buttons, del_button, danger_button, bucket_id: bucket.id });
        let it = item.clone();
        dom_utils::on_click(&item.del_button, move || it.ask_confirmation())?;
        let it = item.clone();
        dom_utils::on_click(&item.danger_button, move || it.delete())?;
        Ok(item)
    }

    fn ask_confirmation(self: &Rc<Self>) {
        controls::disable(&self.del_button);
        self.alert.insert(
            Severity::Warning,
            "等待 2 秒, 點擊紅色的 DELETE 按鈕刪除倉庫 (注意, 一旦刪除, 不可恢復!).",
        );
        let it = self.clone();
        Timeout::new(DELETE_CONFIRM_DELAY_MS, move || {
            dom_utils::hide(&it.del_button);
            dom_utils::show(&it.danger_button);
        })
        .forget();
    }

    fn delete(self: &Rc<Self>) {
        controls::disable(&self.danger_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::delete_bucket(self.bucket_id)
            .alert(&self.alert)
            .on_success(move |_| {
                for b in on_ok.buttons.iter().chain([&on_ok.del_button, &on_ok.danger_button]) {
                    dom_utils::hide(b);
                }
                on_ok.alert.clear().insert(Severity::Success, BUCKET_DELETED);
            })
            .on_always(move || controls::enable(&on_done.danger_button))
            .send();
    }
}

impl Mountable for Rc<BucketItem> {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

struct BucketsPage {
    alert: Alert,
    loading: Loading,
    list: Component,
}

impl BucketsPage {
    fn load(self: &Rc<Self>) {
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::auto_get_buckets()
            .alert(&self.alert)
            .on_success(move |buckets| on_ok.show_buckets(&buckets.unwrap_or_default()))
            .on_always(move || on_done.loading.hide())
            .send();
    }

    fn show_buckets(&self, buckets: &[BucketStatus]) {
        if buckets.is_empty() {
            self.alert.insert(Severity::Warning, NO_BUCKETS);
            return;
        }
        let items: Result<Vec<_>, JsValue> = buckets.iter().map(BucketItem::new).collect();
        let appended = items.and_then(|items| controls::append_to_list(&self.list, items));
        if let Err(e) = appended {
            log::error!("failed to render bucket list: {:?}", e);
            return;
        }
        let alert = self.alert.clone();
        api_client::project_status()
            .alert(&self.alert)
            .on_success(move |status| apply_backup_mode(&status, &alert))
            .send();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = Rc::new(BucketsPage {
        alert: Alert::new()?,
        loading: Loading::large()?,
        list: Component::new("div")?,
    });
    place(
        root,
        &nav_bar(
            "Buckets (倉庫清單)",
            &[
                NavLink::new("waiting.html", "Waiting"),
                NavLink::with_classes("create-bucket.html", "New", HIDE_IF_BACKUP),
            ],
        )?,
        "my-3",
    )?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.loading.view(), "my-5")?;
    place(root, page.list.view(), "my-5")?;
    page.load();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypted_buckets_are_dark_and_locked() {
        let style = card_style(true);
        assert!(style.card.contains("text-bg-dark"));
        assert_eq!(style.button, "btn-secondary");
        assert_eq!(display_name("photos", true), "🔒photos");

        let style = card_style(false);
        assert!(style.card.contains("border-success"));
        assert_eq!(display_name("photos", false), "photos");
    }

    #[test]
    fn files_count_is_blank_for_one_or_none() {
        assert_eq!(files_count_text(0), "");
        assert_eq!(files_count_text(1), "");
        assert_eq!(files_count_text(12), "12 files");
    }

    #[test]
    fn item_ids_use_bucket_name() {
        assert_eq!(bucket_item_id("photos"), "B-photos");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::Bucket;
    use crate::network::http::decode_body;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> Rc<BucketsPage> {
        Rc::new(BucketsPage {
            alert: Alert::new().unwrap(),
            loading: Loading::large().unwrap(),
            list: Component::new("div").unwrap(),
        })
    }

    #[wasm_bindgen_test]
    fn empty_list_warns_and_appends_nothing() {
        let page = page();
        page.show_buckets(&[]);
        assert_eq!(page.alert.len(), 1);
        assert!(page.alert.view().text_content().unwrap_or_default().contains(NO_BUCKETS));
        assert_eq!(page.list.view().child_element_count(), 0);
    }

    #[wasm_bindgen_test]
    fn null_bucket_list_warns_like_an_empty_one() {
        let page = page();
        let buckets = decode_body::<Option<Vec<BucketStatus>>>("null").unwrap();
        page.show_buckets(&buckets.unwrap_or_default());
        assert_eq!(page.alert.len(), 1);
        assert!(page.alert.view().text_content().unwrap_or_default().contains(NO_BUCKETS));
        assert_eq!(page.list.view().child_element_count(), 0);
    }

    #[wasm_bindgen_test]
    fn bucket_card_has_name_id_and_hidden_danger_button() {
        let status = BucketStatus {
            bucket: Bucket { id: 4, name: "photos".into(), title: "Photos".into(), encrypted: true, ..Default::default() },
            total_size: 2048,
            files_count: 3,
        };
        let item = BucketItem::new(&status).unwrap();
        assert_eq!(item.comp.raw_id(), "B-photos");
        assert!(dom_utils::is_hidden(&item.danger_button));
        assert!(!dom_utils::is_hidden(&item.del_button));
        assert!(item.comp.view().text_content().unwrap_or_default().contains("🔒photos"));
        assert!(item.alert.view().id().ends_with("-alert"));
    }
}
