//! Waiting folder: files dropped into the project's `waiting` folder are
//! imported or uploaded into a chosen bucket from here.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlSelectElement};

use super::{nav_bar, place, NavLink};
use crate::component::{el, span, Component, ComponentOptions, Mountable};
use crate::components::same_name::SameNameCard;
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::{Bucket, BucketStatus, File, SameNameFiles};
use crate::network::error::{error_data_to_string, ErrorBody};
use crate::network::{api_client, RequestError};
use crate::utils::{file_size_to_string, get_url_param, reload_after};

pub const NO_BUCKETS: &str = "沒有倉庫, 請返回首頁, 點擊 Create Bucket 新建倉庫.";
pub const NO_BUCKET_SELECTED: &str = "請選擇一個倉庫";
pub const SAME_NAME_WARNING: &str = "檔案名稱重複, 請處理.";
const LIST_HINT: &str = "這裡列出的檔案清單僅供參考, 實際上傳檔案以 waiting 資料夾為準.";
const IMPORT_RELOAD_DELAY_MS: u32 = 3000;
const NEW_NOTE_CLASS: &str = "NewNoteBtn";

/// How a failed waiting/imported files request is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum FilesFailure {
    /// Show a danger message.
    Message(String),
    /// Open the conflict card for this file.
    SameName(SameNameFiles),
}

/// String bodies verbatim, same-name conflicts to the card, other JSON
/// bodies as compact JSON.
pub fn classify_files_error(err: &RequestError) -> FilesFailure {
    if let Some(conflict) = err.same_name_conflict() {
        return FilesFailure::SameName(conflict);
    }
    match err {
        RequestError::Status { body: ErrorBody::Text(text), .. } => FilesFailure::Message(text.clone()),
        RequestError::Status { body, .. } => FilesFailure::Message(error_data_to_string(body)),
        other => FilesFailure::Message(other.to_string()),
    }
}

/// Option label: the bucket title (name when untitled), locked when encrypted.
pub fn bucket_option_text(bucket: &Bucket) -> String {
    let text = if bucket.title.is_empty() { &bucket.name } else { &bucket.title };
    if bucket.encrypted {
        format!("🔒{}", text)
    } else {
        text.clone()
    }
}

fn bucket_option(bucket: &Bucket) -> Result<Component, JsValue> {
    Component::with_options(
        "option",
        ComponentOptions::new()
            .id(format!("B-{}", bucket.name))
            .attr("value", &bucket.name)
            .attr("title", &bucket.name)
            .text(bucket_option_text(bucket)),
    )
}

fn file_item(file: &File) -> Result<Component, JsValue> {
    Component::with_options(
        "li",
        ComponentOptions::new()
            .id(format!("F-{}", file.checksum))
            .classes("list-group-item")
            .children(vec![
                el("span", "text-muted me-2", &file_size_to_string(file.size))?,
                span(&file.name)?,
            ]),
    )
}

struct WaitingPage {
    alert: Alert,
    loading: Loading,
    same_name: Rc<SameNameCard>,
    bucket_select: Component,
    select_group: Component,
    file_list: Component,
    import_button: Component,
    import_alert: Alert,
    import_area: Component,
    upload_button: Component,
    upload_alert: Alert,
    upload_area: Component,
    buckets: RefCell<Vec<Bucket>>,
}

impl WaitingPage {
    fn new() -> Result<Rc<Self>, JsValue> {
        let placeholder = el("option", "", "請選擇一個倉庫...")?;
        placeholder.set_attribute("value", "")?;
        let bucket_select = Component::with_options(
            "select",
            ComponentOptions::new().classes("form-select").children(vec![placeholder]),
        )?;
        let select_group = Component::with_options(
            "div",
            ComponentOptions::new()
                .classes("input-group input-group-lg")
                .children(vec![el("span", "input-group-text", "Bucket")?, bucket_select.element()]),
        )?
        .hidden();

        let (import_button, import_alert, import_area) = action_area("Import")?;
        let (upload_button, upload_alert, upload_area) = action_area("Upload")?;

        let same_name = SameNameCard::new()?;
        dom_utils::hide(same_name.view());

        let page = Rc::new(Self {
            alert: Alert::new()?,
            loading: Loading::large()?,
            same_name,
            bucket_select,
            select_group,
            file_list: Component::with_options("ul", ComponentOptions::new().classes("list-group list-group-flush"))?,
            import_button,
            import_alert,
            import_area,
            upload_button,
            upload_alert,
            upload_area,
            buckets: RefCell::new(Vec::new()),
        });

        let p = page.clone();
        dom_utils::on_click(page.import_button.view(), move || p.import())?;
        let p = page.clone();
        dom_utils::on_click(page.upload_button.view(), move || p.upload())?;
        Ok(page)
    }

    fn selected_bucket(&self) -> String {
        self.bucket_select.view().unchecked_ref::<HtmlSelectElement>().value()
    }

    fn select_bucket(&self, name: &str) {
        if self.buckets.borrow().iter().any(|b| b.name == name) {
            self.bucket_select.view().unchecked_ref::<HtmlSelectElement>().set_value(name);
        }
    }

    /// Fill the select. Returns false (after warning) when there are none.
    fn set_buckets(&self, buckets: Vec<BucketStatus>) -> Result<bool, JsValue> {
        if buckets.is_empty() {
            self.alert.insert(Severity::Warning, NO_BUCKETS);
            self.loading.hide();
            return Ok(false);
        }
        let buckets: Vec<Bucket> = buckets.into_iter().map(|b| b.bucket).collect();
        let options = buckets.iter().map(bucket_option).collect::<Result<Vec<_>, _>>()?;
        controls::append_to_list(&self.bucket_select, options)?;
        *self.buckets.borrow_mut() = buckets;
        Ok(true)
    }

    fn show_files(&self, files: &[File]) -> Result<(), JsValue> {
        let items = files.iter().map(file_item).collect::<Result<Vec<_>, _>>()?;
        controls::append_to_list(&self.file_list, items)
    }

    fn report_files_error(&self, err: RequestError) {
        match classify_files_error(&err) {
            FilesFailure::SameName(conflict) => {
                self.alert.insert(Severity::Warning, SAME_NAME_WARNING);
                if let Err(e) = self.same_name.open(&conflict.file) {
                    log::error!("failed to open same-name card: {:?}", e);
                }
            }
            FilesFailure::Message(msg) => {
                self.alert.insert(Severity::Danger, &msg);
            }
        }
    }

    fn init(self: &Rc<Self>) {
        let p = self.clone();
        api_client::auto_get_buckets()
            .alert(&self.alert)
            .on_success(move |buckets| match p.set_buckets(buckets.unwrap_or_default()) {
                Ok(true) => {
                    if let Some(name) = get_url_param("bucket") {
                        p.select_bucket(&name);
                    }
                    p.load_waiting_folder();
                    p.load_imported_files();
                }
                Ok(false) => {}
                Err(e) => log::error!("failed to render bucket select: {:?}", e),
            })
            .send();
    }

    fn load_waiting_folder(self: &Rc<Self>) {
        let p = self.clone();
        api_client::waiting_folder()
            .alert(&self.alert)
            .on_success(move |folder| {
                p.alert.insert_untimed(Severity::Light, &format!("waiting 資料夾 ➡️ {}", folder.text));
            })
            .send();
    }

    /// Files with metadata ready for import come first; otherwise fall
    /// through to the plain waiting files.
    fn load_imported_files(self: &Rc<Self>) {
        let on_ok = self.clone();
        let on_err = self.clone();
        let on_done = self.clone();
        api_client::imported_files()
            .on_success(move |files| {
                let files = files.unwrap_or_default();
                if files.is_empty() {
                    on_ok.load_waiting_files();
                    return;
                }
                on_ok.select_group.show();
                on_ok.import_area.show();
                if let Err(e) = on_ok.show_files(&files) {
                    log::error!("failed to render imported files: {:?}", e);
                }
                on_ok.import_alert.insert_untimed(
                    Severity::Info,
                    "發現可導入(import)的檔案, 如果想當作新檔案上傳, 請進入 waiting 資料夾刪除同名 toml 檔案.",
                );
                on_ok.alert.insert_untimed(Severity::Light, LIST_HINT);
            })
            .on_error(move |err| on_err.report_files_error(err))
            .on_always(move || on_done.loading.hide())
            .send();
    }

    fn load_waiting_files(self: &Rc<Self>) {
        let on_ok = self.clone();
        let on_err = self.clone();
        let on_done = self.clone();
        api_client::waiting_files()
            .on_success(move |files| {
                let files = files.unwrap_or_default();
                if files.is_empty() {
                    on_ok.alert.insert(Severity::Info, "沒有等待上傳的檔案");
                    on_ok.alert.insert(Severity::Info, "請把檔案放到 waiting 資料夾, 然後刷新本頁面.");
                    return;
                }
                on_ok.select_group.show();
                on_ok.upload_area.show();
                if let Err(e) = on_ok.show_files(&files) {
                    log::error!("failed to render waiting files: {:?}", e);
                }
                on_ok.alert.insert_untimed(Severity::Light, LIST_HINT);
            })
            .on_error(move |err| on_err.report_files_error(err))
            .on_always(move || on_done.loading.hide())
            .send();
    }

    fn import(self: &Rc<Self>) {
        let bucket = self.selected_bucket();
        if bucket.is_empty() {
            self.import_alert.insert(Severity::Warning, NO_BUCKET_SELECTED);
            return;
        }
        controls::disable(&self.import_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::import_files(&bucket)
            .alert(&self.import_alert)
            .on_success(move |_| {
                on_ok.import_button.hide();
                on_ok.import_alert.clear().insert(Severity::Success, "上傳成功");
                on_ok.import_alert.insert(Severity::Info, "可能仍有待上傳檔案, 3 秒後本頁將自動刷新.");
                reload_after(IMPORT_RELOAD_DELAY_MS);
            })
            .on_always(move || controls::enable(&on_done.import_button))
            .send();
    }

    fn upload(self: &Rc<Self>) {
        let bucket = self.selected_bucket();
        if bucket.is_empty() {
            self.upload_alert.insert(Severity::Warning, NO_BUCKET_SELECTED);
            return;
        }
        controls::disable(&self.upload_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::upload_new_files(&bucket)
            .alert(&self.upload_alert)
            .on_success(move |_| {
                on_ok.upload_alert.clear().insert(Severity::Success, "上傳成功");
                on_ok.upload_alert.insert(Severity::Info, "點擊本頁右上角的 Buckets 按鈕可查看倉庫.");
                on_ok.upload_button.hide();
            })
            .on_always(move || controls::enable(&on_done.upload_button))
            .send();
    }

    fn create_new_note(&self) {
        let alert = self.alert.clone();
        api_client::create_new_note()
            .alert(&self.alert)
            .on_success(move |note| {
                alert.insert(Severity::Success, &format!("已生成文字檔案 {}", note.text));
            })
            .send();
    }
}

/// `div.text-center` holding an alert above a primary button.
fn action_area(label: &str) -> Result<(Component, Alert, Component), JsValue> {
    let button = crate::ui_components::create_primary_button(label)?;
    let alert = Alert::new()?;
    let area = Component::with_options(
        "div",
        ComponentOptions::new()
            .classes("text-center")
            .children(vec![alert.view().clone(), button.element()]),
    )?
    .hidden();
    Ok((button, alert, area))
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = WaitingPage::new()?;
    let nav = nav_bar(
        "Waiting (等待上傳)",
        &[NavLink::with_classes("#", "NewNote", NEW_NOTE_CLASS), NavLink::new("buckets.html", "Buckets")],
    )?;
    if let Some(link) = nav.query_selector(&format!(".{}", NEW_NOTE_CLASS))? {
        let p = page.clone();
        dom_utils::on_click(&link, move || p.create_new_note())?;
    }

    place(root, &nav, "my-3")?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.same_name.view(), "my-5")?;
    place(root, page.select_group.view(), "my-5")?;
    place(root, page.file_list.view(), "my-5")?;
    place(root, page.import_area.view(), "my-5")?;
    place(root, page.upload_area.view(), "my-5")?;
    place(root, page.loading.view(), "my-5")?;
    page.init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_bodies_are_shown_verbatim() {
        let err = RequestError::Status { status: 400, body: ErrorBody::Text("waiting folder missing".into()) };
        assert_eq!(classify_files_error(&err), FilesFailure::Message("waiting folder missing".into()));
    }

    #[test]
    fn same_name_conflicts_open_the_card() {
        let err = RequestError::Status {
            status: 400,
            body: ErrorBody::Json(json!({"errType": "ErrSameNameFiles", "file": {"name": "a.jpg"}})),
        };
        match classify_files_error(&err) {
            FilesFailure::SameName(conflict) => assert_eq!(conflict.file.name, "a.jpg"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn other_failures_become_messages() {
        let err = RequestError::Status { status: 400, body: ErrorBody::Json(json!({"detail": "x"})) };
        assert_eq!(classify_files_error(&err), FilesFailure::Message(r#"{"detail":"x"}"#.into()));

        let err = RequestError::NoResponse { status: 0 };
        assert_eq!(
            classify_files_error(&err),
            FilesFailure::Message("0 The request was made but no response was received.".into())
        );
    }

    #[test]
    fn option_text_prefers_title_and_marks_encryption() {
        let bucket = Bucket { name: "photos".into(), title: "Photos".into(), ..Default::default() };
        assert_eq!(bucket_option_text(&bucket), "Photos");
        let bucket = Bucket { title: String::new(), encrypted: true, ..bucket };
        assert_eq!(bucket_option_text(&bucket), "🔒photos");
    }
}
