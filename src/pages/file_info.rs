//! File attributes form shared by the files, pics and edit-file pages:
//! edit the metadata, move the file to another bucket, and (on the picture
//! pages) download or delete it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlSelectElement};

use super::{HIDE_IF_BACKUP, INVALID_ID};
use crate::component::{append_all, el, span, Component, ComponentOptions, Mountable};
use crate::components::bootstrap::BsOffcanvas;
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::{Bucket, File};
use crate::network::api_client::{self, BucketRef, MoveFileBody, UpdateFileBody};
use crate::ui_components::{
    create_button, create_form_control, create_link, create_primary_button, hidden_submit_button, InputType, LinkOptions,
    NumberInput, TextInput,
};
use crate::utils::file_size_to_string;

pub const NO_BUCKET_SELECTED: &str = "請選擇一個倉庫";
pub const MOVED: &str = "移動檔案成功!";
pub const UPDATED: &str = "修改成功";
pub const FILE_DELETED: &str = "該檔案已被刪除";
pub const DELETE_WARNING: &str = "等待 3 秒, 點擊紅色的 DELETE 按鈕刪除檔案 (注意, 一旦刪除, 不可恢復!).";
pub const DELETE_CONFIRM_DELAY_MS: u32 = 2000;
const SELECT_PLACEHOLDER: &str = "點擊此處選擇倉庫...";

/// Left margin of `#root` while the side panel is open.
pub const CANVAS_WIDTH: &str = "550px";

/// Success text after a download into the waiting folder.
pub fn downloaded_text(waiting_folder: &str) -> String {
    format!("成功下載到 waiting 資料夾 {}", waiting_folder)
}

/// Current bucket as shown in the read-only Bucket input.
pub fn bucket_input_text(bucket: &Bucket) -> String {
    let name = if bucket.encrypted { format!("🔒{}", bucket.name) } else { bucket.name.clone() };
    if bucket.name == bucket.title || bucket.title.is_empty() {
        name
    } else {
        format!("{} ({})", name, bucket.title)
    }
}

/// Label of a move-target option: the title, locked when encrypted.
pub fn move_option_text(bucket: &Bucket) -> String {
    if bucket.encrypted {
        format!("🔒{}", bucket.title)
    } else {
        bucket.title.clone()
    }
}

type FileCallback = Box<dyn Fn(&File)>;

pub struct FileInfoForm {
    pub alert: Alert,
    pub loading: Loading,
    preview: Component,
    buttons_alert: Alert,
    buttons_area: Component,
    download_button: Element,
    small_button: Element,
    view_button: Element,
    del_button: Element,
    danger_button: Element,
    id: NumberInput,
    bucket: TextInput,
    name: TextInput,
    notes: TextInput,
    keywords: TextInput,
    size: TextInput,
    like: NumberInput,
    ctime: TextInput,
    utime: TextInput,
    checked: TextInput,
    damaged: TextInput,
    move_alert: Alert,
    bucket_select: Component,
    move_button: Component,
    submit: Component,
    submit_alert: Alert,
    form: Component,
    file_id: Cell<i64>,
    buckets: RefCell<Vec<Bucket>>,
    waiting_folder: RefCell<String>,
    is_backup: Cell<bool>,
    on_updated: RefCell<Option<FileCallback>>,
    on_deleted: RefCell<Option<FileCallback>>,
}

fn small_link(text: &str, title: &str, classes: &str) -> Result<Element, JsValue> {
    let link = create_link("#", LinkOptions::text(text))?;
    link.set_attribute("title", title)?;
    dom_utils::add_classes(&link, &format!("btn btn-sm btn-light text-muted me-2 {}", classes))?;
    Ok(link)
}

impl FileInfoForm {
    /// `with_buttons` adds the download / view / delete row used where the
    /// file list itself has no per-item buttons.
    pub fn new(with_buttons: bool) -> Result<Rc<Self>, JsValue> {
        let preview = Component::with_options(
            "img",
            ComponentOptions::new().classes("img-thumbnail").attr("alt", "pic"),
        )?
        .hidden();
        let preview_area = el("div", "text-center mt-0 mb-2", "")?;
        preview_area.append_child(preview.view())?;

        let buttons_alert = Alert::new()?;
        let download_button = small_link("DL", "download", "")?;
        let small_button = small_link("small", "下載小圖", "")?;
        dom_utils::hide(&small_button);
        let view_button = small_link("view", "preview", "")?;
        view_button.set_attribute("target", "_blank")?;
        let del_button = small_link("del", "delete", HIDE_IF_BACKUP)?;
        let danger_button = create_link("#", LinkOptions::text("DELETE"))?;
        dom_utils::add_classes(&danger_button, "btn btn-sm btn-danger")?;
        dom_utils::hide(&danger_button);
        let buttons_area = Component::with_options(
            "div",
            ComponentOptions::new().classes("text-end").children(vec![
                download_button.clone(),
                small_button.clone(),
                view_button.clone(),
                del_button.clone(),
                danger_button.clone(),
            ]),
        )?;
        if !with_buttons {
            buttons_alert.hide();
            buttons_area.hide();
        }

        let id = NumberInput::new(true, None)?;
        let bucket = TextInput::text()?;
        let name = TextInput::new(InputType::Text, true, None)?;
        let notes = TextInput::text()?;
        let keywords = TextInput::text()?;
        let size = TextInput::text()?;
        let like = NumberInput::new(false, None)?;
        let ctime = TextInput::new(InputType::Text, true, None)?;
        let utime = TextInput::text()?;
        let checked = TextInput::text()?;
        let damaged = TextInput::text()?;

        let move_alert = Alert::new()?;
        dom_utils::add_classes(move_alert.view(), "my-1")?;
        let bucket_select = Component::with_options("select", ComponentOptions::new().classes("form-select"))?;
        let move_button = create_button("Move", "outline-primary", "button")?;
        let move_group = el("div", &format!("input-group {} mb-3", HIDE_IF_BACKUP), "")?;
        append_all(
            &move_group,
            &[el("span", "input-group-text", "Move to")?, bucket_select.element(), move_button.element()],
        )?;

        let submit = create_primary_button("Submit")?;
        submit.add_classes(HIDE_IF_BACKUP)?;
        let submit_alert = Alert::new()?;
        dom_utils::add_classes(submit_alert.view(), "my-3")?;
        let submit_area = el("div", "text-center my-3", "")?;
        submit_area.append_child(submit.view())?;

        let form = Component::with_options(
            "form",
            ComponentOptions::new().attr("autocomplete", "off").children(vec![
                hidden_submit_button()?,
                preview_area,
                buttons_alert.view().clone(),
                buttons_area.element(),
                create_form_control(&id, "ID", None, None)?,
                create_form_control(
                    &bucket,
                    "Bucket",
                    Some("在下面選擇一個倉庫, 點擊 Move 按鈕, 可把檔案移至所選倉庫.".into()),
                    None,
                )?,
                move_alert.view().clone(),
                move_group,
                create_form_control(&name, "File Name", None, None)?,
                create_form_control(&notes, "Notes", Some("關於該檔案的簡單描述".into()), None)?,
                create_form_control(&keywords, "Keywords", Some("關鍵詞, 用於輔助搜尋.".into()), None)?,
                create_form_control(&size, "Size", None, None)?,
                create_form_control(&like, "Like", Some("點讚數, 數字越大表示該檔案越重要.".into()), None)?,
                create_form_control(&ctime, "CTime", Some("創建時間, 格式 2006-01-02 15:04:05+08:00".into()), None)?,
                create_form_control(&utime, "UTime", Some("更新時間, 一般不需要修改.".into()), None)?,
                create_form_control(&checked, "Checked", Some("上次檢查檔案完整性的時間.".into()), None)?,
                create_form_control(&damaged, "Damaged", Some("檔案是否損壞".into()), None)?,
                submit_alert.view().clone(),
                submit_area,
            ]),
        )?
        .hidden();

        notes.view().set_attribute("accesskey", "n")?;
        keywords.view().set_attribute("accesskey", "k")?;
        submit.view().set_attribute("accesskey", "e")?;

        let info = Rc::new(Self {
            alert: Alert::new()?,
            loading: Loading::large()?,
            preview,
            buttons_alert,
            buttons_area,
            download_button,
            small_button,
            view_button,
            del_button,
            danger_button,
            id,
            bucket,
            name,
            notes,
            keywords,
            size,
            like,
            ctime,
            utime,
            checked,
            damaged,
            move_alert,
            bucket_select,
            move_button,
            submit,
            submit_alert,
            form,
            file_id: Cell::new(0),
            buckets: RefCell::new(Vec::new()),
            waiting_folder: RefCell::new(String::new()),
            is_backup: Cell::new(false),
            on_updated: RefCell::new(None),
            on_deleted: RefCell::new(None),
        });
        info.loading.hide();

        let f = info.clone();
        dom_utils::on_click(info.move_button.view(), move || f.move_to_bucket())?;
        let f = info.clone();
        dom_utils::on_click(info.submit.view(), move || f.save())?;
        let f = info.clone();
        dom_utils::on_click(&info.download_button, move || f.download(false))?;
        let f = info.clone();
        dom_utils::on_click(&info.small_button, move || f.download(true))?;
        let f = info.clone();
        dom_utils::on_click(&info.del_button, move || f.ask_delete())?;
        let f = info.clone();
        dom_utils::on_click(&info.danger_button, move || f.delete())?;
        Ok(info)
    }

    pub fn form(&self) -> &Component {
        &self.form
    }

    pub fn set_buckets(&self, buckets: Vec<Bucket>) {
        *self.buckets.borrow_mut() = buckets;
    }

    pub fn set_waiting_folder(&self, folder: &str) {
        *self.waiting_folder.borrow_mut() = folder.to_string();
    }

    pub fn set_backup(&self, is_backup: bool) {
        self.is_backup.set(is_backup);
    }

    /// Run after a successful edit or move with the updated file.
    pub fn on_updated(&self, f: impl Fn(&File) + 'static) {
        *self.on_updated.borrow_mut() = Some(Box::new(f));
    }

    pub fn on_deleted(&self, f: impl Fn(&File) + 'static) {
        *self.on_deleted.borrow_mut() = Some(Box::new(f));
    }

    /// Fetch file `id` and show it in the form.
    pub fn open(self: &Rc<Self>, id: i64) {
        self.file_id.set(id);
        self.form.hide();
        self.loading.show();
        self.alert.clear();
        self.submit_alert.clear();
        self.move_alert.clear();
        self.buttons_alert.clear();
        dom_utils::show(&self.del_button);
        dom_utils::hide(&self.danger_button);
        controls::enable(&self.buttons_area);
        if let Err(e) = self.view_button.set_attribute("href", &format!("/file/{}", id)) {
            log::warn!("failed to set preview link: {:?}", e);
        }

        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::file_info(id)
            .alert(&self.alert)
            .on_success(move |file| on_ok.fill(&file))
            .on_always(move || {
                on_done.loading.hide();
                on_done.hide_write_actions();
            })
            .send();
    }

    pub fn fill(&self, file: &File) {
        self.file_id.set(file.id);
        if file.is_image() {
            if let Err(e) = self.preview.view().set_attribute("src", &format!("/file/{}", file.id)) {
                log::warn!("failed to set preview src: {:?}", e);
            }
            self.preview.show();
            dom_utils::show(&self.small_button);
        } else {
            self.preview.hide();
            dom_utils::hide(&self.small_button);
            controls::focus(&self.notes);
        }

        self.id.set_int_value(file.id);
        self.name.set_value(&file.name);
        self.notes.set_value(&file.notes);
        self.keywords.set_value(&file.keywords);
        self.size.set_value(&file_size_to_string(file.size));
        self.like.set_int_value(file.like);
        self.ctime.set_value(&file.ctime);
        self.utime.set_value(&file.utime);
        self.checked.set_value(&file.checked);
        self.damaged.set_value(&file.damaged.to_string());

        for read_only in [self.id.component(), self.bucket.component(), self.size.component()] {
            controls::disable(read_only);
        }
        controls::disable(self.checked.component());
        controls::disable(self.damaged.component());

        self.form.show();
        if let Err(e) = self.init_bucket_select(&file.bucket_name) {
            log::error!("failed to fill bucket select: {:?}", e);
        }
    }

    fn hide_write_actions(&self) {
        if !self.is_backup.get() {
            return;
        }
        if let Ok(nodes) = self.form.view().query_selector_all(&format!(".{}", HIDE_IF_BACKUP)) {
            for i in 0..nodes.length() {
                if let Some(node) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    dom_utils::hide(&node);
                }
            }
        }
    }

    /// Every bucket but the current one becomes a move target; the current
    /// one fills the Bucket input.
    fn init_bucket_select(&self, current: &str) -> Result<(), JsValue> {
        let select = self.bucket_select.view();
        dom_utils::clear_children(select);
        let placeholder = el("option", "", SELECT_PLACEHOLDER)?;
        placeholder.set_attribute("value", "")?;
        placeholder.set_attribute("selected", "")?;
        select.append_child(&placeholder)?;

        for bucket in self.buckets.borrow().iter() {
            if bucket.name == current {
                self.bucket.set_value(&bucket_input_text(bucket));
                continue;
            }
            let option = el("option", "", &move_option_text(bucket))?;
            option.set_id(&format!("B-{}", bucket.id));
            option.set_attribute("value", &bucket.name)?;
            option.set_attribute("title", &bucket.name)?;
            select.append_child(&option)?;
        }
        Ok(())
    }

    fn selected_bucket(&self) -> String {
        self.bucket_select.view().unchecked_ref::<HtmlSelectElement>().value()
    }

    fn updated(&self, file: &File) {
        if let Some(f) = self.on_updated.borrow().as_ref() {
            f(file);
        }
    }

    fn move_to_bucket(self: &Rc<Self>) {
        let bucket_name = self.selected_bucket();
        if bucket_name.is_empty() {
            self.move_alert.insert(Severity::Warning, NO_BUCKET_SELECTED);
            return;
        }
        let body = MoveFileBody { file_id: self.file_id.get(), bucket: BucketRef::Name { bucket_name } };
        controls::disable(&self.move_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::move_file_to_bucket(&body)
            .alert(&self.move_alert)
            .on_success(move |file| {
                on_ok.move_alert.clear().insert(Severity::Success, MOVED);
                if let Err(e) = on_ok.init_bucket_select(&file.bucket_name) {
                    log::error!("failed to refill bucket select: {:?}", e);
                }
                on_ok.updated(&file);
            })
            .on_always(move || controls::enable(&on_done.move_button))
            .send();
    }

    /// The edit request built from the inputs.
    pub fn update_body(&self) -> Option<UpdateFileBody> {
        Some(UpdateFileBody {
            id: self.id.int_value()?,
            name: self.name.value(),
            notes: self.notes.value(),
            keywords: self.keywords.value(),
            like: self.like.int_value().unwrap_or(0),
            ctime: self.ctime.value(),
            utime: self.utime.value(),
        })
    }

    fn save(self: &Rc<Self>) {
        let Some(body) = self.update_body() else {
            self.submit_alert.insert(Severity::Warning, INVALID_ID);
            return;
        };
        controls::disable(&self.submit);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::update_file_info(&body)
            .alert(&self.submit_alert)
            .on_success(move |file| {
                on_ok.submit_alert.clear().insert(Severity::Success, UPDATED);
                on_ok.updated(&file);
            })
            .on_always(move || controls::enable(&on_done.submit))
            .send();
    }

    fn download(self: &Rc<Self>, small: bool) {
        let id = self.file_id.get();
        let button = if small { self.small_button.clone() } else { self.download_button.clone() };
        let request = if small { api_client::download_small_pic(id) } else { api_client::download_file(id) };
        controls::disable(&button);
        let on_ok = self.clone();
        request
            .alert(&self.buttons_alert)
            .on_success(move |_| {
                let text = downloaded_text(&on_ok.waiting_folder.borrow());
                on_ok.buttons_alert.insert(Severity::Success, &text);
            })
            .on_always(move || controls::enable(&button))
            .send();
    }

    fn ask_delete(self: &Rc<Self>) {
        controls::disable(&self.del_button);
        self.buttons_alert.clear().insert(Severity::Warning, DELETE_WARNING);
        let f = self.clone();
        Timeout::new(DELETE_CONFIRM_DELAY_MS, move || {
            controls::enable(&f.del_button);
            dom_utils::hide(&f.del_button);
            dom_utils::show(&f.danger_button);
        })
        .forget();
    }

    fn delete(self: &Rc<Self>) {
        let id = self.file_id.get();
        controls::disable(&self.buttons_area);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::delete_file(id)
            .alert(&self.buttons_alert)
            .on_success(move |_| {
                on_ok.form.hide();
                on_ok.alert.clear().insert(Severity::Success, FILE_DELETED);
                if let Some(f) = on_ok.on_deleted.borrow().as_ref() {
                    f(&File { id, ..Default::default() });
                }
            })
            .on_always(move || controls::enable(&on_done.buttons_area))
            .send();
    }
}

/// Left-side panel hosting a [`FileInfoForm`]; pushes `#root` aside while
/// open.
pub struct FileInfoCanvas {
    comp: Component,
    pub info: Rc<FileInfoForm>,
}

impl FileInfoCanvas {
    pub fn new(info: Rc<FileInfoForm>) -> Result<Rc<Self>, JsValue> {
        let close = el("button", "btn-close", "")?;
        close.set_attribute("type", "button")?;
        close.set_attribute("data-bs-dismiss", "offcanvas")?;
        close.set_attribute("aria-label", "Close")?;
        let header = el("div", "offcanvas-header", "")?;
        append_all(&header, &[el("h5", "offcanvas-title", "File Info (檔案屬性)")?, close])?;

        let body = el("div", "offcanvas-body", "")?;
        dom_utils::add_classes(info.loading.view(), "my-5")?;
        append_all(&body, &[info.alert.view().clone(), info.loading.view().clone(), info.form().element()])?;

        let comp = Component::with_options(
            "div",
            ComponentOptions::new()
                .classes("offcanvas offcanvas-start")
                .css("width", CANVAS_WIDTH)
                .attr("data-bs-scroll", "true")
                .attr("data-bs-backdrop", "false")
                .attr("tabindex", "-1")
                .children(vec![header, body]),
        )?;
        dom_utils::on_event(comp.view(), "hidden.bs.offcanvas", move || set_root_margin(""))?;
        Ok(Rc::new(Self { comp, info }))
    }

    /// Slide the panel in and load file `id`.
    pub fn open(&self, id: i64) {
        set_root_margin(CANVAS_WIDTH);
        match BsOffcanvas::get_or_create(self.comp.view()) {
            Ok(canvas) => canvas.show(),
            Err(e) => log::error!("bootstrap.Offcanvas unavailable: {:?}", e),
        }
        self.info.open(id);
    }

    pub fn close(&self) {
        if let Ok(canvas) = BsOffcanvas::get_or_create(self.comp.view()) {
            canvas.hide();
        }
    }
}

impl Mountable for Rc<FileInfoCanvas> {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

fn set_root_margin(value: &str) {
    if let Some(root) = dom_utils::document().get_element_by_id(crate::constants::ROOT_ID) {
        if let Err(e) = dom_utils::set_css(&root, "margin-left", value) {
            log::warn!("failed to move #root: {:?}", e);
        }
    }
}

/// Badge for a damaged file, hidden otherwise.
pub fn damaged_badge(damaged: bool) -> Result<Element, JsValue> {
    let badge = span("DAMAGED")?;
    dom_utils::add_classes(&badge, "badge text-bg-danger me-1")?;
    if !damaged {
        dom_utils::hide(&badge);
    }
    Ok(badge)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str, title: &str, encrypted: bool) -> Bucket {
        Bucket { id: 1, name: name.into(), title: title.into(), encrypted, ..Default::default() }
    }

    #[test]
    fn current_bucket_text() {
        assert_eq!(bucket_input_text(&bucket("docs", "docs", false)), "docs");
        assert_eq!(bucket_input_text(&bucket("docs", "Documents", false)), "docs (Documents)");
        assert_eq!(bucket_input_text(&bucket("keys", "Keys", true)), "🔒keys (Keys)");
        assert_eq!(bucket_input_text(&bucket("keys", "", true)), "🔒keys");
    }

    #[test]
    fn move_targets_use_titles() {
        assert_eq!(move_option_text(&bucket("docs", "Documents", false)), "Documents");
        assert_eq!(move_option_text(&bucket("keys", "Keys", true)), "🔒Keys");
    }

    #[test]
    fn download_message_names_the_folder() {
        assert_eq!(downloaded_text("/data/waiting"), "成功下載到 waiting 資料夾 /data/waiting");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::HtmlInputElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_file() -> File {
        File {
            id: 7,
            bucket_name: "docs".into(),
            name: "a.png".into(),
            notes: "cover".into(),
            file_type: "image/png".into(),
            like: 2,
            size: 2048,
            ctime: "2023-05-01 10:20:30+08:00".into(),
            utime: "2023-05-01 10:20:30+08:00".into(),
            ..Default::default()
        }
    }

    #[wasm_bindgen_test]
    fn fill_shows_preview_and_excludes_current_bucket() {
        let info = FileInfoForm::new(true).unwrap();
        info.set_buckets(vec![
            Bucket { id: 1, name: "docs".into(), title: "Docs".into(), ..Default::default() },
            Bucket { id: 2, name: "pics".into(), title: "Pics".into(), ..Default::default() },
        ]);
        info.fill(&sample_file());

        assert!(!info.form.is_hidden());
        assert!(!info.preview.is_hidden());
        assert_eq!(info.preview.view().get_attribute("src").as_deref(), Some("/file/7"));
        assert_eq!(info.bucket.value(), "docs (Docs)");
        assert_eq!(info.size.value(), "2.00 KB");
        // placeholder plus the one other bucket
        assert_eq!(info.bucket_select.view().child_element_count(), 2);
        assert!(info.id.view().unchecked_ref::<HtmlInputElement>().disabled());
        assert!(!info.notes.view().unchecked_ref::<HtmlInputElement>().disabled());

        let body = info.update_body().unwrap();
        assert_eq!((body.id, body.like, body.notes.as_str()), (7, 2, "cover"));
    }

    #[wasm_bindgen_test]
    fn move_without_selection_warns() {
        let info = FileInfoForm::new(false).unwrap();
        info.fill(&sample_file());
        info.move_to_bucket();
        assert_eq!(info.move_alert.len(), 1);
        assert!(info.move_alert.view().text_content().unwrap_or_default().contains(NO_BUCKET_SELECTED));
        assert!(info.buttons_area.is_hidden());
    }

    #[wasm_bindgen_test]
    fn delete_asks_for_confirmation_first() {
        let info = FileInfoForm::new(true).unwrap();
        info.fill(&sample_file());
        info.ask_delete();
        assert_eq!(info.buttons_alert.len(), 1);
        assert!(dom_utils::is_hidden(&info.danger_button));
    }
}
