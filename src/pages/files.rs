//! File list (`files.html`): newest first, optionally limited to one bucket,
//! with search, damaged-file view, paging and per-file actions.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::Element;

use super::browse::{
    can_be_previewed, current_bucket_banner, file_item_id, found_text, like_text, nav_link, preview_href,
    searching_text, show_bucket_banner, wrap_search_toggle, BucketFilter, MoreArea, SearchBox, NOTHING_FOUND,
};
use super::file_info::{
    damaged_badge, downloaded_text, FileInfoCanvas, FileInfoForm, DELETE_CONFIRM_DELAY_MS, DELETE_WARNING,
    FILE_DELETED,
};
use super::{apply_backup_mode, nav_bar, place, NavLink, HIDE_IF_BACKUP};
use crate::component::{append_all, el, span, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::{File, ProjectStatus};
use crate::network::api_client::{self, FilesQuery};
use crate::ui_components::{create_form_check, create_link, CheckboxInput, LinkOptions};
use crate::utils::{file_size_to_string, get_url_param};

pub const NO_MORE_FILES: &str = "沒有更多檔案了.";
pub const NO_DAMAGED_FILES: &str = "未找到受損檔案";
pub const BROWSING_DAMAGED: &str = "正在瀏覽受損檔案 (damaged files)";

/// Warning for an empty first page.
pub fn no_files_text(in_bucket: bool) -> &'static str {
    if in_bucket {
        "在本倉庫中未找到任何檔案"
    } else {
        "未找到任何檔案, 請返回首頁, 點擊 Upload 上傳檔案."
    }
}

/// Bucket link text: `<name>/`, locked when encrypted.
pub fn bucket_link_text(file: &File) -> String {
    if file.encrypted {
        format!("🔒{}/", file.bucket_name)
    } else {
        format!("{}/", file.bucket_name)
    }
}

/// How the page fills its list on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMode {
    Damaged,
    Search(String),
    Latest,
}

impl ListMode {
    pub fn new(damaged: Option<&str>, search: Option<&str>) -> Self {
        if damaged.is_some_and(|d| !d.is_empty()) {
            return ListMode::Damaged;
        }
        match search.map(str::trim) {
            Some(pattern) if !pattern.is_empty() => ListMode::Search(pattern.to_string()),
            _ => ListMode::Latest,
        }
    }
}

/// Shared by every file card on the page.
struct ItemContext {
    canvas: Rc<FileInfoCanvas>,
    waiting_folder: RefCell<String>,
    markdown_style: RefCell<String>,
}

struct FileItem {
    comp: Component,
    alert: Alert,
    buttons: Vec<Element>,
    del_button: Element,
    danger_button: Element,
    file_id: i64,
    ctx: Rc<ItemContext>,
}

fn item_button(text: &str, title: Option<&str>, extra: &str) -> Result<Element, JsValue> {
    let link = create_link("#", LinkOptions::text(text))?;
    if let Some(title) = title {
        link.set_attribute("title", title)?;
    }
    dom_utils::add_classes(&link, &format!("btn btn-sm btn-light text-muted me-1 {}", extra))?;
    Ok(link)
}

impl FileItem {
    fn new(file: &File, ctx: &Rc<ItemContext>) -> Result<Rc<Self>, JsValue> {
        let item_id = file_item_id(file.id);
        let alert = Alert::with_id(Some(&format!("{}-alert", item_id)))?;

        let header = el("div", "card-header", "")?;
        let bucket_link = create_link(&format!("?bucketname={}", file.bucket_name), LinkOptions::text(&bucket_link_text(file)))?;
        dom_utils::add_classes(&bucket_link, "link-dark fw-bold text-decoration-none")?;
        append_all(&header, &[damaged_badge(file.damaged)?, bucket_link, span(&file.name)?])?;

        let row_one = el("div", "mb-2 FileItemBodyRowOne", "")?;
        let notes = Some(file.notes.clone()).filter(|n| !n.is_empty());
        let keywords = (!file.keywords.is_empty()).then(|| format!("[{}]", file.keywords));
        for text in [notes, keywords].into_iter().flatten() {
            let line = el("div", "", "")?;
            let muted = el("span", "text-muted", &text)?;
            line.append_child(&muted)?;
            row_one.append_child(&line)?;
        }

        let download = item_button("DL", Some("download"), "")?;
        let small = item_button("small", Some("下載小圖"), "")?;
        if !file.is_image() {
            dom_utils::hide(&small);
        }
        let view = item_button("view", Some("preview"), "")?;
        view.set_attribute("target", "_blank")?;
        if can_be_previewed(&file.file_type) {
            view.set_attribute("href", &preview_href(file, &ctx.markdown_style.borrow()))?;
        } else {
            dom_utils::hide(&view);
        }
        let info = item_button("info", None, "")?;
        let del_button = item_button("del", Some("delete"), HIDE_IF_BACKUP)?;
        let danger_button = create_link("#", LinkOptions::text("DELETE"))?;
        dom_utils::add_classes(&danger_button, "btn btn-sm btn-danger")?;
        dom_utils::hide(&danger_button);

        let date = el("span", "me-1", file.udate())?;
        date.set_attribute("title", &file.utime)?;
        let right = el("div", "col-10 text-end", "")?;
        append_all(
            &right,
            &[
                el("span", "me-1", &format!("({})", file_size_to_string(file.size)))?,
                date,
                download.clone(),
                small.clone(),
                view.clone(),
                info.clone(),
                del_button.clone(),
                danger_button.clone(),
            ],
        )?;
        let row_two = el("div", "row", "")?;
        append_all(&row_two, &[el("div", "col-2 text-start FileItemLike", &like_text(file.like))?, right])?;

        let body = el("div", "card-body", "")?;
        append_all(&body, &[row_one, row_two, alert.view().clone()])?;

        let comp = Component::with_options(
            "div",
            ComponentOptions::new().id(item_id).classes("card mb-4").children(vec![header, body]),
        )?;

        let item = Rc::new(Self {
            comp,
            alert,
            buttons: vec![download.clone(), small.clone(), view, info.clone()],
            del_button,
            danger_button,
            file_id: file.id,
            ctx: ctx.clone(),
        });
        let it = item.clone();
        dom_utils::on_click(&download, move || it.download(false))?;
        let it = item.clone();
        dom_utils::on_click(&small, move || it.download(true))?;
        let it = item.clone();
        dom_utils::on_click(&info, move || it.ctx.canvas.open(it.file_id))?;
        let it = item.clone();
        dom_utils::on_click(&item.del_button, move || it.ask_delete())?;
        let it = item.clone();
        dom_utils::on_click(&item.danger_button, move || it.delete())?;
        Ok(item)
    }

    fn download(self: &Rc<Self>, small: bool) {
        let request = if small {
            api_client::download_small_pic(self.file_id)
        } else {
            api_client::download_file(self.file_id)
        };
        let on_ok = self.clone();
        request
            .alert(&self.alert)
            .on_success(move |_| {
                let text = downloaded_text(&on_ok.ctx.waiting_folder.borrow());
                on_ok.alert.insert(Severity::Success, &text);
            })
            .send();
    }

    fn ask_delete(self: &Rc<Self>) {
        self.ctx.canvas.close();
        controls::disable(&self.del_button);
        self.alert.insert(Severity::Warning, DELETE_WARNING);
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
        api_client::delete_file(self.file_id)
            .alert(&self.alert)
            .on_success(move |_| {
                for b in on_ok.buttons.iter().chain([&on_ok.del_button, &on_ok.danger_button]) {
                    dom_utils::hide(b);
                }
                on_ok.alert.clear().insert(Severity::Success, FILE_DELETED);
            })
            .on_always(move || controls::enable(&on_done.danger_button))
            .send();
    }
}

impl Mountable for Rc<FileItem> {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

struct FilesPage {
    filter: BucketFilter,
    sort: String,
    alert: Alert,
    loading: Loading,
    banner: Element,
    search: SearchBox,
    search_toggle: RefCell<Option<(Element, Element)>>,
    list: Component,
    more: MoreArea,
    export: CheckboxInput,
    export_area: Element,
    ctx: Rc<ItemContext>,
    status: RefCell<Option<ProjectStatus>>,
}

impl FilesPage {
    fn new(filter: BucketFilter, sort: String) -> Result<Rc<Self>, JsValue> {
        let canvas = FileInfoCanvas::new(FileInfoForm::new(false)?)?;
        let export = CheckboxInput::new(None)?;
        let export_area = create_form_check(&export, "下載同時導出 (export)")?;
        dom_utils::add_classes(&export_area, HIDE_IF_BACKUP)?;

        let page = Rc::new(Self {
            filter,
            sort,
            alert: Alert::new()?,
            loading: Loading::large()?,
            banner: current_bucket_banner()?,
            search: SearchBox::new()?,
            search_toggle: RefCell::new(None),
            list: Component::new("div")?,
            more: MoreArea::new()?,
            export,
            export_area,
            ctx: Rc::new(ItemContext {
                canvas,
                waiting_folder: RefCell::new(String::new()),
                markdown_style: RefCell::new(String::new()),
            }),
            status: RefCell::new(None),
        });

        let p = page.clone();
        dom_utils::on_click(page.search.button.view(), move || p.search())?;
        let p = page.clone();
        dom_utils::on_click(page.more.button.view(), move || p.load_more())?;
        let p = page.clone();
        dom_utils::on_change(page.export.view(), move || p.set_export())?;
        let p = page.clone();
        page.ctx.canvas.info.on_updated(move |file| p.replace_item(file));
        Ok(page)
    }

    fn items(&self, files: &[File]) -> Result<Vec<Rc<FileItem>>, JsValue> {
        files.iter().map(|f| FileItem::new(f, &self.ctx)).collect()
    }

    fn show_files(&self, files: &[File]) {
        let appended = self.items(files).and_then(|items| controls::append_to_list(&self.list, items));
        if let Err(e) = appended {
            log::error!("failed to render file list: {:?}", e);
        }
    }

    /// Swap the card of an edited or moved file for a fresh one.
    fn replace_item(&self, file: &File) {
        let Some(old) = dom_utils::document().get_element_by_id(&file_item_id(file.id)) else {
            return;
        };
        let replaced = FileItem::new(file, &self.ctx).and_then(|item| {
            old.replace_with_with_node_1(item.view())?;
            item.init();
            Ok(())
        });
        if let Err(e) = replaced {
            log::error!("failed to refresh file {}: {:?}", file.id, e);
        }
    }

    fn apply_backup_mode(&self) {
        if let Some(status) = self.status.borrow().as_ref() {
            apply_backup_mode(status, &self.alert);
        }
    }

    fn set_status(&self, status: ProjectStatus) {
        *self.ctx.markdown_style.borrow_mut() = status.project.markdown_style.clone();
        self.ctx.canvas.info.set_backup(status.project.is_backup);
        self.export.set_checked(status.project.download_export);
        *self.status.borrow_mut() = Some(status);
    }

    fn init(self: &Rc<Self>, mode: ListMode) {
        let p = self.clone();
        api_client::waiting_folder()
            .alert(&self.alert)
            .on_success(move |folder| {
                p.ctx.canvas.info.set_waiting_folder(&folder.text);
                *p.ctx.waiting_folder.borrow_mut() = folder.text;
            })
            .send();

        let p = self.clone();
        api_client::auto_get_buckets()
            .alert(&self.alert)
            .on_success(move |buckets| {
                let buckets = buckets.unwrap_or_default();
                show_bucket_banner(&p.filter, &buckets, &p.banner, &p.alert);
                p.ctx.canvas.info.set_buckets(buckets.into_iter().map(|b| b.bucket).collect());
            })
            .send();

        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::project_status()
            .alert(&self.alert)
            .on_success(move |status| on_ok.set_status(status))
            .on_always(move || match mode {
                ListMode::Damaged => on_done.load_damaged(),
                ListMode::Search(pattern) => {
                    on_done.loading.hide();
                    on_done.open_search();
                    on_done.search.input.set_value(&pattern);
                    on_done.search();
                }
                ListMode::Latest => on_done.load_latest(),
            })
            .send();
    }

    fn query(&self, utime: String) -> FilesQuery {
        FilesQuery {
            id: self.filter.id.unwrap_or(0),
            name: self.filter.name.clone(),
            sort: self.sort.clone(),
            utime,
        }
    }

    fn load_latest(self: &Rc<Self>) {
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::files(&self.query(String::new()))
            .alert(&self.alert)
            .on_success(move |files| {
                let files = files.unwrap_or_default();
                if on_ok.more.advance(&files) {
                    on_ok.more.area.show();
                    on_ok.show_files(&files);
                    on_ok.apply_backup_mode();
                } else {
                    on_ok.alert.insert(Severity::Warning, no_files_text(on_ok.filter.id.is_some()));
                }
            })
            .on_always(move || on_done.loading.hide())
            .send();
    }

    fn load_more(self: &Rc<Self>) {
        controls::disable(&self.more.button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::files(&self.query(self.more.cursor()))
            .alert(&self.more.alert)
            .on_success(move |files| {
                let files = files.unwrap_or_default();
                if on_ok.more.advance(&files) {
                    on_ok.show_files(&files);
                    on_ok.apply_backup_mode();
                } else {
                    on_ok.more.alert.insert(Severity::Warning, NO_MORE_FILES);
                    on_ok.more.form.hide();
                }
            })
            .on_always(move || controls::enable(&on_done.more.button))
            .send();
    }

    fn load_damaged(self: &Rc<Self>) {
        self.alert.insert(Severity::Info, BROWSING_DAMAGED);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::damaged_files()
            .alert(&self.alert)
            .on_success(move |files| {
                let files = files.unwrap_or_default();
                if files.is_empty() {
                    on_ok.alert.insert(Severity::Warning, NO_DAMAGED_FILES);
                } else {
                    on_ok.show_files(&files);
                    on_ok.apply_backup_mode();
                }
            })
            .on_always(move || on_done.loading.hide())
            .send();
    }

    fn open_search(&self) {
        if let Some((toggle, area)) = self.search_toggle.borrow().as_ref() {
            controls::disable(toggle);
            dom_utils::hide(area);
        }
        self.search.form.show();
        controls::focus(&self.search.input);
    }

    fn search(self: &Rc<Self>) {
        let pattern = self.search.input.value();
        if pattern.is_empty() {
            controls::focus(&self.search.input);
            return;
        }
        self.alert.insert(Severity::Info, &searching_text(&pattern));
        controls::disable(&self.search.button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::search_files(&pattern)
            .alert(&self.alert)
            .on_success(move |files| on_ok.show_search_result(&files.unwrap_or_default()))
            .on_always(move || {
                controls::focus(&on_done.search.input);
                controls::enable(&on_done.search.button);
            })
            .send();
    }

    fn show_search_result(&self, files: &[File]) {
        if files.is_empty() {
            self.alert.insert(Severity::Warning, NOTHING_FOUND);
            return;
        }
        self.alert.clear().insert(Severity::Success, &found_text(files.len()));
        self.more.area.hide();
        dom_utils::clear_children(self.list.view());
        self.show_files(files);
        self.apply_backup_mode();
    }

    fn set_export(&self) {
        let export = self.export.is_checked();
        api_client::set_export(&export.to_string())
            .alert(&self.alert)
            .on_success(move |_| {
                if export {
                    log::info!("OK, 已設定為: 下載同時導出.");
                } else {
                    log::info!("OK, 已設定為: 只下載, 不導出.");
                }
            })
            .send();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let filter = BucketFilter::from_url();
    let sort = get_url_param("sort").unwrap_or_default();
    let mode = ListMode::new(get_url_param("damaged").as_deref(), get_url_param("search").as_deref());
    let page = FilesPage::new(filter, sort)?;

    let bar = nav_bar(
        "Files (檔案清單)",
        &[
            NavLink::with_classes("pics.html", "Pics", "PicsBtn"),
            NavLink::new("buckets.html", "Buckets"),
            NavLink::with_classes("#", "Search", "ShowSearchBtn"),
        ],
    )?;
    if let Some(pics) = nav_link(&bar, "PicsBtn") {
        pics.set_attribute("href", &format!("pics.html{}", page.filter.query()))?;
    }
    if let Some((toggle, area)) = wrap_search_toggle(&bar, "ShowSearchBtn")? {
        let p = page.clone();
        dom_utils::on_click(&toggle, move || p.open_search())?;
        *page.search_toggle.borrow_mut() = Some((toggle, area));
    }

    place(root, &bar, "mt-3 mb-5")?;
    place(root, page.loading.view(), "my-5")?;
    root.append_child(&page.banner)?;
    place(root, page.search.form.view(), "my-3")?;
    place(root, page.alert.view(), "my-3")?;
    place(root, page.list.view(), "my-3")?;
    place(root, page.more.area.view(), "my-5")?;
    place(root, &page.export_area, "my-3")?;
    root.append_child(page.ctx.canvas.view())?;
    page.init(mode);
    Ok(())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> Rc<FilesPage> {
        FilesPage::new(BucketFilter::default(), String::new()).unwrap()
    }

    fn file(id: i64) -> File {
        File {
            id,
            bucket_name: "docs".into(),
            name: format!("{}.md", id),
            file_type: "text/md".into(),
            notes: "draft".into(),
            like: 3,
            damaged: id == 2,
            utime: "2023-05-01 10:20:30+08:00".into(),
            ..Default::default()
        }
    }

    #[wasm_bindgen_test]
    fn file_card_shows_badges_likes_and_preview() {
        let page = page();
        *page.ctx.markdown_style.borrow_mut() = "dark".into();
        let item = FileItem::new(&file(2), &page.ctx).unwrap();
        assert_eq!(item.comp.raw_id(), "F-2");
        let text = item.comp.view().text_content().unwrap_or_default();
        assert!(text.contains("DAMAGED"));
        assert!(text.contains("❤3"));
        assert!(text.contains("draft"));
        assert!(text.contains("2023-05-01"));
        let view = item.comp.find("[target=_blank]").unwrap();
        assert_eq!(view.get_attribute("href").as_deref(), Some("/md.html?id=2&css=dark"));
        assert!(dom_utils::is_hidden(&item.danger_button));
    }

    #[wasm_bindgen_test]
    fn search_result_replaces_the_list() {
        let page = page();
        page.show_files(&[file(1)]);
        page.show_search_result(&[file(3), file(4)]);
        assert_eq!(page.list.view().child_element_count(), 2);
        assert!(page.alert.view().text_content().unwrap_or_default().contains(&found_text(2)));

        page.show_search_result(&[]);
        assert_eq!(page.list.view().child_element_count(), 2);
        assert!(page.alert.view().text_content().unwrap_or_default().contains(NOTHING_FOUND));
    }

    #[wasm_bindgen_test]
    fn delete_needs_confirmation() {
        let page = page();
        let item = FileItem::new(&file(5), &page.ctx).unwrap();
        item.ask_delete();
        assert_eq!(item.alert.len(), 1);
        assert!(!dom_utils::is_hidden(&item.del_button));
    }
}
