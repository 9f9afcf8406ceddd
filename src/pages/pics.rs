//! Picture walls: `pics.html` (paged, by bucket) and `recent-pics.html`
//! (recently touched). Clicking a thumbnail opens the file info panel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::browse::{
    current_bucket_banner, file_item_id, found_text, nav_link, searching_text, show_bucket_banner, wrap_search_toggle,
    BucketFilter, MoreArea, SearchBox, NOTHING_FOUND,
};
use super::file_info::{FileInfoCanvas, FileInfoForm};
use super::{apply_backup_mode, nav_bar, place, NavLink};
use crate::component::{Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::{File, ProjectStatus};
use crate::network::api_client::{self, PicsQuery};
use crate::network::config::api_url;
use crate::network::http::{fetch_text, Method};

pub const NO_MORE_PICS: &str = "沒有更多圖片了.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PicsMode {
    /// Paged by `utime`, optionally limited to one bucket.
    All,
    /// The most recently updated pictures.
    Recent,
}

impl PicsMode {
    fn here(self) -> &'static str {
        match self {
            PicsMode::All => "Pics (圖片清單)",
            PicsMode::Recent => "Recent pics (最近圖片)",
        }
    }

    /// Matching file list for the nav bar's Files link.
    pub fn files_href(self, filter: &BucketFilter) -> String {
        match self {
            PicsMode::All => format!("files.html{}", filter.query()),
            PicsMode::Recent => match filter.id {
                Some(id) => format!("recent-files.html?bucket={}", id),
                None => "recent-files.html".to_string(),
            },
        }
    }
}

pub fn no_pics_text(in_bucket: bool) -> &'static str {
    if in_bucket {
        "在本倉庫中未找到任何圖片"
    } else {
        "未找到任何圖片, 請返回首頁, 點擊 Upload 上傳圖片."
    }
}

/// Thumbnail tooltip: bucket plus notes, keywords or the file name.
pub fn thumb_title(file: &File) -> String {
    let mut notes = file.notes.clone();
    if !file.keywords.is_empty() {
        notes = format!("{} [{}]", notes, file.keywords);
    }
    if notes.is_empty() {
        notes = file.name.clone();
    }
    let title = format!("{}/{}", file.bucket_name, notes);
    if file.encrypted {
        format!("🔒{}", title)
    } else {
        title
    }
}

/// A thumbnail; its image data is fetched by `init()` once it is in the list.
fn pic_item(file: &File, canvas: &Rc<FileInfoCanvas>) -> Result<Component, JsValue> {
    let img = Component::with_options(
        "img",
        ComponentOptions::new().attr("alt", &file.name).attr("title", thumb_title(file)).css("cursor", "pointer"),
    )?;
    let id = file.id;
    let c = canvas.clone();
    dom_utils::on_click(img.view(), move || c.open(id))?;

    let thumb = img.element();
    let item = Component::with_options(
        "div",
        ComponentOptions::new().id(file_item_id(file.id)).children(vec![img.element()]),
    )?
    .on_init(move |_| load_thumb(id, thumb.clone()));
    Ok(item)
}

fn load_thumb(id: i64, img: Element) {
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_text(Method::Get, &api_url(&format!("/thumbs/{}", id)), None).await {
            Ok(src) => {
                if let Err(e) = img.set_attribute("src", &src) {
                    log::warn!("failed to set thumbnail {}: {:?}", id, e);
                }
            }
            Err(e) => log::warn!("thumbnail {} unavailable: {}", id, e),
        }
    });
}

struct PicsPage {
    mode: PicsMode,
    filter: BucketFilter,
    alert: Alert,
    loading: Loading,
    banner: Element,
    search: SearchBox,
    search_toggle: RefCell<Option<(Element, Element)>>,
    list: Component,
    more: MoreArea,
    canvas: Rc<FileInfoCanvas>,
    /// Inside one bucket a moved picture no longer belongs on the wall.
    in_bucket: Cell<bool>,
    status: RefCell<Option<ProjectStatus>>,
}

impl PicsPage {
    fn new(mode: PicsMode, filter: BucketFilter) -> Result<Rc<Self>, JsValue> {
        let in_bucket = filter.id.is_some();
        let page = Rc::new(Self {
            mode,
            filter,
            alert: Alert::new()?,
            loading: Loading::large()?,
            banner: current_bucket_banner()?,
            search: SearchBox::new()?,
            search_toggle: RefCell::new(None),
            list: Component::with_options("div", ComponentOptions::new().classes("d-flex flex-wrap p-2"))?,
            more: MoreArea::new()?,
            canvas: FileInfoCanvas::new(FileInfoForm::new(true)?)?,
            in_bucket: Cell::new(in_bucket),
            status: RefCell::new(None),
        });
        let p = page.clone();
        dom_utils::on_click(page.search.button.view(), move || p.search())?;
        let p = page.clone();
        dom_utils::on_click(page.more.button.view(), move || p.load_more())?;
        let p = page.clone();
        page.canvas.info.on_updated(move |file| p.file_updated(file));
        page.canvas.info.on_deleted(|file| hide_item(file.id));
        Ok(page)
    }

    fn show_pics(&self, files: &[File]) {
        let items: Result<Vec<_>, JsValue> = files.iter().map(|f| pic_item(f, &self.canvas)).collect();
        if let Err(e) = items.and_then(|items| controls::append_to_list(&self.list, items)) {
            log::error!("failed to render pictures: {:?}", e);
        }
    }

    fn file_updated(&self, file: &File) {
        if self.in_bucket.get() {
            hide_item(file.id);
            return;
        }
        let Some(old) = dom_utils::document().get_element_by_id(&file_item_id(file.id)) else {
            return;
        };
        let replaced = pic_item(file, &self.canvas).and_then(|item| {
            old.replace_with_with_node_1(item.view())?;
            item.init();
            Ok(())
        });
        if let Err(e) = replaced {
            log::error!("failed to refresh picture {}: {:?}", file.id, e);
        }
    }

    fn apply_backup_mode(&self) {
        if let Some(status) = self.status.borrow().as_ref() {
            apply_backup_mode(status, &self.alert);
        }
    }

    fn init(self: &Rc<Self>) {
        let p = self.clone();
        api_client::auto_get_buckets()
            .alert(&self.alert)
            .on_success(move |buckets| {
                let buckets = buckets.unwrap_or_default();
                if p.mode == PicsMode::All {
                    show_bucket_banner(&p.filter, &buckets, &p.banner, &p.alert);
                }
                p.canvas.info.set_buckets(buckets.into_iter().map(|b| b.bucket).collect());
            })
            .send();

        let p = self.clone();
        api_client::waiting_folder()
            .alert(&self.alert)
            .on_success(move |folder| p.canvas.info.set_waiting_folder(&folder.text))
            .send();

        let p = self.clone();
        api_client::project_status()
            .alert(&self.alert)
            .on_success(move |status| {
                p.canvas.info.set_backup(status.project.is_backup);
                *p.status.borrow_mut() = Some(status);
                p.apply_backup_mode();
            })
            .send();

        self.load_first();
    }

    fn load_first(self: &Rc<Self>) {
        let request = match (self.mode, self.filter.id) {
            (PicsMode::All, _) => api_client::pics(&PicsQuery {
                id: self.filter.id.unwrap_or(0),
                name: self.filter.name.clone(),
                utime: String::new(),
            }),
            (PicsMode::Recent, Some(id)) => api_client::recent_pics_in(id),
            (PicsMode::Recent, None) => api_client::recent_pics(),
        };
        let on_ok = self.clone();
        let on_done = self.clone();
        request
            .alert(&self.alert)
            .on_success(move |files| {
                let files = files.unwrap_or_default();
                if files.is_empty() {
                    on_ok.alert.insert(Severity::Warning, no_pics_text(on_ok.filter.id.is_some()));
                    return;
                }
                if on_ok.mode == PicsMode::All && on_ok.more.advance(&files) {
                    on_ok.more.area.show();
                }
                on_ok.show_pics(&files);
            })
            .on_always(move || on_done.loading.hide())
            .send();
    }

    fn load_more(self: &Rc<Self>) {
        controls::disable(&self.more.button);
        let query = PicsQuery {
            id: self.filter.id.unwrap_or(0),
            name: self.filter.name.clone(),
            utime: self.more.cursor(),
        };
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::pics(&query)
            .alert(&self.more.alert)
            .on_success(move |files| {
                let files = files.unwrap_or_default();
                if on_ok.more.advance(&files) {
                    on_ok.show_pics(&files);
                } else {
                    on_ok.more.alert.insert(Severity::Warning, NO_MORE_PICS);
                    on_ok.more.form.hide();
                }
            })
            .on_always(move || controls::enable(&on_done.more.button))
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
        self.more.area.hide();
        let pattern = self.search.input.value();
        if pattern.is_empty() {
            controls::focus(&self.search.input);
            return;
        }
        self.alert.insert(Severity::Info, &searching_text(&pattern));
        controls::disable(&self.search.button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::search_pics(&pattern)
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
        // search results span buckets, so moves no longer hide items
        self.in_bucket.set(false);
        dom_utils::clear_children(self.list.view());
        self.show_pics(files);
        self.apply_backup_mode();
    }
}

fn hide_item(id: i64) {
    if let Some(item) = dom_utils::document().get_element_by_id(&file_item_id(id)) {
        dom_utils::hide(&item);
    }
}

fn mount_mode(root: &Element, mode: PicsMode) -> Result<(), JsValue> {
    let page = PicsPage::new(mode, BucketFilter::from_url())?;

    let bar = nav_bar(
        mode.here(),
        &[
            NavLink::with_classes("files.html", "Files", "FilesBtn"),
            NavLink::new("buckets.html", "Buckets"),
            NavLink::with_classes("#", "Search", "ShowSearchBtn"),
        ],
    )?;
    if let Some(files) = nav_link(&bar, "FilesBtn") {
        files.set_attribute("href", &mode.files_href(&page.filter))?;
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
    root.append_child(page.canvas.view())?;
    page.init();
    Ok(())
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    mount_mode(root, PicsMode::All)
}

pub fn mount_recent(root: &Element) -> Result<(), JsValue> {
    mount_mode(root, PicsMode::Recent)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn moved_picture_is_hidden_inside_a_bucket() {
        let page = PicsPage::new(PicsMode::All, BucketFilter::new(Some("2"), None)).unwrap();
        dom_utils::document().body().unwrap().append_child(page.list.view()).unwrap();
        let file = File { id: 812, bucket_name: "pics".into(), name: "a.jpg".into(), ..Default::default() };
        page.show_pics(&[file.clone()]);
        assert_eq!(page.list.view().child_element_count(), 1);

        page.file_updated(&file);
        let item = dom_utils::document().get_element_by_id("F-812").unwrap();
        assert!(dom_utils::is_hidden(&item));
        page.list.view().remove();
    }

    #[wasm_bindgen_test]
    fn search_results_replace_the_wall() {
        let page = PicsPage::new(PicsMode::Recent, BucketFilter::default()).unwrap();
        let pics: Vec<File> = (900..903).map(|id| File { id, ..Default::default() }).collect();
        page.show_pics(&pics[..1]);
        page.show_search_result(&pics[1..]);
        assert_eq!(page.list.view().child_element_count(), 2);
        assert!(!page.in_bucket.get());
    }
}
