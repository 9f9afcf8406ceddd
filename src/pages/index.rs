//! Home page: title, current project card with its totals, project
//! switching and links to the other pages.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::place;
use crate::component::{append_all, el, span, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::ProjectStatus;
use crate::network::api_client;
use crate::ui_components::{create_button, create_form_control, parse_int, InputType, TextInput};
use crate::utils::{file_size_to_string, reload_after};

const PROJECT_INFO_HINT: &str = "用文本編輯器打開項目文件夾(資料夾)內的 project.toml, 可更改項目設定. \
     注意, 用 utf-8 編碼保存文件. 需要重啟程式才生效.";

pub const CHECKED: &str = "檢查完畢";
pub const EMPTY_PROJECT_PATH: &str = "請填寫專案的絕對路徑";
pub const INVALID_PROJECT_ID: &str = "請填寫專案 ID (整數)";
pub const PROJECT_CHANGED: &str = "已切換專案, 即將重新載入頁面...";
pub const PROJECT_ADDED: &str = "已添加專案, 即將重新載入頁面...";
const RELOAD_DELAY_MS: u32 = 2000;

/// `(text, href, description)` of each entry in the link list.
pub const INDEX_LINKS: [(&str, &str, &str); 11] = [
    ("Files", "files.html", "檔案清單"),
    ("Pics", "pics.html", "圖片清單"),
    ("Recent Files", "recent-files.html", "最近檔案"),
    ("Recent Pics", "recent-pics.html", "最近圖片"),
    ("Buckets", "buckets.html", "倉庫清單"),
    ("Keywords", "keywords.html", "關鍵詞清單"),
    ("Waiting", "waiting.html", "等待上傳"),
    ("Create Bucket", "create-bucket.html", "新建倉庫"),
    ("Backup", "backup.html", "備份專案"),
    ("Admin Login", "admin-login.html", "管理員登入"),
    ("Change Password", "change-password.html", "更改密碼"),
];

pub fn files_text(status: &ProjectStatus) -> String {
    format!("檔案數: {}, 合計: {}", status.files_count, file_size_to_string(status.total_size))
}

/// Link text for the damaged files, `None` when there are none.
pub fn damaged_text(status: &ProjectStatus) -> Option<String> {
    (status.damaged_count > 0).then(|| format!("⚠️ 受損檔案: {}", status.damaged_count))
}

/// Files not yet checked, `None` when all are.
pub fn waiting_check_text(status: &ProjectStatus) -> Option<String> {
    (status.waiting_check_count > 0).then(|| format!("待檢查: {}", status.waiting_check_count))
}

pub fn validate_project_id(raw: &str) -> Result<i64, &'static str> {
    parse_int(raw).filter(|id| *id > 0).ok_or(INVALID_PROJECT_ID)
}

pub fn validate_project_path(raw: &str) -> Result<&str, &'static str> {
    let path = raw.trim();
    if path.is_empty() {
        Err(EMPTY_PROJECT_PATH)
    } else {
        Ok(path)
    }
}

struct ProjectCard {
    comp: Component,
    alert: Alert,
    title: Element,
    subtitle: Element,
    path: Element,
    files: Element,
    waiting_check: Element,
    damaged: Element,
    check_button: Component,
    root: RefCell<String>,
}

impl ProjectCard {
    fn new() -> Result<Rc<Self>, JsValue> {
        let hint_alert = Alert::new()?;
        let hint = span("ℹ️")?;
        dom_utils::set_css(&hint, "cursor", "pointer")?;
        {
            let alert = hint_alert.clone();
            dom_utils::on_click(&hint, move || {
                alert.insert_untimed(Severity::Info, PROJECT_INFO_HINT);
            })?;
        }

        let header = el("div", "card-header", "")?;
        let label = span("Project (正在使用的項目)")?;
        append_all(&header, &[label, hint, hint_alert.view().clone()])?;

        let title = el("div", "card-title fw-bold", "")?;
        let subtitle = el("div", "text-muted", "")?;
        let path = el("div", "text-muted", "")?;
        let files = el("div", "mt-2", "")?;
        let waiting_check = el("div", "", "")?;
        dom_utils::hide(&waiting_check);
        let damaged = el("a", "link-danger", "")?;
        damaged.set_attribute("href", "files.html?damaged=1")?;
        dom_utils::hide(&damaged);
        let check_button = create_button("Check Now", "outline-primary btn-sm mt-2", "button")?;
        let alert = Alert::new()?;

        let body = el("div", "card-body", "")?;
        append_all(
            &body,
            &[
                title.clone(),
                subtitle.clone(),
                path.clone(),
                files.clone(),
                waiting_check.clone(),
                damaged.clone(),
                alert.view().clone(),
                check_button.element(),
            ],
        )?;

        let comp = Component::with_options("div", ComponentOptions::new().classes("card").children(vec![header, body]))?;
        let card = Rc::new(Self {
            comp,
            alert,
            title,
            subtitle,
            path,
            files,
            waiting_check,
            damaged,
            check_button,
            root: Default::default(),
        });
        let c = card.clone();
        dom_utils::on_click(card.check_button.view(), move || c.check_now())?;
        Ok(card)
    }

    fn fill(&self, status: &ProjectStatus) {
        let project = &status.project;
        dom_utils::set_text(&self.title, &project.title);
        dom_utils::set_text(&self.subtitle, &project.subtitle);
        dom_utils::set_text(&self.path, &project.path);
        *self.root.borrow_mut() = status.root.clone();
        self.fill_totals(status);
    }

    fn fill_totals(&self, status: &ProjectStatus) {
        dom_utils::set_text(&self.files, &files_text(status));
        for (node, text) in [(&self.waiting_check, waiting_check_text(status)), (&self.damaged, damaged_text(status))] {
            match text {
                Some(text) => {
                    dom_utils::set_text(node, &text);
                    dom_utils::show(node);
                }
                None => dom_utils::hide(node),
            }
        }
    }

    fn check_now(self: &Rc<Self>) {
        let root = self.root.borrow().clone();
        controls::disable(&self.check_button);
        self.alert.insert(Severity::Info, "正在檢查...");
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::check_now(&root)
            .alert(&self.alert)
            .on_success(move |status| {
                on_ok.fill_totals(&status);
                on_ok.alert.clear().insert(Severity::Success, CHECKED);
            })
            .on_always(move || controls::enable(&on_done.check_button))
            .send();
    }
}

/// Switch to another registered project, or register a new one.
struct ProjectSwitcher {
    alert: Alert,
    id: TextInput,
    change_button: Component,
    path: TextInput,
    add_button: Component,
    form: Component,
}

impl ProjectSwitcher {
    fn new() -> Result<Rc<Self>, JsValue> {
        let id = TextInput::new(InputType::Number, false, None)?;
        let change_button = create_button("Change", "outline-primary", "button")?;
        let path = TextInput::new(InputType::Text, false, None)?;
        let add_button = create_button("Add", "outline-primary", "button")?;
        let alert = Alert::new()?;
        let form = Component::with_options(
            "form",
            ComponentOptions::new().attr("autocomplete", "off").children(vec![
                create_form_control(&id, "Project ID", Some("切換到另一個已登記的專案".into()), None)?,
                change_button.element(),
                create_form_control(&path, "Project Path", Some("添加專案 (專案資料夾的絕對路徑)".into()), Some("mt-4 mb-3"))?,
                add_button.element(),
                alert.view().clone(),
            ]),
        )?;

        let switcher = Rc::new(Self { alert, id, change_button, path, add_button, form });
        let s = switcher.clone();
        dom_utils::on_click(switcher.change_button.view(), move || s.change_project())?;
        let s = switcher.clone();
        dom_utils::on_click(switcher.add_button.view(), move || s.add_project())?;
        Ok(switcher)
    }

    fn change_project(self: &Rc<Self>) {
        let id = match validate_project_id(&self.id.value()) {
            Ok(id) => id,
            Err(warning) => {
                self.alert.insert(Severity::Warning, warning);
                return;
            }
        };
        controls::disable(&self.change_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::change_project(id)
            .alert(&self.alert)
            .on_success(move |_| {
                on_ok.alert.insert(Severity::Success, PROJECT_CHANGED);
                reload_after(RELOAD_DELAY_MS);
            })
            .on_always(move || controls::enable(&on_done.change_button))
            .send();
    }

    fn add_project(self: &Rc<Self>) {
        let raw = self.path.value();
        let path = match validate_project_path(&raw) {
            Ok(path) => path.to_string(),
            Err(warning) => {
                self.alert.insert(Severity::Warning, warning);
                return;
            }
        };
        controls::disable(&self.add_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::add_project(&path)
            .alert(&self.alert)
            .on_success(move |_| {
                on_ok.alert.insert(Severity::Success, PROJECT_ADDED);
                reload_after(RELOAD_DELAY_MS);
            })
            .on_always(move || controls::enable(&on_done.add_button))
            .send();
    }
}

fn index_item(text: &str, href: &str, description: &str) -> Result<Element, JsValue> {
    let link = el("a", "text-decoration-none", text)?;
    link.set_attribute("href", href)?;
    let left = el("div", "col text-end", "")?;
    left.append_child(&link)?;

    let row = el("div", "row mb-2 g-1", "")?;
    let right = el("div", "col", description)?;
    append_all(&row, &[left, right])?;
    Ok(row)
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let title_area = el("div", "text-center", "")?;
    append_all(
        &title_area,
        &[el("h5", "display-5", "Local Buckets")?, el("p", "lead", "本地文件倉庫 (管理文件, 備份文件)")?],
    )?;

    let alert = Alert::new()?;
    let card = ProjectCard::new()?;
    let switcher = ProjectSwitcher::new()?;
    let links = el("div", "", "")?;
    for (text, href, description) in INDEX_LINKS {
        let item = index_item(text, href, description)?;
        links.append_child(&item)?;
    }

    place(root, &title_area, "my-5")?;
    place(root, alert.view(), "my-3")?;
    place(root, card.comp.view(), "my-3")?;
    place(root, &links, "my-5")?;
    place(root, switcher.form.view(), "my-5")?;

    let c = card.clone();
    api_client::project_info()
        .alert(&alert)
        .on_success(move |status| c.fill(&status))
        .send();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_link_points_at_a_known_page() {
        for (_, href, _) in INDEX_LINKS {
            assert!(href.parse::<super::super::Page>().is_ok(), "{}", href);
        }
    }

    #[test]
    fn totals_text() {
        let status = ProjectStatus { files_count: 3, total_size: 2048, ..Default::default() };
        assert_eq!(files_text(&status), "檔案數: 3, 合計: 2.00 KB");
        assert_eq!(damaged_text(&status), None);
        assert_eq!(waiting_check_text(&status), None);

        let status = ProjectStatus { damaged_count: 2, waiting_check_count: 5, ..Default::default() };
        assert_eq!(damaged_text(&status).as_deref(), Some("⚠️ 受損檔案: 2"));
        assert_eq!(waiting_check_text(&status).as_deref(), Some("待檢查: 5"));
    }

    #[test]
    fn switcher_input_validation() {
        assert_eq!(validate_project_id(" 2 "), Ok(2));
        assert_eq!(validate_project_id("0"), Err(INVALID_PROJECT_ID));
        assert_eq!(validate_project_id("x"), Err(INVALID_PROJECT_ID));
        assert_eq!(validate_project_path("  "), Err(EMPTY_PROJECT_PATH));
        assert_eq!(validate_project_path(" /data/p2 "), Ok("/data/p2"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::Project;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn project_card_fill_sets_text() {
        let card = ProjectCard::new().unwrap();
        card.fill(&ProjectStatus {
            project: Project {
                title: "Docs".into(),
                subtitle: "<b>x</b>".into(),
                path: "/data/docs".into(),
                ..Default::default()
            },
            root: "/data/docs".into(),
            files_count: 1,
            ..Default::default()
        });
        assert_eq!(card.title.text_content().unwrap(), "Docs");
        assert_eq!(card.subtitle.text_content().unwrap(), "<b>x</b>");
        assert_eq!(card.subtitle.child_element_count(), 0);
        assert_eq!(card.path.text_content().unwrap(), "/data/docs");
        assert_eq!(*card.root.borrow(), "/data/docs");
        assert!(dom_utils::is_hidden(&card.damaged));
    }

    #[wasm_bindgen_test]
    fn damaged_link_shows_when_needed() {
        let card = ProjectCard::new().unwrap();
        card.fill_totals(&ProjectStatus { damaged_count: 4, ..Default::default() });
        assert!(!dom_utils::is_hidden(&card.damaged));
        assert_eq!(card.damaged.get_attribute("href").as_deref(), Some("files.html?damaged=1"));
        card.fill_totals(&ProjectStatus::default());
        assert!(dom_utils::is_hidden(&card.damaged));
    }

    #[wasm_bindgen_test]
    fn bad_project_id_warns() {
        let switcher = ProjectSwitcher::new().unwrap();
        switcher.id.set_value("abc");
        switcher.change_project();
        assert_eq!(switcher.alert.len(), 1);
        switcher.add_project();
        assert_eq!(switcher.alert.len(), 2);
    }
}
