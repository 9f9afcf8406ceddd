//! Backup projects: status and actions for each registered one, plus
//! creating new ones.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{nav_bar, place, NavLink};
use crate::component::{append_all, el, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::{Project, ProjectStatus};
use crate::network::api_client;
use crate::ui_components::{
    create_button, create_form_control, create_primary_button, hidden_submit_button, InputType, TextInput,
};
use crate::utils::file_size_to_string;

pub const EMPTY_PATH: &str = "請填寫 Backup Project 備份專案的絕對路徑";
pub const CREATED: &str = "創建備份專案, 成功!";
pub const SYNCED: &str = "備份完成";
pub const CHECKED: &str = "檢查完畢";
pub const FORGOTTEN: &str = "已刪除該備份專案 (資料夾內的檔案未被刪除)";

/// One-line summary of a backup project.
pub fn status_text(status: &ProjectStatus) -> String {
    let mut text = format!("檔案數: {}, 合計: {}", status.files_count, file_size_to_string(status.total_size));
    if status.damaged_count > 0 {
        text.push_str(&format!(", ⚠️ 受損: {}", status.damaged_count));
    }
    if !status.project.last_backup_at.is_empty() {
        text.push_str(&format!(", 上次備份: {}", status.project.last_backup_at));
    }
    text
}

pub fn validate_path(path: &str) -> Result<&str, &'static str> {
    let path = path.trim();
    if path.is_empty() {
        Err(EMPTY_PATH)
    } else {
        Ok(path)
    }
}

struct BackupPage {
    alert: Alert,
    loading: Loading,
    projects: Component,
    path: TextInput,
    create: Component,
    create_alert: Alert,
    form: Component,
}

impl BackupPage {
    fn new() -> Result<Rc<Self>, JsValue> {
        let path = TextInput::new(InputType::Text, true, None)?;
        let create = create_primary_button("Create")?;
        let create_alert = Alert::new()?;
        let form = Component::with_options(
            "form",
            ComponentOptions::new().attr("autocomplete", "off").children(vec![
                create_form_control(&path, "Backup Project", Some("備份專案的絕對路徑, 必須是一個空資料夾.".into()), None)?,
                hidden_submit_button()?,
                create_alert.view().clone(),
                create.element(),
            ]),
        )?;
        let projects = Component::with_options("ul", ComponentOptions::new().classes("list-group"))?;

        let page = Rc::new(Self {
            alert: Alert::new()?,
            loading: Loading::large()?,
            projects,
            path,
            create,
            create_alert,
            form,
        });
        let p = page.clone();
        dom_utils::on_click(page.create.view(), move || p.create_project())?;
        Ok(page)
    }

    fn create_project(self: &Rc<Self>) {
        let path = self.path.value();
        let path = match validate_path(&path) {
            Ok(path) => path.to_string(),
            Err(warning) => {
                self.create_alert.insert(Severity::Warning, warning);
                return;
            }
        };
        controls::disable(&self.create);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::create_backup_project(&path)
            .alert(&self.create_alert)
            .on_success(move |_| {
                on_ok.create_alert.clear().insert(Severity::Success, CREATED);
                if let Err(e) = on_ok.add_project_item(&path) {
                    log::warn!("failed to list new backup project: {:?}", e);
                }
            })
            .on_always(move || controls::enable(&on_done.create))
            .send();
    }

    fn add_project_item(&self, path: &str) -> Result<(), JsValue> {
        let item = BackupItem::new(path)?;
        controls::append_to_list(&self.projects, [item])
    }

    fn show_projects(&self, project: &Project) -> Result<(), JsValue> {
        if project.backup_projects.is_empty() {
            self.alert.insert_untimed(Severity::Info, "尚未建立備份專案");
            return Ok(());
        }
        for path in &project.backup_projects {
            self.add_project_item(path)?;
        }
        if !project.last_backup_at.is_empty() {
            self.alert.insert_untimed(Severity::Light, &format!("上次備份時間: {}", project.last_backup_at));
        }
        Ok(())
    }

    fn load(self: &Rc<Self>) {
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::project_config()
            .alert(&self.alert)
            .on_success(move |project| {
                if let Err(e) = on_ok.show_projects(&project) {
                    log::error!("failed to render backup projects: {:?}", e);
                }
            })
            .on_always(move || on_done.loading.hide())
            .send();
    }
}

/// A registered backup project and its actions.
struct BackupItem {
    comp: Component,
    path: String,
    status: Element,
    alert: Alert,
    sync_button: Component,
    check_button: Component,
    delete_button: Component,
    buttons: Element,
}

impl BackupItem {
    fn new(path: &str) -> Result<Rc<Self>, JsValue> {
        let title = el("div", "fw-bold", path)?;
        let status = el("div", "text-muted small", "")?;
        let alert = Alert::new()?;
        let sync_button = create_button("Sync", "outline-primary btn-sm me-1", "button")?;
        let check_button = create_button("Check", "outline-secondary btn-sm me-1", "button")?;
        let delete_button = create_button("Delete", "outline-danger btn-sm", "button")?;
        let buttons = el("div", "text-end", "")?;
        append_all(&buttons, &[sync_button.element(), check_button.element(), delete_button.element()])?;
        let comp = Component::with_options(
            "li",
            ComponentOptions::new().classes("list-group-item").children(vec![
                title,
                status.clone(),
                alert.view().clone(),
                buttons.clone(),
            ]),
        )?;

        let item = Rc::new(Self {
            comp,
            path: path.to_string(),
            status,
            alert,
            sync_button,
            check_button,
            delete_button,
            buttons,
        });
        let i = item.clone();
        dom_utils::on_click(item.sync_button.view(), move || i.sync())?;
        let i = item.clone();
        dom_utils::on_click(item.check_button.view(), move || i.check())?;
        let i = item.clone();
        dom_utils::on_click(item.delete_button.view(), move || i.forget())?;
        Ok(item)
    }

    fn show_status(&self, status: &ProjectStatus) {
        dom_utils::set_text(&self.status, &status_text(status));
    }

    fn load_status(self: &Rc<Self>) {
        let on_ok = self.clone();
        api_client::backup_project_status(&self.path)
            .alert(&self.alert)
            .on_success(move |status| on_ok.show_status(&status))
            .send();
    }

    fn sync(self: &Rc<Self>) {
        controls::disable(&self.sync_button);
        self.alert.insert(Severity::Info, "正在備份...");
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::sync_backup(&self.path)
            .alert(&self.alert)
            .on_success(move |_| {
                on_ok.alert.clear().insert(Severity::Success, SYNCED);
                on_ok.load_status();
            })
            .on_always(move || controls::enable(&on_done.sync_button))
            .send();
    }

    fn check(self: &Rc<Self>) {
        controls::disable(&self.check_button);
        self.alert.insert(Severity::Info, "正在檢查...");
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::check_now(&self.path)
            .alert(&self.alert)
            .on_success(move |status| {
                on_ok.show_status(&status);
                on_ok.alert.clear().insert(Severity::Success, CHECKED);
            })
            .on_always(move || controls::enable(&on_done.check_button))
            .send();
    }

    fn forget(self: &Rc<Self>) {
        controls::disable(&self.delete_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::delete_backup_project(&self.path)
            .alert(&self.alert)
            .on_success(move |_| on_ok.forgotten())
            .on_always(move || controls::enable(&on_done.delete_button))
            .send();
    }

    fn forgotten(&self) {
        dom_utils::hide(&self.buttons);
        dom_utils::hide(&self.status);
        self.alert.clear().insert_untimed(Severity::Secondary, FORGOTTEN);
    }
}

impl Mountable for Rc<BackupItem> {
    fn view(&self) -> &Element {
        self.comp.view()
    }

    fn init(&self) {
        self.load_status();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = BackupPage::new()?;
    place(root, &nav_bar("Backup (備份專案)", &[NavLink::new("buckets.html", "Buckets")])?, "my-3")?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.loading.view(), "my-5")?;
    place(root, page.projects.view(), "my-5")?;
    place(root, page.form.view(), "my-5")?;
    page.load();
    controls::focus(&page.path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_summary() {
        let mut status = ProjectStatus { files_count: 3, total_size: 2048, ..Default::default() };
        assert_eq!(status_text(&status), "檔案數: 3, 合計: 2.00 KB");
        status.damaged_count = 1;
        status.project.last_backup_at = "2023-05-01 10:00:00".into();
        assert_eq!(status_text(&status), "檔案數: 3, 合計: 2.00 KB, ⚠️ 受損: 1, 上次備份: 2023-05-01 10:00:00");
    }

    #[test]
    fn blank_path_is_rejected() {
        assert_eq!(validate_path(""), Err(EMPTY_PATH));
        assert_eq!(validate_path("   "), Err(EMPTY_PATH));
        assert_eq!(validate_path(" /mnt/backup "), Ok("/mnt/backup"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn registered_projects_are_listed() {
        let page = BackupPage::new().unwrap();
        page.show_projects(&Project {
            backup_projects: vec!["/mnt/a".into(), "/mnt/b".into()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(page.projects.view().child_element_count(), 2);
        assert!(page.alert.is_empty());
    }

    #[wasm_bindgen_test]
    fn empty_path_warns() {
        let page = BackupPage::new().unwrap();
        page.create_project();
        assert_eq!(page.create_alert.len(), 1);
    }

    #[wasm_bindgen_test]
    fn forgotten_project_hides_its_buttons() {
        let item = BackupItem::new("/mnt/a").unwrap();
        item.show_status(&ProjectStatus { files_count: 2, total_size: 10, ..Default::default() });
        assert_eq!(item.status.text_content().unwrap(), "檔案數: 2, 合計: 10 B");
        item.forgotten();
        assert!(dom_utils::is_hidden(&item.buttons));
        assert_eq!(item.alert.len(), 1);
    }
}
