// Page scripts. Each page mounts into `#root`, owns its widgets in a state
// struct shared with its handlers through `Rc`, and talks to the backend via
// `network::api_client`.

pub mod admin_login;
pub mod backup;
pub mod browse;
pub mod buckets;
pub mod change_password;
pub mod create_bucket;
pub mod edit_bucket;
pub mod edit_file;
pub mod file_info;
pub mod files;
pub mod index;
pub mod keywords;
pub mod pics;
pub mod recent_files;
pub mod waiting;

use std::fmt;
use std::str::FromStr;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::component::{append_all, el, span};
use crate::components::{Alert, Severity};
use crate::constants::{APP_NAME, ROOT_ID, ROOT_MAX_WIDTH, ROOT_MAX_WIDTH_WIDE};
use crate::dom_utils;
use crate::models::ProjectStatus;
use crate::ui_components::{create_link, parse_int, LinkOptions};

/// Elements with this class are hidden when the open project is a backup.
pub const HIDE_IF_BACKUP: &str = "HideIfBackup";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    AdminLogin,
    ChangePassword,
    Buckets,
    CreateBucket,
    EditBucket,
    Backup,
    Waiting,
    Files,
    Pics,
    RecentFiles,
    RecentPics,
    EditFile,
    Keywords,
}

impl Page {
    pub const ALL: [Page; 14] = [
        Page::Index,
        Page::AdminLogin,
        Page::ChangePassword,
        Page::Buckets,
        Page::CreateBucket,
        Page::EditBucket,
        Page::Backup,
        Page::Waiting,
        Page::Files,
        Page::Pics,
        Page::RecentFiles,
        Page::RecentPics,
        Page::EditFile,
        Page::Keywords,
    ];

    /// Name used in `data-page` and in the `.html` file name.
    pub fn name(self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::AdminLogin => "admin-login",
            Page::ChangePassword => "change-password",
            Page::Buckets => "buckets",
            Page::CreateBucket => "create-bucket",
            Page::EditBucket => "edit-bucket",
            Page::Backup => "backup",
            Page::Waiting => "waiting",
            Page::Files => "files",
            Page::Pics => "pics",
            Page::RecentFiles => "recent-files",
            Page::RecentPics => "recent-pics",
            Page::EditFile => "edit-file",
            Page::Keywords => "keywords",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Index => "Home",
            Page::AdminLogin => "Admin Login (管理員登入)",
            Page::ChangePassword => "Change Password (更改密碼)",
            Page::Buckets => "Buckets (倉庫清單)",
            Page::CreateBucket => "Create Bucket (新建倉庫)",
            Page::EditBucket => "Edit Bucket Attributes (修改倉庫屬性)",
            Page::Backup => "Backup (備份專案)",
            Page::Waiting => "Waiting (等待上傳)",
            Page::Files => "Files (檔案清單)",
            Page::Pics => "Pics (圖片清單)",
            Page::RecentFiles => "Recent (最近檔案)",
            Page::RecentPics => "Recent pics (最近圖片)",
            Page::EditFile => "Edit File Attributes (修改檔案屬性)",
            Page::Keywords => "Keywords (關鍵詞清單)",
        }
    }

    /// `document.title` for this page.
    pub fn document_title(self) -> String {
        match self {
            Page::Index => APP_NAME.to_string(),
            other => format!("{} - {}", other.title(), APP_NAME),
        }
    }

    /// Pages with long file lists use the wider layout.
    pub fn root_max_width(self) -> &'static str {
        match self {
            Page::Waiting | Page::Pics | Page::RecentPics => ROOT_MAX_WIDTH_WIDE,
            _ => ROOT_MAX_WIDTH,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = String;

    /// Accepts `admin-login`, `admin_login` and `admin-login.html`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().trim_end_matches(".html").replace('_', "-").to_ascii_lowercase();
        let key = if key.is_empty() { "index".to_string() } else { key };
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.name() == key)
            .ok_or_else(|| format!("unknown page: {}", s))
    }
}

/// Build `page` into `#root`.
pub fn mount(page: Page) -> Result<(), JsValue> {
    log::debug!("mounting page {}", page);
    dom_utils::set_title(&page.document_title());
    let root = root_element(page.root_max_width())?;
    dom_utils::clear_children(&root);
    match page {
        Page::Index => index::mount(&root),
        Page::AdminLogin => admin_login::mount(&root),
        Page::ChangePassword => change_password::mount(&root),
        Page::Buckets => buckets::mount(&root),
        Page::CreateBucket => create_bucket::mount(&root),
        Page::EditBucket => edit_bucket::mount(&root),
        Page::Backup => backup::mount(&root),
        Page::Waiting => waiting::mount(&root),
        Page::Files => files::mount(&root),
        Page::Pics => pics::mount(&root),
        Page::RecentFiles => recent_files::mount(&root),
        Page::RecentPics => pics::mount_recent(&root),
        Page::EditFile => edit_file::mount(&root),
        Page::Keywords => keywords::mount(&root),
    }
}

/// `#root`, created under `<body>` when the host page has none.
fn root_element(max_width: &str) -> Result<Element, JsValue> {
    let document = dom_utils::document();
    let root = match document.get_element_by_id(ROOT_ID) {
        Some(root) => root,
        None => {
            let root = el("div", "container", "")?;
            root.set_id(ROOT_ID);
            document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?
                .append_child(&root)?;
            root
        }
    };
    dom_utils::set_css(&root, "max-width", max_width)?;
    Ok(root)
}

pub const MISSING_ID: &str = "id is null";
pub const INVALID_ID: &str = "id must be an integer";

/// Record id from an `?id=` query parameter.
pub fn parse_id_param(param: Option<&str>) -> Result<i64, &'static str> {
    let raw = param.filter(|p| !p.trim().is_empty()).ok_or(MISSING_ID)?;
    parse_int(raw).ok_or(INVALID_ID)
}

/// Append `node` to `parent` with extra spacing classes.
pub(crate) fn place(parent: &Element, node: &Element, classes: &str) -> Result<(), JsValue> {
    dom_utils::add_classes(node, classes)?;
    parent.append_child(node)?;
    Ok(())
}

/// A link for the right side of the nav bar.
pub(crate) struct NavLink {
    pub href: &'static str,
    pub text: &'static str,
    pub classes: &'static str,
}

impl NavLink {
    pub const fn new(href: &'static str, text: &'static str) -> Self {
        Self { href, text, classes: "" }
    }

    pub const fn with_classes(href: &'static str, text: &'static str, classes: &'static str) -> Self {
        Self { href, text, classes }
    }
}

/// `Home .. <here>` on the left, `a | b | c` on the right.
pub(crate) fn nav_bar(here: &str, links: &[NavLink]) -> Result<Element, JsValue> {
    let left = el("div", "col text-start", "")?;
    append_all(
        &left,
        &[create_link("index.html", LinkOptions::text("Home"))?, span(&format!(" .. {}", here))?],
    )?;

    let right = el("div", "col text-end", "")?;
    for (i, link) in links.iter().enumerate() {
        if i > 0 {
            let sep = span(" | ")?;
            right.append_child(&sep)?;
        }
        let a = create_link(link.href, LinkOptions::text(link.text))?;
        dom_utils::add_classes(&a, link.classes)?;
        right.append_child(&a)?;
    }

    let bar = el("div", "row", "")?;
    bar.append_child(&left)?;
    bar.append_child(&right)?;
    Ok(bar)
}

/// Hide write actions when the open project is a backup copy.
pub(crate) fn apply_backup_mode(status: &ProjectStatus, alert: &Alert) {
    if !status.project.is_backup {
        return;
    }
    let Ok(nodes) = dom_utils::document().query_selector_all(&format!(".{}", HIDE_IF_BACKUP)) else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            if let Ok(elem) = node.dyn_into::<Element>() {
                dom_utils::hide(&elem);
            }
        }
    }
    alert.insert_untimed(Severity::Info, "這是備份專案, 只能瀏覽, 不可修改.");
}
