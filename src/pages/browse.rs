//! Pieces shared by the file and picture lists: the `?bucket=` /
//! `?bucketname=` filter, the search box, the "More" pager and preview
//! links.

use std::cell::RefCell;

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::component::{el, span, Component, ComponentOptions, Mountable};
use crate::components::Alert;
use crate::dom_utils;
use crate::models::{Bucket, BucketStatus, File};
use crate::ui_components::{create_button, InputType, TextInput};
use crate::utils::get_url_param;

pub const NOTHING_FOUND: &str = "未找到任何檔案";

/// Bucket selected through the query string, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketFilter {
    pub id: Option<i64>,
    pub name: String,
}

impl BucketFilter {
    pub fn new(id: Option<&str>, name: Option<&str>) -> Self {
        Self {
            id: id.and_then(|s| s.trim().parse().ok()).filter(|id| *id > 0),
            name: name.unwrap_or_default().trim().to_string(),
        }
    }

    pub fn from_url() -> Self {
        Self::new(get_url_param("bucket").as_deref(), get_url_param("bucketname").as_deref())
    }

    pub fn is_set(&self) -> bool {
        self.id.is_some() || !self.name.is_empty()
    }

    /// `?bucket=<id>`, else `?bucketname=<name>`, else nothing.
    pub fn query(&self) -> String {
        match (self.id, self.name.as_str()) {
            (Some(id), _) => format!("?bucket={}", id),
            (None, "") => String::new(),
            (None, name) => format!("?bucketname={}", name),
        }
    }

    /// Matches by id, or by name ignoring case.
    pub fn matches(&self, bucket: &Bucket) -> bool {
        self.id == Some(bucket.id) || (!self.name.is_empty() && self.name.eq_ignore_ascii_case(&bucket.name))
    }

    /// Text for the "current bucket" banner, or the danger message when
    /// no bucket matches. `None` when no filter is set.
    pub fn banner(&self, buckets: &[BucketStatus]) -> Option<Result<String, String>> {
        if !self.is_set() {
            return None;
        }
        let found = buckets.iter().map(|b| &b.bucket).find(|b| self.matches(b));
        Some(match found {
            Some(bucket) if bucket.name != bucket.title && !bucket.title.is_empty() => {
                Ok(format!("正在瀏覽倉庫: {}({})", bucket.name, bucket.title))
            }
            Some(bucket) => Ok(format!("正在瀏覽倉庫: {}", bucket.name)),
            None => {
                let id = self.id.map(|id| id.to_string()).unwrap_or_default();
                Err(format!("找不到倉庫: {} {}", id, self.name))
            }
        })
    }
}

/// `❤` for one like, `❤<n>` for more, nothing otherwise.
pub fn like_text(like: i64) -> String {
    match like {
        1 => "❤".to_string(),
        n if n > 1 => format!("❤{}", n),
        _ => String::new(),
    }
}

pub fn can_be_previewed(file_type: &str) -> bool {
    file_type.starts_with("image")
        || file_type.starts_with("video")
        || file_type.starts_with("text")
        || file_type.ends_with("pdf")
}

/// Markdown and plain text open in the styled viewers, the rest raw.
pub fn preview_href(file: &File, css: &str) -> String {
    match file.file_type.as_str() {
        "text/md" => format!("/md.html?id={}&css={}", file.id, css),
        "text/plain" => format!("/txt.html?id={}&css={}", file.id, css),
        _ => format!("/file/{}", file.id),
    }
}

pub fn found_text(count: usize) -> String {
    format!("找到 {} 個檔案", count)
}

pub fn searching_text(pattern: &str) -> String {
    format!("正在尋找 {} ...", pattern)
}

/// DOM id of a file item.
pub fn file_item_id(id: i64) -> String {
    format!("F-{}", id)
}

/// Search input + button in an input group, hidden until asked for.
pub struct SearchBox {
    pub input: TextInput,
    pub button: Component,
    pub form: Component,
}

impl SearchBox {
    pub fn new() -> Result<Self, JsValue> {
        let input = TextInput::new(InputType::Search, true, None)?;
        input.view().set_attribute("accesskey", "s")?;
        let button = create_button("search", "primary", "submit")?;
        let form = Component::with_options(
            "form",
            ComponentOptions::new().classes("input-group").children(vec![input.view().clone(), button.element()]),
        )?
        .hidden();
        Ok(Self { input, button, form })
    }
}

/// "More" button paging by the `utime` of the last item shown.
pub struct MoreArea {
    cursor: RefCell<String>,
    pub button: Component,
    pub alert: Alert,
    pub form: Component,
    pub area: Component,
}

impl MoreArea {
    pub fn new() -> Result<Self, JsValue> {
        let button = create_button("More", "outline-primary", "button")?;
        let form = Component::with_options(
            "div",
            ComponentOptions::new().classes("text-center").children(vec![button.element()]),
        )?;
        let alert = Alert::new()?;
        let area = Component::with_options(
            "div",
            ComponentOptions::new().children(vec![alert.view().clone(), form.element()]),
        )?
        .hidden();
        Ok(Self { cursor: RefCell::new(String::new()), button, alert, form, area })
    }

    pub fn cursor(&self) -> String {
        self.cursor.borrow().clone()
    }

    /// Remember where `files` ended; returns false for an empty page.
    pub fn advance(&self, files: &[File]) -> bool {
        match files.last() {
            Some(last) => {
                *self.cursor.borrow_mut() = last.utime_cursor().to_string();
                true
            }
            None => false,
        }
    }
}

/// Nav link by class inside a bar built with `nav_bar`.
pub fn nav_link(bar: &Element, class: &str) -> Option<Element> {
    bar.query_selector(&format!(".{}", class)).ok().flatten()
}

/// Wrap the nav bar's search link and its separator in one span so both
/// can be hidden once the search box is open.
pub fn wrap_search_toggle(bar: &Element, class: &str) -> Result<Option<(Element, Element)>, JsValue> {
    let Some(toggle) = nav_link(bar, class) else {
        return Ok(None);
    };
    let area = span("")?;
    if let Some(sep) = toggle.previous_element_sibling() {
        area.append_child(&sep)?;
    }
    if let Some(right) = toggle.parent_element() {
        right.append_child(&area)?;
    }
    area.append_child(&toggle)?;
    Ok(Some((toggle, area)))
}

/// Blue banner naming the bucket being browsed.
pub fn current_bucket_banner() -> Result<Element, JsValue> {
    let banner = el("div", "alert alert-info my-3", "")?;
    banner.set_attribute("role", "alert")?;
    dom_utils::hide(&banner);
    Ok(banner)
}

/// Fill the banner (or report the unknown bucket) for `filter`.
pub fn show_bucket_banner(filter: &BucketFilter, buckets: &[BucketStatus], banner: &Element, alert: &Alert) {
    match filter.banner(buckets) {
        Some(Ok(text)) => {
            dom_utils::set_text(banner, &text);
            dom_utils::show(banner);
        }
        Some(Err(msg)) => {
            alert.insert(crate::components::Severity::Danger, &msg);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: i64, name: &str, title: &str) -> BucketStatus {
        BucketStatus {
            bucket: Bucket { id, name: name.into(), title: title.into(), ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn filter_from_params() {
        let f = BucketFilter::new(Some("3"), None);
        assert_eq!(f.query(), "?bucket=3");
        assert!(f.is_set());

        let f = BucketFilter::new(Some("abc"), Some("Docs"));
        assert_eq!(f.id, None);
        assert_eq!(f.query(), "?bucketname=Docs");

        let f = BucketFilter::new(Some("0"), None);
        assert!(!f.is_set());
        assert_eq!(f.query(), "");
    }

    #[test]
    fn banner_names_bucket_or_reports_missing() {
        let buckets = vec![status(1, "docs", "Documents"), status(2, "pics", "pics")];
        assert_eq!(
            BucketFilter::new(None, Some("DOCS")).banner(&buckets),
            Some(Ok("正在瀏覽倉庫: docs(Documents)".into()))
        );
        assert_eq!(BucketFilter::new(Some("2"), None).banner(&buckets), Some(Ok("正在瀏覽倉庫: pics".into())));
        assert_eq!(
            BucketFilter::new(Some("9"), None).banner(&buckets),
            Some(Err("找不到倉庫: 9 ".into()))
        );
        assert_eq!(BucketFilter::default().banner(&buckets), None);
    }

    #[test]
    fn likes() {
        assert_eq!(like_text(0), "");
        assert_eq!(like_text(1), "❤");
        assert_eq!(like_text(5), "❤5");
    }

    #[test]
    fn preview_links_by_type() {
        let file = |t: &str| File { id: 4, file_type: t.into(), ..Default::default() };
        assert_eq!(preview_href(&file("text/md"), "dark"), "/md.html?id=4&css=dark");
        assert_eq!(preview_href(&file("text/plain"), ""), "/txt.html?id=4&css=");
        assert_eq!(preview_href(&file("image/png"), "x"), "/file/4");
        assert!(can_be_previewed("application/pdf"));
        assert!(can_be_previewed("video/mp4"));
        assert!(!can_be_previewed("application/zip"));
    }
}
