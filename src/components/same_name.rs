//! Conflict card shown when a waiting file has the same name as a file that
//! is already stored in a bucket. The user either overwrites the stored file
//! or renames the waiting one.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::component::{append_all, el, span, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::File;
use crate::network::api_client::{self, RenameWaitingFileBody};
use crate::ui_components::{create_primary_button, CheckboxInput, TextInput};
use crate::utils::{file_size_to_string, reload_after};

const RADIO_GROUP: &str = "SameNameRadio";
const RELOAD_DELAY_MS: u32 = 3000;

pub const NAME_UNCHANGED: &str = "檔案名稱未變更.";

/// What to do with the clashing waiting file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Overwrite,
    Rename,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Overwrite => "overwrite",
            Resolution::Rename => "rename",
        }
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Resolution::Overwrite),
            "rename" => Ok(Resolution::Rename),
            other => Err(format!("unknown resolution: {}", other)),
        }
    }
}

/// The rename request body, or the warning to show instead.
pub fn rename_request(old_name: &str, new_name: &str) -> Result<RenameWaitingFileBody, &'static str> {
    let new_name = new_name.trim();
    if new_name == old_name {
        return Err(NAME_UNCHANGED);
    }
    Ok(RenameWaitingFileBody {
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
    })
}

/// `(label, value)` rows of the details list. Empty notes and keywords are
/// left out.
pub fn detail_rows(file: &File) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Bucket: ", file.bucket_name.clone()), ("File Name: ", file.name.clone())];
    if !file.notes.is_empty() {
        rows.push(("Notes: ", file.notes.clone()));
    }
    if !file.keywords.is_empty() {
        rows.push(("Keywords: ", file.keywords.clone()));
    }
    rows.push(("Size: ", file_size_to_string(file.size)));
    rows
}

pub struct SameNameCard {
    comp: Component,
    details: Component,
    overwrite_radio: CheckboxInput,
    rename_radio: CheckboxInput,
    rename_area: Component,
    rename_input: TextInput,
    rename_alert: Alert,
    overwrite_area: Component,
    overwrite_alert: Alert,
    old_name: RefCell<String>,
}

impl SameNameCard {
    pub fn new() -> Result<Rc<Self>, JsValue> {
        let overwrite_radio = CheckboxInput::radio(RADIO_GROUP, Resolution::Overwrite.as_str())?;
        let rename_radio = CheckboxInput::radio(RADIO_GROUP, Resolution::Rename.as_str())?;
        let details = Component::with_options("dl", ComponentOptions::new().classes("row mb-3"))?;

        let rename_input = TextInput::text()?;
        let rename_button = create_primary_button("Rename")?;
        let rename_alert = Alert::new()?;
        let rename_form = el("div", "input-group mb-2", "")?;
        rename_form.append_child(rename_input.view())?;
        rename_form.append_child(rename_button.view())?;
        let rename_area = Component::with_options(
            "div",
            ComponentOptions::new().classes("my-5").children(vec![
                el("div", "mb-1", "在此更改待上傳檔案的名稱, 注意保留副檔名(擴展名)")?,
                rename_form,
                rename_alert.view().clone(),
            ]),
        )?
        .hidden();

        let overwrite_button = create_primary_button("Overwrite")?;
        let overwrite_alert = Alert::new()?;
        let overwrite_area = Component::with_options(
            "div",
            ComponentOptions::new().classes("my-5").children(vec![
                span("點擊此按鈕執行覆蓋: ")?,
                overwrite_button.element(),
                overwrite_alert.view().clone(),
            ]),
        )?
        .hidden();

        let body = el("div", "card-body", "")?;
        append_all(
            &body,
            &[
                el("div", "mb-3", "待上傳檔案的名稱, 與倉庫中的檔案名稱相同:")?,
                details.element(),
                el("div", "mb-3", "請選擇處理方式:")?,
                radio_row(&overwrite_radio, "Overwrite (覆蓋倉庫中的檔案)")?,
                radio_row(&rename_radio, "Rename (更改待上傳檔案的名稱)")?,
                rename_area.element(),
                overwrite_area.element(),
            ],
        )?;

        let comp = Component::with_options("div", ComponentOptions::new().classes("card").children(vec![body]))?;

        let card = Rc::new(Self {
            comp,
            details,
            overwrite_radio,
            rename_radio,
            rename_area,
            rename_input,
            rename_alert,
            overwrite_area,
            overwrite_alert,
            old_name: RefCell::new(String::new()),
        });

        for radio in [&card.overwrite_radio, &card.rename_radio] {
            let c = card.clone();
            dom_utils::on_change(radio.view(), move || c.apply_selection())?;
        }

        let c = card.clone();
        let button = rename_button.clone();
        dom_utils::on_click(rename_button.view(), move || c.submit_rename(&button))?;

        let c = card.clone();
        let button = overwrite_button.clone();
        dom_utils::on_click(overwrite_button.view(), move || c.submit_overwrite(&button))?;

        Ok(card)
    }

    /// Fill the card for `file` and show it.
    pub fn open(&self, file: &File) -> Result<(), JsValue> {
        let list = self.details.view();
        dom_utils::clear_children(list);
        for (label, value) in detail_rows(file) {
            append_all(list, &[el("dt", "col-sm-2", label)?, el("dt", "col-sm-10 text-muted", &value)?])?;
        }
        self.rename_input.set_value(&file.name);
        *self.old_name.borrow_mut() = file.name.clone();
        self.comp.show();
        Ok(())
    }

    pub fn selection(&self) -> Option<Resolution> {
        if self.overwrite_radio.is_checked() {
            Some(Resolution::Overwrite)
        } else if self.rename_radio.is_checked() {
            Some(Resolution::Rename)
        } else {
            None
        }
    }

    fn apply_selection(&self) {
        match self.selection() {
            Some(Resolution::Rename) => {
                self.overwrite_area.hide();
                self.rename_area.show();
                controls::focus(&self.rename_input);
            }
            Some(Resolution::Overwrite) => {
                self.rename_area.hide();
                self.overwrite_area.show();
            }
            None => {}
        }
    }

    fn submit_rename(&self, button: &Component) {
        let body = match rename_request(&self.old_name.borrow(), &self.rename_input.value()) {
            Ok(body) => body,
            Err(warning) => {
                self.rename_alert.insert(Severity::Warning, warning);
                return;
            }
        };
        controls::disable(button);
        let alert = self.rename_alert.clone();
        let button = button.clone();
        api_client::rename_waiting_file(&body)
            .alert(&self.rename_alert)
            .on_success(move |_| {
                alert.insert(Severity::Success, "Rename Success! 三秒後自動刷新.");
                reload_after(RELOAD_DELAY_MS);
            })
            .on_always(move || controls::enable(&button))
            .send();
    }

    fn submit_overwrite(&self, button: &Component) {
        controls::disable(button);
        let alert = self.overwrite_alert.clone();
        let button = button.clone();
        api_client::overwrite_file(&self.old_name.borrow())
            .alert(&self.overwrite_alert)
            .on_success(move |_| {
                alert.insert(Severity::Success, "Overwrite Success! 三秒後自動刷新.");
                reload_after(RELOAD_DELAY_MS);
            })
            .on_always(move || controls::enable(&button))
            .send();
    }
}

impl Mountable for SameNameCard {
    fn view(&self) -> &Element {
        self.comp.view()
    }
}

fn radio_row(radio: &CheckboxInput, label: &str) -> Result<Element, JsValue> {
    crate::ui_components::create_form_check(radio, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_values_round_trip_through_radio_values() {
        assert_eq!("overwrite".parse::<Resolution>(), Ok(Resolution::Overwrite));
        assert_eq!("rename".parse::<Resolution>(), Ok(Resolution::Rename));
        assert!("delete".parse::<Resolution>().is_err());
    }

    #[test]
    fn unchanged_name_is_rejected() {
        assert_eq!(rename_request("a.jpg", "a.jpg"), Err(NAME_UNCHANGED));
        assert_eq!(rename_request("a.jpg", "  a.jpg "), Err(NAME_UNCHANGED));

        let body = rename_request("a.jpg", " b.jpg").unwrap();
        assert_eq!(body.old_name, "a.jpg");
        assert_eq!(body.new_name, "b.jpg");
    }

    #[test]
    fn optional_detail_rows_are_skipped() {
        let file = File {
            bucket_name: "photos".into(),
            name: "a.jpg".into(),
            size: 2048,
            ..Default::default()
        };
        let rows = detail_rows(&file);
        let labels: Vec<_> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Bucket: ", "File Name: ", "Size: "]);
        assert_eq!(rows[2].1, "2.00 KB");

        let file = File { notes: "n".into(), keywords: "k".into(), ..file };
        assert_eq!(detail_rows(&file).len(), 5);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn open_fills_details_and_rename_input() {
        let card = SameNameCard::new().unwrap();
        card.comp.hide();
        let file = File { bucket_name: "photos".into(), name: "a.jpg".into(), size: 10, ..Default::default() };
        card.open(&file).unwrap();

        assert!(!card.comp.is_hidden());
        assert_eq!(card.details.view().child_element_count(), 6);
        assert_eq!(card.rename_input.value(), "a.jpg");
        assert_eq!(card.selection(), None);
        assert!(card.rename_area.is_hidden());
        assert!(card.overwrite_area.is_hidden());
    }

    #[wasm_bindgen_test]
    fn choosing_rename_shows_the_rename_form() {
        let card = SameNameCard::new().unwrap();
        card.rename_radio.set_checked(true);
        card.apply_selection();
        assert_eq!(card.selection(), Some(Resolution::Rename));
        assert!(!card.rename_area.is_hidden());
        assert!(card.overwrite_area.is_hidden());

        card.overwrite_radio.set_checked(true);
        card.apply_selection();
        assert!(card.rename_area.is_hidden());
        assert!(!card.overwrite_area.is_hidden());
    }

    #[wasm_bindgen_test]
    fn unchanged_name_warns_without_request() {
        let card = SameNameCard::new().unwrap();
        card.open(&File { name: "a.jpg".into(), ..Default::default() }).unwrap();
        let button = create_primary_button("Rename").unwrap();
        card.submit_rename(&button);
        assert_eq!(card.rename_alert.len(), 1);
        assert!(card.rename_alert.view().text_content().unwrap_or_default().contains(NAME_UNCHANGED));
    }
}
