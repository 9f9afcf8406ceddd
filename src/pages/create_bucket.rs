//! Create a new bucket.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{nav_bar, place, NavLink};
use crate::component::{el, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Severity};
use crate::constants::BUTTON_TYPE_SUBMIT;
use crate::controls;
use crate::dom_utils;
use crate::network::api_client::{self, CreateBucketBody};
use crate::ui_components::{
    create_button, create_form_check, create_form_control, create_link, hidden_submit_button, CheckboxInput,
    InputType, LinkOptions, TextInput,
};
use crate::utils::has_white_space;

pub const EMPTY_NAME: &str = "請填寫倉庫名稱";
pub const NAME_HAS_SPACE: &str = "倉庫名稱不可包含空格";

pub fn validate_bucket(name: &str, encrypted: bool) -> Result<CreateBucketBody, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EMPTY_NAME);
    }
    if has_white_space(name) {
        return Err(NAME_HAS_SPACE);
    }
    Ok(CreateBucketBody { name: name.to_string(), encrypted })
}

struct CreateBucketPage {
    alert: Alert,
    name: TextInput,
    encrypted: CheckboxInput,
    submit: Component,
    form: Component,
}

impl CreateBucketPage {
    fn new() -> Result<Rc<Self>, JsValue> {
        let name = TextInput::new(InputType::Text, true, None)?;
        let encrypted = CheckboxInput::new(None)?;
        let submit = create_button("Create", "primary", BUTTON_TYPE_SUBMIT)?;
        let button_area = el("div", "text-center my-3", "")?;
        button_area.append_child(submit.view())?;
        let form = Component::with_options(
            "form",
            ComponentOptions::new().attr("autocomplete", "off").children(vec![
                create_form_control(
                    &name,
                    "Name",
                    Some("倉庫資料夾名稱, 只能使用 0-9, a-z, A-Z, _(下劃線), -(連字號), .(點)".into()),
                    None,
                )?,
                create_form_check(&encrypted, "Encrypted (加密倉庫, 創建後不可更改)")?,
                hidden_submit_button()?,
                button_area,
            ]),
        )?;

        let page = Rc::new(Self { alert: Alert::new()?, name, encrypted, submit, form });
        let p = page.clone();
        dom_utils::on_click(page.submit.view(), move || p.create())?;
        Ok(page)
    }

    fn create(self: &Rc<Self>) {
        let body = match validate_bucket(&self.name.value(), self.encrypted.is_checked()) {
            Ok(body) => body,
            Err(warning) => {
                self.alert.insert(Severity::Warning, warning);
                controls::focus(&self.name);
                return;
            }
        };
        controls::disable(&self.submit);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::create_bucket(&body)
            .alert(&self.alert)
            .on_success(move |bucket| {
                on_ok.form.hide();
                on_ok.alert.clear().insert(Severity::Success, &format!("成功創建倉庫: {}", bucket.name));
                let edit = create_link(&format!("edit-bucket.html?id={}", bucket.id), LinkOptions::text("修改倉庫屬性"));
                match edit {
                    Ok(link) => {
                        on_ok.alert.insert_element(&link);
                    }
                    Err(e) => log::warn!("failed to build edit link: {:?}", e),
                }
            })
            .on_always(move || controls::enable(&on_done.submit))
            .send();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = CreateBucketPage::new()?;
    place(root, &nav_bar("Create Bucket (新建倉庫)", &[NavLink::new("buckets.html", "Buckets")])?, "my-3")?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.form.view(), "my-5")?;
    controls::focus(&page.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_name_is_required_and_single_word() {
        assert_eq!(validate_bucket("  ", false), Err(EMPTY_NAME));
        assert_eq!(validate_bucket("my photos", false), Err(NAME_HAS_SPACE));

        let body = validate_bucket(" photos ", true).unwrap();
        assert_eq!(body, CreateBucketBody { name: "photos".into(), encrypted: true });
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn invalid_name_warns_and_keeps_form() {
        let page = CreateBucketPage::new().unwrap();
        page.name.set_value("two words");
        page.create();
        assert_eq!(page.alert.len(), 1);
        assert!(!page.form.is_hidden());
    }
}
