//! Change the admin password.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{nav_bar, place, NavLink};
use crate::component::{Component, ComponentOptions, Mountable};
use crate::components::{Alert, Severity};
use crate::constants::BUTTON_TYPE_SUBMIT;
use crate::controls;
use crate::dom_utils;
use crate::network::api_client::{self, ChangePasswordBody};
use crate::network::{error_data_to_string, RequestError};
use crate::ui_components::{create_button, create_form_control, hidden_submit_button, InputType, TextInput};

pub const MISSING_PASSWORD: &str = "請填寫舊密碼和新密碼";
pub const CONFIRM_MISMATCH: &str = "兩次輸入新密碼必須相同";

/// Build the request body, or return the warning to show.
pub fn validate_change(old: &str, new: &str, confirm: &str) -> Result<ChangePasswordBody, &'static str> {
    if old.is_empty() || new.is_empty() {
        return Err(MISSING_PASSWORD);
    }
    if new != confirm {
        return Err(CONFIRM_MISMATCH);
    }
    Ok(ChangePasswordBody { old_password: old.to_string(), new_password: new.to_string() })
}

struct ChangePasswordPage {
    alert: Alert,
    old_password: TextInput,
    new_password: TextInput,
    confirm: TextInput,
    submit: Component,
    form: Component,
}

impl ChangePasswordPage {
    fn new() -> Result<Rc<Self>, JsValue> {
        let old_password = TextInput::new(InputType::Password, true, None)?;
        let new_password = TextInput::new(InputType::Password, true, None)?;
        let confirm = TextInput::new(InputType::Password, true, None)?;
        let submit = create_button("Submit", "primary", BUTTON_TYPE_SUBMIT)?;
        let form = Component::with_options(
            "form",
            ComponentOptions::new().attr("autocomplete", "off").children(vec![
                create_form_control(&old_password, "Old Password", Some("舊密碼 (當前密碼)".into()), None)?,
                create_form_control(&new_password, "New Password", Some("新密碼".into()), None)?,
                create_form_control(&confirm, "Confirm New Password", Some("再輸入一次新密碼".into()), None)?,
                hidden_submit_button()?,
                submit.element(),
            ]),
        )?;

        let page = Rc::new(Self { alert: Alert::new()?, old_password, new_password, confirm, submit, form });
        let p = page.clone();
        dom_utils::on_click(page.submit.view(), move || p.change())?;
        Ok(page)
    }

    fn change(self: &Rc<Self>) {
        let body = match validate_change(&self.old_password.value(), &self.new_password.value(), &self.confirm.value()) {
            Ok(body) => body,
            Err(warning) => {
                self.alert.insert(Severity::Warning, warning);
                return;
            }
        };
        controls::disable(&self.submit);
        let on_ok = self.clone();
        let on_fail = self.clone();
        api_client::check_password(&body.old_password)
            .on_success(move |_| on_ok.submit_change(body))
            .on_error(move |err| on_fail.old_password_rejected(&err))
            .send();
    }

    fn old_password_rejected(&self, err: &RequestError) {
        self.alert.insert(Severity::Danger, &err.to_alert_text(error_data_to_string));
        controls::enable(&self.submit);
        controls::focus(&self.old_password);
    }

    /// Runs once the old password has been accepted.
    fn submit_change(self: &Rc<Self>, body: ChangePasswordBody) {
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::change_password(&body)
            .alert(&self.alert)
            .on_success(move |_| {
                for input in [&on_ok.old_password, &on_ok.new_password, &on_ok.confirm] {
                    input.set_value("");
                }
                on_ok.submit.hide();
                on_ok.alert.clear().insert(Severity::Success, "已成功更換密碼");
            })
            .on_always(move || controls::enable(&on_done.submit))
            .send();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = ChangePasswordPage::new()?;
    place(
        root,
        &nav_bar("Change Password (更改密碼)", &[NavLink::new("admin-login.html", "Login")])?,
        "my-3",
    )?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.form.view(), "my-5")?;

    page.alert.insert_untimed(Severity::Primary, "提醒: 請記住新密碼, 一旦忘記將無法解密. (初始密碼: abc123)");
    page.alert.insert_untimed(Severity::Info, "在更改密碼前, 建議先備份密鑰 (在 project.toml 內)");
    controls::focus(&page.old_password);
    Ok(())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::network::ErrorBody;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn mismatch_warns_without_disabling_submit() {
        let page = ChangePasswordPage::new().unwrap();
        page.old_password.set_value("abc123");
        page.new_password.set_value("one");
        page.confirm.set_value("two");
        page.change();
        assert_eq!(page.alert.len(), 1);
        assert!(page.alert.view().text_content().unwrap_or_default().contains(CONFIRM_MISMATCH));
        assert!(!page.submit.is_hidden());
    }

    #[wasm_bindgen_test]
    fn rejected_old_password_reenables_submit() {
        let page = ChangePasswordPage::new().unwrap();
        controls::disable(&page.submit);
        page.old_password_rejected(&RequestError::Status {
            status: 400,
            body: ErrorBody::Text("wrong password".into()),
        });
        assert_eq!(page.alert.len(), 1);
        assert!(page.alert.view().text_content().unwrap_or_default().contains("wrong password"));
        assert!(!page.submit.view().has_attribute("disabled"));
    }
}
