//! Admin login / logout.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{nav_bar, place, NavLink};
use crate::component::{Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::constants::{BUTTON_TYPE_BUTTON, BUTTON_TYPE_SUBMIT};
use crate::controls;
use crate::dom_utils;
use crate::network::api_client;
use crate::ui_components::{create_button, create_form_control, InputType, TextInput};

pub const EMPTY_PASSWORD: &str = "請輸入密碼";

/// The password to send, or the warning to show instead.
pub fn validate_password(password: &str) -> Result<&str, &'static str> {
    if password.is_empty() {
        Err(EMPTY_PASSWORD)
    } else {
        Ok(password)
    }
}

struct AdminLoginPage {
    alert: Alert,
    loading: Loading,
    password: TextInput,
    login_button: Component,
    login_form: Component,
    logout_button: Component,
    logout_area: Component,
}

impl AdminLoginPage {
    fn new() -> Result<Rc<Self>, JsValue> {
        let password = TextInput::new(InputType::Password, true, None)?;
        let login_button = create_button("Login", "primary", BUTTON_TYPE_SUBMIT)?;
        let login_form = Component::with_options(
            "form",
            ComponentOptions::new().attr("autocomplete", "off").children(vec![
                create_form_control(&password, "Password", Some("管理員密碼".into()), None)?,
                login_button.element(),
            ]),
        )?
        .hidden();

        let logout_button = create_button("Logout", "warning", BUTTON_TYPE_BUTTON)?;
        let logout_area = Component::with_options(
            "div",
            ComponentOptions::new().classes("text-center").children(vec![logout_button.element()]),
        )?
        .hidden();

        let page = Rc::new(Self {
            alert: Alert::new()?,
            loading: Loading::large()?,
            password,
            login_button,
            login_form,
            logout_button,
            logout_area,
        });

        let p = page.clone();
        dom_utils::on_click(page.login_button.view(), move || p.login())?;
        let p = page.clone();
        dom_utils::on_click(page.logout_button.view(), move || p.logout())?;
        Ok(page)
    }

    fn show_login_form(&self) {
        self.logout_area.hide();
        self.login_form.show();
        controls::focus(&self.password);
    }

    fn login(self: &Rc<Self>) {
        let password = self.password.value();
        let password = match validate_password(&password) {
            Ok(p) => p,
            Err(warning) => {
                self.alert.insert(Severity::Warning, warning);
                return;
            }
        };
        controls::disable(&self.login_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::admin_login(password)
            .alert(&self.alert)
            .on_success(move |_| {
                on_ok.password.set_value("");
                on_ok.login_form.hide();
                on_ok.logout_area.show();
                on_ok.alert.clear().insert(Severity::Success, "已成功登入");
            })
            .on_always(move || controls::enable(&on_done.login_button))
            .send();
    }

    fn logout(self: &Rc<Self>) {
        controls::disable(&self.logout_button);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::logout()
            .alert(&self.alert)
            .on_success(move |_| {
                on_ok.alert.clear().insert(Severity::Warning, "已登出");
                on_ok.show_login_form();
            })
            .on_always(move || controls::enable(&on_done.logout_button))
            .send();
    }

    fn load_status(self: &Rc<Self>) {
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::login_status()
            .alert(&self.alert)
            .on_success(move |status| {
                if status.is_logged_in() {
                    on_ok.alert.clear().insert(Severity::Light, "已登入");
                    on_ok.logout_area.show();
                } else {
                    on_ok.show_login_form();
                }
            })
            .on_always(move || on_done.loading.hide())
            .send();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = AdminLoginPage::new()?;
    place(
        root,
        &nav_bar("Admin Login (管理員登入)", &[NavLink::new("buckets.html", "Buckets"), NavLink::new("waiting.html", "Waiting")])?,
        "my-3",
    )?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.loading.view(), "my-5")?;
    place(root, page.login_form.view(), "my-5")?;
    place(root, page.logout_area.view(), "my-5")?;
    page.load_status();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_is_rejected_before_any_request() {
        assert_eq!(validate_password(""), Err(EMPTY_PASSWORD));
        assert_eq!(validate_password("abc123"), Ok("abc123"));
        // Spaces are a valid password.
        assert_eq!(validate_password(" "), Ok(" "));
    }
}
