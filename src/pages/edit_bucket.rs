//! Edit bucket attributes (`edit-bucket.html?id=<bucket id>`).

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{nav_bar, parse_id_param, place, NavLink, INVALID_ID};
use crate::component::{el, Component, ComponentOptions, Mountable};
use crate::components::{Alert, Loading, Severity};
use crate::controls;
use crate::dom_utils;
use crate::models::Bucket;
use crate::network::api_client::{self, UpdateBucketBody};
use crate::ui_components::{
    create_form_control, create_primary_button, hidden_submit_button, InputType, NumberInput, TextInput,
};
use crate::utils::get_url_param;

struct EditBucketPage {
    alert: Alert,
    loading: Loading,
    id: NumberInput,
    name: TextInput,
    title: TextInput,
    subtitle: TextInput,
    encrypted: TextInput,
    submit: Component,
    submit_alert: Alert,
    form: Component,
}

impl EditBucketPage {
    fn new() -> Result<Rc<Self>, JsValue> {
        let id = NumberInput::new(true, None)?;
        let name = TextInput::new(InputType::Text, true, None)?;
        let title = TextInput::text()?;
        let subtitle = TextInput::text()?;
        let encrypted = TextInput::text()?;
        let submit = create_primary_button("Submit")?;
        let submit_alert = Alert::new()?;
        dom_utils::add_classes(submit_alert.view(), "my-3")?;
        let button_area = el("div", "text-center my-3", "")?;
        button_area.append_child(submit.view())?;

        let form = Component::with_options(
            "form",
            ComponentOptions::new().attr("autocomplete", "off").children(vec![
                hidden_submit_button()?,
                create_form_control(&id, "ID", None, None)?,
                create_form_control(
                    &name,
                    "Name",
                    Some("倉庫資料夾名稱, 只能使用 0-9, a-z, A-Z, _(下劃線), -(連字號), .(點)".into()),
                    None,
                )?,
                create_form_control(&title, "Title", None, None)?,
                create_form_control(&subtitle, "Subtitle", None, None)?,
                create_form_control(&encrypted, "Encrypted", None, None)?,
                submit_alert.view().clone(),
                button_area,
            ]),
        )?
        .hidden();

        let page = Rc::new(Self {
            alert: Alert::new()?,
            loading: Loading::large()?,
            id,
            name,
            title,
            subtitle,
            encrypted,
            submit,
            submit_alert,
            form,
        });
        let p = page.clone();
        dom_utils::on_click(page.submit.view(), move || p.save())?;
        Ok(page)
    }

    fn fill(&self, bucket: &Bucket) {
        self.id.set_int_value(bucket.id);
        self.name.set_value(&bucket.name);
        self.title.set_value(&bucket.title);
        self.subtitle.set_value(&bucket.subtitle);
        self.encrypted.set_value(&bucket.encrypted.to_string());
        controls::disable(self.id.component());
        controls::disable(self.encrypted.component());
        self.form.show();
    }

    fn load(self: &Rc<Self>, bucket_id: i64) {
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::get_bucket(bucket_id)
            .alert(&self.alert)
            .on_success(move |bucket| on_ok.fill(&bucket))
            .on_always(move || on_done.loading.hide())
            .send();
    }

    fn save(self: &Rc<Self>) {
        let Some(id) = self.id.int_value() else {
            self.submit_alert.insert(Severity::Warning, INVALID_ID);
            return;
        };
        let body = UpdateBucketBody {
            id,
            name: self.name.value(),
            title: self.title.value(),
            subtitle: self.subtitle.value(),
        };
        controls::disable(&self.submit);
        let on_ok = self.clone();
        let on_done = self.clone();
        api_client::update_bucket_info(&body)
            .alert(&self.submit_alert)
            .on_success(move |_| {
                on_ok.submit_alert.clear().insert(Severity::Success, "修改成功");
            })
            .on_always(move || controls::enable(&on_done.submit))
            .send();
    }
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let page = EditBucketPage::new()?;
    place(root, &nav_bar("修改倉庫屬性", &[NavLink::new("buckets.html", "Buckets")])?, "my-3")?;
    place(root, page.alert.view(), "my-5")?;
    place(root, page.loading.view(), "my-5")?;
    place(root, page.form.view(), "my-5")?;

    match parse_id_param(get_url_param("id").as_deref()) {
        Ok(id) => page.load(id),
        Err(msg) => {
            page.loading.hide();
            page.alert.insert(Severity::Danger, msg);
        }
    }
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlInputElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn fill_shows_form_with_read_only_fields() {
        let page = EditBucketPage::new().unwrap();
        assert!(page.form.is_hidden());
        page.fill(&Bucket { id: 3, name: "docs".into(), title: "Docs".into(), encrypted: true, ..Default::default() });

        assert!(!page.form.is_hidden());
        assert_eq!(page.id.int_value(), Some(3));
        assert_eq!(page.name.value(), "docs");
        assert_eq!(page.encrypted.value(), "true");
        assert!(page.id.view().unchecked_ref::<HtmlInputElement>().disabled());
        assert!(page.encrypted.view().unchecked_ref::<HtmlInputElement>().disabled());
        assert!(!page.name.view().unchecked_ref::<HtmlInputElement>().disabled());
    }
}
