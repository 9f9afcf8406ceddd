//! Edit file attributes on a page of its own (`edit-file.html?id=<file id>`).

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Element;

use super::file_info::FileInfoForm;
use super::{nav_bar, parse_id_param, place, NavLink};
use crate::component::Mountable;
use crate::components::Severity;
use crate::network::api_client;
use crate::utils::get_url_param;

/// Buckets must be known before the form fills its move targets.
fn load(info: &Rc<FileInfoForm>, id: i64) {
    let i = info.clone();
    api_client::waiting_folder()
        .alert(&info.alert)
        .on_success(move |folder| i.set_waiting_folder(&folder.text))
        .send();

    let on_ok = info.clone();
    let on_done = info.clone();
    api_client::all_buckets()
        .alert(&info.alert)
        .on_success(move |buckets| on_ok.set_buckets(buckets.unwrap_or_default()))
        .on_always(move || on_done.open(id))
        .send();
}

pub fn mount(root: &Element) -> Result<(), JsValue> {
    let info = FileInfoForm::new(true)?;
    place(
        root,
        &nav_bar(
            "Edit File Attributes (修改檔案屬性)",
            &[NavLink::new("files.html", "Files"), NavLink::new("recent-files.html", "Recent")],
        )?,
        "my-3",
    )?;
    place(root, info.alert.view(), "my-5")?;
    place(root, info.loading.view(), "my-5")?;
    place(root, info.form().view(), "my-5")?;

    match parse_id_param(get_url_param("id").as_deref()) {
        Ok(id) => {
            let on_ok = info.clone();
            let on_done = info.clone();
            api_client::project_status()
                .alert(&info.alert)
                .on_success(move |status| on_ok.set_backup(status.project.is_backup))
                .on_always(move || load(&on_done, id))
                .send();
        }
        Err(msg) => {
            info.alert.insert(Severity::Danger, msg);
        }
    }
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::{Bucket, File};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn standalone_form_has_action_buttons() {
        let info = FileInfoForm::new(true).unwrap();
        info.set_buckets(vec![Bucket { id: 1, name: "docs".into(), title: "docs".into(), ..Default::default() }]);
        info.fill(&File { id: 3, bucket_name: "docs".into(), name: "a.txt".into(), ..Default::default() });
        assert!(!info.form().is_hidden());
        let text = info.form().view().text_content().unwrap_or_default();
        assert!(text.contains("DL"));
        assert!(text.contains("DELETE"));
    }
}
