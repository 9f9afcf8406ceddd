//! Browser front-end for Local Buckets: a small element/component builder,
//! a Bootstrap widget library on top of it, and the page scripts built from
//! both.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[macro_use]
mod macros;

pub mod component;
pub mod components;
pub mod constants;
pub mod controls;
pub mod dom_utils;
pub mod models;
pub mod network;
pub mod pages;
pub mod ui_components;
pub mod utils;

use network::{set_api_config, ApiConfig};
use pages::Page;

/// Options accepted by [`configure`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontendOptions {
    pub base_url: Option<String>,
    pub page: Option<String>,
}

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second init (tests, hot reload) only fails because a logger exists.
    let _ = console_log::init_with_level(log::Level::Debug);

    let page = dom_utils::document()
        .body()
        .and_then(|body| body.dataset().get("page"));
    match page {
        Some(name) => mount_page(&name),
        None => {
            log::debug!("no data-page on <body>, waiting for mount_page()");
            Ok(())
        }
    }
}

/// Mount a page by name (`"buckets"`, `"admin-login"`, ...).
#[wasm_bindgen]
pub fn mount_page(name: &str) -> Result<(), JsValue> {
    let page: Page = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
    pages::mount(page).map_err(|e| {
        log::error!("failed to mount {}: {:?}", page, e);
        e
    })
}

/// Point API calls at another origin (`http://127.0.0.1:3000`). An empty
/// string restores same-origin requests.
#[wasm_bindgen]
pub fn init_api_config_js(base_url: &str) {
    set_api_config(ApiConfig::from_url(base_url));
    log::info!("API base URL set to {:?}", base_url);
}

/// `configure({ baseUrl, page })`: both fields optional.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    let options: FrontendOptions =
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if let Some(url) = &options.base_url {
        init_api_config_js(url);
    }
    match &options.page {
        Some(page) => mount_page(page),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_use_camel_case_and_default() {
        let opts: FrontendOptions =
            serde_json::from_str(r#"{"baseUrl": "http://localhost:3000", "page": "buckets"}"#).unwrap();
        assert_eq!(opts.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(opts.page.as_deref(), Some("buckets"));

        let opts: FrontendOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.base_url.is_none() && opts.page.is_none());
    }
}
