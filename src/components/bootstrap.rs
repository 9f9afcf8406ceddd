//! Bindings to the Bootstrap 5 JavaScript plugins the widgets drive.
//!
//! Bootstrap is loaded by the host page as a global `bootstrap` object; the
//! constructors are `catch` so a page without it degrades to an error
//! instead of a panic.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    #[wasm_bindgen(js_name = Modal)]
    pub type BsModal;

    #[wasm_bindgen(constructor, js_class = "Modal", catch)]
    pub fn new(element: &Element) -> Result<BsModal, JsValue>;

    #[wasm_bindgen(method, js_class = "Modal")]
    pub fn show(this: &BsModal);

    #[wasm_bindgen(method, js_class = "Modal")]
    pub fn hide(this: &BsModal);

    #[wasm_bindgen(js_name = Toast)]
    pub type BsToast;

    #[wasm_bindgen(constructor, js_class = "Toast", catch)]
    pub fn new(element: &Element) -> Result<BsToast, JsValue>;

    #[wasm_bindgen(method, js_class = "Toast")]
    pub fn show(this: &BsToast);

    #[wasm_bindgen(js_name = Offcanvas)]
    pub type BsOffcanvas;

    #[wasm_bindgen(constructor, js_class = "Offcanvas", catch)]
    pub fn new(element: &Element) -> Result<BsOffcanvas, JsValue>;

    #[wasm_bindgen(static_method_of = BsOffcanvas, js_class = "Offcanvas", js_name = getOrCreateInstance, catch)]
    pub fn get_or_create(element: &Element) -> Result<BsOffcanvas, JsValue>;

    #[wasm_bindgen(method, js_class = "Offcanvas")]
    pub fn show(this: &BsOffcanvas);

    #[wasm_bindgen(method, js_class = "Offcanvas")]
    pub fn hide(this: &BsOffcanvas);
}
