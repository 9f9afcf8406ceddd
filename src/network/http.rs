//! GET / POST wrappers with uniform error-to-alert reporting.
//!
//! ```rust,ignore
//! http::get::<Vec<BucketStatus>>("/api/auto-get-buckets")
//!     .alert(&page_alert)
//!     .on_success(move |buckets| render(buckets))
//!     .on_always(move || loading.hide())
//!     .send();
//! ```
//!
//! Per request the success callback runs only for a 2xx response whose body
//! decodes as `T`; on failure the custom error handler runs, or the error is
//! rendered into the alert at `danger`; `on_always` runs exactly once after
//! either path.

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use super::config::api_url;
use super::error::{DataToString, ErrorBody, RequestError, DEFAULT_DATA_TO_STRING};
use crate::components::{AlertSink, Severity};

/// Response type for calls whose body is not interesting.
pub type Ignored = serde::de::IgnoredAny;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

type SuccessFn<T> = Box<dyn FnOnce(T)>;
type ErrorFn = Box<dyn FnOnce(RequestError)>;
type AlwaysFn = Box<dyn FnOnce()>;

/// One pending request and its continuations. Consumed by `send`, so each
/// continuation can run at most once.
pub struct HttpRequest<T> {
    method: Method,
    path: String,
    body: Option<Result<String, String>>,
    alert: Option<Rc<dyn AlertSink>>,
    data_to_string: DataToString,
    on_success: Option<SuccessFn<T>>,
    on_error: Option<ErrorFn>,
    on_always: Option<AlwaysFn>,
}

impl<T> fmt::Debug for HttpRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// GET `path`.
pub fn get<T>(path: &str) -> HttpRequest<T> {
    HttpRequest::new(Method::Get, path, None)
}

/// POST `body` as JSON to `path`.
pub fn post<T, B: Serialize + ?Sized>(path: &str, body: &B) -> HttpRequest<T> {
    let body = serde_json::to_string(body).map_err(|e| format!("cannot encode request body: {}", e));
    HttpRequest::new(Method::Post, path, Some(body))
}

impl<T> HttpRequest<T> {
    fn new(method: Method, path: &str, body: Option<Result<String, String>>) -> Self {
        Self {
            method,
            path: path.to_string(),
            body,
            alert: None,
            data_to_string: DEFAULT_DATA_TO_STRING,
            on_success: None,
            on_error: None,
            on_always: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Encoded JSON body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.as_deref().ok())
    }

    /// Where failures are reported.
    pub fn alert<A: AlertSink + Clone + 'static>(mut self, alert: &A) -> Self {
        self.alert = Some(Rc::new(alert.clone()));
        self
    }

    pub fn alert_rc(mut self, alert: Rc<dyn AlertSink>) -> Self {
        self.alert = Some(alert);
        self
    }

    /// How an error body is turned into text.
    pub fn data_to_string(mut self, f: DataToString) -> Self {
        self.data_to_string = f;
        self
    }

    pub fn on_success<F: FnOnce(T) + 'static>(mut self, f: F) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Replaces the default alert reporting.
    pub fn on_error<F: FnOnce(RequestError) + 'static>(mut self, f: F) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_always<F: FnOnce() + 'static>(mut self, f: F) -> Self {
        self.on_always = Some(Box::new(f));
        self
    }

    /// Dispatch the outcome to the continuations.
    pub fn complete(self, result: Result<T, RequestError>) {
        let HttpRequest {
            method,
            path,
            alert,
            data_to_string,
            on_success,
            on_error,
            on_always,
            ..
        } = self;

        match result {
            Ok(data) => {
                if let Some(f) = on_success {
                    f(data);
                }
            }
            Err(err) => {
                log::warn!("{} {} failed: {}", method.as_str(), path, err);
                match (on_error, alert) {
                    (Some(f), _) => f(err),
                    (None, Some(alert)) => {
                        alert.insert_message(Severity::Danger, &err.to_alert_text(data_to_string));
                    }
                    (None, None) => log::error!("{}", err.to_alert_text(data_to_string)),
                }
            }
        }

        if let Some(f) = on_always {
            f();
        }
    }
}

impl<T: DeserializeOwned + 'static> HttpRequest<T> {
    /// Perform the request and run the continuations.
    pub async fn execute(mut self) {
        let url = api_url(&self.path);
        let result = match self.body.take() {
            Some(Err(e)) => Err(RequestError::Setup(e)),
            Some(Ok(body)) => fetch_json(self.method, &url, Some(&body)).await,
            None => fetch_json(self.method, &url, None).await,
        };
        self.complete(result);
    }

    /// Fire and forget on the browser event loop.
    pub fn send(self) {
        wasm_bindgen_futures::spawn_local(self.execute());
    }
}

/// Decode a 2xx body. An empty body decodes as JSON `null`.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, RequestError> {
    let parsed = if text.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(text)
    };
    parsed.map_err(|e| RequestError::Decode(e.to_string()))
}

fn setup_error(e: JsValue) -> RequestError {
    RequestError::Setup(js_error_message(&e))
}

fn js_error_message(e: &JsValue) -> String {
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

async fn response_text(resp: &Response) -> Result<String, JsValue> {
    let text = JsFuture::from(resp.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

/// Low-level fetch returning the decoded body or a classified error.
pub async fn fetch_json<T: DeserializeOwned>(method: Method, url: &str, body: Option<&str>) -> Result<T, RequestError> {
    let text = fetch_text(method, url, body).await?;
    decode_body(&text)
}

/// Like [`fetch_json`] but hands back the raw 2xx body.
pub async fn fetch_text(method: Method, url: &str, body: Option<&str>) -> Result<String, RequestError> {
    let opts = RequestInit::new();
    opts.set_method(method.as_str());
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(setup_error)?;
    if let Some(data) = body {
        opts.set_body(&JsValue::from_str(data));
        headers.append("Content-Type", "application/json").map_err(setup_error)?;
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts).map_err(setup_error)?;

    let window = web_sys::window().ok_or_else(|| RequestError::Setup("no global window exists".into()))?;
    // fetch() only rejects when no response arrived at all.
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| {
            log::debug!("fetch rejected: {}", js_error_message(&e));
            RequestError::NoResponse { status: 0 }
        })?;
    let resp: Response = resp_value.dyn_into().map_err(setup_error)?;

    let text = response_text(&resp).await.map_err(|_| RequestError::NoResponse { status: resp.status() })?;
    if !resp.ok() {
        return Err(RequestError::Status {
            status: resp.status(),
            body: ErrorBody::from_text(&text),
        });
    }
    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::error::error_data_to_string;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    #[derive(Clone, Default)]
    struct RecordingAlert {
        messages: Rc<RefCell<Vec<(Severity, String)>>>,
    }

    impl AlertSink for RecordingAlert {
        fn insert_message(&self, severity: Severity, msg: &str) {
            self.messages.borrow_mut().push((severity, msg.to_string()));
        }
    }

    struct Recorder {
        successes: Rc<Cell<u32>>,
        always: Rc<Cell<u32>>,
        alert: RecordingAlert,
    }

    fn recorded_request(path: &str) -> (HttpRequest<Vec<i64>>, Recorder) {
        let rec = Recorder {
            successes: Rc::default(),
            always: Rc::default(),
            alert: RecordingAlert::default(),
        };
        let s = rec.successes.clone();
        let a = rec.always.clone();
        let req = get::<Vec<i64>>(path)
            .alert(&rec.alert)
            .on_success(move |_| s.set(s.get() + 1))
            .on_always(move || a.set(a.get() + 1));
        (req, rec)
    }

    #[test]
    fn success_runs_success_and_always_once() {
        let (req, rec) = recorded_request("/api/all-buckets");
        req.complete(Ok(vec![1, 2]));
        assert_eq!(rec.successes.get(), 1);
        assert_eq!(rec.always.get(), 1);
        assert!(rec.alert.messages.borrow().is_empty());
    }

    #[test]
    fn failure_renders_danger_alert_and_runs_always_once() {
        let (req, rec) = recorded_request("/api/all-buckets");
        req.complete(Err(RequestError::Status {
            status: 400,
            body: ErrorBody::Json(json!({"detail": "bad"})),
        }));
        assert_eq!(rec.successes.get(), 0);
        assert_eq!(rec.always.get(), 1);
        let messages = rec.alert.messages.borrow();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], (Severity::Danger, "[400] bad".to_string()));
    }

    #[test]
    fn every_failure_kind_still_runs_always() {
        let failures = vec![
            RequestError::Setup("boom".into()),
            RequestError::NoResponse { status: 0 },
            RequestError::Status { status: 500, body: ErrorBody::Text("x".into()) },
            RequestError::Decode("expected a sequence".into()),
        ];
        for failure in failures {
            let (req, rec) = recorded_request("/api/files");
            req.complete(Err(failure));
            assert_eq!(rec.successes.get(), 0);
            assert_eq!(rec.always.get(), 1);
            assert_eq!(rec.alert.messages.borrow().len(), 1);
        }
    }

    #[test]
    fn custom_error_handler_replaces_alert() {
        let (req, rec) = recorded_request("/api/imported-files");
        let seen: Rc<RefCell<Option<RequestError>>> = Rc::default();
        let slot = seen.clone();
        req.on_error(move |e| *slot.borrow_mut() = Some(e))
            .complete(Err(RequestError::NoResponse { status: 0 }));
        assert!(rec.alert.messages.borrow().is_empty());
        assert_eq!(*seen.borrow(), Some(RequestError::NoResponse { status: 0 }));
        assert_eq!(rec.always.get(), 1);
    }

    #[test]
    fn custom_data_to_string_is_used() {
        let (req, rec) = recorded_request("/api/files");
        req.data_to_string(error_data_to_string).complete(Err(RequestError::Status {
            status: 400,
            body: ErrorBody::Json(json!({"detail": "bad"})),
        }));
        assert_eq!(rec.alert.messages.borrow()[0].1, r#"[400] {"detail":"bad"}"#);
    }

    #[test]
    fn post_encodes_body_as_json() {
        let req = post::<Ignored, _>("/api/admin-login", &json!({"text": "abc"}));
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.path(), "/api/admin-login");
        assert_eq!(req.body(), Some(r#"{"text":"abc"}"#));
        assert_eq!(get::<Ignored>("/api/logout").body(), None);
    }

    #[test]
    fn decode_body_handles_empty_and_invalid() {
        let v: Vec<i64> = decode_body("[1,2,3]").unwrap();
        assert_eq!(v, vec![1, 2, 3]);
        let _: Ignored = decode_body("").unwrap();
        let none: Option<i64> = decode_body("  ").unwrap();
        assert_eq!(none, None);
        assert!(matches!(decode_body::<Vec<i64>>("{}"), Err(RequestError::Decode(_))));
    }

    #[test]
    fn null_list_bodies_decode_as_none() {
        use crate::models::{BucketStatus, File};

        let buckets: Option<Vec<BucketStatus>> = decode_body("null").unwrap();
        assert!(buckets.unwrap_or_default().is_empty());
        let files: Option<Vec<File>> = decode_body("null").unwrap();
        assert_eq!(files, None);
        let files: Option<Vec<File>> = decode_body(r#"[{"id": 1, "name": "a.txt"}]"#).unwrap();
        assert_eq!(files.unwrap_or_default()[0].name, "a.txt");
    }

    #[test]
    fn null_list_reaches_success_not_alert() {
        let seen: Rc<RefCell<Option<Vec<i64>>>> = Rc::default();
        let slot = seen.clone();
        let alert = RecordingAlert::default();
        get::<Option<Vec<i64>>>("/api/auto-get-buckets")
            .alert(&alert)
            .on_success(move |list| *slot.borrow_mut() = Some(list.unwrap_or_default()))
            .complete(decode_body("null"));
        assert_eq!(*seen.borrow(), Some(Vec::new()));
        assert!(alert.messages.borrow().is_empty());
    }
}
