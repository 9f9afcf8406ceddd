// Network layer: config, error taxonomy, request wrapper and typed endpoints.
pub mod api_client;
pub mod config;
pub mod error;
pub mod http;

pub use config::{api_url, set_api_config, ApiConfig};
pub use error::{
    error_data_to_string, validation_error_to_string, DataToString, ErrorBody, RequestError,
};
pub use http::{get, post, HttpRequest, Ignored, Method};
