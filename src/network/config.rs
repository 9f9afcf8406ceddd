use std::cell::RefCell;

/// API route configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiConfig {
    /// Empty means same-origin: URLs stay relative (`/api/...`).
    base_url: String,
}

thread_local! {
    static API_CONFIG: RefCell<ApiConfig> = RefCell::new(ApiConfig::from_env());
}

impl ApiConfig {
    /// Base URL from the build-time `API_BASE_URL` variable, same-origin when
    /// it is not set.
    pub fn from_env() -> Self {
        match option_env!("API_BASE_URL") {
            Some(url) => Self::from_url(url),
            None => Self::default(),
        }
    }

    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self { base_url: url.trim().trim_end_matches('/').to_string() }
    }

    /// Get the base URL for all API calls
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `/api/all-buckets`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = if path.starts_with('/') { path.to_string() } else { format!("/{}", path) };
        format!("{}{}", self.base_url, path)
    }
}

/// Replace the active configuration (runtime override).
pub fn set_api_config(config: ApiConfig) {
    API_CONFIG.with(|c| *c.borrow_mut() = config);
}

/// Resolve `path` against the active configuration.
pub fn api_url(path: &str) -> String {
    API_CONFIG.with(|c| c.borrow().url(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_keeps_paths_relative() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.url("/api/all-buckets"), "/api/all-buckets");
        assert_eq!(cfg.url("api/logout"), "/api/logout");
    }

    #[test]
    fn base_url_is_normalised() {
        let cfg = ApiConfig::from_url(" http://127.0.0.1:3000/ ");
        assert_eq!(cfg.base_url(), "http://127.0.0.1:3000");
        assert_eq!(cfg.url("/api/files"), "http://127.0.0.1:3000/api/files");
        assert_eq!(cfg.url("https://other/x"), "https://other/x");
    }

    #[test]
    fn runtime_override_is_used_by_api_url() {
        set_api_config(ApiConfig::from_url("http://localhost:3000"));
        assert_eq!(api_url("/api/login-status"), "http://localhost:3000/api/login-status");
        set_api_config(ApiConfig::default());
        assert_eq!(api_url("/api/login-status"), "/api/login-status");
    }
}
