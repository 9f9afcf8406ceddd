//! Utility helpers shared across the WASM frontend.

use crate::constants::TIME_FORMAT;

/// Current local time as `HH:MM:SS`.
pub fn now_hms() -> String {
    chrono::Local::now().format(TIME_FORMAT).to_string()
}

/// Human readable file size: `"512 B"`, `"1.50 KB"`, `"3.21 MB"`, `"1.00 GB"`.
pub fn file_size_to_string(size: i64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let n = size as f64;
    if n < KB {
        format!("{} B", size)
    } else if n < MB {
        format!("{:.2} KB", n / KB)
    } else if n < GB {
        format!("{:.2} MB", n / MB)
    } else {
        format!("{:.2} GB", n / GB)
    }
}

pub fn has_white_space(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Query-string parameter of the current page (`?id=3` → `Some("3")`).
pub fn get_url_param(name: &str) -> Option<String> {
    let search = crate::dom_utils::window().location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

/// Reload the current page once `delay_ms` has passed.
pub fn reload_after(delay_ms: u32) {
    gloo_timers::callback::Timeout::new(delay_ms, || {
        if let Err(e) = crate::dom_utils::window().location().reload() {
            log::warn!("page reload failed: {:?}", e);
        }
    })
    .forget();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(file_size_to_string(0), "0 B");
        assert_eq!(file_size_to_string(1023), "1023 B");
        assert_eq!(file_size_to_string(1536), "1.50 KB");
        assert_eq!(file_size_to_string(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(file_size_to_string(1024 * 1024 * 1024), "1.00 GB");
    }

    #[test]
    fn white_space_detection() {
        assert!(has_white_space("my bucket"));
        assert!(has_white_space("tab\there"));
        assert!(!has_white_space("my-bucket_1.0"));
        assert!(!has_white_space(""));
    }
}
