// Build script for the API base URL baked in via `option_env!`.
// Re-runs whenever API_BASE_URL changes so a stale URL never ships.

fn main() {
    println!("cargo:rerun-if-env-changed=API_BASE_URL");

    match std::env::var("API_BASE_URL") {
        Ok(url) if !url.trim().is_empty() => {
            println!("cargo:warning=API base URL baked in: {}", url.trim());
        }
        _ => {
            // Same-origin requests (relative `/api/...` paths) are the default.
        }
    }
}
