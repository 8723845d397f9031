//! Product image locations.

/// Resolve a stored image path to a URL the browser can load.
///
/// Absolute URLs pass through unchanged; relative paths are served from the
/// API's `uploads` directory. An empty path resolves to an empty string.
///
/// ```
/// use farm_commerce::catalog::resolve_image_url;
///
/// assert_eq!(
///     resolve_image_url("/kale.jpg", "http://localhost:8080"),
///     "http://localhost:8080/uploads/kale.jpg"
/// );
/// assert_eq!(resolve_image_url("https://cdn.example/kale.jpg", "http://api"), "https://cdn.example/kale.jpg");
/// ```
pub fn resolve_image_url(path: &str, api_base: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with("http") {
        return path.to_string();
    }

    let clean = path.strip_prefix('/').unwrap_or(path);
    format!("{}/uploads/{}", api_base.trim_end_matches('/'), clean)
}
