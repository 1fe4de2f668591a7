//! URL helper functions

/// Prefix a site path with the configured root
///
/// # Examples
/// ```ignore
/// url_for("/blog/", "/page/2") // -> "/blog/page/2"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Prefix a site path with the full site URL
pub fn full_url_for(url: &str, root: &str, path: &str) -> String {
    format!("{}{}", url.trim_end_matches('/'), url_for(root, path))
}
