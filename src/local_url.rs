//! Open-redirect protection.

/// Returns `true` if `url` points into this application.
///
/// Accepts `/`, `/path` (but not `//host` or `/\host`) and the app-relative
/// forms `~/` and `~/path`. Control characters anywhere after the prefix make
/// the URL non-local.
///
/// ```
/// use demo_localization::local_url::is_local_url;
///
/// assert!(is_local_url("/Home/Privacy"));
/// assert!(is_local_url("~/Home/Privacy"));
/// assert!(!is_local_url("https://evil.example/phish"));
/// assert!(!is_local_url("//evil.example"));
/// ```
pub fn is_local_url(url: &str) -> bool {
    let rest = match url.strip_prefix("~/").or_else(|| url.strip_prefix('/')) {
        Some(rest) => rest,
        None => return false,
    };

    if rest.starts_with(['/', '\\']) {
        return false;
    }

    !rest.chars().any(char::is_control)
}

/// Returns the path to redirect to for a local `url`, or `None` if `url` is
/// not local.
pub fn local_path(url: &str) -> Option<&str> {
    if !is_local_url(url) {
        return None;
    }
    Some(url.strip_prefix('~').unwrap_or(url))
}
