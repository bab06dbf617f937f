//! Public menu links and download naming.

use crate::config::DEFAULT_BASE_URL;

/// Public URL of a menu: `{base_url}/menu/{menu_id}`.
///
/// Trailing slashes on `base_url` are ignored; an empty base falls back to
/// [`DEFAULT_BASE_URL`].
pub fn menu_url(base_url: &str, menu_id: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let base = if base.is_empty() { DEFAULT_BASE_URL } else { base };
    format!("{}/menu/{}", base, menu_id.trim())
}

/// Suggested filename for a downloaded flyer.
///
/// Whitespace runs become `-`, the result is lowercased, and characters that
/// break file paths or header quoting are dropped. Blank names give
/// `menu-qr.png`.
pub fn download_filename(restaurant_name: &str) -> String {
    let mut slug = String::with_capacity(restaurant_name.len());
    let mut in_space = false;
    for ch in restaurant_name.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if matches!(ch, '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|') || ch.is_control() {
            continue;
        }
        slug.extend(ch.to_lowercase());
    }

    if slug.is_empty() {
        slug.push_str("menu");
    }
    format!("{}-qr.png", slug)
}
