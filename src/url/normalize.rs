/// Hrefs shorter than this are never followed
const MIN_HREF_LEN: usize = 2;

/// The site root ends at the first `/` found at or after this index, which
/// skips the `//` of the scheme separator
const ROOT_SEARCH_START: usize = 12;

/// Rewrites a raw anchor href into the canonical absolute form used for dedup
///
/// # Rewriting Rules (applied in order)
///
/// 1. Skip hrefs shorter than 2 characters or starting with `#`
/// 2. Drop the fragment (everything from the first `#`)
/// 3. Protocol-relative `//host/...` becomes `https://host/...`
/// 4. Remove the first occurrence of `www.`, wherever it appears
/// 5. A leading segment containing a `.` (`example.com/x`) is a bare domain:
///    prefix `https://`
/// 6. Root-relative `/path` is prefixed with the site root of the current page
/// 7. Anything still lacking `://` is prefixed with the current page URL
///    truncated at its last `/` (the slash itself is dropped)
///
/// No other normalization happens: trailing slashes, query order and case
/// are kept as written, so two hrefs are the same page only if the results
/// are byte-identical.
///
/// # Arguments
///
/// * `raw_href` - The href attribute exactly as it appeared in the page
/// * `page_url` - The URL of the page the href was found on
///
/// # Returns
///
/// * `Some(String)` - The canonical URL
/// * `None` - The href is an in-page anchor or too short to follow
///
/// # Examples
///
/// ```
/// use term_ripple::url::normalize_href;
///
/// let url = normalize_href("/about#team", "https://seed.test/page").unwrap();
/// assert_eq!(url, "https://seed.test/about");
/// ```
pub fn normalize_href(raw_href: &str, page_url: &str) -> Option<String> {
    if raw_href.chars().count() < MIN_HREF_LEN || raw_href.starts_with('#') {
        return None;
    }

    let mut href = raw_href.to_string();

    if let Some(pos) = href.find('#') {
        href.truncate(pos);
    }

    if let Some(rest) = href.strip_prefix("//") {
        href = format!("https://{}", rest);
    }

    // Textual, not host-scoped: "/docs/www.html" loses its "www." as well
    if let Some(pos) = href.find("www.") {
        href.replace_range(pos..pos + "www.".len(), "");
    }

    if let Some(slash) = href.find('/') {
        if href[..slash].contains('.') {
            href = format!("https://{}", href);
        }
    }

    if href.starts_with('/') {
        href = format!("{}{}", site_root(page_url), href);
    }

    if !href.contains("://") {
        href = format!("{}{}", page_directory(page_url), href);
    }

    Some(href)
}

/// Byte index of the first `/` at or after [`ROOT_SEARCH_START`]
fn root_slash(page_url: &str) -> Option<usize> {
    page_url
        .char_indices()
        .find(|&(i, c)| i >= ROOT_SEARCH_START && c == '/')
        .map(|(i, _)| i)
}

/// Scheme and host of `page_url`, without a trailing slash
fn site_root(page_url: &str) -> &str {
    match root_slash(page_url) {
        Some(i) => &page_url[..i],
        None => page_url,
    }
}

/// `page_url` up to, but not including, its last `/`
///
/// A page URL with no path (`https://host`) is treated as `https://host/`.
/// The prefix is joined to the href without a separator, so `other.html` on
/// `https://host/dir/page.html` becomes `https://host/dirother.html`.
fn page_directory(page_url: &str) -> String {
    let mut page = page_url.to_string();
    if root_slash(&page).is_none() {
        page.push('/');
    }

    match page.rfind('/') {
        Some(i) => page[..i].to_string(),
        None => page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "https://seed.test/";

    #[test]
    fn test_skip_short_and_fragment_only() {
        assert_eq!(normalize_href("", SEED), None);
        assert_eq!(normalize_href("a", SEED), None);
        assert_eq!(normalize_href("#", SEED), None);
        assert_eq!(normalize_href("#section", SEED), None);
    }

    #[test]
    fn test_strip_fragment() {
        assert_eq!(
            normalize_href("https://other.test/page#part", SEED).as_deref(),
            Some("https://other.test/page")
        );
        assert_eq!(
            normalize_href("/page#a#b", SEED).as_deref(),
            Some("https://seed.test/page")
        );
    }

    #[test]
    fn test_protocol_relative() {
        assert_eq!(
            normalize_href("//example.com/x", SEED).as_deref(),
            Some("https://example.com/x")
        );
    }

    #[test]
    fn test_www_removed_once_anywhere() {
        assert_eq!(
            normalize_href("https://www.example.com/a", SEED).as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(
            normalize_href("https://www.example.com/www.b", SEED).as_deref(),
            Some("https://example.com/www.b")
        );
        assert_eq!(
            normalize_href("https://example.com/www.b", SEED).as_deref(),
            Some("https://example.com/b")
        );
        assert_eq!(
            normalize_href("//www.example.com/", SEED).as_deref(),
            Some("https://example.com/")
        );
    }

    #[test]
    fn test_bare_domain_gets_scheme() {
        assert_eq!(
            normalize_href("example.com/x", SEED).as_deref(),
            Some("https://example.com/x")
        );
        assert_eq!(
            normalize_href("www.example.com/path", SEED).as_deref(),
            Some("https://example.com/path")
        );
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            normalize_href("/about", "https://seed.test/page").as_deref(),
            Some("https://seed.test/about")
        );
        assert_eq!(
            normalize_href("/about", "https://seed.test/a/b/c").as_deref(),
            Some("https://seed.test/about")
        );
        assert_eq!(
            normalize_href("/about", "https://seed.test").as_deref(),
            Some("https://seed.test/about")
        );
        assert_eq!(
            normalize_href("/p", "http://127.0.0.1:8080/index.html").as_deref(),
            Some("http://127.0.0.1:8080/p")
        );
    }

    #[test]
    fn test_same_directory_relative() {
        assert_eq!(
            normalize_href("other.html", "https://seed.test/dir/page.html").as_deref(),
            Some("https://seed.test/dirother.html")
        );
        assert_eq!(
            normalize_href("sub/page", "https://seed.test/dir/").as_deref(),
            Some("https://seed.test/dirsub/page")
        );
        assert_eq!(
            normalize_href("about", "https://seed.test").as_deref(),
            Some("https://seed.testabout")
        );
        assert_eq!(
            normalize_href("page.html?x=1", "https://seed.test/a/b").as_deref(),
            Some("https://seed.test/apage.html?x=1")
        );
    }

    #[test]
    fn test_absolute_urls_untouched() {
        for href in [
            "https://other.test/page?b=2&a=1",
            "http://other.test/",
            "https://OTHER.test/Path/",
        ] {
            assert_eq!(normalize_href(href, SEED).as_deref(), Some(href));
        }
    }

    #[test]
    fn test_trailing_slash_is_significant() {
        let a = normalize_href("/page", SEED).unwrap();
        let b = normalize_href("/page/", SEED).unwrap();
        assert_ne!(a, b);
    }
}
