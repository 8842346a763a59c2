//! HTML extraction of page text and anchors

use crate::crawler::fetcher::PageContent;
use scraper::{Html, Node, Selector};

/// Elements whose contents are never rendered as text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts the visible text and raw anchor hrefs from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML source of the page
///
/// # Returns
///
/// A `PageContent` whose `text` has every whitespace run collapsed to a single
/// space and whose `anchors` are the `href` values of `<a href>` elements, in
/// document order, exactly as written.
///
/// # Example
///
/// ```
/// use term_ripple::crawler::parse_page;
///
/// let page = parse_page(r#"<p>Hello <a href="/next">world</a></p>"#);
/// assert_eq!(page.text, "Hello world");
/// assert_eq!(page.anchors, vec!["/next".to_string()]);
/// ```
pub fn parse_page(html: &str) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        text: extract_text(&document),
        anchors: extract_anchors(&document),
    }
}

fn extract_text(document: &Html) -> String {
    let mut raw = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        raw.push_str(text);
        raw.push(' ');
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_anchors(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
