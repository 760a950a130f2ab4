use std::time::Duration;

use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

use crate::selectors;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("timed out after {timeout:?} waiting for `{selector}`")]
    Timeout { selector: String, timeout: Duration },
    #[error("no page has been loaded yet")]
    NoPage,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: Url },
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    #[error("could not launch browser: {0}")]
    Launch(String),
    #[error(transparent)]
    Browser(#[from] anyhow::Error),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout { .. })
    }
}

/// Rendering layer the crawl runs against.
///
/// Implementations own the browser or HTTP session. Every wait is bounded;
/// a condition that does not hold within `timeout` yields
/// [`ProviderError::Timeout`].
pub trait PageProvider {
    /// Handle to an activatable "next page" control.
    type Control;

    fn navigate(&mut self, url: &Url) -> Result<(), ProviderError>;

    fn wait_for_elements(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<ListingNode>, ProviderError>;

    fn wait_for_clickable(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Self::Control, ProviderError>;

    fn activate(&mut self, control: Self::Control) -> Result<(), ProviderError>;
}

/// Detached snapshot of one element on a rendered page.
///
/// Lookups are presence probes: a missing sub-element is `None`, never an
/// error.
#[derive(Debug, Clone)]
pub struct ListingNode {
    fragment: Html,
    page_url: Url,
}

impl ListingNode {
    pub fn parse(outer_html: &str, page_url: Url) -> Self {
        ListingNode {
            fragment: Html::parse_fragment(outer_html),
            page_url,
        }
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    pub fn has(&self, selector: &Selector) -> bool {
        self.fragment.select(selector).next().is_some()
    }

    /// Visible text of the first match with whitespace runs collapsed.
    pub fn text(&self, selector: &Selector) -> Option<String> {
        self.fragment.select(selector).next().map(|el| {
            el.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// `href` of the first match, resolved against the page URL.
    pub fn href(&self, selector: &Selector) -> Option<Url> {
        let raw = self.fragment.select(selector).next()?.value().attr("href")?;
        self.page_url.join(raw.trim()).ok()
    }
}

/// Snapshots every match of `selector` in an already loaded document.
pub(crate) fn snapshot_matches(
    document: &Html,
    selector: &str,
    page_url: &Url,
) -> Result<Vec<ListingNode>, ProviderError> {
    let compiled = selectors::compile(selector)?;
    Ok(document
        .select(&compiled)
        .map(|el| ListingNode::parse(&el.html(), page_url.clone()))
        .collect())
}

/// Resolved `href` of the first match of `selector`, if any.
pub(crate) fn first_link(
    document: &Html,
    selector: &str,
    page_url: &Url,
) -> Result<Option<Url>, ProviderError> {
    let compiled = selectors::compile(selector)?;
    Ok(document
        .select(&compiled)
        .filter_map(|el| el.value().attr("href"))
        .find_map(|href| page_url.join(href.trim()).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(html: &str) -> ListingNode {
        ListingNode::parse(html, Url::parse("https://jobs.example.com/jobs/?page=2").unwrap())
    }

    #[test]
    fn text_collapses_whitespace() {
        let n = node("<li><p class=\"d\">  Audit\n   Senior   </p></li>");
        let sel = selectors::compile("p.d").unwrap();
        assert_eq!(n.text(&sel).as_deref(), Some("Audit Senior"));
    }

    #[test]
    fn missing_sub_element_is_absent() {
        let n = node("<li><p class=\"d\">x</p></li>");
        let sel = selectors::compile("span.salary").unwrap();
        assert!(!n.has(&sel));
        assert_eq!(n.text(&sel), None);
    }

    #[test]
    fn href_is_resolved_against_page() {
        let n = node("<li><h3><a href=\"/job/123/auditor/\">Auditor</a></h3></li>");
        let sel = selectors::compile("h3 a").unwrap();
        assert_eq!(
            n.href(&sel).unwrap().as_str(),
            "https://jobs.example.com/job/123/auditor/"
        );
    }

    #[test]
    fn snapshots_each_match() {
        let doc = Html::parse_document(
            "<ul><li class=\"item\">a</li><li class=\"item\">b</li><li>c</li></ul>",
        );
        let url = Url::parse("https://jobs.example.com/").unwrap();
        let nodes = snapshot_matches(&doc, "li.item", &url).unwrap();
        let any = selectors::compile("li").unwrap();
        let texts: Vec<_> = nodes.iter().filter_map(|n| n.text(&any)).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn first_link_skips_anchors_without_href() {
        let doc = Html::parse_document(
            "<a rel=\"next\">x</a><a rel=\"next\" href=\"?page=3\">next</a>",
        );
        let url = Url::parse("https://jobs.example.com/jobs/?page=2").unwrap();
        let link = first_link(&doc, "a[rel=\"next\"]", &url).unwrap().unwrap();
        assert_eq!(link.as_str(), "https://jobs.example.com/jobs/?page=3");
    }
}
