//! In-memory provider serving a fixed sequence of HTML pages.

use std::time::Duration;

use scraper::Html;
use url::Url;

use crate::page::{self, ListingNode, PageProvider, ProviderError};

pub struct ScriptedProvider {
    pages: Vec<String>,
    current: Option<usize>,
    pub loads: usize,
    pub activations: usize,
}

impl ScriptedProvider {
    pub fn new(pages: Vec<String>) -> Self {
        ScriptedProvider {
            pages,
            current: None,
            loads: 0,
            activations: 0,
        }
    }

    fn page_url(index: usize) -> Url {
        Url::parse(&format!("https://board.example.com/jobs/?page={}", index + 1))
            .expect("static url")
    }

    fn document(&self) -> Result<(Url, Html), ProviderError> {
        let index = self.current.ok_or(ProviderError::NoPage)?;
        let html = self.pages.get(index).ok_or(ProviderError::NoPage)?;
        Ok((Self::page_url(index), Html::parse_document(html)))
    }

    fn load(&mut self, index: usize) -> Result<(), ProviderError> {
        if index >= self.pages.len() {
            return Err(ProviderError::NoPage);
        }
        self.current = Some(index);
        self.loads += 1;
        Ok(())
    }
}

impl PageProvider for ScriptedProvider {
    type Control = usize;

    fn navigate(&mut self, _url: &Url) -> Result<(), ProviderError> {
        self.load(0)
    }

    fn wait_for_elements(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<ListingNode>, ProviderError> {
        let (url, document) = self.document()?;
        let nodes = page::snapshot_matches(&document, selector, &url)?;
        if nodes.is_empty() {
            return Err(ProviderError::Timeout { selector: selector.to_string(), timeout });
        }
        Ok(nodes)
    }

    fn wait_for_clickable(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<usize, ProviderError> {
        let (url, document) = self.document()?;
        match page::first_link(&document, selector, &url)? {
            Some(_) => Ok(self.current.unwrap_or(0) + 1),
            None => Err(ProviderError::Timeout { selector: selector.to_string(), timeout }),
        }
    }

    fn activate(&mut self, control: usize) -> Result<(), ProviderError> {
        self.activations += 1;
        self.load(control)
    }
}

/// Listing markup as the board renders it.
pub fn listing_html(title: &str, posted: &str) -> String {
    format!(
        r#"<li class="lister__item">
            <h3 class="lister__header"><a href="/job/{slug}/"><span>{title}</span></a></h3>
            <ul class="lister__meta">
                <li class="lister__meta-item--location">Manchester</li>
                <li class="lister__meta-item--recruiter">Sewell Wallis</li>
            </ul>
            <p class="lister__description">Salary up to £45,000</p>
            <ul><li class="job-actions__action pipe">{posted}</li></ul>
        </li>"#,
        slug = title.to_lowercase().replace(' ', "-"),
    )
}

/// A results page wrapping `listings`, optionally with a next-page link.
pub fn results_page(listings: &[String], has_next: bool) -> String {
    let next = if has_next {
        r#"<ul class="paginator"><li class="paginator__item"><a rel="next" href="?page=next">Next</a></li></ul>"#
    } else {
        ""
    };
    format!(
        "<html><body><ul class=\"lister\">{}</ul>{}</body></html>",
        listings.concat(),
        next
    )
}
