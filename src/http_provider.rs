use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use scraper::Html;
use std::time::Duration;
use log::{debug, info};
use rand::Rng;
use url::Url;

use crate::page::{self, ListingNode, PageProvider, ProviderError};

const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Page provider for boards that render their listings server side.
///
/// There is nothing to wait for in a static document: a selector either
/// matches the last fetched page or the wait times out straight away.
pub struct HttpPageProvider {
    client: Client,
    current: Option<(Url, Html)>,
}

impl HttpPageProvider {
    pub fn new(request_timeout: Duration) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));

        let client = Client::builder()
            .timeout(request_timeout)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(HttpPageProvider {
            client,
            current: None,
        })
    }

    fn random_user_agent(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())]
    }

    fn current(&self) -> Result<&(Url, Html), ProviderError> {
        self.current.as_ref().ok_or(ProviderError::NoPage)
    }
}

impl PageProvider for HttpPageProvider {
    type Control = Url;

    fn navigate(&mut self, url: &Url) -> Result<(), ProviderError> {
        info!("Fetching: {}", url);
        let resp = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.random_user_agent())
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        // Redirects may have moved us; relative links resolve against the final URL.
        let final_url = resp.url().clone();
        let body = resp.text()?;
        self.current = Some((final_url, Html::parse_document(&body)));
        Ok(())
    }

    fn wait_for_elements(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<ListingNode>, ProviderError> {
        let (url, document) = self.current()?;
        let nodes = page::snapshot_matches(document, selector, url)?;
        if nodes.is_empty() {
            debug!("No match for `{}` on {}", selector, url);
            return Err(ProviderError::Timeout {
                selector: selector.to_string(),
                timeout,
            });
        }
        Ok(nodes)
    }

    fn wait_for_clickable(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Url, ProviderError> {
        let (url, document) = self.current()?;
        page::first_link(document, selector, url)?.ok_or_else(|| ProviderError::Timeout {
            selector: selector.to_string(),
            timeout,
        })
    }

    fn activate(&mut self, control: Url) -> Result<(), ProviderError> {
        self.navigate(&control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_fail_before_any_page_is_loaded() {
        let mut provider = HttpPageProvider::new(Duration::from_secs(5)).unwrap();
        let err = provider
            .wait_for_elements("li.lister__item", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ProviderError::NoPage));
    }

    #[test]
    fn absent_selector_times_out_on_loaded_page() {
        let mut provider = HttpPageProvider::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse("https://jobs.example.com/jobs/").unwrap();
        provider.current = Some((url, Html::parse_document("<ul><li>only</li></ul>")));

        let err = provider
            .wait_for_clickable("a[rel=\"next\"]", Duration::from_secs(1))
            .unwrap_err();
        assert!(err.is_timeout());

        let nodes = provider
            .wait_for_elements("li", Duration::from_secs(1))
            .unwrap();
        assert_eq!(nodes.len(), 1);
    }
}
