use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use log::{debug, info};
use url::Url;

use crate::page::{ListingNode, PageProvider, ProviderError};

/// Next-page control located on the rendered page.
#[derive(Debug, Clone)]
pub struct NextControl {
    selector: String,
}

/// Page provider backed by a headless Chrome session, for boards that only
/// render their listings client side.
pub struct ChromePageProvider {
    // Dropping the browser kills the Chrome process, so it lives as long as the tab.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromePageProvider {
    pub fn launch(headless: bool) -> Result<Self, ProviderError> {
        let options = LaunchOptionsBuilder::default()
            .headless(headless)
            .build()
            .map_err(|e| ProviderError::Launch(e.to_string()))?;

        let browser = Browser::new(options)?;
        let tab = browser.new_tab()?;
        info!("Chrome started (headless: {})", headless);

        Ok(ChromePageProvider {
            _browser: browser,
            tab,
        })
    }

    fn current_url(&self) -> Result<Url, ProviderError> {
        Ok(Url::parse(&self.tab.get_url())?)
    }

    fn wait_present(&self, selector: &str, timeout: Duration) -> Result<(), ProviderError> {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!("Wait for `{}` gave up: {}", selector, e);
                Err(ProviderError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                })
            }
        }
    }
}

impl PageProvider for ChromePageProvider {
    type Control = NextControl;

    fn navigate(&mut self, url: &Url) -> Result<(), ProviderError> {
        info!("Opening: {}", url);
        self.tab.navigate_to(url.as_str())?.wait_until_navigated()?;
        Ok(())
    }

    fn wait_for_elements(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<ListingNode>, ProviderError> {
        self.wait_present(selector, timeout)?;
        let page_url = self.current_url()?;

        self.tab
            .find_elements(selector)?
            .iter()
            .map(|el| -> Result<ListingNode, ProviderError> {
                let outer_html = el.get_content()?;
                Ok(ListingNode::parse(&outer_html, page_url.clone()))
            })
            .collect()
    }

    fn wait_for_clickable(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<NextControl, ProviderError> {
        self.wait_present(selector, timeout)?;
        // An element that cannot be scrolled into view has no box and cannot be clicked.
        if let Err(e) = self.tab.find_element(selector)?.scroll_into_view() {
            debug!("`{}` is present but not clickable: {}", selector, e);
            return Err(ProviderError::Timeout {
                selector: selector.to_string(),
                timeout,
            });
        }
        Ok(NextControl {
            selector: selector.to_string(),
        })
    }

    fn activate(&mut self, control: NextControl) -> Result<(), ProviderError> {
        self.tab.find_element(&control.selector)?.click()?;
        self.tab.wait_until_navigated()?;
        Ok(())
    }
}
