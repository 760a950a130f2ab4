use std::ops::RangeInclusive;
use std::time::Duration;

use log::{info, warn};

use crate::delay_manager;
use crate::extractor::FieldExtractor;
use crate::models::JobListing;
use crate::page::{ListingNode, PageProvider};

/// Most result pages a single crawl will extract.
pub const PAGE_LIMIT: usize = 15;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Bound on every readiness wait.
    pub wait_timeout: Duration,
    /// Pause between page advances, in whole seconds.
    pub pause_secs: RangeInclusive<u64>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            wait_timeout: Duration::from_secs(10),
            pause_secs: 2..=3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The listing container or listings never showed up.
    ListingsUnavailable,
    /// No clickable next-page control.
    NoNextPage,
    /// The next-page control was found but following it failed.
    NavigationFailed,
    PageCapReached,
}

#[derive(Debug)]
pub struct CrawlOutcome {
    /// Page order, then in-page order.
    pub records: Vec<JobListing>,
    pub pages_extracted: usize,
    pub stop: StopReason,
}

/// Walks the result pages one at a time, extracting every listing before
/// moving on.
pub struct Paginator<P: PageProvider> {
    provider: P,
    extractor: FieldExtractor,
    config: CrawlConfig,
}

impl<P: PageProvider> Paginator<P> {
    pub fn new(provider: P, extractor: FieldExtractor, config: CrawlConfig) -> Self {
        Paginator {
            provider,
            extractor,
            config,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Crawls from whatever page the provider currently shows.
    pub fn run(&mut self) -> CrawlOutcome {
        let mut records = Vec::new();
        let mut pages_extracted = 0;
        let mut advanced = 0;

        let stop = loop {
            let listings = match self.fetch_listings() {
                Some(listings) => listings,
                None => break StopReason::ListingsUnavailable,
            };

            let before = records.len();
            self.extract_page(&listings, &mut records);
            pages_extracted += 1;
            info!(
                "Page {}: kept {} of {} listings ({} total)",
                pages_extracted,
                records.len() - before,
                listings.len(),
                records.len()
            );

            if let Some(reason) = self.advance() {
                break reason;
            }
            advanced += 1;
            if advanced == PAGE_LIMIT {
                break StopReason::PageCapReached;
            }
            delay_manager::random_page_delay(&self.config.pause_secs);
        };

        info!(
            "Crawl finished ({:?}): {} records from {} pages",
            stop,
            records.len(),
            pages_extracted
        );

        CrawlOutcome {
            records,
            pages_extracted,
            stop,
        }
    }

    fn fetch_listings(&mut self) -> Option<Vec<ListingNode>> {
        let selectors = self.extractor.selectors();
        let timeout = self.config.wait_timeout;

        let waited = self
            .provider
            .wait_for_elements(&selectors.listing_container, timeout)
            .and_then(|_| self.provider.wait_for_elements(&selectors.listing_item, timeout));

        match waited {
            Ok(listings) => Some(listings),
            Err(e) => {
                info!("No listings on this page, treating as end of results: {}", e);
                None
            }
        }
    }

    fn extract_page(&self, listings: &[ListingNode], records: &mut Vec<JobListing>) {
        for (i, node) in listings.iter().enumerate() {
            match self.extractor.extract_now(node) {
                Ok(listing) => records.push(listing),
                Err(e) => warn!("Skipping listing {} on {}: {}", i + 1, node.page_url(), e),
            }
        }
    }

    /// Follows the next-page control, or says why the crawl is over.
    fn advance(&mut self) -> Option<StopReason> {
        let control = match self
            .provider
            .wait_for_clickable(&self.extractor.selectors().next_page, self.config.wait_timeout)
        {
            Ok(control) => control,
            Err(e) => {
                info!("No more pages to scrape: {}", e);
                return Some(StopReason::NoNextPage);
            }
        };

        if let Err(e) = self.provider.activate(control) {
            warn!("Could not follow next page: {}", e);
            return Some(StopReason::NavigationFailed);
        }
        None
    }
}
