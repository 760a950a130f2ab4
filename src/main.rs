use job_board_scraper::cli::{Cli, ProviderKind};
use job_board_scraper::{logger, ChromePageProvider, CrawlConfig, CrawlOutcome, CsvSink, FieldExtractor, HttpPageProvider, PageProvider, Paginator, ProviderError, RecordSink, Selectors};

use std::error::Error;
use std::time::Duration;
use clap::Parser;
use log::info;
use url::Url;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    let cli = Cli::parse();
    info!("Starting job board scrape at {}", cli.start_url);

    let start_url = Url::parse(&cli.start_url)?;
    let extractor = FieldExtractor::new(Selectors::default())?;
    let config = CrawlConfig {
        wait_timeout: Duration::from_secs(cli.wait_timeout_secs),
        ..CrawlConfig::default()
    };

    let outcome = match cli.provider {
        ProviderKind::Chrome => crawl(ChromePageProvider::launch(!cli.headful)?, &start_url, extractor, config)?,
        ProviderKind::Http => crawl(HttpPageProvider::new(Duration::from_secs(30))?, &start_url, extractor, config)?,
    };

    let mut sink = CsvSink::create(&cli.output)?;
    sink.write_all(&outcome.records)?;

    info!("Scraping completed. {} jobs from {} pages written to {}", outcome.records.len(), outcome.pages_extracted, cli.output);
    Ok(())
}

fn crawl<P: PageProvider>(mut provider: P, start_url: &Url, extractor: FieldExtractor, config: CrawlConfig) -> Result<CrawlOutcome, ProviderError> {
    provider.navigate(start_url)?;
    Ok(Paginator::new(provider, extractor, config).run())
}
