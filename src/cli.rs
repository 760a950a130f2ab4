use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "job-board-scraper")]
#[command(about = "Collects job listings from a paginated job board into a CSV file")]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "https://www.gaapweb.com/jobs/", help = "First results page")]
    pub start_url: String,

    #[arg(short, long, default_value = "webscraped_data.csv", help = "CSV file to write")]
    pub output: String,

    #[arg(long, value_enum, default_value_t = ProviderKind::Chrome, help = "How pages are loaded")]
    pub provider: ProviderKind,

    #[arg(long, default_value_t = 10, help = "Seconds to wait for listings and the next-page control")]
    pub wait_timeout_secs: u64,

    #[arg(long, help = "Show the browser window (chrome provider only)")]
    pub headful: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    /// Headless Chrome, for boards rendered client side.
    Chrome,
    /// Plain HTTP fetches, for server-rendered boards.
    Http,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_gaapweb_with_chrome() {
        let cli = Cli::parse_from(["job-board-scraper"]);
        assert_eq!(cli.start_url, "https://www.gaapweb.com/jobs/");
        assert_eq!(cli.output, "webscraped_data.csv");
        assert_eq!(cli.provider, ProviderKind::Chrome);
        assert_eq!(cli.wait_timeout_secs, 10);
        assert!(!cli.headful);
    }

    #[test]
    fn provider_is_selectable() {
        let cli = Cli::parse_from(["job-board-scraper", "--provider", "http", "-o", "out.csv"]);
        assert_eq!(cli.provider, ProviderKind::Http);
        assert_eq!(cli.output, "out.csv");
    }
}
