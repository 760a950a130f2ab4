use chrono::{DateTime, Local, TimeZone};
use log::debug;
use scraper::Selector;
use thiserror::Error;
use url::Url;

use crate::dates::{self, DateResolver};
use crate::models::{JobListing, NOT_AVAILABLE};
use crate::page::{ListingNode, ProviderError};
use crate::salary::SalaryNormalizer;
use crate::selectors::{CompiledSelectors, Selectors};

/// Why a single listing was dropped. Never fatal to the crawl.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingExtractionError {
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("job link `{0}` is not an absolute http(s) url")]
    InvalidUrl(String),
    #[error("no day count in posting label `{0}`")]
    UnparseableAge(String),
    #[error("posting age of {0} days is out of calendar range")]
    DateOutOfRange(u32),
}

pub struct FieldExtractor {
    selectors: Selectors,
    compiled: CompiledSelectors,
    salary: SalaryNormalizer,
    dates: DateResolver,
}

impl FieldExtractor {
    pub fn new(selectors: Selectors) -> Result<Self, ProviderError> {
        let compiled = CompiledSelectors::compile(&selectors)?;
        Ok(FieldExtractor {
            selectors,
            compiled,
            salary: SalaryNormalizer::new(),
            dates: DateResolver::new(),
        })
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    /// Extracts one listing, dating it against the clock at the moment of the call.
    pub fn extract_now(&self, node: &ListingNode) -> Result<JobListing, ListingExtractionError> {
        self.extract(node, &Local::now())
    }

    pub fn extract<Tz: TimeZone>(
        &self,
        node: &ListingNode,
        now: &DateTime<Tz>,
    ) -> Result<JobListing, ListingExtractionError> {
        let c = &self.compiled;

        let title = required(node, &c.title, "title")?;
        let url = node
            .href(&c.link)
            .ok_or(ListingExtractionError::MissingField("url"))?;
        let url = absolute_http(url)?;
        let company_name = required(node, &c.company, "company")?;
        let location = required(node, &c.location, "location")?;

        let salary_raw = optional(node, &c.salary);
        let recruiter = optional(node, &c.recruiter);

        let description = node
            .text(&c.description)
            .ok_or(ListingExtractionError::MissingField("description"))?;

        let days_ago_raw = required(node, &c.posted_label, "posted label")?;
        let days_ago = self
            .dates
            .parse_days_ago(&days_ago_raw)
            .ok_or_else(|| ListingExtractionError::UnparseableAge(days_ago_raw.clone()))?;
        let date_posted = dates::resolve_posted_date(days_ago, now)
            .ok_or(ListingExtractionError::DateOutOfRange(days_ago))?;

        let salary_normalized = self.salary.normalize(&salary_raw, &description);

        debug!(
            "Extracted '{}' at {} ({}, salary: {}, posted: {})",
            title,
            company_name,
            location,
            salary_normalized,
            dates::format_date(date_posted)
        );

        Ok(JobListing {
            title,
            company_name,
            location,
            salary_raw,
            salary_normalized,
            recruiter,
            url: url.to_string(),
            description,
            days_ago_raw,
            date_posted,
        })
    }
}

fn required(
    node: &ListingNode,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ListingExtractionError> {
    node.text(selector)
        .filter(|text| !text.is_empty())
        .ok_or(ListingExtractionError::MissingField(field))
}

fn optional(node: &ListingNode, selector: &Selector) -> String {
    node.text(selector)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn absolute_http(url: Url) -> Result<Url, ListingExtractionError> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ListingExtractionError::InvalidUrl(url.to_string())),
    }
}
