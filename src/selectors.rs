use scraper::Selector;

use crate::page::ProviderError;

/// Structural selectors for the job board's listing markup.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub listing_container: String,
    pub listing_item: String,
    pub title: String,
    pub link: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub recruiter: String,
    pub description: String,
    pub posted_label: String,
    pub next_page: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            listing_container: ".lister__header".to_string(),
            listing_item: "li.lister__item".to_string(),
            title: "h3.lister__header a span".to_string(),
            link: "h3.lister__header a".to_string(),
            // The board renders the hiring company in the recruiter slot.
            company: "li.lister__meta-item--recruiter".to_string(),
            location: "li.lister__meta-item--location".to_string(),
            salary: "li.lister__meta-item--salary".to_string(),
            recruiter: "li.lister__meta-item--recruiter".to_string(),
            description: "p.lister__description".to_string(),
            posted_label: "li.job-actions__action.pipe".to_string(),
            next_page: r#"li.paginator__item a[rel="next"]"#.to_string(),
        }
    }
}

/// Per-listing selectors, parsed once.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub title: Selector,
    pub link: Selector,
    pub company: Selector,
    pub location: Selector,
    pub salary: Selector,
    pub recruiter: Selector,
    pub description: Selector,
    pub posted_label: Selector,
}

impl CompiledSelectors {
    pub fn compile(selectors: &Selectors) -> Result<Self, ProviderError> {
        Ok(CompiledSelectors {
            title: compile(&selectors.title)?,
            link: compile(&selectors.link)?,
            company: compile(&selectors.company)?,
            location: compile(&selectors.location)?,
            salary: compile(&selectors.salary)?,
            recruiter: compile(&selectors.recruiter)?,
            description: compile(&selectors.description)?,
            posted_label: compile(&selectors.posted_label)?,
        })
    }
}

pub fn compile(selector: &str) -> Result<Selector, ProviderError> {
    Selector::parse(selector).map_err(|e| ProviderError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selectors_compile() {
        let selectors = Selectors::default();
        assert!(CompiledSelectors::compile(&selectors).is_ok());
        assert!(compile(&selectors.listing_container).is_ok());
        assert!(compile(&selectors.listing_item).is_ok());
        assert!(compile(&selectors.next_page).is_ok());
    }

    #[test]
    fn malformed_selector_is_reported() {
        let err = compile("li[[").unwrap_err();
        assert!(matches!(err, ProviderError::Selector { ref selector, .. } if selector == "li[["));
    }
}
