// src/sources/mod.rs
use crate::types::{Category, Config, DorkQuery, SearchItem, SourceInfo};
use scraper::Html;
use std::ops::RangeInclusive;

mod baidu;
mod google;

pub use baidu::BaiduSource;
pub use google::GoogleSource;

/// Everything the search loop needs to know about one engine.
pub trait Source: Send + Sync {
    fn name(&self) -> &str;

    /// Output file prefix, e.g. `g` for `g-subdomain.txt`.
    fn prefix(&self) -> &str;

    /// Most results the engine will return on a single page.
    fn per_page_max(&self) -> usize;

    fn accept_language(&self) -> &str;

    /// Ordered category table for this engine.
    fn dorks(&self) -> &'static [DorkQuery];

    /// Results page URL. `query` must already be percent-encoded.
    fn page_url(&self, offset: usize, per_page: usize, query: &str) -> String;

    /// Seconds to sleep after each page fetch, picked uniformly from this range.
    fn delay_secs(&self) -> RangeInclusive<u64>;

    /// Total hit count the engine reports on a results page.
    fn result_count(&self, document: &Html) -> Option<u64>;

    /// Result (title, URL) pairs in on-page order.
    fn extract(&self, document: &Html) -> Vec<SearchItem>;

    /// Whether extracted URLs are engine redirects that still need following.
    fn resolves_redirects(&self) -> bool {
        false
    }

    fn dork(&self, category: Category) -> Option<DorkQuery> {
        self.dorks().iter().find(|dork| dork.category == category).copied()
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            name: self.name().to_string(),
            prefix: self.prefix().to_string(),
            per_page_max: self.per_page_max(),
            resolves_redirects: self.resolves_redirects(),
        }
    }
}

pub const SOURCE_NAMES: [&str; 2] = ["google", "baidu"];

pub fn create_source(name: &str, config: &Config) -> Option<Box<dyn Source>> {
    match name.trim().to_lowercase().as_str() {
        "google" => Some(Box::new(GoogleSource::new(&config.google))),
        "baidu" => Some(Box::new(BaiduSource::new(&config.baidu))),
        _ => None,
    }
}

pub fn get_all_sources(config: &Config) -> Vec<Box<dyn Source>> {
    SOURCE_NAMES
        .into_iter()
        .filter_map(|name| create_source(name, config))
        .collect()
}

fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source() {
        let config = Config::default();

        let source = create_source("Google", &config);
        assert_eq!(source.map(|s| s.prefix().to_string()), Some("g".to_string()));

        assert!(create_source("bing", &config).is_none());
    }

    #[test]
    fn test_every_source_covers_every_category() {
        for source in get_all_sources(&Config::default()) {
            for category in Category::ALL {
                let dork = source.dork(category);
                assert!(dork.is_some(), "{} lacks {}", source.name(), category);
            }
        }
    }

    #[test]
    fn test_subdomain_dork_is_site_only() {
        for source in get_all_sources(&Config::default()) {
            let query = source.dork(Category::Subdomain).unwrap().build("example.com");
            assert!(crate::utils::is_subdomain_query(&query));

            let query = source.dork(Category::Sensitive).unwrap().build("example.com");
            assert!(!crate::utils::is_subdomain_query(&query));
        }
    }

    #[test]
    fn test_info() {
        let config = Config::default();
        let info = BaiduSource::new(&config.baidu).info();
        assert_eq!(info.name, "baidu");
        assert_eq!(info.per_page_max, 50);
        assert!(info.resolves_redirects);
    }
}
