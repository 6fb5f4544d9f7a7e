// src/sources/google.rs
use crate::sources::{trim_base, Source};
use crate::types::{Category, DorkQuery, EngineConfig, SearchItem};
use crate::utils::{normalize_title, parse_result_count};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::ops::RangeInclusive;

static GOOGLE_DORKS: [DorkQuery; 6] = [
    DorkQuery::new(Category::Subdomain, "site:{}"),
    DorkQuery::new(
        Category::Install,
        "site:{} inurl:readme OR inurl:license OR inurl:install OR inurl:setup",
    ),
    DorkQuery::new(
        Category::Redirect,
        "site:{} inurl:redir OR inurl:url OR inurl:redirect OR inurl:return OR inurl:src=http",
    ),
    DorkQuery::new(Category::Sensitive, "site:{} ext:bak OR ext:sql OR ext:rar OR ext:zip OR ext:log"),
    DorkQuery::new(Category::Document, "site:{} ext:doc OR ext:docx OR ext:csv OR ext:pdf OR ext:txt"),
    DorkQuery::new(
        Category::Extension,
        "site:{} ext:cgi OR ext:php OR ext:aspx OR ext:jsp OR ext:swf OR ext:fla OR ext:xml",
    ),
];

static STATS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#result-stats, #resultStats").expect("valid selector"));
static LEGACY_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.r a").expect("valid selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("valid selector"));

const REDIRECT_PREFIX: &str = "/url?q=";

/// Google web search. Result links point straight at the destination,
/// wrapped in `/url?q=...&sa=...` tracking.
#[derive(Debug, Clone)]
pub struct GoogleSource {
    base_url: String,
    delay: RangeInclusive<u64>,
}

impl GoogleSource {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base_url: trim_base(&config.base_url),
            delay: config.min_delay_secs..=config.max_delay_secs,
        }
    }
}

impl Source for GoogleSource {
    fn name(&self) -> &str {
        "google"
    }

    fn prefix(&self) -> &str {
        "g"
    }

    fn per_page_max(&self) -> usize {
        100
    }

    fn accept_language(&self) -> &str {
        "en-US,en;q=0.5"
    }

    fn dorks(&self) -> &'static [DorkQuery] {
        &GOOGLE_DORKS
    }

    fn page_url(&self, offset: usize, per_page: usize, query: &str) -> String {
        format!(
            "{}/search?filter=0&start={}&q={}&num={}",
            self.base_url, offset, query, per_page
        )
    }

    fn delay_secs(&self) -> RangeInclusive<u64> {
        self.delay.clone()
    }

    fn result_count(&self, document: &Html) -> Option<u64> {
        // Only the leading text node; the timing lives in a nested element.
        let stats = document.select(&STATS).next()?;
        parse_result_count(stats.text().next()?)
    }

    fn extract(&self, document: &Html) -> Vec<SearchItem> {
        let legacy: Vec<SearchItem> = document
            .select(&LEGACY_LINK)
            .filter_map(|link| {
                let url = clean_href(link.value().attr("href")?)?;
                let title = normalize_title(&link.text().collect::<String>());
                Some(SearchItem::new(title, url))
            })
            .collect();
        if !legacy.is_empty() {
            return legacy;
        }

        document
            .select(&ANCHOR)
            .filter_map(|link| {
                let heading = link.select(&HEADING).next()?;
                let url = clean_href(link.value().attr("href")?)?;
                let title = normalize_title(&heading.text().collect::<String>());
                Some(SearchItem::new(title, url))
            })
            .collect()
    }
}

/// Strip the `/url?q=` wrapper and `&sa=` tracking suffix from a result link.
fn clean_href(href: &str) -> Option<String> {
    let without_tracking = href.split("&sa=").next().unwrap_or(href);
    let target = without_tracking
        .strip_prefix(REDIRECT_PREFIX)
        .unwrap_or(without_tracking);

    if !target.starts_with("http") {
        return None;
    }

    Some(
        urlencoding::decode(target)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| target.to_string()),
    )
}
