// src/sources/baidu.rs
use crate::sources::{trim_base, Source};
use crate::types::{Category, DorkQuery, EngineConfig, SearchItem};
use crate::utils::{normalize_title, parse_result_count};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::ops::RangeInclusive;

static BAIDU_DORKS: [DorkQuery; 6] = [
    DorkQuery::new(Category::Subdomain, "site:{}"),
    DorkQuery::new(Category::Install, "inurl:setup site:{}"),
    DorkQuery::new(Category::Redirect, "inurl:redirect site:{}"),
    DorkQuery::new(Category::Sensitive, "filetype:log site:{}"),
    DorkQuery::new(Category::Document, "filetype:txt site:{}"),
    DorkQuery::new(Category::Extension, "filetype:php site:{}"),
];

static NUMS: Lazy<Selector> = Lazy::new(|| Selector::parse(".nums").expect("valid selector"));
static RESULT_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".t > a").expect("valid selector"));

/// Baidu web search. Result links go through `baidu.com/link?url=...`
/// and must be followed to find the real destination.
#[derive(Debug, Clone)]
pub struct BaiduSource {
    base_url: String,
    delay: RangeInclusive<u64>,
}

impl BaiduSource {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base_url: trim_base(&config.base_url),
            delay: config.min_delay_secs..=config.max_delay_secs,
        }
    }
}

impl Source for BaiduSource {
    fn name(&self) -> &str {
        "baidu"
    }

    fn prefix(&self) -> &str {
        "b"
    }

    fn per_page_max(&self) -> usize {
        50
    }

    fn accept_language(&self) -> &str {
        "zh-CN,zh;q=0.9,en;q=0.8"
    }

    fn dorks(&self) -> &'static [DorkQuery] {
        &BAIDU_DORKS
    }

    fn page_url(&self, offset: usize, per_page: usize, query: &str) -> String {
        format!(
            "{}/s?ie=utf-8&cl=0&pn={}&wd={}&rn={}",
            self.base_url, offset, query, per_page
        )
    }

    fn delay_secs(&self) -> RangeInclusive<u64> {
        self.delay.clone()
    }

    fn result_count(&self, document: &Html) -> Option<u64> {
        let nums = document.select(&NUMS).next()?;
        parse_result_count(&nums.text().collect::<String>())
    }

    fn extract(&self, document: &Html) -> Vec<SearchItem> {
        document
            .select(&RESULT_LINK)
            .filter_map(|link| {
                let href = link.value().attr("href")?;
                let title = normalize_title(&link.text().collect::<String>());
                Some(SearchItem::new(title, href))
            })
            .collect()
    }

    fn resolves_redirects(&self) -> bool {
        true
    }
}
