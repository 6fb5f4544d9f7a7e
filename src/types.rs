// src/types.rs
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub resolve_timeout_secs: u64,
    pub google: EngineConfig,
    pub baidu: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.84 Safari/537.36".to_string(),
            request_timeout_secs: 10,
            resolve_timeout_secs: 5,
            google: EngineConfig {
                base_url: "https://www.google.com".to_string(),
                min_delay_secs: 15,
                max_delay_secs: 30,
            },
            baidu: EngineConfig {
                base_url: "https://www.baidu.com".to_string(),
                min_delay_secs: 5,
                max_delay_secs: 10,
            },
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }

    /// Zero out every engine's inter-page delay.
    pub fn without_delays(mut self) -> Self {
        for engine in [&mut self.google, &mut self.baidu] {
            engine.min_delay_secs = 0;
            engine.max_delay_secs = 0;
        }
        self
    }
}

/// Per-engine endpoint and throttling settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub base_url: String,
    pub min_delay_secs: u64,
    pub max_delay_secs: u64,
}

/// Named dork intent. Each engine maps every category to its own template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Category {
    Subdomain,
    Install,
    Redirect,
    Sensitive,
    Document,
    Extension,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Subdomain,
        Category::Install,
        Category::Redirect,
        Category::Sensitive,
        Category::Document,
        Category::Extension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Subdomain => "subdomain",
            Category::Install => "install",
            Category::Redirect => "redirect",
            Category::Sensitive => "sensitive",
            Category::Document => "document",
            Category::Extension => "extension",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category plus its engine-specific template. `{}` marks the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DorkQuery {
    pub category: Category,
    pub template: &'static str,
}

impl DorkQuery {
    pub const fn new(category: Category, template: &'static str) -> Self {
        Self { category, template }
    }

    pub fn build(&self, domain: &str) -> String {
        self.template.replace("{}", domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchItem {
    pub title: String,
    pub url: String,
}

impl SearchItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

pub struct SourceInfo {
    pub name: String,
    pub prefix: String,
    pub per_page_max: usize,
    pub resolves_redirects: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub engine: String,
    pub category: Category,
    pub pages_fetched: usize,
    pub reported_total: Option<u64>,
    pub written: usize,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub reports: Vec<CategoryReport>,
    pub duration: Duration,
}

impl RunStats {
    pub fn items_written(&self) -> usize {
        self.reports.iter().map(|report| report.written).sum()
    }
}

#[derive(Debug, Error)]
pub enum SitedorkError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Could not read result count from {0} results page")]
    ResultCountError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dork_query_substitutes_domain() {
        let query = DorkQuery::new(Category::Install, "inurl:setup site:{}");
        assert_eq!(query.build("example.com"), "inurl:setup site:example.com");
    }

    #[test]
    fn test_without_delays() {
        let config = Config::default().without_delays();
        assert_eq!(config.google.max_delay_secs, 0);
        assert_eq!(config.baidu.min_delay_secs, 0);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
