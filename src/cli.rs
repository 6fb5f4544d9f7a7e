use crate::types::Category;
use crate::utils::is_valid_domain;
use clap::Parser;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sitedork",
    version,
    long_version = LONG_VERSION,
    about = "Information dork tool for searching domains, files and emails",
    long_about = "sitedork runs a fixed set of search-engine dork queries against Google and Baidu\nfor one domain and appends the results to one file per engine and category."
)]
pub struct Args {
    /// Domain name to search for
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN", value_parser = parse_domain, required_unless_present = "list_engines")]
    pub domain: Option<String>,

    /// Maximum number of results per query
    #[arg(short = 'l', long = "limit", value_name = "LIMIT", default_value_t = 100, value_parser = parse_limit)]
    pub limit: usize,

    /// Output directory (overrides the config file)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Engines to query (comma-separated)
    #[arg(short = 'e', long = "engines", value_delimiter = ',')]
    pub engines: Option<Vec<String>>,

    /// Dork categories to run (comma-separated)
    #[arg(short = 'c', long = "categories", value_delimiter = ',', value_enum)]
    pub categories: Option<Vec<Category>>,

    /// Configuration file path
    #[arg(long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Skip the random pause between result pages
    #[arg(long = "no-delay")]
    pub no_delay: bool,

    /// Silent mode (warnings and errors only)
    #[arg(long = "silent")]
    pub silent: bool,

    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// List engines and their dork templates
    #[arg(long = "list-engines")]
    pub list_engines: bool,
}

impl Args {
    pub fn categories(&self) -> Vec<Category> {
        self.categories
            .clone()
            .unwrap_or_else(|| Category::ALL.to_vec())
    }
}

fn parse_domain(value: &str) -> Result<String, String> {
    if is_valid_domain(value) {
        Ok(value.to_string())
    } else {
        Err(format!("{} is not a valid domain.", value))
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("{} is not a positive integer.", value)),
        Ok(limit) => Ok(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sitedork", "-d", "example.com"]).unwrap();
        assert_eq!(args.domain.as_deref(), Some("example.com"));
        assert_eq!(args.limit, 100);
        assert_eq!(args.categories(), Category::ALL.to_vec());
        assert!(args.engines.is_none());
    }

    #[test]
    fn test_rejects_invalid_domain() {
        let err = Args::try_parse_from(["sitedork", "-d", "not_a_domain"]).unwrap_err();
        assert!(err.to_string().contains("not_a_domain is not a valid domain."));
    }

    #[test]
    fn test_rejects_non_positive_limit() {
        assert!(Args::try_parse_from(["sitedork", "-d", "example.com", "-l", "0"]).is_err());
        assert!(Args::try_parse_from(["sitedork", "-d", "example.com", "-l", "-5"]).is_err());
    }

    #[test]
    fn test_domain_required() {
        assert!(Args::try_parse_from(["sitedork"]).is_err());
        assert!(Args::try_parse_from(["sitedork", "--list-engines"]).is_ok());
    }

    #[test]
    fn test_lists() {
        let args = Args::try_parse_from([
            "sitedork",
            "-d",
            "example.com",
            "-e",
            "baidu",
            "-c",
            "subdomain,sensitive",
            "-l",
            "20",
        ])
        .unwrap();
        assert_eq!(args.engines, Some(vec!["baidu".to_string()]));
        assert_eq!(args.categories(), vec![Category::Subdomain, Category::Sensitive]);
        assert_eq!(args.limit, 20);
    }
}
