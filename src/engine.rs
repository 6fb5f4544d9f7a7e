use crate::cli::Args;
use crate::config;
use crate::output::OutputWriter;
use crate::resolver::RedirectResolver;
use crate::search::{page_plan, SearchSession};
use crate::session::Session;
use crate::sources::{create_source, get_all_sources, Source};
use crate::types::{Category, CategoryReport, Config, DorkQuery, RunStats, SearchItem, SitedorkError};
use crate::utils::{is_subdomain_query, is_valid_domain};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use rand::Rng;
use scraper::Html;
use std::path::Path;
use std::time::{Duration, Instant};

const DEFAULT_CONFIG_FILE: &str = "sitedork.toml";

pub struct DorkEngine {
    session: Session,
    sources: Vec<Box<dyn Source>>,
    writer: OutputWriter,
    show_progress: bool,
}

impl DorkEngine {
    /// Build an engine from command line arguments: load the config file,
    /// apply flag overrides and pick the requested engines.
    pub fn from_args(args: &Args) -> Result<Self, SitedorkError> {
        let mut config = match &args.config_path {
            Some(path) if !path.exists() => {
                return Err(SitedorkError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => config::load_config(path)?,
            None => config::load_config(Path::new(DEFAULT_CONFIG_FILE))?,
        };

        if let Some(dir) = &args.output_dir {
            config.output_dir = dir.clone();
        }
        if args.no_delay {
            config = config.without_delays();
        }

        let sources = match &args.engines {
            Some(names) => {
                let mut sources = Vec::new();
                for name in names {
                    match create_source(name, &config) {
                        Some(source) => sources.push(source),
                        None => warn!("Unknown engine: {}", name),
                    }
                }
                sources
            }
            None => get_all_sources(&config),
        };

        let show_progress = !args.silent && atty::is(atty::Stream::Stdout);
        Ok(Self::new(config, sources)?.with_progress(show_progress))
    }

    pub fn new(config: Config, sources: Vec<Box<dyn Source>>) -> Result<Self, SitedorkError> {
        if sources.is_empty() {
            return Err(SitedorkError::ConfigError("No valid engines configured".to_string()));
        }

        Ok(Self {
            session: Session::new(&config)?,
            sources,
            writer: OutputWriter::new(config.output_dir.clone()),
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn sources(&self) -> &[Box<dyn Source>] {
        &self.sources
    }

    /// Run every requested category on every engine, one after another.
    pub async fn run(
        &self,
        domain: &str,
        limit: usize,
        categories: &[Category],
    ) -> Result<RunStats, SitedorkError> {
        if !is_valid_domain(domain) {
            return Err(SitedorkError::InvalidDomain(domain.to_string()));
        }

        let start_time = Instant::now();
        let mut reports = Vec::new();

        for source in &self.sources {
            for &category in categories {
                let Some(dork) = source.dork(category) else {
                    warn!("{} has no dork for [{}]", source.name(), category);
                    continue;
                };

                info!("Executing to {} [{}]", source.name(), category);
                match self.search_category(source.as_ref(), dork, domain, limit).await {
                    Ok(report) => {
                        info!(
                            "{} [{}]: wrote {} entries to {}",
                            report.engine,
                            report.category,
                            report.written,
                            report.output.display()
                        );
                        reports.push(report);
                    }
                    Err(e) => error!("{} [{}] failed: {}", source.name(), category, e),
                }
            }
        }

        Ok(RunStats {
            reports,
            duration: start_time.elapsed(),
        })
    }

    /// Page through one dork query and write what it finds.
    pub async fn search_category(
        &self,
        source: &dyn Source,
        dork: DorkQuery,
        domain: &str,
        limit: usize,
    ) -> Result<CategoryReport, SitedorkError> {
        let query = dork.build(domain);
        let encoded = urlencoding::encode(&query);
        let plan = page_plan(limit, source.per_page_max());
        let resolver = RedirectResolver::new(source.per_page_max());
        let mut search = SearchSession::new(limit);
        let progress = self.progress_bar(plan.pages as u64);

        debug!("{} query {:?}: {} page(s) of {}", source.name(), query, plan.pages, plan.per_page);

        for page in 0..plan.pages {
            let url = source.page_url(plan.offset(page), plan.per_page, &encoded);
            let body = match self.session.get_text(&url, source.accept_language()).await {
                Ok(body) => body,
                Err(e) => {
                    error!("{} page {} failed: {}", source.name(), page + 1, e);
                    continue;
                }
            };
            search.record_page();

            let (count, batch) = parse_page(source, &body);
            if search.reported_total().is_none() {
                match count {
                    Some(total) => {
                        info!("{} reports about {} results for {:?}", source.name(), total, query);
                        search.record_total(total);
                        if total == 0 {
                            break;
                        }
                    }
                    None => {
                        warn!("{}", SitedorkError::ResultCountError(source.name().to_string()));
                        break;
                    }
                }
            }

            progress.set_position(page as u64 + 1);
            self.pause(source).await;

            let batch = if source.resolves_redirects() {
                resolver.resolve_batch(&self.session, batch).await
            } else {
                batch
            };
            search.push_batch(batch);

            if search.is_full() {
                break;
            }
        }
        progress.finish_and_clear();

        let output = self.writer.path_for(source.prefix(), dork.category);
        let pages_fetched = search.pages_fetched();
        let reported_total = search.reported_total();
        let items = search.into_items();
        let written = if is_subdomain_query(&query) {
            self.writer.write_subdomains(&output, &items)?
        } else {
            self.writer.write_items(&output, &items)?
        };

        Ok(CategoryReport {
            engine: source.name().to_string(),
            category: dork.category,
            pages_fetched,
            reported_total,
            written,
            output,
        })
    }

    fn progress_bar(&self, pages: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(pages);
        progress.set_style(
            ProgressStyle::with_template("|{bar:50.green}| {percent}% ({pos}/{len} pages)")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars(">> "),
        );
        progress
    }

    async fn pause(&self, source: &dyn Source) {
        let range = source.delay_secs();
        if range.is_empty() {
            return;
        }
        let secs = rand::thread_rng().gen_range(range);
        if secs > 0 {
            debug!("{}: sleeping {}s", source.name(), secs);
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
    }
}

/// Read the reported total and the result items off a page. The parsed
/// document does not outlive this call.
fn parse_page(source: &dyn Source, body: &str) -> (Option<u64>, Vec<SearchItem>) {
    let document = Html::parse_document(body);
    (source.result_count(&document), source.extract(&document))
}
