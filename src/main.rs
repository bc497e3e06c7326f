mod checker;
mod config;
mod error;
mod fetcher;
mod keywords;
mod models;
mod parser;
mod report;
mod resolver;
mod scanner;
mod session;
mod transport;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::checker::RankChecker;
use crate::config::Config;
use crate::keywords::KeywordExtractor;
use crate::models::RankReport;
use crate::session::{Command, Session};
use crate::transport::{ApiTransport, HtmlTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportKind {
    /// JSON card and search endpoints
    Api,
    /// Server-rendered product and search pages
    Html,
}

#[derive(Debug, Parser)]
#[command(name = "wb_rank", version)]
#[command(about = "Check where a Wildberries product ranks for keywords taken from its own title")]
struct Cli {
    /// Product link (…/catalog/<id>/detail.aspx) or bare article number. Omit for interactive mode.
    url: Option<String>,

    /// How many search result pages to scan per keyword
    #[arg(short = 'm', long)]
    max_pages: Option<u32>,

    /// How many keywords to take from the title
    #[arg(short = 'k', long)]
    max_keywords: Option<usize>,

    /// Locale whose tokenizer and stopwords are applied to the title
    #[arg(long)]
    locale: Option<String>,

    /// Where search results and product titles are read from
    #[arg(long, value_enum, default_value = "api")]
    transport: TransportKind,

    /// Stop starting new keyword scans after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(long, env = "WB_RANK_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

struct App {
    config: Config,
    extractor: KeywordExtractor,
    transport: Box<dyn Transport>,
    json: bool,
}

trait Transport: resolver::ProductResolver + scanner::PageFetcher {}
impl<T: resolver::ProductResolver + scanner::PageFetcher> Transport for T {}

impl App {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(m) = cli.max_pages {
            config.search.max_pages = m;
        }
        if let Some(k) = cli.max_keywords {
            config.search.max_keywords = k;
        }
        if let Some(locale) = &cli.locale {
            config.search.locale = locale.clone();
        }
        if cli.deadline_secs.is_some() {
            config.search.deadline_secs = cli.deadline_secs;
        }

        let locale = config.search.locale.clone();
        let rules = config.locale_rules(&locale)?;
        let extractor = KeywordExtractor::new(&locale, &rules)?;

        let transport: Box<dyn Transport> = match cli.transport {
            TransportKind::Api => Box::new(ApiTransport::new(&config.http)?),
            TransportKind::Html => Box::new(HtmlTransport::new(&config.http)?),
        };

        Ok(Self {
            config,
            extractor,
            transport,
            json: cli.json,
        })
    }

    fn check(&self, url: &str, max_pages: u32) -> Result<RankReport> {
        let transport = self.transport.as_ref();
        let report = RankChecker::new(transport, transport, &self.extractor)
            .with_max_keywords(self.config.search.max_keywords)
            .with_deadline(self.config.search.deadline_secs.map(Duration::from_secs))
            .check(url, max_pages)?;
        Ok(report)
    }

    fn render(&self, report: &RankReport) -> Result<String> {
        if self.json {
            report::render_json(report)
        } else {
            Ok(report::render_text(report))
        }
    }

    fn run_once(&self, url: &str) -> Result<()> {
        let report = self.check(url, self.config.search.max_pages).map_err(|e| {
            error!(error = %e, "check failed");
            e
        })?;
        println!("{}", self.render(&report)?);
        Ok(())
    }

    fn run_interactive(&self) -> Result<()> {
        let mut session = Session::new(self.config.search.max_pages);
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        println!("{}", session::USAGE);

        for line in stdin.lock().lines() {
            let line = line.context("reading input")?;
            match session.handle(&line) {
                Command::Start => println!("{}", session::USAGE),
                Command::SetMaxPages(n) => println!("Default page count set to {n}"),
                Command::Reply(text) => println!("{text}"),
                Command::Check { url, max_pages } => {
                    println!("Searching product positions (max pages: {max_pages})...");
                    stdout.flush()?;
                    match self.check(&url, max_pages).and_then(|r| self.render(&r)) {
                        Ok(text) => println!("{text}"),
                        Err(e) => {
                            error!(error = %e, %url, "check failed");
                            println!("Error: {e}");
                        }
                    }
                }
            }
            stdout.flush()?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("wb_rank=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app = App::from_cli(&cli)?;
    match &cli.url {
        Some(url) => app.run_once(url),
        None => app.run_interactive(),
    }
}
