//! Term-Ripple main entry point
//!
//! This is the command-line interface for the Term-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use term_ripple::config::{load_settings_with_hash, validate, CrawlConfig, CrawlSettings};
use term_ripple::crawler::crawl;
use term_ripple::output::TopRanker;
use term_ripple::CrawlResult;
use tracing_subscriber::EnvFilter;

/// Term-Ripple: a breadth-first term-counting web crawler
///
/// Term-Ripple crawls outward from a seed page level by level, counts how often
/// each search term occurs on every page, and ranks the pages by total
/// occurrences.
///
/// Exit status: 0 when no pages were left, 1 when the depth limit stopped
/// the crawl, 2 when the visit limit did, -1 on any error.
#[derive(Parser, Debug)]
#[command(name = "term-ripple")]
#[command(version)]
#[command(about = "A breadth-first term-counting web crawler", long_about = None)]
struct Cli {
    /// URL the crawl starts from
    #[arg(short, long)]
    seed: Option<String>,

    /// Search terms (regular expressions), comma-separated
    #[arg(short, long, value_delimiter = ',')]
    terms: Vec<String>,

    /// Depth ceiling (1 visits only the seed, 0 means unbounded)
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    max_depth: Option<i64>,

    /// Maximum number of successfully fetched pages
    #[arg(short = 'v', long, allow_negative_numbers = true)]
    max_visited: Option<i64>,

    /// Time to wait for a response from the server, in milliseconds
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    timeout: Option<i64>,

    /// Wait for scripts scheduled to start within this window, in milliseconds
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    js_quiet_before: Option<i64>,

    /// Upper bound on waiting for background scripts, in milliseconds
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    js_max_wait: Option<i64>,

    /// Number of pages in the top table
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    top_count: Option<i64>,

    /// Path of the raw statistics table
    #[arg(short = 'f', long, value_name = "PATH")]
    raw_file: Option<String>,

    /// Path of the top-N table
    #[arg(long, value_name = "PATH")]
    top_file: Option<String>,

    /// Don't write a header line to the tables
    #[arg(long)]
    no_header: bool,

    /// Match terms case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Don't ask the fetcher to execute JavaScript
    #[arg(long = "static")]
    static_pages: bool,

    /// Path to a TOML configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (--verbose, --verbose --verbose, ...)
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration and show it without crawling
    #[arg(long, conflicts_with = "rank_only")]
    dry_run: bool,

    /// Skip crawling and rank an existing raw table
    #[arg(long, conflicts_with = "dry_run")]
    rank_only: bool,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported through the error path too
            let code = if e.use_stderr() {
                CrawlResult::ConstructionFailed.exit_code()
            } else {
                0
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            CrawlResult::ConstructionFailed.exit_code()
        }
    };

    std::process::exit(code);
}

/// Resolves the configuration and dispatches to the selected mode
async fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (settings, hash) = load_settings_with_hash(path)
                .with_context(|| format!("Can't load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            settings
        }
        None => CrawlSettings::default(),
    };
    apply_overrides(&mut settings, &cli);

    let config = validate(&settings).context("Can't construct the crawler")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(0);
    }

    if cli.rank_only {
        handle_rank_only(&config)?;
        return Ok(0);
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the ranked rows.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("term_ripple=info,warn"),
            1 => EnvFilter::new("term_ripple=debug,info"),
            2 => EnvFilter::new("term_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Layers command-line flags over the file (or default) settings
fn apply_overrides(settings: &mut CrawlSettings, cli: &Cli) {
    if let Some(seed) = &cli.seed {
        settings.crawl.seed = Some(seed.clone());
    }
    if !cli.terms.is_empty() {
        settings.crawl.terms = cli.terms.clone();
    }
    if cli.case_sensitive {
        settings.crawl.case_sensitive = true;
    }
    if let Some(max_depth) = cli.max_depth {
        settings.crawl.max_depth = max_depth;
    }
    if let Some(max_visited) = cli.max_visited {
        settings.crawl.max_visited = max_visited;
    }

    if let Some(timeout) = cli.timeout {
        settings.fetch.timeout_ms = timeout;
    }
    if let Some(quiet_before) = cli.js_quiet_before {
        settings.fetch.js_quiet_before_ms = quiet_before;
    }
    if let Some(max_wait) = cli.js_max_wait {
        settings.fetch.js_max_wait_ms = max_wait;
    }
    if cli.static_pages {
        settings.fetch.javascript = false;
    }

    if let Some(top_count) = cli.top_count {
        settings.output.top_count = top_count;
    }
    if let Some(raw_file) = &cli.raw_file {
        settings.output.raw_path = raw_file.clone();
    }
    if let Some(top_file) = &cli.top_file {
        settings.output.top_path = top_file.clone();
    }
    if cli.no_header {
        settings.output.header = false;
    }
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &CrawlConfig) {
    println!("=== Term-Ripple Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed: {}", config.seed());
    println!("  Terms ({}):", config.terms().len());
    for term in config.terms() {
        println!("    * {}", term);
    }
    println!(
        "  Matching: {}",
        if config.case_sensitive() {
            "case-sensitive"
        } else {
            "case-insensitive"
        }
    );
    println!("  Max depth: {}", config.max_depth());
    println!("  Max visited: {}", config.max_visited());

    println!("\nFetch:");
    println!("  Timeout: {}ms", config.fetch_timeout().as_millis());
    println!("  JavaScript: {}", config.javascript());
    println!(
        "  JavaScript quiet-before: {}ms",
        config.js_quiet_before().as_millis()
    );
    println!("  JavaScript max wait: {}ms", config.js_max_wait().as_millis());

    println!("\nOutput:");
    println!("  Raw table: {}", config.raw_path().display());
    println!("  Top table: {} (top {})", config.top_path().display(), config.top_count());
    println!("  Header: {}", config.header());

    println!("\nConfiguration is valid. Use without --dry-run to start crawling.");
}

/// Handles the --rank-only mode: re-ranks an existing raw table
fn handle_rank_only(config: &CrawlConfig) -> anyhow::Result<()> {
    tracing::info!("Ranking {}", config.raw_path().display());

    let stdout = std::io::stdout();
    let mut report = stdout.lock();
    TopRanker::from_config(config)
        .run(config.raw_path(), config.top_path(), &mut report)
        .context("Can't rank the raw table")?;

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig) -> anyhow::Result<i32> {
    match crawl(config).await {
        Ok(outcome) => {
            tracing::info!(
                "Crawl complete: {} (exit {})",
                outcome.result,
                outcome.result.exit_code()
            );
            Ok(outcome.result.exit_code())
        }
        Err(e) if e.is_construction() => Err(anyhow::Error::new(e).context("Can't construct the crawler")),
        Err(e) => Err(anyhow::Error::new(e).context("Crawl failed")),
    }
}
