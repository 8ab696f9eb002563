use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use fulltime_scraper::config::{Config, Overrides};
use fulltime_scraper::constants::CONFIG_PATH_ENV;
use fulltime_scraper::infra::http_client::HttpFetcher;
use fulltime_scraper::logging;
use fulltime_scraper::pipeline;
use fulltime_scraper::types::ListingKind;

#[derive(Parser)]
#[command(name = "fulltime_scraper")]
#[command(about = "Converts FA Full-Time fixture and result listings into JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the configured listing pages and write the JSON artifacts (default)
    Run(RunArgs),
    /// Extract records from a saved HTML page and print them as JSON
    Parse {
        /// Which listing the page contains
        #[arg(value_enum)]
        kind: KindArg,
        /// Path to the saved HTML page
        file: PathBuf,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Fixtures page URL (overrides FA_FIXTURES_URL)
    #[arg(long)]
    fixtures_url: Option<String>,
    /// Results page URL (overrides FA_RESULTS_URL)
    #[arg(long)]
    results_url: Option<String>,
    /// Where to write the fixtures JSON
    #[arg(long)]
    fixtures_out: Option<PathBuf>,
    /// Where to write the results JSON
    #[arg(long)]
    results_out: Option<PathBuf>,
    /// HTTP timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// TOML configuration file (overrides FA_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl RunArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            fixtures_url: self.fixtures_url.clone(),
            results_url: self.results_url.clone(),
            fixtures_path: self.fixtures_out.clone(),
            results_path: self.results_out.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Fixtures,
    Results,
}

impl From<KindArg> for ListingKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Fixtures => ListingKind::Fixtures,
            KindArg::Results => ListingKind::Results,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run(args),
        Commands::Parse { kind, file } => parse(kind.into(), file),
    }
}

fn run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let config_path = args.config.clone().or_else(|| {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    });
    let config = Config::load(config_path.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.overrides());

    let _guard = logging::init_logging(config.log_dir.as_deref());
    info!(
        fixtures = config.fixtures_url.is_some(),
        results = config.results_url.is_some(),
        "Starting run"
    );

    let fetcher = HttpFetcher::from_config(&config).context("Failed to build HTTP client")?;
    let summary = pipeline::run(&config, &fetcher);

    if summary.failures() > 0 {
        error!(failures = summary.failures(), "Run finished with failures");
        for outcome in &summary.outcomes {
            if let Err(e) = &outcome.result {
                eprintln!("{} failed: {}", outcome.kind, e);
            }
        }
    }
    Ok(ExitCode::from(summary.exit_code()))
}

fn parse(kind: ListingKind, file: PathBuf) -> anyhow::Result<ExitCode> {
    let _guard = logging::init_logging(None);
    let html = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let json = pipeline::render(kind, &html)?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}
