//! Developer tasks for the landing harness.
//!
//! ```text
//! cargo run -p xtask -- serve --port 4173
//! cargo run -p xtask -- list --suite carousel
//! cargo run -p xtask -- check --suite theme --viewport mobile
//! cargo run -p xtask -- check --serve --json
//! ```

use anyhow::{Context, Result, bail};
use axum::{Router, response::Html, routing::get};
use clap::{Parser, Subcommand};
use landing_harness::{
    BrowserKind, HarnessConfig, ScenarioCase, Session, Suite, Summary, ViewportProfile, catalog,
};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LANDING_PAGE: &str = include_str!("../../landing-harness/fixtures/landing.html");

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Run and inspect landing page browser scenarios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the bundled landing page fixture until interrupted
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 4173)]
        port: u16,
    },

    /// List scenarios grouped by suite
    List {
        /// Only list this suite
        #[arg(short, long)]
        suite: Option<String>,
    },

    /// Run scenarios in a real browser
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// JSON configuration file (otherwise read from LANDING_* variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the page under test
    #[arg(long)]
    base_url: Option<String>,

    /// Serve the bundled fixture and test against it
    #[arg(long, conflicts_with = "base_url")]
    serve: bool,

    /// chromium, firefox or webkit
    #[arg(short, long)]
    browser: Option<String>,

    /// Only run these suites (repeatable)
    #[arg(short, long)]
    suite: Vec<String>,

    /// Only run scenarios bound to this viewport profile
    #[arg(short, long)]
    viewport: Option<String>,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    filter: Option<String>,

    /// Scenarios run concurrently
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Resolution and assertion budget in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => serve(port).await,
        Commands::List { suite } => list(suite.as_deref()),
        Commands::Check(args) => check(args).await,
    }
}

fn fixture_router() -> Router {
    Router::new().route("/", get(|| async { Html(LANDING_PAGE) }))
}

async fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Serving landing page fixture at http://{}/", addr);
    axum::serve(listener, fixture_router())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

fn list(suite: Option<&str>) -> Result<()> {
    let only = suite.map(str::parse::<Suite>).transpose()?;

    let mut grouped: BTreeMap<&'static str, Vec<ScenarioCase>> = BTreeMap::new();
    for case in catalog() {
        if only.is_some_and(|s| s != case.suite()) {
            continue;
        }
        grouped.entry(case.suite().name()).or_default().push(case);
    }

    for (suite, cases) in &grouped {
        println!("{} ({})", suite, cases.len());
        for case in cases {
            match case.viewport() {
                Some(profile) => println!("  {} [{}]", case.name(), profile),
                None => println!("  {}", case.name()),
            }
        }
    }
    Ok(())
}

async fn check(args: CheckArgs) -> Result<()> {
    let loaded = match &args.config {
        Some(path) => HarnessConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => HarnessConfig::from_env()?,
    };

    let server = if args.serve {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, fixture_router()).await {
                tracing::error!(error = %e, "Fixture server stopped");
            }
        });
        Some((format!("http://{}/", addr), handle))
    } else {
        None
    };

    let base_url = match (&server, &args.base_url) {
        (Some((url, _)), _) => url.clone(),
        (None, Some(url)) => url.clone(),
        (None, None) => loaded.base_url().to_string(),
    };
    let browser = match &args.browser {
        Some(name) => name.parse::<BrowserKind>()?,
        None => loaded.browser(),
    };

    let config = HarnessConfig::builder()
        .base_url(base_url)
        .browser(browser)
        .headless(loaded.headless() && !args.headed)
        .default_timeout(
            args.timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(loaded.default_timeout()),
        )
        .poll_interval(loaded.poll_interval())
        .jobs(args.jobs.unwrap_or(loaded.jobs()))
        .build()?;

    let cases = select(&args)?;
    if cases.is_empty() {
        bail!("No scenarios match the given filters");
    }

    info!(
        scenarios = cases.len(),
        browser = %config.browser(),
        base_url = %config.base_url(),
        "Running scenarios"
    );

    let session = Session::launch(&config)
        .await
        .context("Failed to launch browser (is Playwright installed?)")?;
    let summary = Summary::new(session.run_catalog(&cases).await);
    session.close().await?;

    if let Some((_, handle)) = server {
        handle.abort();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }

    if !summary.is_success() {
        bail!("{} of {} scenarios failed", summary.failed(), summary.total());
    }
    Ok(())
}

fn select(args: &CheckArgs) -> Result<Vec<ScenarioCase>> {
    let suites = args
        .suite
        .iter()
        .map(|s| s.parse::<Suite>())
        .collect::<landing_harness::Result<Vec<_>>>()?;
    let viewport = args
        .viewport
        .as_deref()
        .map(str::parse::<ViewportProfile>)
        .transpose()?;

    Ok(catalog()
        .into_iter()
        .filter(|case| suites.is_empty() || suites.contains(&case.suite()))
        .filter(|case| viewport.is_none() || case.viewport() == viewport)
        .filter(|case| {
            args.filter
                .as_deref()
                .is_none_or(|needle| case.name().contains(needle))
        })
        .collect())
}
