//! # blogsync CLI Application
//!
//! Command-line front end for the incremental article mirror.
//!
//! ## Subcommands
//!
//! - `sync`: run one sync against the author listing
//! - `watch`: run a sync, sleep for the interval, repeat
//! - `list`: print the articles recorded in the index
//! - `render`: regenerate the README table from the index
//!
//! Progress and the run summary go to stdout, logs go to stderr and
//! optionally to a log file.

mod telemetry;

use anyhow::Context;
use blogsync::http::HttpFetcher;
use blogsync::index::readme::update_readme;
use blogsync::ingest::{IngestConfig, Ingestor, RunReport, load_index};
use blogsync::listing::{ListingConfig, ListingSelectors};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, instrument};
use url::Url;

#[derive(Parser)]
#[command(author, version, about = "Mirror a blog author's articles into local markdown", long_about = None)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the listing once and ingest new articles
    Sync(SyncArgs),

    /// Sync repeatedly on a fixed interval
    Watch(WatchArgs),

    /// List the articles recorded in the index
    List(ListArgs),

    /// Regenerate the README table from the index
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
struct SyncArgs {
    /// Author listing page
    #[arg(long, default_value = "https://blog.min.io/author/david-cannan")]
    listing_url: String,

    /// Origin for relative links (defaults to the listing URL's origin)
    #[arg(long)]
    site_origin: Option<String>,

    /// Author name recorded for every article
    #[arg(short, long, default_value = "David Cannan")]
    author: String,

    /// Index file
    #[arg(short, long, default_value = "articles.md")]
    index: PathBuf,

    /// Directory for article documents
    #[arg(short = 'o', long, default_value = "articles")]
    articles_dir: PathBuf,

    /// README whose marker region mirrors the index
    #[arg(short, long)]
    readme: Option<PathBuf>,

    /// CSS selector of the article cards on the listing page
    #[arg(long, default_value = "article.post-card")]
    card_selector: String,

    /// CSS selector of the body on an article page
    #[arg(short, long, default_value = "article")]
    content_selector: String,

    /// Download header images
    #[arg(long)]
    images: bool,

    /// Keep share/follow boilerplate in article bodies
    #[arg(long)]
    no_clean: bool,

    /// Delay between article fetches in milliseconds
    #[arg(long, default_value = "0")]
    delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Deadline for the whole run in seconds
    #[arg(long)]
    deadline: Option<u64>,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[command(flatten)]
    sync: SyncArgs,

    /// Seconds between runs
    #[arg(long, default_value = "86400")]
    interval: u64,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Index file
    #[arg(short, long, default_value = "articles.md")]
    index: PathBuf,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Index file
    #[arg(short, long, default_value = "articles.md")]
    index: PathBuf,

    /// README to update
    #[arg(short, long, default_value = "README.md")]
    readme: PathBuf,

    /// Heading used if the README has to be created
    #[arg(long, default_value = "Publications")]
    heading: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let _telemetry = telemetry::init_tracing_subscriber(cli.log_file.as_deref())?;

    match cli.command {
        Some(Commands::Sync(args)) => {
            sync_command(args).await?;
        }
        Some(Commands::Watch(args)) => {
            watch_command(args).await?;
        }
        Some(Commands::List(args)) => {
            list_command(args).await?;
        }
        Some(Commands::Render(args)) => {
            render_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["blogsync", "--help"]);
        }
    }

    Ok(())
}

fn build_ingestor(args: &SyncArgs) -> anyhow::Result<Ingestor<HttpFetcher>> {
    let site_origin = match &args.site_origin {
        Some(origin) => origin.clone(),
        None => Url::parse(&args.listing_url)
            .with_context(|| format!("invalid listing URL {}", args.listing_url))?
            .origin()
            .ascii_serialization(),
    };

    let listing = ListingConfig::builder()
        .listing_url(args.listing_url.clone())
        .site_origin(site_origin)
        .author(args.author.clone())
        .selectors(ListingSelectors {
            card: args.card_selector.clone(),
            ..Default::default()
        })
        .build();

    let config = IngestConfig::builder()
        .index_path(args.index.clone())
        .articles_dir(args.articles_dir.clone())
        .readme_path(args.readme.clone())
        .readme_heading(format!("{}'s Publications", args.author))
        .content_selector(args.content_selector.clone())
        .clean_content(!args.no_clean)
        .download_images(args.images)
        .request_delay_ms(args.delay)
        .run_deadline(args.deadline.map(Duration::from_secs))
        .build();

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(args.timeout))?;
    Ok(Ingestor::new(fetcher, listing, config)?)
}

fn print_report(report: &RunReport, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        _ => {
            println!("{}", report);
            for written in &report.written {
                println!("  + {} -> {}", written.title, written.path.display());
            }
            for skipped in &report.skipped {
                println!("  - {}: {}", skipped.title, skipped.reason);
            }
            if let Some(readme_error) = &report.readme_error {
                println!("  ! README not updated: {}", readme_error);
            }
        }
    }
    Ok(())
}

#[instrument]
async fn sync_command(args: SyncArgs) -> anyhow::Result<()> {
    let ingestor = build_ingestor(&args)?;

    println!("Running update job at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    let report = ingestor.run().await?;
    print_report(&report, &args.format)?;

    Ok(())
}

#[instrument]
async fn watch_command(args: WatchArgs) -> anyhow::Result<()> {
    let ingestor = build_ingestor(&args.sync)?;
    let interval = Duration::from_secs(args.interval);

    loop {
        println!("Running update job at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
        match ingestor.run().await {
            Ok(report) => print_report(&report, &args.sync.format)?,
            Err(e) => error!("Update job failed: {}", e),
        }

        println!("Next update in {} seconds", interval.as_secs());
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch loop");
                return Ok(());
            }
        }
    }
}

#[instrument]
async fn list_command(args: ListArgs) -> anyhow::Result<()> {
    let index = load_index(&args.index).await?;

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(index.records())?);
        }
        _ => {
            println!("Indexed articles: {}", index.len());
            for (i, record) in index.records().iter().enumerate() {
                println!("{}. {} ({})", i + 1, record.title, record.date);
                println!("   URL: {}", record.url);
            }
        }
    }

    Ok(())
}

#[instrument]
async fn render_command(args: RenderArgs) -> anyhow::Result<()> {
    let index = load_index(&args.index).await?;
    update_readme(&args.readme, &index, &[], &args.heading).await?;

    println!(
        "Rendered {} articles into {}",
        index.len(),
        args.readme.display()
    );
    Ok(())
}
