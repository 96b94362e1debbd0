//! Magazine search CLI - load Java Magazine articles and query them.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use magazine_search::fetcher_http::HttpFetcher;
use magazine_search::loader::{load_articles, DEFAULT_PAGE_COUNT};
use magazine_search::menu::Menu;
use magazine_search::reader::{MagazineReader, DEFAULT_BASE_URL};
use magazine_search::{ArticleRepository, ClientConfig, ElasticClient};

/// Magazine search - Java Magazine articles in Elasticsearch
#[derive(Parser)]
#[command(name = "magazine-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Cluster nodes (comma-separated host:port)
    #[arg(long, global = true, default_value = "localhost:9200")]
    hosts: String,

    /// Expected cluster name
    #[arg(long, global = true)]
    cluster_name: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Rebuild the index from the website
    Load(LoadArgs),

    /// Show the cluster status
    Status,
}

#[derive(Parser)]
struct LoadArgs {
    /// Number of listing pages to read
    #[arg(short, long, default_value_t = DEFAULT_PAGE_COUNT)]
    pages: u32,

    /// Listing URL, paged with ?page=N
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = ClientConfig::from_hosts(&cli.hosts)?;
    if let Some(cluster_name) = &cli.cluster_name {
        config = config.with_cluster_name(cluster_name);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    let client = ElasticClient::new(config)?;
    let repository = ArticleRepository::new(Arc::new(client));

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => run_menu(&repository).await,
        Commands::Load(args) => run_load(&repository, args).await,
        Commands::Status => {
            let status = repository.status().await?;
            println!("{}", status);
            Ok(())
        }
    }
}

async fn run_menu(repository: &ArticleRepository) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(repository, stdin.lock(), stdout.lock());
    menu.run().await?;
    Ok(())
}

async fn run_load(repository: &ArticleRepository, args: LoadArgs) -> Result<()> {
    if args.pages == 0 {
        anyhow::bail!("At least one page must be loaded");
    }

    let fetcher = HttpFetcher::new()?;
    let reader = MagazineReader::with_base_url(Arc::new(fetcher), &args.base_url)?;
    let summary = load_articles(&reader, repository, 1..=args.pages).await?;

    println!(
        "Loaded {} articles from {} pages into {}",
        summary.articles, summary.pages, summary.index
    );
    Ok(())
}
