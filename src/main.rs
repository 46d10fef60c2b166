use anyhow::Context;
use clusterlens::filter::{IndexFilter, NodeFilter};
use clusterlens::observability::init_logging;
use clusterlens::paging::Paginator;
use clusterlens::store::{MemoryStore, Preferences};
use clusterlens::{Cluster, Config, FileSource, Poller};
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command line arguments structure
struct CliArgs {
    config_path: Option<String>,
    docs_dir: Option<String>,
    once: bool,
    show_help: bool,
    show_version: bool,
}

fn print_help() {
    println!("clusterlens v{} - cluster snapshot and change monitor", VERSION);
    println!();
    println!("USAGE:");
    println!("    clusterlens [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>    Path to configuration file (TOML format)");
    println!("    -d, --docs <DIR>       Directory holding state/status/stats/settings/aliases/health .json");
    println!("        --once             Build a single snapshot, print a summary and exit");
    println!("    -h, --help             Print help information");
    println!("    -v, --version          Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    clusterlens --docs ./dump --once");
    println!("    clusterlens -c clusterlens.toml");
    println!();
    println!("CONFIGURATION FILE:");
    println!("    [poller]");
    println!("    refresh_interval_ms = 3000");
    println!();
    println!("    [paging]");
    println!("    page_size = 10");
    println!();
    println!("    [logging]");
    println!("    level = \"info\"       # trace, debug, info, warn, error");
    println!("    format = \"text\"      # or \"json\"");
    println!();
    println!("    [source]");
    println!("    docs_dir = \"./docs\"");
}

fn print_version() {
    println!("clusterlens {}", VERSION);
}

/// Parse command line arguments
fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        docs_dir: None,
        once: false,
        show_help: false,
        show_version: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                cli.show_help = true;
                return cli;
            }
            "-v" | "--version" => {
                cli.show_version = true;
                return cli;
            }
            "--once" => cli.once = true,
            "-c" | "--config" | "-d" | "--docs" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires a path argument", args[i]);
                    std::process::exit(1);
                };
                if matches!(args[i].as_str(), "-c" | "--config") {
                    cli.config_path = Some(value.clone());
                } else {
                    cli.docs_dir = Some(value.clone());
                }
                i += 1;
            }
            arg => {
                eprintln!("Error: Unknown option '{}'. Use --help for usage.", arg);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Load configuration from file and merge with CLI arguments
fn load_config(cli: &CliArgs) -> anyhow::Result<Config> {
    let mut config = match cli.config_path {
        Some(ref path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => Config::default(),
    };
    if let Some(ref dir) = cli.docs_dir {
        config.source.docs_dir = PathBuf::from(dir);
    }
    Ok(config)
}

fn print_summary(cluster: &Cluster, page_size: usize) {
    println!(
        "{}: {} nodes, {} indices ({} special), {} docs, {}",
        cluster.name,
        cluster.number_of_nodes,
        cluster.total_indices,
        cluster.special_indices,
        cluster.num_docs,
        cluster.total_size
    );
    println!(
        "shards: {} total, {} successful, {} failed, {} unassigned",
        cluster.shards, cluster.successful_shards, cluster.failed_shards, cluster.unassigned_shards
    );

    let mut nodes = Paginator::new(1, page_size, cluster.nodes.clone(), NodeFilter::default());
    let page = nodes.get_page();
    println!();
    println!("NODES ({}-{} of {})", page.first, page.last, page.total);
    for node in page.items() {
        let marker = if node.current_master { "*" } else { " " };
        println!(
            "{} {:<24} heap {:>3}%  disk {:>3}%  {}",
            marker, node.label(), node.heap_used_percent, node.disk_used_percent, node.size
        );
    }

    let mut indices = Paginator::new(1, page_size, cluster.indices.clone(), IndexFilter::default());
    let page = indices.get_page();
    println!();
    println!("INDICES ({}-{} of {})", page.first, page.last, page.total);
    for index in page.items() {
        println!(
            "  {:<24} {:<5} {:>10} docs  {:>10}  {}",
            index.name,
            index.state.to_string(),
            index.num_docs,
            index.size,
            index.visible_aliases().join(",")
        );
    }
}

async fn run(cli: CliArgs) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let log_config = config.logging.to_log_config()?;
    init_logging(&log_config)?;

    let preferences = Preferences::new(MemoryStore::new(), config.poller.refresh_interval());
    preferences.add_to_history(&config.source.docs_dir.display().to_string());

    let source = FileSource::new(config.source.docs_dir.clone());
    let poller = Poller::new(source);

    if cli.once {
        let cluster = poller
            .poll_once()
            .await
            .with_context(|| format!("Failed to build snapshot from '{}'", config.source.docs_dir.display()))?;
        print_summary(&cluster, config.paging.page_size);
        if let Some(health) = poller.refresh_health().await {
            println!();
            println!("health: {} at {}", health.status, health.fetched_at);
        }
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, stopping");
            let _ = shutdown_tx.send(true);
        }
    });

    info!("Watching documents in {}", config.source.docs_dir.display());
    poller.run(preferences.refresh_interval(), shutdown_rx).await;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = parse_args();

    if cli.show_help {
        print_help();
        return;
    }
    if cli.show_version {
        print_version();
        return;
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
