use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epg_service::{config::Config, seed, web::WebServer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "epg-service")]
#[command(version)]
#[command(about = "Electronic program guide service with fixture seeding and a REST/HTML front end")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Store file path (overrides config file)
    #[arg(short = 'd', long, value_name = "PATH")]
    database_path: Option<PathBuf>,

    /// Fixture directory (overrides config file)
    #[arg(short = 'f', long, value_name = "DIR")]
    fixtures_dir: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    let log_filter = if cli.log_level == "trace" {
        format!("epg_service={},tower_http=trace", cli.log_level)
    } else {
        format!("epg_service={}", cli.log_level)
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Starting EPG Service v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(path) = cli.database_path {
        config.database.path = path;
    }
    if let Some(dir) = cli.fixtures_dir {
        config.seed.fixtures_dir = dir;
    }

    info!("Using store: {}", config.database.path.display());

    let database = seed::bootstrap(&config).await?;
    if let Some(inserted) = seed::synthesize_on_startup(&database, &config).await? {
        info!("Startup synthesis inserted {} events", inserted);
    }

    let server = WebServer::new(config, database)?;
    info!(
        "EPG Service ready on http://{}:{}",
        server.host(),
        server.port()
    );
    server.serve().await
}
