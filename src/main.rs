//! DevOps demo service entry point.

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

use devops_demo::api::{create_router, AppState};
use devops_demo::config::{Config, LogFormat};
use devops_demo::error::DemoError;
use devops_demo::metrics;
use devops_demo::utils::shutdown_signal;

/// DevOps demo HTTP service.
#[derive(Parser, Debug)]
#[command(name = "devops-demo")]
#[command(about = "Minimal JSON service with health and readiness probes")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load().map_err(DemoError::from)?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // Initialize logging
    init_tracing(&config, args.verbose);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(DemoError::InvalidConfig(e).into());
    }

    // Initialize metrics; descriptions only stick once a recorder is installed
    if let Some(addr) = config.metrics_addr() {
        metrics::install_exporter(addr).map_err(DemoError::from)?;
    }
    metrics::init_metrics();

    println!("🚀 Starting DevOps Demo Server v{}", config.app_version);
    println!("📡 Listening on port {}", config.port);

    info!(
        version = %config.app_version,
        environment = %config.environment,
        port = config.port,
        "Configuration loaded"
    );

    let addr = config.bind_addr();
    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(DemoError::from)
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// Priority: `--verbose` > `RUST_LOG` > `info`.
fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("devops_demo=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.log_format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Text => fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
}
