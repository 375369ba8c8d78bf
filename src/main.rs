//! PushSub emulator binary.

use clap::Parser;
use pushsub::broker::Registry;
use pushsub::config::load_config;
use pushsub::dispatch::Dispatcher;
use pushsub::transport::{AppState, serve};
use pushsub::utils::logging;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "pushsub", about = "In-memory push pub/sub emulator")]
struct Cli {
    /// Interface to bind, overrides `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides `server.port`
    #[arg(long)]
    port: Option<u16>,

    /// Log level, overrides `log.level`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        // no-op when logging is already up
        logging::init("error");
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let mut config = load_config()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    logging::init(&config.log.level);

    let dispatcher = Dispatcher::new(config.delivery.timeout())?;
    let state = AppState::new(Registry::new(), dispatcher);

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, timeout_ms = config.delivery.timeout_ms, "pushsub listening");
    info!("point client libraries at it with PUBSUB_EMULATOR_HOST={addr}");

    serve(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received. Exiting gracefully.");
    })
    .await?;

    Ok(())
}
