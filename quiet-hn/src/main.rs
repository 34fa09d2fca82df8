use clap::Parser;
use quiet_hn::{logging, server, Cli};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_tracing();

    info!("Starting Quiet HN on port {}", cli.port);

    if let Err(e) = server::run(cli).await {
        error!("Quiet HN stopped with an error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
