use chrono::Local;
use clap::Parser;
use knxcast_link::RoutingTransport;
use knxcast_tools::{broadcast, capture, Settings};
use std::net::SocketAddr;
use std::path::PathBuf;

/// One-shot commissioning tool: send the current time and date immediately,
/// ignoring the configured send times.
#[derive(Parser, Debug)]
#[command(name = "sendnow")]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "knxcast.json")]
    config: PathBuf,
    /// Send to a specific router address instead of the routing multicast group.
    #[arg(long)]
    router: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let settings = Settings::load(&args.config)?;
    if !settings.active {
        log::warn!("broadcasting disabled in configuration, nothing sent");
        return Ok(());
    }

    let link = match args.router {
        Some(router) => RoutingTransport::bind_to(settings.source_address, router).await?,
        None => RoutingTransport::bind(settings.source_address).await?,
    };

    let now = Local::now();
    let (time, date) = capture(&now);
    broadcast(&link, &settings, time, date).await?;
    println!("time and date broadcast sent");
    Ok(())
}
