use chrono::Local;
use clap::Parser;
use knxcast_core::{next_fire_delay, ScheduleDecision};
use knxcast_link::RoutingTransport;
use knxcast_tools::{broadcast, capture, Settings};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Daemon that broadcasts wall-clock time and date onto the KNX bus at the
/// configured daily send times.
#[derive(Parser, Debug)]
#[command(name = "knxcastd")]
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

    let link = match args.router {
        Some(router) => RoutingTransport::bind_to(settings.source_address, router).await?,
        None => RoutingTransport::bind(settings.source_address).await?,
    };
    log::info!(
        "broadcasting as {} from {}",
        link.source(),
        link.local_addr()?
    );

    loop {
        let now = Local::now();
        let (time, _) = capture(&now);
        match next_fire_delay(settings.active, &settings.send_times, time) {
            ScheduleDecision::Disabled => {
                log::warn!("broadcasting disabled in configuration, exiting");
                return Ok(());
            }
            ScheduleDecision::NoTargets => {
                log::warn!("no valid send times configured, exiting");
                return Ok(());
            }
            ScheduleDecision::FireIn(delay) => {
                log::info!("next broadcast in {} ms", delay.as_millis());
                tokio::time::sleep(delay).await;

                // One clock capture per fire; both payloads and the next
                // scheduling pass on the following loop iteration derive
                // from their own single capture.
                let fired = Local::now();
                let (time, date) = capture(&fired);
                if let Err(err) = broadcast(&link, &settings, time, date).await {
                    // The schedule keeps running; delivery is fire-and-forget.
                    log::error!("broadcast failed: {err}");
                }
            }
        }
    }
}
