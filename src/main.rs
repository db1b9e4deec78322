//! pseudolink - a pseudoserver for InspIRCd spanning-tree networks.
//!
//! Links to one remote server, bursts a single bot user into a fixed set of
//! channels and answers PING and addressed PRIVMSGs until the link ends.

mod config;
mod error;
mod handlers;
mod services;
mod sync;
mod telemetry;

use crate::config::LinkSettings;
use crate::sync::{Link, LinkStream};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("PSEUDOLINK_LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pseudolink.toml".to_string());

    let settings = LinkSettings::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&settings) {
        for e in &errors {
            error!(path = %config_path, "{}", e);
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s). See messages above.",
            errors.len()
        ));
    }

    if settings.tls && !settings.verify_cert {
        warn!("INSECURE: TLS certificate verification is disabled for this link");
    }
    if settings.raw_allow.is_empty() {
        warn!("Raw passthrough is open to every sender; set raw_allow to restrict it");
    }

    info!(
        server = %settings.server_name,
        sid = %settings.sid,
        nick = %settings.nick,
        remote = %settings.remote,
        "Starting pseudolink"
    );

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl-C, shutting down");
                    shutdown.cancel();
                }
                Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });
    }

    let stream = LinkStream::connect(&settings).await?;
    info!(tls = stream.is_tls(), "Link established");

    Link::new(stream, settings).run(shutdown).await?;

    info!("Shutdown complete");
    Ok(())
}
