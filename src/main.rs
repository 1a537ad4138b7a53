use herdbook::{hook::AlertCountsPoller, ApiClient, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("herdbook=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let client = match ApiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build API client: {}", e);
            std::process::exit(1);
        }
    };

    let Some(farm_id) = config.farm_id.as_deref() else {
        tracing::warn!("HERDBOOK_FARM_ID is not set, nothing to watch");
        return;
    };

    tracing::info!(
        "Watching alerts of farm {} on {} every {:?}",
        farm_id,
        config.api_url,
        config.poll_interval
    );

    let poller = AlertCountsPoller::alert_counts(client, Some(farm_id), config.poll_interval);
    let mut counts = poller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = counts.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(latest) = counts.borrow_and_update().as_ref() {
                    tracing::info!(
                        "Farm {}: {} unread of {} alert(s)",
                        farm_id,
                        latest.unread,
                        latest.summary.total
                    );
                }
            }
        }
    }

    tracing::info!("Shutting down");
    poller.shutdown().await;
}
