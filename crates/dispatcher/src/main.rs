use std::time::Duration;

use wallpush_common::config::AppConfig;
use wallpush_dispatcher::dispatch::Dispatcher;
use wallpush_dispatcher::scheduler::Scheduler;
use wallpush_transport::FcmTransport;
use wallpush_transport::auth::TokenProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallpush_dispatcher=info,wallpush_transport=info".into()),
        )
        .json()
        .init();

    tracing::info!("WallPush dispatcher starting...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Construct the transport once and inject it — no ambient global setup
    let tokens = TokenProvider::from_key_file(&config.credentials_path)?;
    let transport = FcmTransport::new(&config.fcm_endpoint, &config.fcm_project_id, tokens);

    let dispatcher = Dispatcher::new(transport, &config.dispatch_topic);
    let scheduler = Scheduler::new(
        dispatcher,
        Duration::from_secs(config.dispatch_interval_secs),
    );

    tracing::info!(
        project_id = %config.fcm_project_id,
        topic = %config.dispatch_topic,
        interval_secs = config.dispatch_interval_secs,
        "Starting dispatch scheduler"
    );

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("WallPush dispatcher stopped.");
    Ok(())
}
