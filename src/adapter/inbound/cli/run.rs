//! Handler for the `run` command.

use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::outbound::sink::ChannelSink;
use crate::application::monitor::MonitorRegistry;
use crate::domain::SubscriberId;
use crate::error::{ControlError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::control::MonitorControl;
use crate::port::outbound::store::SubscriberStore;

const DEFAULT_SUBSCRIBER: &str = "local";

/// Run monitors until Ctrl-C.
///
/// Alerts are printed to stdout as one JSON object per line. The subscriber
/// book is checkpointed once per poll interval and on exit.
pub async fn execute(config: &Config, args: &RunArgs) -> Result<()> {
    let services = bootstrap::build_services(config)?;
    let store = bootstrap::build_store(config);
    let (channel, mut alerts) = ChannelSink::new();
    let registry = bootstrap::build_registry(
        config,
        &services,
        bootstrap::build_sink(vec![Box::new(channel)]),
    );

    if !args.no_resume {
        registry.resume(&store.load()?);
    }

    let min_usd = args.min_usd.unwrap_or(config.monitor.default_min_usd);
    let mut requested: Vec<String> = args.subscribers.clone();
    if requested.is_empty() && registry.list().is_empty() {
        requested.push(DEFAULT_SUBSCRIBER.to_string());
    }
    for id in requested {
        start_or_keep(&registry, &SubscriberId::new(id), min_usd).await?;
    }
    store.save(&registry.export())?;

    let printer = tokio::spawn(async move {
        while let Some(alert) = alerts.recv().await {
            match serde_json::to_string(&alert) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "Failed to encode alert"),
            }
        }
    });

    let mut checkpoint =
        tokio::time::interval(Duration::from_secs(config.monitor.poll_interval_secs.max(1)));
    checkpoint.tick().await;

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Shutdown signal received");
                break;
            }
            _ = checkpoint.tick() => {
                if let Err(e) = store.save(&registry.export()) {
                    warn!(error = %e, "Failed to checkpoint subscribers");
                }
            }
        }
    }

    store.save(&registry.export())?;
    registry.shutdown_all().await;
    drop(registry);
    if let Err(e) = printer.await {
        warn!(error = %e, "Alert printer ended abnormally");
    }

    info!("tradewatch stopped");
    Ok(())
}

async fn start_or_keep(
    registry: &MonitorRegistry,
    subscriber: &SubscriberId,
    min_usd: rust_decimal::Decimal,
) -> Result<()> {
    match registry.start(subscriber, min_usd).await {
        Ok(()) => Ok(()),
        Err(ControlError::AlreadyRunning { .. }) => {
            info!(subscriber = %subscriber, "Subscriber already resumed, keeping its threshold");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
