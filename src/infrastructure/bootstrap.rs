//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::candidate::{EventCandidateSource, WatchTarget};
use crate::adapter::outbound::codex::CodexClient;
use crate::adapter::outbound::store::JsonSubscriberStore;
use crate::application::monitor::MonitorRegistry;
use crate::application::probe::VerificationProbe;
use crate::application::query::TraderQuery;
use crate::domain::PairId;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::candidate::CandidateSource;
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::sink::{AlertSink, LogSink, SinkRegistry};

/// Provider-facing services shared by every command.
pub struct Services {
    pub client: Arc<CodexClient>,
    pub clock: Arc<dyn Clock>,
    pub candidates: Arc<dyn CandidateSource>,
}

/// Build the provider client and candidate source.
///
/// # Errors
///
/// [`ConfigError::MissingField`] when the API key variable is unset.
pub fn build_services(config: &Config) -> Result<Services> {
    let api_key = config
        .provider
        .api_key()
        .ok_or(ConfigError::MissingField { field: "api_key" })?;

    let client = Arc::new(CodexClient::from_config(&config.provider, api_key));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let candidates: Arc<dyn CandidateSource> = Arc::new(EventCandidateSource::new(
        client.clone(),
        clock.clone(),
        watch_targets(config),
        config.monitor.lookback_secs,
        config.monitor.time_bucket_secs,
    ));

    info!(
        api_url = %config.provider.api_url,
        pairs = config.watch.len(),
        "Provider services ready"
    );

    Ok(Services {
        client,
        clock,
        candidates,
    })
}

/// Watch targets in configuration order.
#[must_use]
pub fn watch_targets(config: &Config) -> Vec<WatchTarget> {
    config
        .watch
        .iter()
        .map(|w| WatchTarget {
            pair_id: PairId::new(w.pair_id.clone()),
            network_id: w.network_id,
            label: w.label.clone(),
            detail_url: w.detail_url.clone(),
        })
        .collect()
}

/// Log sink plus any extra sinks, fanned out.
#[must_use]
pub fn build_sink(extra: Vec<Box<dyn AlertSink>>) -> Arc<dyn AlertSink> {
    let mut registry = SinkRegistry::new();
    registry.register(Box::new(LogSink));
    for sink in extra {
        registry.register(sink);
    }
    Arc::new(registry)
}

#[must_use]
pub fn build_registry(
    config: &Config,
    services: &Services,
    sink: Arc<dyn AlertSink>,
) -> MonitorRegistry {
    MonitorRegistry::new(
        services.candidates.clone(),
        sink,
        services.clock.clone(),
        config.monitor.settings(),
    )
}

#[must_use]
pub fn build_probe(services: &Services) -> VerificationProbe {
    VerificationProbe::new(services.candidates.clone(), services.clock.clone())
}

#[must_use]
pub fn build_query(services: &Services) -> TraderQuery {
    TraderQuery::new(
        services.client.clone(),
        services.client.clone(),
        services.clock.clone(),
    )
}

#[must_use]
pub fn build_store(config: &Config) -> JsonSubscriberStore {
    JsonSubscriberStore::new(config.state.path.clone())
}
