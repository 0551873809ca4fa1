//! Codex GraphQL client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::dto::{
    classify_errors, EventVariables, EventsData, GraphqlRequest, GraphqlResponse, TokenVariables,
    TokensData, FILTER_TOKENS, GET_TOKEN_EVENTS,
};
use super::settings::CodexConfig;
use crate::domain::TokenInfo;
use crate::error::FetchError;
use crate::port::outbound::events::{EventPage, EventQuery, EventSource, TokenDirectory};

/// HTTP client for the Codex GraphQL API.
///
/// One instance is shared by every caller; `reqwest` pools connections
/// internally.
pub struct CodexClient {
    http: HttpClient,
    api_url: String,
    api_key: String,
}

impl CodexClient {
    /// Create a client with default HTTP settings.
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &CodexConfig, api_key: String) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            api_url: config.api_url.clone(),
            api_key,
        }
    }

    async fn gql<V, T>(&self, query: &str, variables: V) -> Result<T, FetchError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Auth(
                "Codex API key is invalid or expired".into(),
            ));
        }
        let response = response.error_for_status()?;

        let body: GraphqlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            return Err(classify_errors(&body.errors));
        }
        body.data
            .ok_or_else(|| FetchError::Protocol("response carried no data".into()))
    }
}

#[async_trait]
impl EventSource for CodexClient {
    async fn request(
        &self,
        query: &EventQuery,
        limit: usize,
        cursor: Option<&str>,
    ) -> Result<EventPage, FetchError> {
        let variables = EventVariables {
            pair_address: query.pair_id.as_str(),
            network_id: query.network_id,
            from: query.from_ts,
            to: query.to_ts,
            min_usd: query.min_usd.and_then(|m| m.to_f64()),
            side: query.side.and_then(|s| s.as_query_literal()),
            limit,
            cursor,
        };

        let data: EventsData = self.gql(GET_TOKEN_EVENTS, variables).await?;
        let page = data
            .get_token_events
            .ok_or_else(|| FetchError::Protocol("getTokenEvents returned null".into()))?
            .into_page()?;

        debug!(
            pair = %query.pair_id,
            nodes = page.nodes.len(),
            has_next_page = page.page_info.has_next_page,
            "Fetched event page"
        );
        Ok(page)
    }
}

#[async_trait]
impl TokenDirectory for CodexClient {
    async fn find_token(&self, phrase: &str, network_id: u64) -> Result<TokenInfo, FetchError> {
        let data: TokensData = self
            .gql(FILTER_TOKENS, TokenVariables { phrase, network_id })
            .await?;

        data.filter_tokens
            .and_then(|c| c.nodes.into_iter().next())
            .map(TokenInfo::from)
            .ok_or_else(|| {
                FetchError::NotFound(format!("no token matches '{phrase}' on network {network_id}"))
            })
    }
}
