//! Codex GraphQL wire types.
//!
//! Example event node:
//! ```json
//! {"id":"0xabc-12","txHash":"0xabc","timestamp":1700000000,"side":"Buy",
//!  "maker":"0xW1","amountUsd":"1520.33","priceUsd":0.00000112}
//! ```
//!
//! Amounts arrive as numbers or strings depending on magnitude, so they are
//! read as raw JSON and parsed into decimals on conversion.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Side, TokenInfo, TradeEvent};
use crate::error::FetchError;
use crate::port::outbound::events::{EventPage, PageInfo};

pub const GET_TOKEN_EVENTS: &str = r"
query($pairAddress: String!, $networkId: Int!, $from: Int!, $to: Int!, $minUsd: Float, $side: EventSide, $limit: Int, $cursor: String) {
  getTokenEvents(
    limit: $limit
    cursor: $cursor
    query: {
      pairAddress: $pairAddress
      networkId: $networkId
      from: $from
      to: $to
      side: $side
      minUsd: $minUsd
      eventTypes: [SWAP]
    }
  ) {
    nodes { id txHash timestamp side maker amountUsd priceUsd }
    pageInfo { endCursor hasNextPage }
  }
}";

pub const FILTER_TOKENS: &str = r"
query($phrase: String!, $networkId: Int!) {
  filterTokens(
    phrase: $phrase
    filters: { networkIds: [$networkId], minVolume24: 10000, minLiquidityUsd: 5000 }
    rankings: [trendingScore24, volume24]
    limit: 1
  ) {
    nodes { id address networkId name symbol }
  }
}";

/// Request envelope.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphqlErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlErrorExtensions {
    pub code: Option<String>,
}

impl GraphqlError {
    fn is_auth(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|e| e.code.as_deref())
            .is_some_and(|c| c == "UNAUTHENTICATED" || c == "FORBIDDEN")
    }
}

/// Classify a non-empty GraphQL error list.
pub fn classify_errors(errors: &[GraphqlError]) -> FetchError {
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    if errors.iter().any(GraphqlError::is_auth) {
        FetchError::Auth(message)
    } else {
        FetchError::Protocol(message)
    }
}

// ---------------------------------------------------------------------------
// getTokenEvents
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventVariables<'a> {
    pub pair_address: &'a str,
    pub network_id: u64,
    pub from: i64,
    pub to: i64,
    pub min_usd: Option<f64>,
    pub side: Option<&'static str>,
    pub limit: usize,
    pub cursor: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsData {
    pub get_token_events: Option<EventConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConnection {
    #[serde(default)]
    pub nodes: Vec<EventNode>,
    pub page_info: PageInfoDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoDto {
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNode {
    pub id: String,
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub timestamp: i64,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub maker: Option<String>,
    #[serde(default)]
    pub amount_usd: Value,
    #[serde(default)]
    pub price_usd: Value,
}

impl EventNode {
    /// Convert to a domain event.
    ///
    /// # Errors
    ///
    /// [`FetchError::Protocol`] if an amount or price is not numeric.
    pub fn into_event(self) -> Result<TradeEvent, FetchError> {
        let amount_usd = parse_decimal(&self.amount_usd)
            .map_err(|raw| FetchError::Protocol(format!("event {}: bad amountUsd {raw}", self.id)))?;
        let price_usd = parse_decimal(&self.price_usd)
            .map_err(|raw| FetchError::Protocol(format!("event {}: bad priceUsd {raw}", self.id)))?;

        Ok(TradeEvent {
            tx_hash: self.tx_hash.unwrap_or_default(),
            timestamp: self.timestamp,
            side: self.side,
            maker_wallet: self.maker.unwrap_or_default(),
            amount_usd,
            price_usd,
            id: self.id,
        })
    }
}

impl EventConnection {
    /// Convert to a domain page, failing on the first malformed node.
    ///
    /// # Errors
    ///
    /// [`FetchError::Protocol`] on a malformed node.
    pub fn into_page(self) -> Result<EventPage, FetchError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(EventNode::into_event)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EventPage {
            nodes,
            page_info: PageInfo {
                end_cursor: self.page_info.end_cursor,
                has_next_page: self.page_info.has_next_page,
            },
        })
    }
}

/// `null`/absent → `None`; numbers and numeric strings → `Some`.
/// Anything else is returned as the offending raw text.
fn parse_decimal(value: &Value) -> Result<Option<Decimal>, String> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        other => return Err(other.to_string()),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| text)
}

// ---------------------------------------------------------------------------
// filterTokens
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenVariables<'a> {
    pub phrase: &'a str,
    pub network_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensData {
    pub filter_tokens: Option<TokenConnection>,
}

#[derive(Debug, Deserialize)]
pub struct TokenConnection {
    #[serde(default)]
    pub nodes: Vec<TokenNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenNode {
    pub id: String,
    pub address: String,
    pub network_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl From<TokenNode> for TokenInfo {
    fn from(node: TokenNode) -> Self {
        Self {
            id: node.id,
            address: node.address,
            network_id: node.network_id,
            name: node.name.unwrap_or_default(),
            symbol: node.symbol.unwrap_or_default(),
        }
    }
}
