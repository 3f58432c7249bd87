//! Client for the coin API that builds creation calls.
//!
//! The API owns calldata construction (pool configuration, salts, hooks);
//! this client only sends the coin parameters and reads back the call to
//! submit plus the predicted coin address.

use alloy::primitives::{Address, Bytes, U256};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::blockchain::types::{CoinParams, CreationCall};
use crate::config::ApiConfig;
use crate::service::{ServiceError, ServiceErrorKind, ServiceResult};

const SERVICE: &str = "coin api";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateContentRequest<'a> {
    creator: Address,
    name: &'a str,
    symbol: &'a str,
    metadata: MetadataRef<'a>,
    currency: &'a str,
    chain_id: u64,
    starting_market_cap: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform_referrer: Option<Address>,
}

#[derive(Debug, Serialize)]
struct MetadataRef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    uri: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateContentResponse {
    calls: Vec<CallPayload>,
    predicted_coin_address: Address,
}

#[derive(Debug, Deserialize)]
struct CallPayload {
    to: Address,
    data: Bytes,
    #[serde(default)]
    value: Option<String>,
}

/// HTTP client for the coin API.
#[derive(Debug, Clone)]
pub struct CoinApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    currency: String,
    starting_market_cap: String,
}

impl CoinApiClient {
    /// Create a client from configuration and the API key.
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            currency: config.currency.clone(),
            starting_market_cap: config.starting_market_cap.clone(),
        })
    }

    /// Ask the API for the creation call of a content coin.
    pub async fn prepare_creation(&self, params: &CoinParams) -> ServiceResult<CreationCall> {
        let body = CreateContentRequest {
            creator: params.creator,
            name: &params.name,
            symbol: &params.symbol,
            metadata: MetadataRef {
                kind: "RAW_URI",
                uri: &params.metadata_uri,
            },
            currency: &self.currency,
            chain_id: params.chain_id,
            starting_market_cap: &self.starting_market_cap,
            platform_referrer: params.platform_referrer,
        };

        tracing::debug!(symbol = %params.symbol, creator = %params.creator, "Requesting creation call");

        let res = self
            .client
            .post(format!("{}/create/content", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e))?;

        if !status.is_success() {
            return Err(ServiceError::from_response(SERVICE, status, &text));
        }

        parse_creation_call(&text)
    }
}

/// Decode the API response into the single call to submit.
fn parse_creation_call(text: &str) -> ServiceResult<CreationCall> {
    let response: CreateContentResponse = serde_json::from_str(text).map_err(|e| {
        ServiceError::new(
            ServiceErrorKind::Rejected,
            SERVICE,
            format!("unexpected response: {}", e),
        )
    })?;

    let mut calls = response.calls.into_iter();
    let call = match (calls.next(), calls.next()) {
        (Some(call), None) => call,
        (None, _) => {
            return Err(ServiceError::new(
                ServiceErrorKind::Rejected,
                SERVICE,
                "response contained no calls",
            ))
        }
        (Some(_), Some(_)) => {
            return Err(ServiceError::new(
                ServiceErrorKind::Rejected,
                SERVICE,
                "response contained more than one call",
            ))
        }
    };

    let value = match call.value.as_deref() {
        None | Some("") => U256::ZERO,
        Some(raw) => U256::from_str(raw).map_err(|e| {
            ServiceError::new(
                ServiceErrorKind::Rejected,
                SERVICE,
                format!("invalid call value '{}': {}", raw, e),
            )
        })?,
    };

    Ok(CreationCall {
        to: call.to,
        data: call.data,
        value,
        predicted_address: response.predicted_coin_address,
    })
}
