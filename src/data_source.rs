// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::{
    config::Config,
    pagination::PAGE_SIZE,
    types::{EtherscanResponse, Transaction},
};
use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Why a page could not be loaded. `Display` is the text shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Decode(String),
    #[error("Unknown Error")]
    Unknown,
}

impl FetchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::non_empty(msg.into(), FetchError::Transport)
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::non_empty(msg.into(), FetchError::Api)
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::non_empty(msg.into(), FetchError::Decode)
    }

    fn non_empty(msg: String, wrap: fn(String) -> FetchError) -> Self {
        if msg.trim().is_empty() {
            FetchError::Unknown
        } else {
            wrap(msg)
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// One paginated read against an explorer.
#[async_trait::async_trait]
pub trait TransactionSource: Send + Sync {
    /// `page` is 1-based.
    async fn fetch_page(&self, endpoint: &str, page: u32) -> Result<Vec<Transaction>, FetchError>;
}

/// Endpoints that already name an address (e.g. `...?address=0x..`) keep theirs.
/// This is a plain substring test on the whole endpoint string.
pub fn contains_address_segment(endpoint: &str) -> bool {
    endpoint.contains("address")
}

/// Query parameters for `account/txlist`, newest first.
pub fn build_query(
    endpoint: &str,
    page: u32,
    account_address: &str,
    api_key: &str,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("module", "account".to_string()),
        ("action", "txlist".to_string()),
    ];
    if !contains_address_segment(endpoint) {
        query.push(("address", account_address.to_string()));
    }
    query.push(("page", page.to_string()));
    query.push(("offset", PAGE_SIZE.to_string()));
    query.push(("sort", "desc".to_string()));
    query.push(("apikey", api_key.to_string()));
    query
}

/// Decode a response body. A `result` that is not a list carries the API's complaint.
pub fn decode_page(body: &str) -> Result<Vec<Transaction>, FetchError> {
    let envelope: EtherscanResponse<Value> =
        serde_json::from_str(body).map_err(|e| FetchError::decode(e.to_string()))?;

    match envelope.result {
        items @ Value::Array(_) => {
            serde_json::from_value(items).map_err(|e| FetchError::decode(e.to_string()))
        }
        Value::String(msg) if !msg.trim().is_empty() => Err(FetchError::api(msg)),
        _ => Err(FetchError::api(envelope.message)),
    }
}

pub struct EtherscanClient {
    client: Client,
    api_key: String,
    account_address: String,
}

impl EtherscanClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if config.http_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.http_timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            account_address: config.account_address.clone(),
        })
    }

    async fn request_page(&self, endpoint: &str, page: u32) -> Result<Vec<Transaction>, FetchError> {
        let query = build_query(endpoint, page, &self.account_address, &self.api_key);

        let response = self
            .client
            .get(endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;
        decode_page(&body)
    }
}

#[async_trait::async_trait]
impl TransactionSource for EtherscanClient {
    async fn fetch_page(&self, endpoint: &str, page: u32) -> Result<Vec<Transaction>, FetchError> {
        debug!("fetch_page | endpoint: {}, page: {}", endpoint, page);

        match self.request_page(endpoint, page).await {
            Ok(txns) => {
                info!("fetch_page | page {} returned {} transactions", page, txns.len());
                Ok(txns)
            }
            Err(e) => {
                error!("fetch_page | page {} of {} failed: {:?}", page, endpoint, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::DEFAULT_ACCOUNT_ADDRESS;

    fn param<'a>(query: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_build_query_includes_address() {
        let query = build_query("https://api.etherscan.io/api", 3, "0xabc", "KEY");
        assert_eq!(param(&query, "module"), Some("account"));
        assert_eq!(param(&query, "action"), Some("txlist"));
        assert_eq!(param(&query, "address"), Some("0xabc"));
        assert_eq!(param(&query, "page"), Some("3"));
        assert_eq!(param(&query, "offset"), Some("20"));
        assert_eq!(param(&query, "sort"), Some("desc"));
        assert_eq!(param(&query, "apikey"), Some("KEY"));
    }

    #[test]
    fn test_build_query_omits_address_when_endpoint_has_one() {
        let endpoint = "https://api.etherscan.io/api?address=0x1234";
        let query = build_query(endpoint, 1, DEFAULT_ACCOUNT_ADDRESS, "KEY");
        assert_eq!(param(&query, "address"), None);
        assert_eq!(param(&query, "page"), Some("1"));

        // Any occurrence counts, not just a query parameter.
        assert!(contains_address_segment("https://host/addresses/api"));
        assert!(!contains_address_segment("https://api.etherscan.io/api"));
    }

    #[test]
    fn test_decode_page_success() {
        let body = r#"{"status":"1","message":"OK","result":[
            {"hash":"0x1","timeStamp":"1690000000"},
            {"hash":"0x2","timeStamp":"1689999999"}
        ]}"#;
        let txns = decode_page(body).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].hash, "0x1");
        assert_eq!(txns[1].hash, "0x2");
    }

    #[test]
    fn test_decode_page_tolerates_null_fields() {
        let body = r#"{"status":"1","message":"OK","result":[
            {"hash":"0x1","contractAddress":null,"input":null}
        ]}"#;
        let txns = decode_page(body).unwrap();
        assert_eq!(txns.len(), 1);
        assert!(txns[0].contract_address.is_empty());
    }

    #[test]
    fn test_decode_page_empty_result_is_not_an_error() {
        let body = r#"{"status":"0","message":"No transactions found","result":[]}"#;
        assert_eq!(decode_page(body).unwrap(), Vec::new());
    }

    #[test]
    fn test_decode_page_api_error() {
        let body = r#"{"status":"0","message":"NOTOK","result":"Max rate limit reached"}"#;
        assert_eq!(
            decode_page(body),
            Err(FetchError::Api("Max rate limit reached".to_string()))
        );

        let body = r#"{"status":"0","message":"NOTOK","result":null}"#;
        assert_eq!(decode_page(body), Err(FetchError::Api("NOTOK".to_string())));

        let body = r#"{"status":"0","message":"","result":""}"#;
        assert_eq!(decode_page(body).unwrap_err().message(), UNKNOWN_ERROR);
    }

    #[test]
    fn test_decode_page_garbage() {
        assert!(matches!(decode_page("<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::transport("").message(), UNKNOWN_ERROR);
        assert_eq!(FetchError::Unknown.message(), UNKNOWN_ERROR);
        assert_eq!(FetchError::transport("Network Error").message(), "Network Error");
        assert_eq!(
            FetchError::Status(404).message(),
            "Request failed with status code 404"
        );
    }

    #[tokio::test]
    async fn test_fetch_page_transport_failure() {
        let client = EtherscanClient::new(&Config::localhost()).unwrap();

        let err = client.fetch_page("not a url", 1).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "{:?}", err);

        let err = client.fetch_page("http://127.0.0.1:1/api", 1).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "{:?}", err);
        assert!(!err.message().is_empty());
    }

    #[ignore]
    #[tokio::test]
    async fn test_fetch_page_live() -> Result<()> {
        let client = EtherscanClient::new(&Config::load()?)?;
        let txns = client
            .fetch_page("https://api.etherscan.io/api", 1)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        assert!(txns.len() <= PAGE_SIZE as usize);
        Ok(())
    }
}
