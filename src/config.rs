// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{ensure, Result};
use serde::Deserialize;
use std::env;

/// Account queried when the endpoint does not carry its own `address` parameter.
pub const DEFAULT_ACCOUNT_ADDRESS: &str = "0x38cd7db12edc7724a6a403c1a63d3c12682fd687";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub account_address: String,
    /// Endpoint submitted at start-up, if any.
    pub endpoint: Option<String>,
    pub viewport_rows: usize,
    pub root_margin: usize,
    /// Zero leaves the HTTP client without a timeout.
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let config = Config {
            api_key: env::var("ETHERSCAN_API_KEY")
                .unwrap_or_else(|_| "YourApiKeyToken".to_string()),
            account_address: env::var("TXSCROLL_ACCOUNT_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_ACCOUNT_ADDRESS.to_string()),
            endpoint: env::var("TXSCROLL_ENDPOINT")
                .ok()
                .filter(|endpoint| !endpoint.trim().is_empty()),
            viewport_rows: env::var("TXSCROLL_VIEWPORT_ROWS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            root_margin: env::var("TXSCROLL_ROOT_MARGIN")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            http_timeout_secs: env::var("TXSCROLL_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .unwrap_or(0),
        };
        config.validate()?;

        Ok(config)
    }

    pub fn localhost() -> Self {
        Self {
            api_key: "test_api_key".to_string(),
            account_address: DEFAULT_ACCOUNT_ADDRESS.to_string(),
            endpoint: Some("http://localhost:8545/api".to_string()),
            viewport_rows: 24,
            root_margin: 1,
            http_timeout_secs: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.viewport_rows > 0, "viewport must have at least one row");
        ensure!(!self.api_key.is_empty(), "api key must not be empty");
        Ok(())
    }
}
