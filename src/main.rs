// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{ensure, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn, Level};
use txlist_scroll::{app::App, config, data_source::EtherscanClient};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Explorer endpoint to open at start-up, e.g. https://api.etherscan.io/api
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Rows in the list viewport
    #[arg(short, long)]
    rows: Option<usize>,

    /// Print every transaction as JSON lines instead of the interactive list
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Logs go to stderr so they do not mix with the list
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting transaction list viewer...");

    // Load configuration
    let mut config = config::Config::load()?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint = Some(endpoint);
    }
    if let Some(rows) = args.rows {
        config.viewport_rows = rows;
    }
    config.validate()?;
    info!("Configuration loaded successfully");

    let dump = args.dump;
    let client = Arc::new(EtherscanClient::new(&config)?);
    let mut app = App::new(client, &config);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()?;

    rt.block_on(async move {
        if dump {
            let endpoint = config.endpoint.clone().unwrap_or_default();
            ensure!(!endpoint.is_empty(), "--dump needs an endpoint");
            let stdout = std::io::stdout();
            let written = app.dump(&endpoint, &mut stdout.lock()).await?;
            info!("Dumped {} transactions", written);
            return Ok(());
        }

        if let Some(endpoint) = config.endpoint.as_deref() {
            if let Err(e) = app.apply(endpoint) {
                warn!("Ignoring start-up endpoint: {}", e);
            }
        }
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = std::io::stdout();
        app.run(stdin, &mut stdout.lock()).await
    })?;

    info!("Stopping transaction list viewer...");
    Ok(())
}
