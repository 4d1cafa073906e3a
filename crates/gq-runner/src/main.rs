//! # gq-runner
//!
//! Command-line order entry against the GQ gateway.
//!
//! Loads a JSON gateway config, places the single order described by the
//! subcommand, logs the normalized outcome, and exits non-zero if the order
//! was not accepted.
//!
//! # Usage
//!
//! ```bash
//! gq-runner config.json market --exchange binance --account acct1 \
//!     --symbol BTCUSDT --side buy --quantity 1.0
//! gq-runner config.json twap --exchange bybit --account acct1 \
//!     --symbol BTCUSDT --side sell --quantity 10 --duration 3600 \
//!     --interval 60 --instrument-type linear
//! ```

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use gq_core::types::{
    LimitOrderRequest, MarketEdgeOrderRequest, MarketOrderRequest, TwapEdgeOrderRequest,
    TwapOrderRequest,
};
use gq_oems::OemsClient;
use tracing::info;

/// GQ OEMS order entry.
#[derive(Parser)]
#[command(name = "gq-runner", about = "GQ OEMS order entry")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// Submit without waiting for the gateway round trip.
    #[arg(long)]
    non_blocking: bool,

    #[command(subcommand)]
    order: OrderCommand,
}

#[derive(Subcommand)]
enum OrderCommand {
    /// Place a market order.
    Market {
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        side: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long, default_value = "")]
        instrument_type: String,
    },
    /// Place a limit order.
    Limit {
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        side: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "")]
        instrument_type: String,
    },
    /// Place a TWAP order.
    Twap {
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        side: String,
        #[arg(long)]
        quantity: f64,
        /// Total execution window in seconds.
        #[arg(long)]
        duration: i32,
        /// Seconds between partial orders.
        #[arg(long)]
        interval: i32,
        #[arg(long, default_value = "")]
        instrument_type: String,
    },
    /// Place a market-edge order.
    MarketEdge {
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        side: String,
        #[arg(long)]
        quantity: f64,
        /// Maximum execution time in seconds.
        #[arg(long)]
        max_timer: i32,
        #[arg(long, default_value = "")]
        instrument_type: String,
    },
    /// Place a TWAP-edge order.
    TwapEdge {
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        side: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        duration: i32,
        #[arg(long)]
        interval: i32,
        #[arg(long, default_value = "")]
        instrument_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    gq_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref(), "gq-runner");

    let config = gq_core::config::load_config(&cli.config)?;
    info!("gq-runner starting, gateway={}", config.base_url());

    let client = OemsClient::new(&config)?;
    let blocking = !cli.non_blocking;

    let response = match cli.order {
        OrderCommand::Market { exchange, account, symbol, side, quantity, instrument_type } => {
            client
                .place_market_order(
                    MarketOrderRequest::new(
                        &exchange,
                        &account,
                        &symbol,
                        &side,
                        quantity,
                        &instrument_type,
                    ),
                    blocking,
                )
                .await
        }
        OrderCommand::Limit {
            exchange,
            account,
            symbol,
            side,
            quantity,
            price,
            instrument_type,
        } => {
            client
                .place_limit_order(
                    LimitOrderRequest::new(
                        &exchange,
                        &account,
                        &symbol,
                        &side,
                        quantity,
                        price,
                        &instrument_type,
                    ),
                    blocking,
                )
                .await
        }
        OrderCommand::Twap {
            exchange,
            account,
            symbol,
            side,
            quantity,
            duration,
            interval,
            instrument_type,
        } => {
            client
                .place_twap_order(
                    TwapOrderRequest::new(
                        &exchange,
                        &account,
                        &symbol,
                        &side,
                        quantity,
                        duration,
                        interval,
                        &instrument_type,
                    ),
                    blocking,
                )
                .await
        }
        OrderCommand::MarketEdge {
            exchange,
            account,
            symbol,
            side,
            quantity,
            max_timer,
            instrument_type,
        } => {
            client
                .place_market_edge_order(
                    MarketEdgeOrderRequest::new(
                        &exchange,
                        &account,
                        &symbol,
                        &side,
                        quantity,
                        max_timer,
                        &instrument_type,
                    ),
                    blocking,
                )
                .await
        }
        OrderCommand::TwapEdge {
            exchange,
            account,
            symbol,
            side,
            quantity,
            duration,
            interval,
            instrument_type,
        } => {
            client
                .place_twap_edge_order(
                    TwapEdgeOrderRequest::new(
                        &exchange,
                        &account,
                        &symbol,
                        &side,
                        quantity,
                        duration,
                        interval,
                        &instrument_type,
                    ),
                    blocking,
                )
                .await
        }
    };

    info!("{} (status={})", response.message, response.status_code);

    if !response.success {
        bail!("order not accepted: {} (status={})", response.message, response.status_code);
    }
    Ok(())
}
