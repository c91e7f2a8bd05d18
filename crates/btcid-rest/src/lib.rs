//! REST API client for the Bitcoin.co.id (Indodax) exchange
//!
//! This crate wraps the exchange's public market data API and the read-only
//! part of its private trade API.
//!
//! # Features
//!
//! - **Market Data**: Ticker, recent trades, orderbook depth
//! - **Account**: Balances, deposit addresses, transaction history
//! - **Orders**: Open orders, order history, trade history (read-only)
//!
//! # Authentication
//!
//! Private endpoints require an API key and secret. Requests are signed with
//! HMAC-SHA512 over the form body, see [`btcid_auth`].
//!
//! # Example
//!
//! ```no_run
//! use btcid_rest::{BtcidClient, Credentials, Pair};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BtcidClient::public();
//!     let depth = client.fetch_depth_for(&Pair::ETH_IDR).await?;
//!     println!("ETH/IDR spread: {:?}", depth.spread());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BtcidClient::with_credentials(creds);
//!     let info = auth_client.fetch_account_info().await?;
//!     println!("Balances: {:?}", info.non_zero());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation returns [`RestResult`]. Transport failures, malformed
//! bodies and failures reported by the exchange are distinct variants of
//! [`RestError`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod types;

mod serde_util;

// Re-export main types
pub use btcid_auth::{AuthError, Credentials};
pub use client::{BtcidClient, ClientConfig, DEFAULT_DOMAIN};
pub use error::{RestError, RestResult};

pub use types::{
    // Market data
    Depth, DepthLevel, Pair, Side, Ticker, Trade,
    // Account
    Amount, OpenOrders, OrderEntry, TradeHistoryEntry, TransactionHistory, UserInfo,
    // Responses
    InfoResponse, PrivateMethod, PrivateResponse, PublicError,
};
