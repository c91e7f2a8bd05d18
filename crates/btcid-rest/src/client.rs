//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, MarketEndpoints};
use crate::error::{RestError, RestResult};
use crate::types::{
    Depth, OpenOrders, OrderEntry, Pair, Ticker, Trade, TradeHistoryEntry, TransactionHistory,
    UserInfo,
};
use btcid_auth::Credentials;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

/// Production API host
pub const DEFAULT_DOMAIN: &str = "https://vip.bitcoin.co.id";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bitcoin.co.id REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap and
/// clones share the underlying HTTP connection pool.
///
/// # Example
///
/// ```no_run
/// use btcid_rest::{BtcidClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BtcidClient::public();
///     let ticker = client.fetch_ticker().await?;
///     println!("BTC/IDR last: {}", ticker.last);
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BtcidClient::with_credentials(creds);
///     let info = auth_client.fetch_account_info().await?;
///     println!("IDR balance: {:?}", info.available("idr"));
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BtcidClient {
    http_client: Client,
    credentials: Option<Credentials>,
    domain: String,
}

impl BtcidClient {
    /// Create a client for the given API key and secret
    ///
    /// When `http_client` is `None` a default client is built; otherwise the
    /// given client is used as-is, so its timeouts and headers apply.
    pub fn new(
        api_key: impl Into<String>,
        secret: impl AsRef<str>,
        http_client: Option<Client>,
    ) -> Self {
        let mut config = ClientConfig::new().with_credentials(Credentials::new(api_key, secret));
        config.http_client = http_client;
        Self::with_config(config)
    }

    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn public() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let http_client = config.http_client.unwrap_or_else(|| {
            Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
                .build()
                .expect("Failed to create HTTP client")
        });

        info!(domain = %config.domain, "Created Bitcoin.co.id REST client");

        Self {
            http_client,
            credentials: config.credentials,
            domain: config.domain,
        }
    }

    /// Point the client at a different host (e.g. a mock server)
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Base URL requests are sent to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// The configured credentials, if any
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.http_client, &self.domain)
    }

    /// Get the BTC/IDR ticker
    pub async fn fetch_ticker(&self) -> RestResult<Ticker> {
        self.fetch_ticker_for(&Pair::BTC_IDR).await
    }

    /// Get the ticker for a trading pair
    pub async fn fetch_ticker_for(&self, pair: &Pair) -> RestResult<Ticker> {
        self.market().get_ticker(pair).await
    }

    /// Get recent BTC/IDR trades
    pub async fn fetch_trades(&self) -> RestResult<Vec<Trade>> {
        self.fetch_trades_for(&Pair::BTC_IDR).await
    }

    /// Get recent trades for a trading pair
    pub async fn fetch_trades_for(&self, pair: &Pair) -> RestResult<Vec<Trade>> {
        self.market().get_trades(pair).await
    }

    /// Get the BTC/IDR orderbook
    pub async fn fetch_depth(&self) -> RestResult<Depth> {
        self.fetch_depth_for(&Pair::BTC_IDR).await
    }

    /// Get the orderbook for a trading pair
    pub async fn fetch_depth_for(&self, pair: &Pair) -> RestResult<Depth> {
        self.market().get_depth(pair).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(&self.http_client, &self.domain, creds))
    }

    /// Get balances, deposit addresses and profile
    pub async fn fetch_account_info(&self) -> RestResult<UserInfo> {
        self.account()?.get_info().await
    }

    /// Get deposit and withdrawal history
    pub async fn fetch_transaction_history(&self) -> RestResult<TransactionHistory> {
        self.account()?.get_transaction_history().await
    }

    /// Get open orders, for one pair or for all of them
    pub async fn fetch_open_orders(&self, pair: Option<&Pair>) -> RestResult<OpenOrders> {
        self.account()?.get_open_orders(pair).await
    }

    /// Get filled trades for a pair
    pub async fn fetch_trade_history(&self, pair: &Pair) -> RestResult<Vec<TradeHistoryEntry>> {
        self.account()?.get_trade_history(pair, None).await
    }

    /// Get past orders for a pair
    pub async fn fetch_order_history(&self, pair: &Pair) -> RestResult<Vec<OrderEntry>> {
        self.account()?.get_order_history(pair, None).await
    }

    /// Get a single order
    pub async fn fetch_order(&self, pair: &Pair, order_id: &str) -> RestResult<OrderEntry> {
        self.account()?.get_order(pair, order_id).await
    }
}

impl Default for BtcidClient {
    fn default() -> Self {
        Self::public()
    }
}

impl std::fmt::Debug for BtcidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtcidClient")
            .field("domain", &self.domain)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

const DEFAULT_USER_AGENT: &str = concat!("btcid-rest/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Base URL
    pub domain: String,
    /// Request timeout in seconds, used when no HTTP client is supplied
    pub timeout_secs: u64,
    /// Custom user agent, used when no HTTP client is supplied
    pub user_agent: Option<String>,
    /// Pre-built HTTP client to share
    pub http_client: Option<Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            domain: DEFAULT_DOMAIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the base URL
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Share an existing HTTP client
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = Some(http_client);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_credentials() {
        let client = BtcidClient::public();
        assert!(!client.has_credentials());
        assert_eq!(client.domain(), DEFAULT_DOMAIN);
    }

    #[test]
    fn test_new_sets_credentials_and_domain() {
        let client = BtcidClient::new("my-key", "my-secret", None);
        assert!(client.has_credentials());
        assert_eq!(client.credentials().map(Credentials::api_key), Some("my-key"));
        assert_eq!(client.domain(), "https://vip.bitcoin.co.id");
    }

    #[test]
    fn test_with_domain_override() {
        let client = BtcidClient::public().with_domain("http://127.0.0.1:8080");
        assert_eq!(client.domain(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_domain("http://localhost");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.domain, "http://localhost");
        assert!(config.http_client.is_none());
    }

    #[test]
    fn test_auth_required_error() {
        let client = BtcidClient::public();
        let result = client.account();
        assert!(matches!(result, Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = BtcidClient::new("my-key", "super-secret", None);
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("has_credentials: true"));
    }
}
