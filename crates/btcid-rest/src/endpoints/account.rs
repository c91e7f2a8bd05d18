//! Private account endpoints
//!
//! These endpoints require authentication. All of them are read-only.

use crate::error::{RestError, RestResult};
use crate::request::{decode_private, private_post};
use crate::types::{
    OpenOrders, OrderEntry, OrderEnvelope, OrdersEnvelope, Pair, PrivateMethod, TradeHistoryEntry,
    TradesEnvelope, TransactionHistory, UserInfo,
};
use btcid_auth::Credentials;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a Client,
    domain: &'a str,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a Client, domain: &'a str, credentials: &'a Credentials) -> Self {
        Self {
            client,
            domain,
            credentials,
        }
    }

    /// Make an authenticated POST request and decode its `return` payload
    async fn post<T: DeserializeOwned>(
        &self,
        method: PrivateMethod,
        params: &[(&str, &str)],
    ) -> RestResult<T> {
        let body = private_post(self.client, self.domain, self.credentials, method, params).await?;
        decode_private(&body)
    }

    /// Get balances, deposit addresses and profile
    #[instrument(skip(self))]
    pub async fn get_info(&self) -> RestResult<UserInfo> {
        self.post(PrivateMethod::GetInfo, &[]).await
    }

    /// Get deposit and withdrawal history
    #[instrument(skip(self))]
    pub async fn get_transaction_history(&self) -> RestResult<TransactionHistory> {
        self.post(PrivateMethod::TransHistory, &[]).await
    }

    /// Get filled trades
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `count` - Maximum number of trades (optional)
    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn get_trade_history(
        &self,
        pair: &Pair,
        count: Option<u32>,
    ) -> RestResult<Vec<TradeHistoryEntry>> {
        let count = count.map(|c| c.to_string());
        let mut params: Vec<(&str, &str)> = vec![("pair", pair.as_str())];
        if let Some(count) = count.as_deref() {
            params.push(("count", count));
        }

        debug!("Fetching trade history for {}", pair);

        let envelope: TradesEnvelope = self.post(PrivateMethod::TradeHistory, &params).await?;
        Ok(envelope.trades)
    }

    /// Get open orders
    ///
    /// # Arguments
    /// * `pair` - Restrict to one pair; `None` returns orders for every pair
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, pair: Option<&Pair>) -> RestResult<OpenOrders> {
        let params: Vec<(&str, &str)> = match pair {
            Some(pair) => vec![("pair", pair.as_str())],
            None => vec![],
        };

        let envelope: OrdersEnvelope<OpenOrders> =
            self.post(PrivateMethod::OpenOrders, &params).await?;
        Ok(envelope.orders)
    }

    /// Get past orders
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `count` - Maximum number of orders (optional)
    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn get_order_history(
        &self,
        pair: &Pair,
        count: Option<u32>,
    ) -> RestResult<Vec<OrderEntry>> {
        let count = count.map(|c| c.to_string());
        let mut params: Vec<(&str, &str)> = vec![("pair", pair.as_str())];
        if let Some(count) = count.as_deref() {
            params.push(("count", count));
        }

        let envelope: OrdersEnvelope<Vec<OrderEntry>> =
            self.post(PrivateMethod::OrderHistory, &params).await?;
        Ok(envelope.orders)
    }

    /// Get a single order
    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn get_order(&self, pair: &Pair, order_id: &str) -> RestResult<OrderEntry> {
        if order_id.is_empty() {
            return Err(RestError::InvalidParameter("order_id must not be empty".to_string()));
        }

        let params = [("pair", pair.as_str()), ("order_id", order_id)];
        let envelope: OrderEnvelope = self.post(PrivateMethod::GetOrder, &params).await?;
        Ok(envelope.order)
    }
}
