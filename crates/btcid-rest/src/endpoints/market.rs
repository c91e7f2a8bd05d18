//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::error::RestResult;
use crate::request::{decode_public, public_get};
use crate::types::{Depth, Pair, Ticker, TickerEnvelope, Trade};
use reqwest::Client;
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a Client,
    domain: &'a str,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a Client, domain: &'a str) -> Self {
        Self { client, domain }
    }

    /// Get ticker information
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. `Pair::BTC_IDR`)
    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn get_ticker(&self, pair: &Pair) -> RestResult<Ticker> {
        debug!("Fetching ticker for {}", pair);

        let body = public_get(self.client, self.domain, &format!("/{}/ticker", pair)).await?;
        let envelope: TickerEnvelope = decode_public(&body)?;

        Ok(envelope.ticker)
    }

    /// Get recent trades, newest first
    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn get_trades(&self, pair: &Pair) -> RestResult<Vec<Trade>> {
        debug!("Fetching recent trades for {}", pair);

        let body = public_get(self.client, self.domain, &format!("/{}/trades", pair)).await?;
        decode_public(&body)
    }

    /// Get orderbook depth
    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn get_depth(&self, pair: &Pair) -> RestResult<Depth> {
        debug!("Fetching orderbook for {}", pair);

        let body = public_get(self.client, self.domain, &format!("/{}/depth", pair)).await?;
        decode_public(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PUBLIC_API_PATH;

    #[test]
    fn test_url_construction() {
        let url = format!(
            "{}{}/{}/ticker",
            "https://vip.bitcoin.co.id",
            PUBLIC_API_PATH,
            Pair::BTC_IDR
        );
        assert_eq!(url, "https://vip.bitcoin.co.id/api/btc_idr/ticker");
    }
}
