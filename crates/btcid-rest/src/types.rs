//! Types for Bitcoin.co.id REST API requests and responses

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RestError;
use crate::serde_util::{null_as_default, string_or_number};

// ============================================================================
// Pairs and Methods
// ============================================================================

/// Trading pair identifier as used in public endpoint paths (e.g. `btc_idr`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair(Cow<'static, str>);

impl Pair {
    /// Bitcoin / Indonesian Rupiah
    pub const BTC_IDR: Pair = Pair(Cow::Borrowed("btc_idr"));
    /// Ether / Indonesian Rupiah
    pub const ETH_IDR: Pair = Pair(Cow::Borrowed("eth_idr"));

    /// Create a pair from its wire name
    pub fn new(name: impl Into<String>) -> Self {
        Pair(Cow::Owned(name.into()))
    }

    /// Wire name of the pair
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base currency code (`btc` for `btc_idr`)
    pub fn base(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }

    /// Quote currency code (`idr` for `btc_idr`)
    pub fn quote(&self) -> Option<&str> {
        self.0.split_once('_').map(|(_, quote)| quote)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pair {
    fn from(name: &str) -> Self {
        Pair::new(name)
    }
}

/// Private `/tapi` method names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivateMethod {
    /// Balances, deposit addresses and profile
    GetInfo,
    /// Deposit and withdrawal history
    TransHistory,
    /// Filled trades for a pair
    TradeHistory,
    /// Open orders
    OpenOrders,
    /// Past orders for a pair
    OrderHistory,
    /// Single order lookup
    GetOrder,
}

impl PrivateMethod {
    /// Method name sent in the `method` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetInfo => "getInfo",
            Self::TransHistory => "transHistory",
            Self::TradeHistory => "tradeHistory",
            Self::OpenOrders => "openOrders",
            Self::OrderHistory => "orderHistory",
            Self::GetOrder => "getOrder",
        }
    }
}

impl fmt::Display for PrivateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Amount
// ============================================================================

/// Decimal quantity that the API may send either as a JSON number or a string
///
/// `null` and the empty string decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Wrap a decimal value
    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// The decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn parse(text: &str) -> Result<Self, rust_decimal::Error> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::ZERO);
        }
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map(Amount)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(serde_json::Number),
            Null(()),
        }

        let text = match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s,
            Repr::Number(n) => n.to_string(),
            Repr::Null(()) => return Ok(Amount::ZERO),
        };

        Amount::parse(&text)
            .map_err(|e| serde::de::Error::custom(format!("Invalid amount {:?}: {}", text, e)))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Amount::parse(text).ok().map(|amount| amount.value())
}

// ============================================================================
// Response Envelopes
// ============================================================================

/// Private API response wrapper
///
/// Every `/tapi` call answers with `{"success": 1, "return": {...}}` or
/// `{"success": 0, "error": "...", "error_code": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivateResponse<T> {
    /// 1 on success, 0 on failure
    pub success: i64,
    /// Payload (present if successful)
    #[serde(rename = "return")]
    pub result: Option<T>,
    /// Error message (present on failure)
    #[serde(default)]
    pub error: Option<String>,
    /// Machine-readable error code (present on some failures)
    #[serde(default)]
    pub error_code: Option<String>,
}

impl<T> PrivateResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.success == 1
    }

    /// Get the payload, returning an exchange error when the call failed
    pub fn into_result(self) -> Result<T, RestError> {
        if !self.is_success() {
            return Err(RestError::Exchange {
                code: self.error_code,
                message: self
                    .error
                    .unwrap_or_else(|| format!("Request failed with success={}", self.success)),
            });
        }

        self.result.ok_or_else(|| RestError::Exchange {
            code: None,
            message: "No return payload in response".to_string(),
        })
    }
}

/// `getInfo` response envelope
pub type InfoResponse = PrivateResponse<UserInfo>;

/// Error body returned by public endpoints, e.g. for an unknown pair
#[derive(Debug, Clone, Deserialize)]
pub struct PublicError {
    /// Error code
    pub error: String,
    /// Human-readable description
    #[serde(default)]
    pub error_description: Option<String>,
}

impl From<PublicError> for RestError {
    fn from(err: PublicError) -> Self {
        RestError::Exchange {
            message: err.error_description.unwrap_or_else(|| err.error.clone()),
            code: Some(err.error),
        }
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct TickerEnvelope {
    pub ticker: Ticker,
}

/// Ticker information for a trading pair
///
/// Prices are kept as the decimal strings the exchange sends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    /// 24h high
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub high: String,
    /// 24h low
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub low: String,
    /// Last trade price
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub last: String,
    /// Best bid
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub buy: String,
    /// Best ask
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub sell: String,
    /// Server time in epoch seconds
    #[serde(default)]
    pub server_time: Option<i64>,
}

impl Ticker {
    /// Get the last trade price
    pub fn last_price(&self) -> Option<Decimal> {
        parse_decimal(&self.last)
    }

    /// Get the best bid price
    pub fn bid_price(&self) -> Option<Decimal> {
        parse_decimal(&self.buy)
    }

    /// Get the best ask price
    pub fn ask_price(&self) -> Option<Decimal> {
        parse_decimal(&self.sell)
    }

    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.ask_price()? + self.bid_price()?) / Decimal::TWO)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask_price()? - self.bid_price()?)
    }
}

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl FromStr for Side {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(RestError::InvalidParameter(format!("Unknown side: {}", other))),
        }
    }
}

/// Public trade from the trades endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trade {
    /// Epoch seconds
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub date: String,
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub price: String,
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub amount: String,
    /// Trade id
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub tid: String,
    /// `buy` or `sell`
    #[serde(rename = "type")]
    pub trade_type: String,
}

impl Trade {
    /// Parsed trade side
    pub fn side(&self) -> Option<Side> {
        self.trade_type.parse().ok()
    }

    /// Parsed price
    pub fn price_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.price)
    }

    /// Parsed amount
    pub fn amount_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.amount)
    }
}

/// Single `[price, amount]` orderbook level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLevel {
    pub price: Decimal,
    pub amount: Decimal,
}

impl<'de> Deserialize<'de> for DepthLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (price, amount) = <(Amount, Amount)>::deserialize(deserializer)?;
        Ok(DepthLevel {
            price: price.value(),
            amount: amount.value(),
        })
    }
}

/// Orderbook snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Depth {
    /// Bid levels, best first
    pub buy: Vec<DepthLevel>,
    /// Ask levels, best first
    pub sell: Vec<DepthLevel>,
}

impl Depth {
    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.buy.first().map(|level| level.price)
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.sell.first().map(|level| level.price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Account information from `getInfo`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserInfo {
    /// Available balance per currency
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub balance: HashMap<String, Amount>,
    /// Balance locked in open orders per currency
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub balance_hold: HashMap<String, Amount>,
    /// Deposit address per currency
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub address: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub profile_picture: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub email: String,
    /// Server time in epoch seconds
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub server_time: i64,
}

impl UserInfo {
    /// Get available balance for a currency
    pub fn available(&self, currency: &str) -> Option<Decimal> {
        self.balance.get(currency).map(Amount::value)
    }

    /// Get balance on hold for a currency
    pub fn on_hold(&self, currency: &str) -> Option<Decimal> {
        self.balance_hold.get(currency).map(Amount::value)
    }

    /// Available plus held balance for a currency
    pub fn total(&self, currency: &str) -> Decimal {
        self.available(currency).unwrap_or_default() + self.on_hold(currency).unwrap_or_default()
    }

    /// Get all non-zero available balances
    pub fn non_zero(&self) -> HashMap<String, Decimal> {
        self.balance
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(currency, amount)| (currency.clone(), amount.value()))
            .collect()
    }
}

/// Deposit and withdrawal history from `transHistory`
///
/// Entries are left as raw JSON; their fields differ between fiat and coins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionHistory {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub withdraw: HashMap<String, Vec<serde_json::Value>>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub deposit: HashMap<String, Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TradesEnvelope {
    #[serde(default)]
    pub trades: Vec<TradeHistoryEntry>,
}

/// Filled trade from `tradeHistory`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeHistoryEntry {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub trade_id: String,
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub order_id: String,
    /// `buy` or `sell`
    #[serde(rename = "type")]
    pub trade_type: String,
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub price: String,
    #[serde(default)]
    pub fee: Amount,
    /// Epoch seconds
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub trade_time: String,
    /// Currency-keyed fields such as `btc`
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl TradeHistoryEntry {
    /// Traded quantity of `currency` (e.g. `btc`)
    pub fn amount(&self, currency: &str) -> Option<Decimal> {
        extra_decimal(&self.extra, currency)
    }

    /// Parsed trade side
    pub fn side(&self) -> Option<Side> {
        self.trade_type.parse().ok()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrdersEnvelope<T> {
    pub orders: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderEnvelope {
    pub order: OrderEntry,
}

/// Order as returned by `openOrders`, `orderHistory` and `getOrder`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderEntry {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub order_id: String,
    /// `buy` or `sell`
    #[serde(rename = "type")]
    pub order_type: String,
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub price: String,
    /// Epoch seconds
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub submit_time: String,
    /// Epoch seconds, absent while the order is open
    #[serde(default)]
    pub finish_time: Option<serde_json::Value>,
    /// `open`, `filled` or `cancelled`
    #[serde(default)]
    pub status: Option<String>,
    /// Currency-keyed fields such as `order_idr` / `remain_btc`
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl OrderEntry {
    /// Ordered quantity in `currency`
    pub fn order_amount(&self, currency: &str) -> Option<Decimal> {
        extra_decimal(&self.extra, &format!("order_{}", currency))
    }

    /// Remaining quantity in `currency`
    pub fn remain_amount(&self, currency: &str) -> Option<Decimal> {
        extra_decimal(&self.extra, &format!("remain_{}", currency))
    }

    /// Parsed order side
    pub fn side(&self) -> Option<Side> {
        self.order_type.parse().ok()
    }
}

/// Open orders, either for one pair or keyed by pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OpenOrders {
    /// Orders for the requested pair
    Pair(Vec<OrderEntry>),
    /// Orders for every pair, keyed by pair name
    All(HashMap<String, Vec<OrderEntry>>),
}

impl OpenOrders {
    /// Total number of open orders
    pub fn len(&self) -> usize {
        match self {
            Self::Pair(orders) => orders.len(),
            Self::All(by_pair) => by_pair.values().map(Vec::len).sum(),
        }
    }

    /// Check if there are no open orders
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all open orders
    pub fn iter(&self) -> Box<dyn Iterator<Item = &OrderEntry> + '_> {
        match self {
            Self::Pair(orders) => Box::new(orders.iter()),
            Self::All(by_pair) => Box::new(by_pair.values().flatten()),
        }
    }
}

fn extra_decimal(extra: &HashMap<String, serde_json::Value>, key: &str) -> Option<Decimal> {
    match extra.get(key)? {
        serde_json::Value::String(s) => parse_decimal(s),
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}
