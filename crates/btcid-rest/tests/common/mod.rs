//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes served by vip.bitcoin.co.id.

#![allow(dead_code)]

use btcid_rest::{BtcidClient, Credentials};
use wiremock::{Match, MockServer, Request};

pub const API_KEY: &str = "TEST-API-KEY";
pub const SECRET: &str = "hush";

/// Ticker envelope with every price at 2500
pub const TICKER_BODY: &str =
    r#"{"ticker":{"high":"2500","low":"2500","last":"2500","buy":"2500","sell":"2500"}}"#;

/// Two recent trades, newest first
pub const TRADES_BODY: &str = r#"[
    {"date":"1700000060","price":"520000000","amount":"0.00150000","tid":"8765432","type":"buy"},
    {"date":"1700000001","price":"519950000","amount":"0.02000000","tid":"8765431","type":"sell"}
]"#;

/// Orderbook with numeric prices and string amounts
pub const DEPTH_BODY: &str = r#"{
    "buy":[[519900000,"0.10000000"],[519800000,"0.25000000"]],
    "sell":[[520100000,"0.05000000"]]
}"#;

/// Successful `getInfo` response
pub const INFO_BODY: &str = r#"{"success":1,"return":{
    "server_time":1700000000,
    "balance":{"idr":1000000,"btc":"0.00500000","eth":"0"},
    "balance_hold":{"idr":"250000","btc":"0.00000000"},
    "address":{"btc":"1BtcDepositAddress","eth":"0xEthDepositAddress"},
    "user_id":"u1",
    "profile_picture":null,
    "name":"Test User",
    "email":"a@b.com"
}}"#;

/// `getInfo` failure without an error message
pub const INFO_FAILED_BODY: &str = r#"{"success":0,"return":{}}"#;

/// Failure as sent for a bad key
pub const INVALID_CREDENTIALS_BODY: &str = r#"{"success":0,"error":"Invalid credentials. API not found or session has expired.","error_code":"invalid_credentials"}"#;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Authenticated client pointed at the mock server
pub fn test_client(server: &MockServer) -> BtcidClient {
    BtcidClient::new(API_KEY, SECRET, None).with_domain(server.uri())
}

/// Public client pointed at the mock server
pub fn public_client(server: &MockServer) -> BtcidClient {
    BtcidClient::public().with_domain(server.uri())
}

/// Matches requests whose `Sign` header is the HMAC-SHA512 of the body
pub struct ValidSignature {
    credentials: Credentials,
}

impl ValidSignature {
    pub fn new(secret: &str) -> Self {
        Self {
            credentials: Credentials::new(API_KEY, secret),
        }
    }
}

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = std::str::from_utf8(&request.body) else {
            return false;
        };
        let expected = self.credentials.sign(body);

        request
            .headers
            .get("Sign")
            .and_then(|value| value.to_str().ok())
            .map_or(false, |sign| sign == expected)
    }
}

/// Parse a form body into key/value pairs, keeping their order
pub fn form_pairs(body: &[u8]) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(body).expect("form body should decode")
}
