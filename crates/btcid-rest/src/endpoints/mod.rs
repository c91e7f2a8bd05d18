//! API endpoint implementations

pub mod market;
pub mod account;

pub use market::MarketEndpoints;
pub use account::AccountEndpoints;
