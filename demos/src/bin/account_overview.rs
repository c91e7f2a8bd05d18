//! Demo 2: Account Overview
//!
//! Showcases: Signed private requests, balances and open orders
//!
//! Requires BTCID_API_KEY and BTCID_SECRET.
//!
//! Run: cargo run --bin account_overview

use btcid_rest::{BtcidClient, Credentials, RestError};
use colored::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials = Credentials::from_env()?;
    let client = BtcidClient::with_credentials(credentials);

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let info = match client.fetch_account_info().await {
        Ok(info) => info,
        Err(RestError::Exchange { code, message }) => {
            println!(
                "  {} {} ({})",
                "✗".red(),
                message,
                code.as_deref().unwrap_or("no code")
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("  {} {} <{}>", "USER:".yellow(), info.name, info.email);
    println!();
    println!("  {}", "BALANCES".white().bold());
    println!("  {}", "─".repeat(55));

    let mut currencies: Vec<_> = info.non_zero().into_keys().collect();
    currencies.sort();
    for currency in &currencies {
        let hold = info.on_hold(currency).unwrap_or(Decimal::ZERO);
        println!(
            "  {:>6}  {:>24}  {} {}",
            currency.to_uppercase(),
            info.total(currency),
            "hold".dimmed(),
            hold
        );
    }
    if currencies.is_empty() {
        println!("  {}", "no funds".dimmed());
    }

    let orders = client.fetch_open_orders(None).await?;
    println!();
    println!("  {} {}", "OPEN ORDERS:".white().bold(), orders.len());
    for order in orders.iter() {
        println!(
            "  {} #{} @ {} ({})",
            order.order_type.to_uppercase(),
            order.order_id,
            order.price,
            order.status.as_deref().unwrap_or("open")
        );
    }

    println!("{}", "═".repeat(60).cyan());
    Ok(())
}
