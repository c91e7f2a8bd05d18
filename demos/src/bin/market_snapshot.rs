//! Demo 1: Market Snapshot
//!
//! Showcases: Public ticker, depth and trades for one or more pairs
//!
//! Run: cargo run --bin market_snapshot -- btc_idr eth_idr

use btcid_rest::{BtcidClient, Pair, Side};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut pairs: Vec<Pair> = std::env::args().skip(1).map(Pair::new).collect();
    if pairs.is_empty() {
        pairs = vec![Pair::BTC_IDR, Pair::ETH_IDR];
    }

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET SNAPSHOT".cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let client = BtcidClient::public();

    for pair in &pairs {
        println!();
        println!("  {}", pair.as_str().to_uppercase().white().bold());
        println!("  {}", "─".repeat(55));

        let ticker = match client.fetch_ticker_for(pair).await {
            Ok(ticker) => ticker,
            Err(e) => {
                println!("  {} {}", "✗".red(), e);
                continue;
            }
        };

        println!(
            "  {} {}  {} {}  {} {}",
            "LAST:".yellow(),
            ticker.last,
            "HIGH:".yellow(),
            ticker.high,
            "LOW:".yellow(),
            ticker.low
        );

        let depth = client.fetch_depth_for(pair).await?;
        if let (Some(bid), Some(ask), Some(spread)) =
            (depth.best_bid(), depth.best_ask(), depth.spread())
        {
            println!(
                "  {} {}  {} {}  {} {}",
                "BID:".green(),
                bid,
                "ASK:".red(),
                ask,
                "SPREAD:".cyan(),
                spread
            );
        }
        println!(
            "  {} {} bids / {} asks",
            "BOOK:".yellow(),
            depth.buy.len(),
            depth.sell.len()
        );

        let trades = client.fetch_trades_for(pair).await?;
        for trade in trades.iter().take(5) {
            let side = match trade.side() {
                Some(Side::Buy) => "BUY ".green(),
                Some(Side::Sell) => "SELL".red(),
                None => trade.trade_type.normal(),
            };
            println!("  {} {} @ {}", side, trade.amount, trade.price);
        }
    }

    println!();
    println!("{}", "═".repeat(60).cyan());
    Ok(())
}
