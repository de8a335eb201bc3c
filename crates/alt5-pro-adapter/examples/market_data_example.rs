/*
[INPUT]:  Instrument identifier (e.g., "xrp_usd")
[OUTPUT]: Market data (instruments, ticker, depth, trades)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use alt5_pro_adapter::*;

/// Example: Query market data (no authentication required)
///
/// Market data endpoints are public; credentials are only needed to build the client.
#[tokio::main]
async fn main() {
    println!("=== ALT5 Pro Market Data Example ===\n");

    let client = match Alt5Client::new(Credentials::api_key("", "")) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no auth required for public endpoints)\n");

    let instrument = "xrp_usd";

    println!("Listing instruments...");
    match client.get_instruments().await {
        Ok(instruments) => println!("✓ {} instruments", instruments.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying ticker for {}...", instrument);
    match client.get_ticker(instrument).await {
        Ok(ticker) => println!("✓ Ticker: {:?}", ticker),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying order book for {}...", instrument);
    match client.get_order_book(instrument).await {
        Ok(book) => println!(
            "✓ Best bid: {:?}, best ask: {:?}",
            book.best_bid(),
            book.best_ask()
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying recent trades for {}...", instrument);
    match client.get_recent_trades(instrument).await {
        Ok(trades) => println!("✓ {} recent trades", trades.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
