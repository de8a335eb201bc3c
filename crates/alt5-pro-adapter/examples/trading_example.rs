/*
[INPUT]:  API key pair from the environment and order parameters
[OUTPUT]: Order creation/cancellation responses
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use alt5_pro_adapter::*;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Example: Trading operations with API key signing
///
/// Places a far-from-market limit order and cancels it right away.
#[tokio::main]
async fn main() {
    println!("=== ALT5 Pro Trading Example ===\n");

    let (Ok(public_key), Ok(private_key)) = (
        std::env::var("ALT5_PUBLIC_KEY"),
        std::env::var("ALT5_PRIVATE_KEY"),
    ) else {
        eprintln!("Set ALT5_PUBLIC_KEY and ALT5_PRIVATE_KEY first");
        return;
    };

    let client = match Alt5Client::new(Credentials::api_key(public_key, private_key)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    let account_id = match client.get_accounts().await {
        Ok(outcome) => match outcome.resolution() {
            AccountResolution::Resolved(id) => id,
            other => {
                eprintln!("✗ No account: {:?}", other);
                return;
            }
        },
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };
    println!("✓ Account: {}", account_id);

    let order = NewOrder::limit(
        "xrp_usd",
        Side::Buy,
        Decimal::ONE,
        Decimal::from_str("0.01").unwrap_or_default(),
    );
    println!("\nPlacing {:?}", order);

    let created = match client.create_order(&account_id, order).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };
    let Some(order_id) = created.id_field(&["id", "orderId"]) else {
        println!("✗ No order id returned: {}", created.data.to_text());
        return;
    };
    println!("✓ Order {} placed", order_id);

    match client.cancel_order(&account_id, &order_id).await {
        Ok(response) if response.success => println!("✓ Order cancelled"),
        Ok(response) => println!("✗ Cancel failed (status {})", response.status),
        Err(e) => eprintln!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
