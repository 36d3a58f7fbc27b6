//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Tell API errors from client-side (SDK) errors
//! - Read the server's error code and message
//! - Bound a call with a timeout
//!
//! Run with: `DURIANPAY_API_KEY=dp_test_... cargo run --example error_handling`

use durianpay::resources::payments::FetchPaymentOptions;
use durianpay::{Client, Error, SDK_INTERNAL_ERROR};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("durianpay=info")
        .init();

    let client = Client::from_env()?;

    println!("=== Example 1: API errors ===");
    match client
        .payments()
        .fetch_by_id("pay_does_not_exist", &FetchPaymentOptions::default())
        .await
    {
        Ok(payment) => println!("Unexpected success: {:?}", payment),
        Err(Error::Api {
            status,
            message,
            error_code,
            details,
        }) => {
            println!("API error!");
            println!("  Status: {}", status);
            println!("  Code: {}", error_code);
            println!("  Message: {}", message);
            for field in details {
                println!("  {}: {}", field.field, field.message);
            }
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: SDK errors ===");
    let unreachable = Client::builder()
        .api_key("dp_test_unused")
        .base_url("http://127.0.0.1:1")?
        .build()?;
    match unreachable.disbursements().fetch_balance().await {
        Ok(_) => println!("Unexpected success"),
        Err(e) if e.error_code() == SDK_INTERNAL_ERROR => {
            println!("SDK error, no HTTP status ({:?})", e.status());
            println!("  Message: {}", e.message());
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Bounding a call ===");
    match tokio::time::timeout(
        Duration::from_millis(50),
        client.disbursements().fetch_banks(),
    )
    .await
    {
        Ok(Ok(banks)) => println!("Got {} banks in time", banks.len()),
        Ok(Err(e)) => println!("Call failed: {}", e),
        Err(_) => println!("Gave up after 50ms; the request was dropped"),
    }

    Ok(())
}
