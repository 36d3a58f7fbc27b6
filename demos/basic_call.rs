//! Basic example: check the balance, list banks and validate an account.
//!
//! This example shows how to:
//! - Create a client from `DURIANPAY_API_KEY`
//! - Make a few read-only calls
//! - Validate a bank account with an idempotency key
//!
//! Run with: `DURIANPAY_API_KEY=dp_test_... cargo run --example basic_call`

use durianpay::resources::disbursements::ValidateDisbursementPayload;
use durianpay::resources::orders::FetchOrdersOptions;
use durianpay::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("durianpay=debug,basic_call=info")
        .init();

    let client = Client::from_env()?;

    println!("=== Balance ===");
    let balance = client.disbursements().fetch_balance().await?;
    println!("Available: {}", balance.balance);
    println!();

    println!("=== Banks ===");
    let banks = client.disbursements().fetch_banks().await?;
    for bank in banks.iter().filter(|bank| bank.can_disburse).take(5) {
        println!("{:>6}  {}", bank.code, bank.name);
    }
    println!();

    println!("=== Account validation ===");
    let validation = client
        .disbursements()
        .validate(&ValidateDisbursementPayload {
            idempotency_key: "basic-call-1".to_string(),
            account_number: "8808123456".to_string(),
            bank_code: "bca".to_string(),
        })
        .await?;
    println!(
        "{} at {}: {}",
        validation.account_number, validation.bank_code, validation.status
    );
    println!();

    println!("=== Recent orders ===");
    let orders = client
        .orders()
        .fetch(&FetchOrdersOptions {
            limit: Some(5),
            ..Default::default()
        })
        .await?;
    println!("{} orders in total", orders.total);
    for order in &orders.orders {
        println!("{}  {} {}  {}", order.id, order.amount, order.currency, order.status);
    }

    Ok(())
}
