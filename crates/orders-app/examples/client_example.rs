///  To run against a live backend:
///  ORDERS_API_BASE_URL=http://127.0.0.1:8000/api cargo r --example client_example -- <username> <password>
use std::sync::Arc;

use orders_client::{ApiError, ClientConfig, ErrorKind, OrdersClient};
use orders_store::{build_store, StoredCredential, DEFAULT_SQLITE_URL};
use orders_types::domain::order::{NewOrder, OrderChanges};
use orders_types::ports::credentials::TokenStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let mut args = std::env::args().skip(1);
    let username = args.next().unwrap_or_else(|| "admin".into());
    let password = args.next().unwrap_or_else(|| "admin".into());

    let config = ClientConfig::from_env()?;
    let token_db = std::env::var("ORDERS_TOKEN_DB").unwrap_or_else(|_| DEFAULT_SQLITE_URL.into());
    let store = build_store(Some(&token_db)).await?;
    let credential = StoredCredential::new(store.clone(), config.token_key.clone());
    let client = OrdersClient::from_config(&config, Some(Arc::new(credential)))?;

    // Unauthenticated on purpose: the backend should refuse.
    match client.orders().get_orders().await {
        Err(err) if err.kind() == ErrorKind::Http => {
            println!("Listing before login refused with status {:?}", err.status())
        }
        Err(err) => return Err(err.into()),
        Ok(page) => println!("Backend allowed anonymous listing ({} orders)", page.total),
    }

    let login = client.auth().login(&username, &password).await?;
    store.set(&config.token_key, &login.token).await?;
    println!("Logged in as {username}");

    let created = client
        .orders()
        .create_order(&NewOrder {
            customer_name: "Example".into(),
            phone: "555-0100".into(),
            prescription: "-0.75 / -0.50".into(),
            frame_type: "titanium".into(),
            lens_type: "single vision".into(),
            total_amount: 189.0,
            status: "pending".into(),
        })
        .await?;
    println!("Created order id={}", created.id);

    let updated = client
        .orders()
        .update_order(created.id, &OrderChanges::status("ready"))
        .await?;
    println!("Updated status={} for id {}", updated.status, updated.id);

    let page = client.orders().get_orders().await?;
    println!("Listed {} of {} orders", page.items.len(), page.total);

    client.orders().delete_order(created.id).await?;
    println!("Deleted order {}", created.id);

    match client.orders().delete_order(created.id).await {
        Err(ApiError::Http { status, message, .. }) => {
            println!("Second delete refused: {status} {message}")
        }
        other => println!("Second delete returned {other:?}"),
    }
    Ok(())
}
