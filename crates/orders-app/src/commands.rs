use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use orders_client::{ClientConfig, OrdersClient};
use orders_store::StoredCredential;
use orders_types::domain::order::{NewOrder, OrderChanges, PageQuery};
use orders_types::ports::credentials::TokenStore;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session token
    Login { username: String, password: String },
    /// Forget the stored session token
    Logout,
    /// Work with orders (requires login)
    #[command(subcommand)]
    Orders(OrdersCommand),
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    List {
        #[arg(long)]
        page: Option<u64>,
        #[arg(long)]
        page_size: Option<u64>,
    },
    /// JSON object with every order field
    Create { json: String },
    /// JSON object with the fields to change
    Update { id: i32, json: String },
    Delete { id: i32 },
}

pub struct Session<S> {
    client: OrdersClient,
    store: S,
    token_key: String,
}

impl<S: TokenStore + Clone> Session<S> {
    pub fn new(config: &ClientConfig, store: S) -> anyhow::Result<Self> {
        let credentials = StoredCredential::new(store.clone(), config.token_key.clone());
        let client = OrdersClient::from_config(config, Some(Arc::new(credentials)))?;
        Ok(Self {
            client,
            store,
            token_key: config.token_key.clone(),
        })
    }

    /// Runs one command and returns what should be printed.
    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Login { username, password } => {
                let res = self.client.auth().login(&username, &password).await?;
                self.store.set(&self.token_key, &res.token).await?;
                tracing::info!(%username, "session stored");
                Ok(format!("logged in as {username}"))
            }
            Command::Logout => {
                if self.store.remove(&self.token_key).await? {
                    Ok("logged out".into())
                } else {
                    Ok("no stored session".into())
                }
            }
            Command::Orders(command) => self.run_orders(command).await,
        }
    }

    async fn run_orders(&self, command: OrdersCommand) -> anyhow::Result<String> {
        let orders = self.client.orders();
        match command {
            OrdersCommand::List { page, page_size } => {
                let listed = if page.is_none() && page_size.is_none() {
                    orders.get_orders().await?
                } else {
                    orders.get_orders_page(PageQuery { page, page_size }).await?
                };
                Ok(serde_json::to_string_pretty(&listed)?)
            }
            OrdersCommand::Create { json } => {
                let new_order: NewOrder =
                    serde_json::from_str(&json).context("invalid order json")?;
                let created = orders.create_order(&new_order).await?;
                Ok(serde_json::to_string_pretty(&created)?)
            }
            OrdersCommand::Update { id, json } => {
                let changes: OrderChanges =
                    serde_json::from_str(&json).context("invalid order changes json")?;
                if changes.is_empty() {
                    anyhow::bail!("nothing to update");
                }
                let updated = orders.update_order(id, &changes).await?;
                Ok(serde_json::to_string_pretty(&updated)?)
            }
            OrdersCommand::Delete { id } => {
                orders.delete_order(id).await?;
                Ok(format!("deleted order {id}"))
            }
        }
    }
}
