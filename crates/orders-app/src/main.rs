mod commands;

use clap::Parser;
use commands::{Command, Session};
use orders_client::{ApiError, ClientConfig};
use orders_store::{build_store, DEFAULT_SQLITE_URL};

#[derive(Debug, Parser)]
#[command(name = "orders", version, about = "Command-line client for the orders API")]
struct Cli {
    /// Overrides ORDERS_API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for ORDERS_API_* / ORDERS_TOKEN_DB when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let token_db = std::env::var("ORDERS_TOKEN_DB").unwrap_or_else(|_| DEFAULT_SQLITE_URL.into());
    let store = build_store(Some(&token_db)).await?;
    let session = Session::new(&config, store)?;

    match session.run(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => match err.downcast_ref::<ApiError>() {
            Some(ApiError::Http {
                status, message, ..
            }) => anyhow::bail!("server responded {status}: {message}"),
            _ => Err(err),
        },
    }
}
