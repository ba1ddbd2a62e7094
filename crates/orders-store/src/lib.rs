#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a store feature: `memory` or `sqlite`.");

use async_trait::async_trait;
use orders_types::ports::credentials::{CredentialProvider, StoreError, TokenStore};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Key the session token is stored under unless configured otherwise.
pub const DEFAULT_TOKEN_KEY: &str = "token";

pub const DEFAULT_SQLITE_URL: &str = "sqlite://.orders/session.db";

#[derive(Clone)]
pub enum Store {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteStore),
}

pub async fn build_store(url: Option<&str>) -> anyhow::Result<Store> {
    Store::build(url).await
}

impl Store {
    /// Opens the sqlite store when a URL is given, otherwise falls back to
    /// whichever backend is compiled in.
    pub async fn build(url: Option<&str>) -> anyhow::Result<Self> {
        #[cfg(feature = "sqlite")]
        if let Some(url) = url {
            return Ok(Self::Sqlite(sqlite::SqliteStore::new(url).await?));
        }
        Self::fallback(url).await
    }

    #[cfg(feature = "memory")]
    async fn fallback(url: Option<&str>) -> anyhow::Result<Self> {
        if let Some(url) = url {
            tracing::warn!(url, "sqlite support not compiled in; token kept in memory");
        }
        Ok(Self::Memory(memory::InMemoryStore::new()))
    }

    #[cfg(not(feature = "memory"))]
    async fn fallback(url: Option<&str>) -> anyhow::Result<Self> {
        let url = url.unwrap_or(DEFAULT_SQLITE_URL);
        Ok(Self::Sqlite(sqlite::SqliteStore::new(url).await?))
    }
}

#[async_trait]
impl TokenStore for Store {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(store) => store.get(key).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(store) => store.set(key, value).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(store) => store.remove(key).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.remove(key).await,
        }
    }
}

/// Reads the bearer token from one named key of a [`TokenStore`].
#[derive(Clone)]
pub struct StoredCredential<S> {
    store: S,
    key: String,
}

impl<S: TokenStore> StoredCredential<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl<S: TokenStore> CredentialProvider for StoredCredential<S> {
    async fn current(&self) -> Result<Option<String>, StoreError> {
        // An empty value counts as logged out.
        Ok(self
            .store
            .get(&self.key)
            .await?
            .filter(|token| !token.is_empty()))
    }
}
