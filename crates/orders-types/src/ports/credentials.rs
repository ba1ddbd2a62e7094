use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store error: {0}")]
    Backend(String),
}

/// Persistent client-side key-value storage, the home of the session token.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Returns whether a value was present.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// Source of the bearer token attached to authenticated requests.
///
/// `Ok(None)` means "not logged in" and is not an error: callers send the
/// request without an `Authorization` header.
#[async_trait]
pub trait CredentialProvider: Send + Sync + 'static {
    async fn current(&self) -> Result<Option<String>, StoreError>;
}
